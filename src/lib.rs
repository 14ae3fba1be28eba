//! pkghead library
//!
//! A hand-written lexer and recursive-descent parser for source headers made of
//! one `package` declaration followed by `import` declarations.

pub mod ast;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use ast::{CompilationUnit, Node, NodeKind};
pub use driver::{Driver, SourceState};
pub use error::{LexerError, ParseError, ParserError, PkgError, PkgResult};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse, ParseResult, Parser};
