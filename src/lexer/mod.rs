//! Lexical analysis for package/import headers.
//!
//! The lexer turns a source buffer into tokens one at a time. It is pulled by
//! the parser rather than run as a separate pass, and it tracks both byte
//! offsets and zero-based line/column positions for diagnostics.

#[allow(clippy::module_inception)]
mod lexer;
mod literal_parser;
mod token;

pub use lexer::Lexer;
pub use literal_parser::{escape_string, unescape_string};
pub use token::{InvalidToken, LexemeTable, Position, Token, TokenKind};
