//! Parser module
//!
//! Turns header source into an AST by recursive descent with one token of
//! lookahead. The grammar:
//!
//! ```text
//! CompilationUnit := PackageDecl ImportDecl+
//! PackageDecl     := "package" Identifier
//! ImportDecl      := "import" ImportGroup
//! ImportGroup     := ImportSpec | "(" ImportSpec+ ")"
//! ImportSpec      := [Identifier] StringLiteral
//! ```
//!
//! Import declarations have no terminator; they repeat until end of input.
//! The first lexical or syntax error ends the parse.

mod decl_parser;
mod parser_impl;

pub use parser_impl::Parser;

use crate::ast::CompilationUnit;

pub use crate::error::ParseError;
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse a complete header from an in-memory buffer
pub fn parse(source: &str) -> ParseResult<CompilationUnit> {
    Parser::new(source).parse()
}
