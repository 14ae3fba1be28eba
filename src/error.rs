//! Error types and diagnostic reporting
//!
//! Lexer and parser failures are plain values returned through `Result`;
//! the driver turns them into `codespan-reporting` diagnostics.

use crate::ast::Span;
use crate::lexer::{Position, TokenKind};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PkgError {
    /// Lexical or syntactic failure
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Reading the source failed
    #[error("file error: {0}")]
    Io(String),
}

/// The error returned by `parse`: the first lexical or syntax error found
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("lexical error: {0}")]
    Lexer(#[from] LexerError),

    #[error("syntax error: {0}")]
    Syntax(#[from] ParserError),
}

/// Malformed character sequences
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerError {
    #[error("unexpected character {ch:?} at {position}")]
    UnexpectedCharacter {
        ch: char,
        span: Span,
        position: Position,
    },

    #[error("unterminated string literal at {position}")]
    UnterminatedString { span: Span, position: Position },

    #[error("unterminated block comment at {position}")]
    UnterminatedComment { span: Span, position: Position },
}

/// Tokens that do not fit the production being matched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("expected {expected}, found {} at {position}", found_text(.found, .text))]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        text: String,
        span: Span,
        position: Position,
    },

    #[error("import group needs at least one import spec at {position}")]
    EmptyImportGroup { span: Span, position: Position },

    #[error("duplicate package declaration at {position}")]
    DuplicatePackage { span: Span, position: Position },
}

fn found_text(found: &TokenKind, text: &str) -> String {
    if text.is_empty() {
        found.to_string()
    } else {
        format!("{} `{}`", found, text)
    }
}

impl LexerError {
    pub fn span(&self) -> Span {
        match self {
            LexerError::UnexpectedCharacter { span, .. }
            | LexerError::UnterminatedString { span, .. }
            | LexerError::UnterminatedComment { span, .. } => *span,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            LexerError::UnexpectedCharacter { position, .. }
            | LexerError::UnterminatedString { position, .. }
            | LexerError::UnterminatedComment { position, .. } => *position,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LexerError::UnexpectedCharacter { .. } => "no token starts with this character",
            LexerError::UnterminatedString { .. } => "string is not closed on this line",
            LexerError::UnterminatedComment { .. } => "comment is never closed",
        }
    }
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span, .. }
            | ParserError::EmptyImportGroup { span, .. }
            | ParserError::DuplicatePackage { span, .. } => *span,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParserError::UnexpectedToken { position, .. }
            | ParserError::EmptyImportGroup { position, .. }
            | ParserError::DuplicatePackage { position, .. } => *position,
        }
    }

    fn label(&self) -> String {
        match self {
            ParserError::UnexpectedToken { expected, .. } => format!("expected {} here", expected),
            ParserError::EmptyImportGroup { .. } => "group closed before any import".to_string(),
            ParserError::DuplicatePackage { .. } => {
                "a header declares exactly one package".to_string()
            }
        }
    }
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lexer(e) => e.span(),
            ParseError::Syntax(e) => e.span(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::Lexer(e) => e.position(),
            ParseError::Syntax(e) => e.position(),
        }
    }

    /// Byte offset of the offending token
    pub fn offset(&self) -> usize {
        self.span().start
    }

    /// Zero-based line of the offending token
    pub fn line(&self) -> usize {
        self.position().line
    }

    /// Zero-based column of the offending token
    pub fn column(&self) -> usize {
        self.position().column
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexer(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax(_))
    }
}

/// An error bound to a file registered in a `SimpleFiles` database
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: PkgError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: PkgError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// Convert into a codespan-reporting diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        match &self.error {
            PkgError::Parse(ParseError::Lexer(e)) => Diagnostic::error()
                .with_message("lexical error")
                .with_labels(vec![self.primary(e.span()).with_message(e.label())])
                .with_notes(vec![e.to_string()]),
            PkgError::Parse(ParseError::Syntax(e)) => Diagnostic::error()
                .with_message("syntax error")
                .with_labels(vec![self.primary(e.span()).with_message(e.label())])
                .with_notes(vec![e.to_string()]),
            PkgError::Io(message) => Diagnostic::error().with_message(format!("file error: {}", message)),
        }
    }

    fn primary(&self, span: Span) -> Label<usize> {
        Label::primary(self.file_id, span.start..span.end)
    }
}

/// Result type alias
pub type PkgResult<T> = Result<T, PkgError>;

impl From<std::io::Error> for PkgError {
    fn from(e: std::io::Error) -> Self {
        PkgError::Io(e.to_string())
    }
}

impl From<LexerError> for PkgError {
    fn from(e: LexerError) -> Self {
        PkgError::Parse(ParseError::Lexer(e))
    }
}

impl From<ParserError> for PkgError {
    fn from(e: ParserError) -> Self {
        PkgError::Parse(ParseError::Syntax(e))
    }
}
