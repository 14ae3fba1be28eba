//! Token definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ast::Span;
use crate::error::LexerError;

/// Token kinds of the header grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    PackageKeyword,
    ImportKeyword,
    OpenBracket,
    CloseBracket,
    Identifier,
    StringLiteral,
    EndOfInput,
    Invalid,
}

impl TokenKind {
    /// Human readable name used in diagnostics
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::PackageKeyword => "'package'",
            TokenKind::ImportKeyword => "'import'",
            TokenKind::OpenBracket => "'('",
            TokenKind::CloseBracket => "')'",
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string literal",
            TokenKind::EndOfInput => "end of input",
            TokenKind::Invalid => "invalid token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Zero-based line and column (in bytes) of a token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Why the lexer produced an `Invalid` token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidToken {
    /// A character that cannot start any token
    UnexpectedCharacter(char),
    /// A `"` with no closing quote before the end of the line
    UnterminatedString,
    /// A `/*` with no closing `*/` before the end of input
    UnterminatedComment,
    /// An alphanumeric word that starts with a digit, e.g. `123`
    MalformedWord,
}

/// A classified, positioned slice of source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub position: Position,
    /// Decoded text for identifiers and string literals
    pub value: Option<String>,
    /// Set only when `kind` is `Invalid`
    pub invalid: Option<InvalidToken>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, position: Position) -> Self {
        Self {
            kind,
            span,
            position,
            value: None,
            invalid: None,
        }
    }

    pub fn with_value(mut self, value: String) -> Self {
        self.value = Some(value);
        self
    }

    pub fn invalid(problem: InvalidToken, span: Span, position: Position) -> Self {
        Self {
            kind: TokenKind::Invalid,
            span,
            position,
            value: None,
            invalid: Some(problem),
        }
    }

    /// Length of the token in bytes
    pub fn len(&self) -> usize {
        self.span.end - self.span.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw source text covered by this token
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }

    /// The lexical error carried by an `Invalid` token.
    ///
    /// Digit-led words are lexically whole and are left to the parser to
    /// report as misplaced tokens, so they yield `None` here.
    pub fn lex_error(&self) -> Option<LexerError> {
        let (span, position) = (self.span, self.position);
        match self.invalid? {
            InvalidToken::UnexpectedCharacter(ch) => Some(LexerError::UnexpectedCharacter {
                ch,
                span,
                position,
            }),
            InvalidToken::UnterminatedString => {
                Some(LexerError::UnterminatedString { span, position })
            }
            InvalidToken::UnterminatedComment => {
                Some(LexerError::UnterminatedComment { span, position })
            }
            InvalidToken::MalformedWord => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::Identifier, Some(name)) => write!(f, "Identifier({})", name),
            (TokenKind::StringLiteral, Some(value)) => write!(f, "StringLiteral({:?})", value),
            (kind, _) => write!(f, "{:?}", kind),
        }?;
        write!(f, " @ {} [{}..{}]", self.position, self.span.start, self.span.end)
    }
}

/// Ordered set of fixed lexemes mapped to their token kinds.
///
/// Entries are tried in order; the first literal that matches wins. Literals
/// ending in an identifier character only match on a word boundary, so
/// `importable` is never split into `import` + `able`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexemeTable {
    entries: Vec<(&'static str, TokenKind)>,
}

impl LexemeTable {
    pub fn new(entries: Vec<(&'static str, TokenKind)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(&'static str, TokenKind)] {
        &self.entries
    }

    /// First entry matching the start of `input`, as `(length, kind)`
    pub fn lookup(&self, input: &str) -> Option<(usize, TokenKind)> {
        self.entries.iter().find_map(|&(literal, kind)| {
            if !input.starts_with(literal) {
                return None;
            }
            let wordlike = literal.chars().last().is_some_and(is_word_char);
            let bounded = input[literal.len()..]
                .chars()
                .next()
                .map_or(true, |next| !is_word_char(next));
            (!wordlike || bounded).then_some((literal.len(), kind))
        })
    }
}

impl Default for LexemeTable {
    fn default() -> Self {
        Self::new(vec![
            ("package", TokenKind::PackageKeyword),
            ("import", TokenKind::ImportKeyword),
            ("(", TokenKind::OpenBracket),
            (")", TokenKind::CloseBracket),
        ])
    }
}

/// Characters allowed after the first character of an identifier
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}
