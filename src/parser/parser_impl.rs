//! Parser state and token-level helpers

use log::{debug, trace};

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Lexer, Token, TokenKind};

use super::{ParseError, ParseResult};

/// Recursive-descent parser with a single token of lookahead.
///
/// The parser owns the lexer and pulls one token at a time into `current`;
/// there is no separate tokenization pass.
pub struct Parser<'a> {
    pub(super) lexer: Lexer<'a>,
    pub(super) current: Token,
    /// End offset of the last consumed token
    pub(super) prev_end: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    /// Drive an already configured lexer
    pub fn from_lexer(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        trace!("lookahead {}", current);
        Self {
            lexer,
            current,
            prev_end: 0,
        }
    }

    /// Parse a complete header
    pub fn parse(&mut self) -> ParseResult<CompilationUnit> {
        debug!("parsing header of {} bytes", self.lexer.source().len());
        let unit = self.parse_compilation_unit()?;
        debug!(
            "parsed package {} with {} import declaration(s)",
            unit.package.name.name,
            unit.imports.len()
        );
        Ok(unit)
    }

    pub fn source(&self) -> &'a str {
        self.lexer.source()
    }

    // ==================== Utility methods ====================

    /// Current token, or its lexical error if the lexer could not classify it
    pub(super) fn current(&self) -> ParseResult<&Token> {
        match self.current.lex_error() {
            Some(e) => Err(e.into()),
            None => Ok(&self.current),
        }
    }

    pub(super) fn current_kind(&self) -> ParseResult<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// Check the current token kind without consuming it
    pub(super) fn check(&self, kind: TokenKind) -> ParseResult<bool> {
        Ok(self.current_kind()? == kind)
    }

    /// Move to the next token, returning the one just consumed
    pub(super) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        trace!("lookahead {}", next);
        let consumed = std::mem::replace(&mut self.current, next);
        self.prev_end = consumed.span.end;
        consumed
    }

    /// Consume a token of the given kind
    pub(super) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind)? {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    pub(super) fn expect_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(Identifier {
            name: token.value.unwrap_or_default(),
            span: token.span,
        })
    }

    pub(super) fn expect_string(&mut self) -> ParseResult<StringLiteral> {
        let token = self.expect(TokenKind::StringLiteral)?;
        Ok(StringLiteral {
            value: token.value.unwrap_or_default(),
            span: token.span,
        })
    }

    /// Span from `start` to the end of the last consumed token
    pub(super) fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    /// Syntax error describing the current token
    pub(super) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParserError::UnexpectedToken {
            expected: expected.into(),
            found: self.current.kind,
            text: self.current.text(self.lexer.source()).to_string(),
            span: self.current.span,
            position: self.current.position,
        }
        .into()
    }
}
