//! Hand-written scanner

use crate::ast::Span;

use super::literal_parser::unescape_string;
use super::token::{is_word_char, InvalidToken, LexemeTable, Position, Token, TokenKind};

/// Pull-based lexer over an in-memory source buffer.
///
/// Each call to [`Lexer::next_token`] skips whitespace and comments, then
/// classifies exactly one token. Once the end of the buffer is reached every
/// further call yields `EndOfInput` again.
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    /// Byte offset where each line starts; `line_starts[0]` is always 0
    line_starts: Vec<usize>,
    table: LexemeTable,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer using the default `package`/`import`/bracket table
    pub fn new(source: &'a str) -> Self {
        Self::with_table(source, LexemeTable::default())
    }

    /// Create a lexer with a custom lexeme table
    pub fn with_table(source: &'a str, table: LexemeTable) -> Self {
        Self {
            source,
            offset: 0,
            line_starts: vec![0],
            table,
            finished: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current scan offset in bytes
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn table(&self) -> &LexemeTable {
        &self.table
    }

    /// Start offsets of every line seen so far
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    /// Position of the scan cursor
    pub fn current_position(&self) -> Position {
        let line = self.line_starts.len() - 1;
        Position::new(line, self.offset - self.line_starts[line])
    }

    /// Position of an offset the lexer has already scanned past
    pub fn position_of(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line, offset - self.line_starts[line])
    }

    /// Text of a zero-based line without its terminator
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line)?;
        let end = self.source[start..]
            .find('\n')
            .map_or(self.source.len(), |idx| start + idx);
        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Scan the next token
    pub fn next_token(&mut self) -> Token {
        if let Some(unterminated) = self.skip_trivia() {
            return unterminated;
        }

        let start = self.offset;
        let position = self.current_position();

        let Some(first) = self.peek_char() else {
            self.finished = true;
            return Token::new(TokenKind::EndOfInput, Span::new(start, start), position);
        };

        if first == '"' {
            return self.scan_string(start, position);
        }

        if let Some((len, kind)) = self.table.lookup(self.rest()) {
            self.advance_by(len);
            return Token::new(kind, Span::new(start, self.offset), position);
        }

        if first.is_alphabetic() {
            self.eat_while(is_word_char);
            let name = self.source[start..self.offset].to_owned();
            return Token::new(TokenKind::Identifier, Span::new(start, self.offset), position)
                .with_value(name);
        }

        if first.is_numeric() {
            self.eat_while(is_word_char);
            return Token::invalid(
                InvalidToken::MalformedWord,
                Span::new(start, self.offset),
                position,
            );
        }

        self.bump();
        Token::invalid(
            InvalidToken::UnexpectedCharacter(first),
            Span::new(start, self.offset),
            position,
        )
    }

    /// Collect every token up to and including the first `EndOfInput`
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    /// Skip whitespace and comments.
    ///
    /// Returns an `Invalid` token when a block comment runs off the end of the
    /// buffer.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            self.eat_while(char::is_whitespace);
            let rest = self.rest();

            if rest.starts_with("//") {
                self.eat_while(|ch| ch != '\n');
            } else if rest.starts_with("/*") {
                let start = self.offset;
                let position = self.current_position();
                self.advance_by(2);
                match self.rest().find("*/") {
                    Some(idx) => self.advance_by(idx + 2),
                    None => {
                        self.advance_by(self.source.len() - self.offset);
                        return Some(Token::invalid(
                            InvalidToken::UnterminatedComment,
                            Span::new(start, self.offset),
                            position,
                        ));
                    }
                }
            } else {
                return None;
            }
        }
    }

    fn scan_string(&mut self, start: usize, position: Position) -> Token {
        self.bump(); // opening quote

        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    return Token::invalid(
                        InvalidToken::UnterminatedString,
                        Span::new(start, self.offset),
                        position,
                    );
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    if matches!(self.peek_char(), Some(ch) if ch != '\n') {
                        self.bump();
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        let body = &self.source[start + 1..self.offset - 1];
        Token::new(TokenKind::StringLiteral, Span::new(start, self.offset), position)
            .with_value(unescape_string(body))
    }

    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line_starts.push(self.offset);
        }
        Some(ch)
    }

    fn advance_by(&mut self, len: usize) {
        let target = self.offset + len;
        while self.offset < target && self.bump().is_some() {}
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.bump();
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}
