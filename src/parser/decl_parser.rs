//! Package and import declaration productions

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::TokenKind;

use super::{ParseResult, Parser};

impl Parser<'_> {
    /// CompilationUnit := PackageDecl ImportDecl+
    pub(super) fn parse_compilation_unit(&mut self) -> ParseResult<CompilationUnit> {
        let package = self.parse_package_decl()?;

        let mut imports = vec![self.parse_import_decl()?];
        while !self.check(TokenKind::EndOfInput)? {
            imports.push(self.parse_import_decl()?);
        }

        let span = self.span_from(package.span.start);
        Ok(CompilationUnit {
            package,
            imports,
            span,
        })
    }

    /// PackageDecl := "package" Identifier
    fn parse_package_decl(&mut self) -> ParseResult<PackageDecl> {
        let start = self.expect(TokenKind::PackageKeyword)?.span.start;
        let name = self.expect_identifier()?;
        Ok(PackageDecl {
            name,
            span: self.span_from(start),
        })
    }

    /// ImportDecl := "import" ImportGroup
    fn parse_import_decl(&mut self) -> ParseResult<ImportDecl> {
        match self.current_kind()? {
            TokenKind::ImportKeyword => {}
            TokenKind::PackageKeyword => {
                return Err(ParserError::DuplicatePackage {
                    span: self.current.span,
                    position: self.current.position,
                }
                .into());
            }
            _ => return Err(self.unexpected(TokenKind::ImportKeyword.describe())),
        }
        let start = self.advance().span.start;

        if !self.check(TokenKind::OpenBracket)? {
            let spec = self.parse_import_spec()?;
            return Ok(ImportDecl {
                specs: vec![spec],
                grouped: false,
                span: self.span_from(start),
            });
        }

        let specs = self.parse_import_group()?;
        Ok(ImportDecl {
            specs,
            grouped: true,
            span: self.span_from(start),
        })
    }

    /// "(" ImportSpec+ ")"
    fn parse_import_group(&mut self) -> ParseResult<Vec<ImportSpec>> {
        self.expect(TokenKind::OpenBracket)?;

        if self.check(TokenKind::CloseBracket)? {
            return Err(ParserError::EmptyImportGroup {
                span: self.current.span,
                position: self.current.position,
            }
            .into());
        }

        let mut specs = Vec::new();
        loop {
            match self.current_kind()? {
                TokenKind::CloseBracket => break,
                TokenKind::Identifier | TokenKind::StringLiteral => {
                    specs.push(self.parse_import_spec()?);
                }
                _ => return Err(self.unexpected("import spec or ')'")),
            }
        }

        self.expect(TokenKind::CloseBracket)?;
        Ok(specs)
    }

    /// ImportSpec := [Identifier] StringLiteral
    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let start = self.current.span.start;

        let alias = match self.current_kind()? {
            TokenKind::Identifier => Some(self.expect_identifier()?),
            TokenKind::StringLiteral => None,
            _ => return Err(self.unexpected("import alias or string literal")),
        };
        let path = self.expect_string()?;

        Ok(ImportSpec {
            alias,
            path,
            span: self.span_from(start),
        })
    }
}
