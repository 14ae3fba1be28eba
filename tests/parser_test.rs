//! Parser tests
//!
//! Grammar coverage for package/import headers, including error positions.

use pretty_assertions::assert_eq;
use test_case::test_case;

use pkghead::ast::*;
use pkghead::error::{LexerError, ParserError};
use pkghead::lexer::{Position, TokenKind};
use pkghead::parser::{parse, ParseError, Parser};

/// Parse and expect success
fn assert_parse_success(source: &str) -> CompilationUnit {
    parse(source).expect("Parsing should succeed")
}

/// Parse and expect failure
fn assert_parse_error(source: &str) -> ParseError {
    parse(source).expect_err("Parsing should fail")
}

/// Kind and child-count shape of a tree, in pre-order
fn shape(unit: &CompilationUnit) -> Vec<(NodeKind, usize, Option<String>)> {
    let mut out = Vec::new();
    unit.as_node().walk(&mut |node, _| {
        out.push((node.kind(), node.children().len(), node.value().map(str::to_string)));
    });
    out
}

#[test]
fn test_single_import() {
    let ast = assert_parse_success("package main\nimport \"fmt\"");

    assert_eq!(ast.package.name.name, "main");
    assert_eq!(ast.imports.len(), 1);
    assert!(!ast.imports[0].grouped);
    assert_eq!(ast.imports[0].specs.len(), 1);
    assert_eq!(ast.imports[0].specs[0].alias, None);
    assert_eq!(ast.imports[0].specs[0].path.value, "fmt");
}

#[test]
fn test_single_import_tree_shape() {
    let ast = assert_parse_success("package main\nimport \"fmt\"");

    assert_eq!(
        shape(&ast),
        vec![
            (NodeKind::Root, 2, None),
            (NodeKind::PackageDecl, 1, None),
            (NodeKind::Identifier, 0, Some("main".to_string())),
            (NodeKind::ImportDecls, 1, None),
            (NodeKind::ImportDecl, 1, None),
            (NodeKind::ImportSpec, 1, None),
            (NodeKind::StringLiteral, 0, Some("fmt".to_string())),
        ]
    );
}

#[test]
fn test_grouped_imports_with_alias() {
    let ast = assert_parse_success("package main\nimport (\n\t\"fmt\"\n\tm \"math\"\n)");

    assert_eq!(ast.imports.len(), 1);
    let decl = &ast.imports[0];
    assert!(decl.grouped);
    assert_eq!(decl.specs.len(), 2);
    assert_eq!(decl.specs[0].alias, None);
    assert_eq!(decl.specs[0].path.value, "fmt");

    let alias = decl.specs[1].alias.as_ref().expect("second spec has an alias");
    assert_eq!(alias.name, "m");
    assert_eq!(decl.specs[1].path.value, "math");
}

#[test]
fn test_multiple_import_declarations() {
    let source = r#"
        package server

        import "net"
        import log "logging"
        import (
            "os"
            io "bufio"
        )
    "#;
    let ast = assert_parse_success(source);

    assert_eq!(ast.package.name.name, "server");
    assert_eq!(ast.imports.len(), 3);
    let paths: Vec<_> = ast.specs().map(|s| s.path.value.as_str()).collect();
    assert_eq!(paths, vec!["net", "logging", "os", "bufio"]);
    let aliases: Vec<_> = ast
        .specs()
        .map(|s| s.alias.as_ref().map(|a| a.name.as_str()))
        .collect();
    assert_eq!(aliases, vec![None, Some("log"), None, Some("io")]);
}

#[test]
fn test_comments_between_declarations() {
    let source = "/* header */\npackage main // the package\n// imports follow\nimport /* inline */ \"fmt\"\n";
    let ast = assert_parse_success(source);
    assert_eq!(ast.package.name.name, "main");
    assert_eq!(ast.imports[0].specs[0].path.value, "fmt");
}

#[test]
fn test_spans_cover_declarations() {
    let source = "package main\nimport m \"math\"";
    let ast = assert_parse_success(source);

    assert_eq!(ast.package.span, Span::new(0, 12));
    assert_eq!(ast.package.name.span, Span::new(8, 12));
    assert_eq!(ast.imports[0].span, Span::new(13, 28));
    assert_eq!(ast.imports[0].specs[0].span, Span::new(20, 28));
    assert_eq!(ast.span, Span::new(0, 28));
}

#[test]
fn test_escaped_path_is_decoded() {
    let ast = assert_parse_success(r#"package main import "quo\"ted""#);
    assert_eq!(ast.imports[0].specs[0].path.value, "quo\"ted");
}

#[test]
fn test_parse_is_idempotent() {
    let source = "package main\nimport (\n\t\"fmt\"\n\tm \"math\"\n)\nimport \"os\"";
    let first = assert_parse_success(source);
    let second = assert_parse_success(source);
    assert_eq!(shape(&first), shape(&second));
    assert_eq!(first, second);
}

#[test]
fn test_parser_struct_entry_point() {
    let mut parser = Parser::new("package p import \"x\"");
    let ast = parser.parse().expect("Parsing should succeed");
    assert_eq!(ast.package.name.name, "p");
    assert_eq!(parser.source(), "package p import \"x\"");
}

// ==================== Errors ====================

#[test]
fn test_missing_package() {
    let err = assert_parse_error("import \"fmt\"");
    match err {
        ParseError::Syntax(ParserError::UnexpectedToken {
            found, text, span, position, ..
        }) => {
            assert_eq!(found, TokenKind::ImportKeyword);
            assert_eq!(text, "import");
            assert_eq!(span.start, 0);
            assert_eq!(position, Position::new(0, 0));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_empty_input() {
    let err = assert_parse_error("");
    assert!(err.is_syntax());
    match &err {
        ParseError::Syntax(ParserError::UnexpectedToken {
            expected, found, ..
        }) => {
            assert_eq!(expected.as_str(), TokenKind::PackageKeyword.describe());
            assert_eq!(*found, TokenKind::EndOfInput);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.offset(), 0);
}

#[test]
fn test_digits_are_not_an_identifier() {
    let err = assert_parse_error("package 123");
    assert!(err.is_syntax(), "expected syntax error, got {:?}", err);
    match &err {
        ParseError::Syntax(ParserError::UnexpectedToken { found, text, .. }) => {
            assert_eq!(*found, TokenKind::Invalid);
            assert_eq!(text.as_str(), "123");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.offset(), 8);
}

#[test]
fn test_unterminated_string_is_lexical() {
    let err = assert_parse_error("package main\nimport \"abc");
    assert!(matches!(err, ParseError::Lexer(LexerError::UnterminatedString { .. })));
    assert_eq!((err.line(), err.column()), (1, 7));
}

#[test]
fn test_string_broken_by_newline_is_lexical() {
    let err = assert_parse_error("package main\nimport \"abc\n\"");
    assert!(matches!(err, ParseError::Lexer(LexerError::UnterminatedString { .. })));
}

#[test]
fn test_unterminated_comment_is_lexical() {
    let err = assert_parse_error("package main\nimport \"fmt\"\n/* dangling");
    assert!(matches!(err, ParseError::Lexer(LexerError::UnterminatedComment { .. })));
    assert_eq!(err.position(), Position::new(2, 0));
}

#[test]
fn test_unexpected_character_is_lexical() {
    let err = assert_parse_error("package main\nimport $\"fmt\"");
    match err {
        ParseError::Lexer(LexerError::UnexpectedCharacter { ch, position, .. }) => {
            assert_eq!(ch, '$');
            assert_eq!(position, Position::new(1, 7));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_empty_import_group() {
    let err = assert_parse_error("package main\nimport ()");
    match err {
        ParseError::Syntax(ParserError::EmptyImportGroup { position, .. }) => {
            assert_eq!(position, Position::new(1, 8));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_duplicate_package() {
    let err = assert_parse_error("package a\nimport \"x\"\npackage b");
    match err {
        ParseError::Syntax(ParserError::DuplicatePackage { position, .. }) => {
            assert_eq!(position, Position::new(2, 0));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_package_without_imports() {
    let err = assert_parse_error("package main\n");
    match err {
        ParseError::Syntax(ParserError::UnexpectedToken { found, .. }) => {
            assert_eq!(found, TokenKind::EndOfInput);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_error_message_mentions_token() {
    let err = assert_parse_error("package main\nimport x y");
    let message = err.to_string();
    assert!(message.contains("syntax error"), "{}", message);
    assert!(message.contains("`y`"), "{}", message);
    assert!(message.contains("1:9"), "{}", message);
}

#[test_case("package main import" ; "import without spec")]
#[test_case("package main import (\"a\"" ; "unclosed group")]
#[test_case("package main import ( \"a\" ( )" ; "nested bracket in group")]
#[test_case("package main import alias" ; "alias without path")]
#[test_case("package main import \"a\" \"b\"" ; "second path without import keyword")]
#[test_case("package \"main\" import \"a\"" ; "string as package name")]
#[test_case("package main import ) \"a\"" ; "close bracket before group")]
#[test_case("package package import \"a\"" ; "keyword as package name")]
fn test_syntax_errors(source: &str) {
    let err = assert_parse_error(source);
    assert!(err.is_syntax(), "expected syntax error for {:?}, got {:?}", source, err);
}

#[test_case("package main\nimport \"fmt\"" ; "bare import")]
#[test_case("package main\nimport f \"fmt\"" ; "aliased import")]
#[test_case("package main\nimport (\"a\" b \"b\")" ; "group on one line")]
#[test_case("package main\nimport (\"a\")\nimport (\"b\")" ; "two groups")]
#[test_case("  \n\t// only comments before\npackage x import \"y\"" ; "leading trivia")]
#[test_case("package importer import \"packages\"" ; "keyword prefixes")]
fn test_valid_headers(source: &str) {
    let ast = assert_parse_success(source);
    let root_children = ast.as_node().children();
    assert_eq!(root_children.len(), 2);
    assert_eq!(root_children[0].kind(), NodeKind::PackageDecl);
    assert_eq!(root_children[1].kind(), NodeKind::ImportDecls);
    assert!(!root_children[1].children().is_empty());
}
