//! Abstract Syntax Tree (AST) definitions for package/import headers.

use serde::{Deserialize, Serialize};

use crate::lexer::escape_string;

mod node;
pub mod printer;

pub use node::{Node, NodeKind};
pub use printer::AstPrinter;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Root node: one package declaration followed by its imports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub package: PackageDecl,
    pub imports: Vec<ImportDecl>,
    pub span: Span,
}

/// `package <name>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDecl {
    pub name: Identifier,
    pub span: Span,
}

/// `import <spec>` or `import ( <spec>... )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub specs: Vec<ImportSpec>,
    /// Written with parentheses
    pub grouped: bool,
    pub span: Span,
}

/// One imported path with its optional alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpec {
    pub alias: Option<Identifier>,
    pub path: StringLiteral,
    pub span: Span,
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// String literal, already unescaped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

impl CompilationUnit {
    /// Generic view of the root for kind/children traversal
    pub fn as_node(&self) -> Node<'_> {
        Node::Root(self)
    }

    /// All import specs in declaration order
    pub fn specs(&self) -> impl Iterator<Item = &ImportSpec> {
        self.imports.iter().flat_map(|decl| decl.specs.iter())
    }
}

// Rendering back to header source
impl std::fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "package {}", self.package.name.name)?;
        for import in &self.imports {
            writeln!(f)?;
            write!(f, "{}", import)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for ImportDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.grouped {
            if let Some(spec) = self.specs.first() {
                return writeln!(f, "import {}", spec);
            }
        }
        writeln!(f, "import (")?;
        for spec in &self.specs {
            writeln!(f, "\t{}", spec)?;
        }
        writeln!(f, ")")
    }
}

impl std::fmt::Display for ImportSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(alias) = &self.alias {
            write!(f, "{} ", alias.name)?;
        }
        write!(f, "\"{}\"", escape_string(&self.path.value))
    }
}
