//! Uniform "kind + children" view over the typed tree

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CompilationUnit, Identifier, ImportDecl, ImportSpec, PackageDecl, Span, StringLiteral};

/// Node kinds as seen by generic consumers such as the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Root,
    PackageDecl,
    /// The sequence of import declarations under the root
    ImportDecls,
    ImportDecl,
    ImportSpec,
    Identifier,
    StringLiteral,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::PackageDecl => "package declaration",
            NodeKind::ImportDecls => "import declarations",
            NodeKind::ImportDecl => "import declaration",
            NodeKind::ImportSpec => "import spec",
            NodeKind::Identifier => "identifier",
            NodeKind::StringLiteral => "string literal",
        }
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Identifier | NodeKind::StringLiteral)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed handle to any node of a parsed header
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Root(&'a CompilationUnit),
    PackageDecl(&'a PackageDecl),
    ImportDecls(&'a [ImportDecl]),
    ImportDecl(&'a ImportDecl),
    ImportSpec(&'a ImportSpec),
    Identifier(&'a Identifier),
    StringLiteral(&'a StringLiteral),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) => NodeKind::Root,
            Node::PackageDecl(_) => NodeKind::PackageDecl,
            Node::ImportDecls(_) => NodeKind::ImportDecls,
            Node::ImportDecl(_) => NodeKind::ImportDecl,
            Node::ImportSpec(_) => NodeKind::ImportSpec,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::StringLiteral(_) => NodeKind::StringLiteral,
        }
    }

    /// Children in source order
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Root(unit) => vec![
                Node::PackageDecl(&unit.package),
                Node::ImportDecls(&unit.imports),
            ],
            Node::PackageDecl(decl) => vec![Node::Identifier(&decl.name)],
            Node::ImportDecls(decls) => decls.iter().map(Node::ImportDecl).collect(),
            Node::ImportDecl(decl) => decl.specs.iter().map(Node::ImportSpec).collect(),
            Node::ImportSpec(spec) => spec
                .alias
                .iter()
                .map(Node::Identifier)
                .chain(std::iter::once(Node::StringLiteral(&spec.path)))
                .collect(),
            Node::Identifier(_) | Node::StringLiteral(_) => Vec::new(),
        }
    }

    /// Decoded text of leaf nodes
    pub fn value(&self) -> Option<&'a str> {
        match *self {
            Node::Identifier(ident) => Some(ident.name.as_str()),
            Node::StringLiteral(lit) => Some(lit.value.as_str()),
            _ => None,
        }
    }

    pub fn span(&self) -> Span {
        match *self {
            Node::Root(unit) => unit.span,
            Node::PackageDecl(decl) => decl.span,
            Node::ImportDecls(decls) => match (decls.first(), decls.last()) {
                (Some(first), Some(last)) => first.span.to(last.span),
                _ => Span::dummy(),
            },
            Node::ImportDecl(decl) => decl.span,
            Node::ImportSpec(spec) => spec.span,
            Node::Identifier(ident) => ident.span,
            Node::StringLiteral(lit) => lit.span,
        }
    }

    /// Pre-order walk over this node and all of its descendants
    pub fn walk(&self, visit: &mut impl FnMut(Node<'a>, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at(&self, depth: usize, visit: &mut impl FnMut(Node<'a>, usize)) {
        visit(*self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }
}
