//! Indented text rendering of the AST.
//!
//! One line per node, indented with one tab per level of depth:
//!
//! ```text
//! (root)
//! 	(package declaration)
//! 		(identifier): main
//! 	(import declarations)
//! 		(import declaration)
//! 			(import spec)
//! 				(string literal): "fmt"
//! ```

use std::fmt::{self, Write};

use super::{Node, NodeKind};
use crate::lexer::escape_string;

/// Renders any [`Node`] as an indented tree
#[derive(Debug, Clone)]
pub struct AstPrinter {
    indent: String,
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
        }
    }
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `indent` for each level instead of a tab
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    pub fn print(&self, node: Node<'_>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write(&mut out, node);
        out
    }

    pub fn write(&self, out: &mut impl Write, node: Node<'_>) -> fmt::Result {
        let mut result = Ok(());
        node.walk(&mut |node, depth| {
            if result.is_ok() {
                result = self.write_line(out, node, depth);
            }
        });
        result
    }

    fn write_line(&self, out: &mut impl Write, node: Node<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            out.write_str(&self.indent)?;
        }
        write!(out, "({})", node.kind())?;
        match (node.kind(), node.value()) {
            (NodeKind::StringLiteral, Some(value)) => write!(out, ": \"{}\"", escape_string(value))?,
            (_, Some(value)) => write!(out, ": {}", value)?,
            (_, None) => {}
        }
        out.write_char('\n')
    }
}
