//! Source handling and diagnostic reporting around the parser.
//!
//! The parser itself never reads files or writes to a stream. This module
//! owns the in-memory buffer, runs the lexer/parser over it, and renders
//! failures with `codespan-reporting`.

use crate::ast::{AstPrinter, CompilationUnit};
use crate::error::{DiagnosticError, PkgError, PkgResult};
use crate::lexer::{Lexer, Token};
use crate::parser::Parser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};
use log::{debug, info};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Display name used for buffers read from standard input
pub const STDIN_NAME: &str = "<stdin>";

/// A source buffer registered for diagnostics
pub struct SourceState {
    pub name: String,
    pub source: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
}

impl SourceState {
    /// Read a file into memory
    pub fn from_path<P: AsRef<Path>>(path: P) -> PkgResult<Self> {
        let name = path.as_ref().display().to_string();
        let source = fs::read_to_string(path.as_ref())
            .map_err(|e| PkgError::Io(format!("failed to read {}: {}", name, e)))?;
        info!("read {} bytes from {}", source.len(), name);
        Ok(Self::from_string(name, source))
    }

    /// Read a reader (usually standard input) to its end
    pub fn from_reader(name: &str, mut reader: impl Read) -> PkgResult<Self> {
        let mut source = String::new();
        reader
            .read_to_string(&mut source)
            .map_err(|e| PkgError::Io(format!("failed to read {}: {}", name, e)))?;
        info!("read {} bytes from {}", source.len(), name);
        Ok(Self::from_string(name.to_string(), source))
    }

    pub fn from_string(name: impl Into<String>, source: String) -> Self {
        let name = name.into();
        let mut files = SimpleFiles::new();
        let file_id = files.add(name.clone(), source.clone());
        Self {
            name,
            source,
            files,
            file_id,
        }
    }

    /// Emit a diagnostic for `error` to any color-capable writer
    pub fn report(&self, error: &PkgError, writer: &mut dyn WriteColor) -> PkgResult<()> {
        let diagnostic = DiagnosticError::new(error.clone(), self.file_id).to_diagnostic();
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(writer, &config, &self.files, &diagnostic)
            .map_err(|e| PkgError::Io(format!("failed to emit diagnostic: {}", e)))
    }

    /// Emit a diagnostic to stderr
    pub fn report_to_stderr(&self, error: &PkgError, color: ColorChoice) -> PkgResult<()> {
        let writer = StandardStream::stderr(color);
        let mut lock = writer.lock();
        self.report(error, &mut lock)
    }

    /// Render a diagnostic without color codes
    pub fn render_diagnostic(&self, error: &PkgError) -> PkgResult<String> {
        let mut buffer = NoColor::new(Vec::new());
        self.report(error, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer.into_inner()).into_owned())
    }
}

/// Runs the lexer and parser over one source buffer
pub struct Driver {
    state: SourceState,
}

impl Driver {
    pub fn new(state: SourceState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SourceState {
        &self.state
    }

    /// Every token up to and including end of input
    pub fn tokenize(&self) -> Vec<Token> {
        debug!("tokenizing {}", self.state.name);
        Lexer::new(&self.state.source).tokenize()
    }

    pub fn parse(&self) -> PkgResult<CompilationUnit> {
        debug!("parsing {}", self.state.name);
        Parser::new(&self.state.source).parse().map_err(PkgError::from)
    }

    /// One line per token: kind, decoded value, position and span
    pub fn render_tokens(&self) -> String {
        self.tokenize()
            .iter()
            .map(|token| format!("{}\n", token))
            .collect()
    }

    pub fn render_tree(unit: &CompilationUnit) -> String {
        AstPrinter::new().print(unit.as_node())
    }

    pub fn render_json(unit: &CompilationUnit) -> PkgResult<String> {
        serde_json::to_string_pretty(unit)
            .map_err(|e| PkgError::Io(format!("failed to serialize AST: {}", e)))
    }
}
