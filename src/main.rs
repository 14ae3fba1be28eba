use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::term::termcolor::ColorChoice;
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use pkghead::driver::STDIN_NAME;
use pkghead::{CompilationUnit, Driver, PkgError, SourceState};

#[derive(Parser)]
#[command(name = "pkghead")]
#[command(author, version, about = "Parse package/import source headers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// When to color diagnostics
    #[arg(long, value_enum, global = true, default_value = "auto")]
    color: ColorMode,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Indented tree, one node per line (default)
    #[value(name = "tree")]
    Tree,
    /// Pretty-printed JSON
    #[value(name = "json")]
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if io::stderr().is_terminal() => ColorChoice::Auto,
            ColorMode::Auto | ColorMode::Never => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a header and print its AST
    Parse {
        /// The source file to parse ("-" or omitted reads standard input)
        input: Option<PathBuf>,

        /// How to print the AST
        #[arg(long, value_enum, default_value = "tree")]
        format: OutputFormat,
    },

    /// Print the token stream of a header
    Tokens {
        /// The source file to scan ("-" or omitted reads standard input)
        input: Option<PathBuf>,
    },

    /// Check a header for errors without printing the AST
    Check {
        /// The source file to check ("-" or omitted reads standard input)
        input: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let color = cli.color.choice();
    let result = match cli.command {
        Commands::Parse { input, format } => parse(input, format, color),
        Commands::Tokens { input } => tokens(input),
        Commands::Check { input } => check(input, color),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load the input named on the command line, or standard input
fn load_source(input: Option<PathBuf>) -> Result<SourceState> {
    match input {
        Some(path) if path != Path::new("-") => {
            log::debug!("reading {:?}", path);
            SourceState::from_path(&path).with_context(|| format!("cannot load {:?}", path))
        }
        _ => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("no input file given and nothing piped on standard input\n\nUsage: pkghead <COMMAND> [FILE]");
            }
            log::debug!("reading standard input");
            SourceState::from_reader(STDIN_NAME, stdin.lock()).context("cannot read standard input")
        }
    }
}

/// Parse, reporting any failure as a diagnostic on stderr
fn parse_reported(driver: &Driver, color: ColorChoice) -> Result<CompilationUnit> {
    match driver.parse() {
        Ok(unit) => Ok(unit),
        Err(e @ PkgError::Parse(_)) => {
            driver.state().report_to_stderr(&e, color)?;
            bail!("parsing {} failed", driver.state().name)
        }
        Err(e) => Err(e.into()),
    }
}

fn parse(input: Option<PathBuf>, format: OutputFormat, color: ColorChoice) -> Result<()> {
    let driver = Driver::new(load_source(input)?);
    let unit = parse_reported(&driver, color)?;

    match format {
        OutputFormat::Tree => {
            print!("{}", Driver::render_tree(&unit));
            println!("{}", "OK".green().bold());
        }
        OutputFormat::Json => println!("{}", Driver::render_json(&unit)?),
    }
    Ok(())
}

fn tokens(input: Option<PathBuf>) -> Result<()> {
    let driver = Driver::new(load_source(input)?);
    print!("{}", driver.render_tokens());
    Ok(())
}

fn check(input: Option<PathBuf>, color: ColorChoice) -> Result<()> {
    let driver = Driver::new(load_source(input)?);
    let unit = parse_reported(&driver, color)?;
    log::info!(
        "{} declares package {} with {} import(s)",
        driver.state().name,
        unit.package.name.name,
        unit.specs().count()
    );
    println!("{}", "OK".green().bold());
    Ok(())
}
