//! weft CLI
//!
//! Reads arithmetic expressions into syntax trees and transforms them into
//! precedence-grouped expression trees.

mod config;
mod output;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use weft_calc::{
    CalcError, ExprTree, SyntaxTree, read_and_transform_with_config, read_with_config,
    transform_with_config,
};
use weft_feature::EngineConfig;

use crate::config::{CliConfig, Format};

/// weft - feature-driven tree reader and transformer
#[derive(Parser)]
#[command(name = "weft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the syntax tree of a file
    Read {
        /// Input file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Print the expression tree of a file
    Transform {
        /// Input file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Print character, line and node counts of a file
    Stats {
        /// Input file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(rejected) => {
            if rejected {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Runs a command; `Ok(true)` means the input was rejected by the grammar.
fn run(cli: Cli) -> Result<bool> {
    let config = load_config(cli.config.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;

    match &cli.command {
        Commands::Read { file, format } => {
            runtime.block_on(run_read(file, format.unwrap_or(config.format), &config))
        }
        Commands::Transform { file, format } => {
            runtime.block_on(run_transform(file, format.unwrap_or(config.format), &config))
        }
        Commands::Stats { file } => runtime.block_on(run_stats(file, &config)),
    }
}

fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    if let Some(path) = path {
        return CliConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = CliConfig::discover(".") {
        info!("Using config: {}", path.display());
        return CliConfig::from_file(&path).into_diagnostic();
    }

    Ok(CliConfig::default())
}

fn read_source(file: &Path) -> Result<String> {
    fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", file.display()))
}

/// Reports a rejection as `Ok(true)` and turns every other failure into an error.
fn handle_failure(file: &Path, err: CalcError) -> Result<bool> {
    if err.is_rejection() {
        error!("{}: {}", file.display(), err);
        return Ok(true);
    }
    Err(err).into_diagnostic()
}

async fn run_read(file: &Path, format: Format, config: &CliConfig) -> Result<bool> {
    let text = read_source(file)?;

    let tree = match read_with_config(&text, &config.engine).await {
        Ok(tree) => tree,
        Err(err) => return handle_failure(file, err.into()),
    };

    output::output_tree(&tree, format)?;
    Ok(false)
}

async fn run_transform(file: &Path, format: Format, config: &CliConfig) -> Result<bool> {
    let text = read_source(file)?;

    let expr = match read_and_transform_with_config(&text, &config.engine).await {
        Ok(tree) => tree,
        Err(err) => return handle_failure(file, err),
    };

    output::output_tree(&expr, format)?;
    Ok(false)
}

async fn run_stats(file: &Path, config: &CliConfig) -> Result<bool> {
    let text = read_source(file)?;

    let (syntax, expr) = match both_trees(&text, &config.engine).await {
        Ok(trees) => trees,
        Err(err) => return handle_failure(file, err),
    };

    let lines = syntax[syntax.root()]
        .position
        .map_or(1, |position| position.end.line);

    println!("chars: {}", text.chars().count());
    println!("lines: {}", lines);
    println!("syntax nodes: {}", syntax.descendants(syntax.root()).count() + 1);
    println!("expression nodes: {}", expr.descendants(expr.root()).count() + 1);
    Ok(false)
}

async fn both_trees(
    text: &str,
    engine: &EngineConfig,
) -> std::result::Result<(SyntaxTree, ExprTree), CalcError> {
    let syntax = read_with_config(text, engine).await?;
    let expr = transform_with_config(&syntax, engine).await?;
    Ok((syntax, expr))
}
