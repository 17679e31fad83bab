//! `safexpr`: evaluate an expression file from the command line.
//!
//! Exit status is 0 on success, 1 when the expression fails to evaluate and
//! 2 when the input, bindings or config cannot be read.

mod config;
mod error;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use safexpr::{evaluate_with_config, format_number, Bindings, EvalConfig, OutcomeReport};

use crate::error::{CliError, CliResult};

/// Evaluate a sandboxed arithmetic expression.
///
/// The expression may use `+ - * / %`, parentheses, bound variables and
/// members of `Math`. Nothing in the file is ever executed.
#[derive(Parser, Debug)]
#[command(name = "safexpr", version, about, long_about = None)]
struct Args {
    /// File holding the expression; `-` reads standard input.
    #[arg(required_unless_present = "math_table")]
    file: Option<PathBuf>,

    /// Variable bindings as a JSON object, e.g. '{"n": 2}'.
    #[arg(long)]
    vars: Option<String>,

    /// Read variable bindings from a JSON file.
    #[arg(long, conflicts_with = "vars")]
    vars_file: Option<PathBuf>,

    /// TOML file of evaluation limits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum parenthesis nesting, capped at 512; overrides the config file.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print the outcome as a JSON report.
    #[arg(long)]
    json: bool,

    /// Print the table of `Math` members as JSON and exit.
    #[arg(long)]
    math_table: bool,
}

/// Install a stderr subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn read_text(path: &Path) -> CliResult<String> {
    let result = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn eval_config(args: &Args) -> CliResult<EvalConfig> {
    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => EvalConfig::default(),
    };
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    Ok(config)
}

/// Decode `--vars` or `--vars-file`; blank or absent means no bindings.
fn read_bindings(args: &Args) -> CliResult<Bindings> {
    let json = match (&args.vars, &args.vars_file) {
        (_, Some(path)) => read_text(path)?,
        (Some(json), None) => json.clone(),
        (None, None) => return Ok(Bindings::new()),
    };
    if json.trim().is_empty() {
        return Ok(Bindings::new());
    }
    Ok(Bindings::from_json(&json)?)
}

/// Run one invocation, writing the outcome to stdout or stderr.
///
/// Returns whether evaluation succeeded.
fn run(args: &Args) -> CliResult<bool> {
    if args.math_table {
        println!("{}", safexpr::math_table::generate_math_table());
        return Ok(true);
    }
    let Some(path) = &args.file else {
        return Ok(false);
    };
    let source = read_text(path)?;
    let config = eval_config(args)?;
    let bindings = read_bindings(args)?;
    tracing::debug!(path = %path.display(), ?config, "evaluating file");

    let outcome = evaluate_with_config(&source, &bindings, &config);
    if args.json {
        let report = OutcomeReport::from_outcome(&outcome);
        println!("{}", report.to_json());
        return Ok(report.success);
    }
    match outcome {
        Ok(value) => {
            println!("{}", format_number(value));
            Ok(true)
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("safexpr: {err}");
            ExitCode::from(2)
        }
    }
}
