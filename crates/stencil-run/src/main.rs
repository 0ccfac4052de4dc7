//! Stencil Run - Executes a stencil bytecode program
//!
//! Reads program source from a file or stdin and runs it, printing program
//! output to stdout. Logs go to stderr.
//!
//! Exit codes: 0 on success, 1 when the program fails (the error line is
//! printed to stdout after any program output), 2 when the input cannot be
//! read.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use stencil_lang::{MatrixStyle, RunConfig};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "stencil-run", version)]
#[command(about = "Run a stencil bytecode program")]
struct Cli {
    /// Program source file; `-` or omitted reads stdin
    input: Option<PathBuf>,

    /// Print matrices with column-aligned numbers
    #[arg(long)]
    aligned: bool,

    /// Apply stencils on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            matrix_style: if self.aligned {
                MatrixStyle::Aligned
            } else {
                MatrixStyle::Plain
            },
            parallel_stencil: !self.sequential,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(log_filter(cli.verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let source = match read_source(cli.input.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("stencil-run: {:#}", e);
            return ExitCode::from(2);
        }
    };

    let config = cli.run_config();
    debug!(?config, bytes = source.len(), "running program");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match stencil_lang::run_with(&source, config, &mut out) {
        Ok(context) => {
            info!(
                registers = context.registers.len(),
                matrices = context.matrices.len(),
                "program finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(kind = e.name(), "program failed");
            ExitCode::from(1)
        }
    }
}

/// `-v` flags win over `RUST_LOG`; with neither only warnings are shown.
fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => return EnvFilter::try_from_default_env().unwrap_or_else(|_| "stencil_run=warn".into()),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    ["stencil_run", "stencil_lang", "stencil_parser", "stencil_runtime"]
        .iter()
        .fold(EnvFilter::new("warn"), |filter, target| {
            match format!("{target}={level}").parse() {
                Ok(directive) => filter.add_directive(directive),
                Err(_) => filter,
            }
        })
}

fn read_source(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read program from {}", path.display())),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read program from stdin")?;
            Ok(source)
        }
    }
}
