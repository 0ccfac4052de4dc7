//! Stencil language
//!
//! Unified entry point for the stencil pipeline: lex, parse, then evaluate
//! against a fresh execution context.
//!
//! ```
//! let mut out = Vec::new();
//! stencil_lang::run_with("STO 37 -452.11 PR 37", Default::default(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "-452.11\n");
//! ```

use std::io::Write;

use thiserror::Error;
use tracing::warn;

pub use stencil_lexer::{lex, LexError, Token};
pub use stencil_parser::{parse, ParseError};
pub use stencil_runtime::{
    literal, ExecutionContext, Instruction, LiteralError, Matrix, MatrixId, MatrixStyle,
    NumericValue, Program, RegisterId, RunConfig,
};

/// Any failure from source text to finished run.
///
/// Every variant carries a constant kind name for user-facing reports.
#[derive(Debug, Error)]
pub enum StencilError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] stencil_runtime::Error),

    #[error(transparent)]
    Literal(#[from] LiteralError),
}

impl StencilError {
    /// Kind name shown in front of the message
    pub fn name(&self) -> &'static str {
        match self {
            StencilError::Parse(e) => e.name(),
            StencilError::Runtime(e) => e.name(),
            StencilError::Literal(e) => e.name(),
        }
    }

    /// Failed before any instruction ran
    pub fn is_compile_error(&self) -> bool {
        matches!(self, StencilError::Parse(_))
    }

    /// `"<Kind>: <message>"`
    pub fn report(&self) -> String {
        format!("{}: {}", self.name(), self)
    }
}

/// Lex and parse without running.
pub fn compile(source: &str) -> Result<Program, StencilError> {
    Ok(stencil_parser::parse_source(source)?)
}

/// Run a program with default options, printing to stdout.
pub fn run(source: &str) -> Result<ExecutionContext, StencilError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(source, RunConfig::default(), &mut out)
}

/// Run a program, printing to `out`.
///
/// On failure the `"<Kind>: <message>"` line is written to `out` after any
/// output the program produced, and the error is returned as well.
pub fn run_with(
    source: &str,
    config: RunConfig,
    out: &mut dyn Write,
) -> Result<ExecutionContext, StencilError> {
    let result = match compile(source) {
        Ok(program) => {
            stencil_runtime::evaluate(&program, config, &mut *out).map_err(StencilError::from)
        }
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        if let Err(write_err) = writeln!(out, "{}", e.report()).and_then(|()| out.flush()) {
            warn!(error = %write_err, "could not report error to output");
        }
    }
    result
}
