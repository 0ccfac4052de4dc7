//! Integration test harness for the stencil language.
//!
//! This crate provides utilities for end-to-end testing of the full
//! pipeline: Lex → Parse → Evaluate → Verify.

use std::path::PathBuf;

use stencil_lang::{
    ExecutionContext, Matrix, MatrixId, NumericValue, RegisterId, RunConfig, StencilError,
};
use stencil_runtime::{literal, Evaluator};

/// Test harness for running stencil programs from source.
///
/// Keeps the final execution state even when the run fails, so tests can
/// inspect what happened before the error.
pub struct TestHarness {
    context: ExecutionContext,
    output: String,
    error: Option<StencilError>,
}

impl TestHarness {
    /// Compile and run `source` with default options.
    ///
    /// # Panics
    ///
    /// Panics if the source does not compile.
    pub fn from_source(source: &str) -> Self {
        Self::with_config(source, RunConfig::default())
    }

    /// Compile and run `source` with the given options.
    ///
    /// # Panics
    ///
    /// Panics if the source does not compile.
    pub fn with_config(source: &str, config: RunConfig) -> Self {
        let program = match stencil_lang::compile(source) {
            Ok(program) => program,
            Err(e) => panic!("Compilation failed: {}", e.report()),
        };

        let mut out = Vec::new();
        let mut evaluator = Evaluator::new(&program, config);
        let error = evaluator.run(&mut out).err().map(StencilError::from);

        Self {
            context: evaluator.into_context(),
            output: String::from_utf8_lossy(&out).into_owned(),
            error,
        }
    }

    /// Everything the program printed.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Printed lines, without terminators.
    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&StencilError> {
        self.error.as_ref()
    }

    /// Get a register's current value.
    pub fn register(&self, index: u64) -> Option<NumericValue> {
        self.context.registers.get(RegisterId(index)).ok()
    }

    /// Get a matrix by index.
    pub fn matrix(&self, index: u64) -> Option<&Matrix> {
        self.context.matrices.get(MatrixId(index)).ok()
    }

    /// Program counter where the run stopped.
    pub fn pc(&self) -> i64 {
        self.context.pc
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }
}

/// Run `source` through the public entry point and return everything it
/// wrote, including the error line on failure.
pub fn run_output(source: &str) -> String {
    let mut out = Vec::new();
    let _ = stencil_lang::run_with(source, RunConfig::default(), &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

/// Path to a file under `fixtures/`.
pub fn fixture_path(parts: &[&str]) -> PathBuf {
    parts
        .iter()
        .fold(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures"), |path, part| {
            path.join(part)
        })
}

/// Load a fixture matrix from `fixtures/<kind>/<name>`.
///
/// # Panics
///
/// Panics if the file is missing or malformed.
pub fn open_matrix(kind: &str, name: &str) -> Matrix {
    let path = fixture_path(&[kind, name]);
    literal::from_path(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", path.display(), e))
}

/// Names of every stencil fixture, sorted.
pub fn stencil_fixture_names() -> Vec<String> {
    let dir = fixture_path(&["stencil"]);
    let mut names: Vec<String> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e))
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".matrix"))
        .collect();
    names.sort();
    names
}

/// SMX operand list for a matrix, in source form.
pub fn smx_operands(matrix: &Matrix) -> String {
    matrix
        .contents()
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
