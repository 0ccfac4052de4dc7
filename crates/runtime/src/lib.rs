//! Stencil runtime
//!
//! Register and matrix banks, toroidal stencil convolution, and the
//! bytecode evaluator that drives them.

pub mod bytecode;
pub mod error;
pub mod executor;
pub mod literal;
pub mod matrix;
pub mod stencil;
pub mod storage;
pub mod types;

pub use bytecode::{Instruction, Program};
pub use error::{Error, IndexError, Result};
pub use executor::{evaluate, Evaluator, ExecutionContext};
pub use literal::LiteralError;
pub use matrix::Matrix;
pub use stencil::{apply_stencil, apply_stencil_with};
pub use storage::{MatrixBank, RegisterBank};
pub use types::*;
