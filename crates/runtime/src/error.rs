//! Runtime errors

use thiserror::Error;

use crate::types::{MatrixId, VariableKind};

/// Runtime result type
pub type Result<T> = std::result::Result<T, Error>;

/// Runtime errors
///
/// Every variant aborts the run. `name` gives the stable kind name used when
/// the error is reported to the user.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} {index} is not initialized. Please {} first.", .kind.remedy())]
    UninitializedVariable { kind: VariableKind, index: u64 },

    #[error("Invalid positive dimensions for matrix {matrix}: ({rows}, {cols})")]
    InvalidDimensions { matrix: MatrixId, rows: i64, cols: i64 },

    #[error("Invalid odd dimensions for stencil: ({rows}, {cols})")]
    InvalidStencilDimensions { rows: i64, cols: i64 },

    #[error("Takes exactly {required} arguments ({given} given)")]
    ArgumentCount { required: u128, given: usize },

    #[error("{}", branch_message(.offset, .destination))]
    InvalidBranchOffset { offset: i64, destination: i128 },

    #[error(transparent)]
    MatrixIndex(#[from] IndexError),

    #[error("failed to write program output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Kind name shown in front of the message
    pub fn name(&self) -> &'static str {
        match self {
            Error::UninitializedVariable { .. } => "UninitializedVariableError",
            Error::InvalidDimensions { .. } => "InvalidMatrixDimensionsError",
            Error::InvalidStencilDimensions { .. } => "InvalidStencilDimensionsError",
            Error::ArgumentCount { .. } => "ArgumentError",
            Error::InvalidBranchOffset { .. } => "InvalidBranchOffsetError",
            Error::MatrixIndex(_) => "MatrixIndexError",
            Error::Output(_) => "OutputError",
        }
    }

    pub fn uninitialized_register(index: u64) -> Self {
        Error::UninitializedVariable {
            kind: VariableKind::Register,
            index,
        }
    }

    pub fn uninitialized_matrix(index: u64) -> Self {
        Error::UninitializedVariable {
            kind: VariableKind::Matrix,
            index,
        }
    }
}

fn branch_message(offset: &i64, destination: &i128) -> String {
    let reason = match offset.signum() {
        -1 => "before beginning of program",
        0 => "to current location",
        _ => "past end of program",
    };
    if *offset == 0 {
        format!("Cannot branch {reason}. Invalid branch offset: {offset}")
    } else {
        format!(
            "Cannot branch {reason}. Invalid branch offset: {offset} with destination: {destination}"
        )
    }
}

/// Misuse of the matrix indexing API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("matrix indexing takes exactly 2 indices ({given} given)")]
    Arity { given: usize },

    #[error("negative index ({row}, {col}); use get_wraparound for toroidal access")]
    Negative { row: i64, col: i64 },

    #[error("index ({row}, {col}) out of bounds for matrix of dimensions ({rows}, {cols})")]
    OutOfBounds {
        row: i64,
        col: i64,
        rows: i64,
        cols: i64,
    },

    #[error("cannot index unpopulated matrix of dimensions ({rows}, {cols})")]
    Unpopulated { rows: i64, cols: i64 },
}
