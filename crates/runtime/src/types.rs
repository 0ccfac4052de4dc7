//! Core runtime types
//!
//! Identifiers, the tagged numeric value, and run configuration.

use std::fmt;
use std::ops::Add;

/// Index of a register in the register bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId(pub u64);

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RegisterId {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

/// Index of a matrix in the matrix bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatrixId(pub u64);

impl fmt::Display for MatrixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MatrixId {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

/// Which bank a variable lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Register,
    Matrix,
}

impl VariableKind {
    /// Instruction that defines a variable of this kind
    pub fn remedy(&self) -> &'static str {
        match self {
            VariableKind::Register => "STO",
            VariableKind::Matrix => "CMX",
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Register => f.write_str("Register"),
            VariableKind::Matrix => f.write_str("Matrix"),
        }
    }
}

/// Scalar register value
///
/// The tag records whether the value came from an integer or a real
/// literal, and printing reproduces it: `Integer(5)` prints `5`,
/// `Real(5.0)` prints `5.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Integer(i64),
    Real(f64),
}

impl NumericValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            NumericValue::Integer(n) => *n as f64,
            NumericValue::Real(x) => *x,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, NumericValue::Integer(_))
    }

    /// Numeric comparison against an integer, across tags
    pub fn equals_integer(&self, other: i64) -> bool {
        match self {
            NumericValue::Integer(n) => *n == other,
            NumericValue::Real(x) => *x == other as f64,
        }
    }
}

/// Integer + Integer stays Integer; anything involving a Real is Real.
///
/// An integer sum that overflows `i64` is promoted to Real.
impl Add for NumericValue {
    type Output = NumericValue;

    fn add(self, rhs: NumericValue) -> NumericValue {
        match (self, rhs) {
            (NumericValue::Integer(a), NumericValue::Integer(b)) => match a.checked_add(b) {
                Some(sum) => NumericValue::Integer(sum),
                None => NumericValue::Real(a as f64 + b as f64),
            },
            (a, b) => NumericValue::Real(a.as_f64() + b.as_f64()),
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Integer(n) => write!(f, "{}", n),
            // Debug is the shortest round-trip form and keeps `.0` on integral reals
            NumericValue::Real(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<i64> for NumericValue {
    fn from(n: i64) -> Self {
        NumericValue::Integer(n)
    }
}

impl From<f64> for NumericValue {
    fn from(x: f64) -> Self {
        NumericValue::Real(x)
    }
}

/// How `PMX` renders a populated matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixStyle {
    /// Space-separated shortest round-trip numbers
    #[default]
    Plain,
    /// Integer parts right-justified, fractional parts left-justified,
    /// both to the widest part in the whole matrix
    Aligned,
}

/// Options for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Rendering used by `PMX`
    pub matrix_style: MatrixStyle,
    /// Convolve stencil rows on the rayon pool. Results are bit-identical
    /// either way.
    pub parallel_stencil: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            matrix_style: MatrixStyle::Plain,
            parallel_stencil: true,
        }
    }
}
