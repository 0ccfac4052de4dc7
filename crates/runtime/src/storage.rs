//! Register and matrix banks
//!
//! Sparse index → value maps. Only indices written by `STO` / `CMX` exist;
//! looking up any other index is the single "used before defined" failure
//! path for every instruction.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::types::{MatrixId, NumericValue, RegisterId};

/// Scalar registers
#[derive(Debug, Default, Clone)]
pub struct RegisterBank {
    values: IndexMap<RegisterId, NumericValue>,
}

impl RegisterBank {
    /// Create or overwrite a register
    pub fn store(&mut self, id: RegisterId, value: NumericValue) {
        self.values.insert(id, value);
    }

    pub fn get(&self, id: RegisterId) -> Result<NumericValue> {
        self.values
            .get(&id)
            .copied()
            .ok_or_else(|| Error::uninitialized_register(id.0))
    }

    pub fn get_mut(&mut self, id: RegisterId) -> Result<&mut NumericValue> {
        self.values
            .get_mut(&id)
            .ok_or_else(|| Error::uninitialized_register(id.0))
    }

    pub fn contains(&self, id: RegisterId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Registers in first-written order
    pub fn iter(&self) -> impl Iterator<Item = (&RegisterId, &NumericValue)> {
        self.values.iter()
    }
}

/// Matrices
#[derive(Debug, Default, Clone)]
pub struct MatrixBank {
    matrices: IndexMap<MatrixId, Matrix>,
}

impl MatrixBank {
    /// Create or replace a matrix
    pub fn insert(&mut self, id: MatrixId, matrix: Matrix) {
        self.matrices.insert(id, matrix);
    }

    pub fn get(&self, id: MatrixId) -> Result<&Matrix> {
        self.matrices
            .get(&id)
            .ok_or_else(|| Error::uninitialized_matrix(id.0))
    }

    pub fn get_mut(&mut self, id: MatrixId) -> Result<&mut Matrix> {
        self.matrices
            .get_mut(&id)
            .ok_or_else(|| Error::uninitialized_matrix(id.0))
    }

    pub fn contains(&self, id: MatrixId) -> bool {
        self.matrices.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Matrices in first-created order
    pub fn iter(&self) -> impl Iterator<Item = (&MatrixId, &Matrix)> {
        self.matrices.iter()
    }
}
