//! Instruction set
//!
//! The eight instructions are a closed enum fixed at parse time; a single
//! `match` in [`Instruction::execute`] gives each its effect on the
//! execution context.

use std::fmt;
use std::io::Write;

use tracing::debug;

use crate::error::{Error, Result};
use crate::executor::ExecutionContext;
use crate::matrix::Matrix;
use crate::stencil::apply_stencil_with;
use crate::types::{MatrixId, NumericValue, RegisterId};

/// A single bytecode instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `STO idx value`: create or overwrite a register
    Sto {
        register: RegisterId,
        value: NumericValue,
    },
    /// `PR idx`: print a register
    Pr { register: RegisterId },
    /// `ADD idx value`: add to an existing register
    Add {
        register: RegisterId,
        value: NumericValue,
    },
    /// `CMX idx rows cols`: create an unpopulated matrix
    Cmx {
        matrix: MatrixId,
        rows: i64,
        cols: i64,
    },
    /// `PMX idx`: print a matrix
    Pmx { matrix: MatrixId },
    /// `SMX idx values...`: replace a matrix's contents, row-major
    Smx { matrix: MatrixId, values: Vec<f64> },
    /// `PDE stencil matrix`: apply a stencil to a matrix in place
    Pde { stencil: MatrixId, matrix: MatrixId },
    /// `BNE idx value offset`: branch by `offset` if the register differs
    /// from `value`
    Bne {
        register: RegisterId,
        compare: i64,
        offset: i64,
    },
}

impl Instruction {
    /// Source mnemonic
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Sto { .. } => "STO",
            Instruction::Pr { .. } => "PR",
            Instruction::Add { .. } => "ADD",
            Instruction::Cmx { .. } => "CMX",
            Instruction::Pmx { .. } => "PMX",
            Instruction::Smx { .. } => "SMX",
            Instruction::Pde { .. } => "PDE",
            Instruction::Bne { .. } => "BNE",
        }
    }

    /// Execute against the context, writing any printed output to `out`.
    ///
    /// Only `BNE` touches the program counter.
    pub fn execute(&self, ctx: &mut ExecutionContext, out: &mut dyn Write) -> Result<()> {
        match self {
            Instruction::Sto { register, value } => {
                ctx.registers.store(*register, *value);
            }
            Instruction::Pr { register } => {
                let value = ctx.registers.get(*register)?;
                writeln!(out, "{}", value)?;
            }
            Instruction::Add { register, value } => {
                let slot = ctx.registers.get_mut(*register)?;
                *slot = *slot + *value;
            }
            Instruction::Cmx { matrix, rows, cols } => {
                if *rows <= 0 || *cols <= 0 {
                    return Err(Error::InvalidDimensions {
                        matrix: *matrix,
                        rows: *rows,
                        cols: *cols,
                    });
                }
                debug!(matrix = %matrix, rows, cols, "matrix created");
                ctx.matrices.insert(*matrix, Matrix::unpopulated(*rows, *cols));
            }
            Instruction::Pmx { matrix } => {
                let rendered = ctx.matrices.get(*matrix)?.render(ctx.config.matrix_style);
                writeln!(out, "{}", rendered)?;
            }
            Instruction::Smx { matrix, values } => {
                ctx.matrices.get_mut(*matrix)?.set(values.clone())?;
            }
            Instruction::Pde { stencil, matrix } => {
                let stencil_matrix = ctx.matrices.get(*stencil)?;
                let target = ctx.matrices.get(*matrix)?;
                let result =
                    apply_stencil_with(stencil_matrix, target, ctx.config.parallel_stencil)?;
                debug!(stencil = %stencil, matrix = %matrix, "stencil applied");
                ctx.matrices.insert(*matrix, result);
            }
            Instruction::Bne {
                register,
                compare,
                offset,
            } => {
                let destination = ctx
                    .pc
                    .checked_add(*offset)
                    .filter(|d| *offset != 0 && (0..ctx.program_length()).contains(d))
                    .ok_or(Error::InvalidBranchOffset {
                        offset: *offset,
                        destination: i128::from(ctx.pc) + i128::from(*offset),
                    })?;
                let value = ctx.registers.get(*register)?;
                if !value.equals_integer(*compare) {
                    debug!(from = ctx.pc, to = destination, "branch taken");
                    // The evaluator increments after every instruction
                    ctx.pc = destination - 1;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())?;
        match self {
            Instruction::Sto { register, value } | Instruction::Add { register, value } => {
                write!(f, " {} {}", register, value)
            }
            Instruction::Pr { register } => write!(f, " {}", register),
            Instruction::Cmx { matrix, rows, cols } => write!(f, " {} {} {}", matrix, rows, cols),
            Instruction::Pmx { matrix } => write!(f, " {}", matrix),
            Instruction::Smx { matrix, values } => {
                write!(f, " {}", matrix)?;
                for value in values {
                    write!(f, " {}", value)?;
                }
                Ok(())
            }
            Instruction::Pde { stencil, matrix } => write!(f, " {} {}", stencil, matrix),
            Instruction::Bne {
                register,
                compare,
                offset,
            } => write!(f, " {} {} {}", register, compare, offset),
        }
    }
}

/// A parsed program: instructions in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at a program counter value
    pub fn get(&self, pc: i64) -> Option<&Instruction> {
        usize::try_from(pc)
            .ok()
            .and_then(|index| self.instructions.get(index))
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}
