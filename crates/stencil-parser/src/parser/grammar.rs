//! Statement grammar
//!
//! One production per mnemonic. Each production knows its operand shape
//! and how to read those operands off the stream into an [`Instruction`].
//! The table is built on first use and shared read-only afterwards.

use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use indexmap::IndexMap;
use stencil_lexer::{LexError, Spanned, Token};
use stencil_runtime::{Instruction, MatrixId, NumericValue, RegisterId};

use super::stream::TokenStream;
use super::ParseError;

/// Operand shapes a production can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Register or matrix index (`POS_INT`)
    Index,
    /// Non-negative integer (`POS_INT`)
    PosInt,
    /// Signed integer (`POS_INT | NEG_INT`)
    Int,
    /// Integer or real, tag kept
    Number,
    /// One or more numbers
    Numbers,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operand::Index => "index",
            Operand::PosInt => "posint",
            Operand::Int => "int",
            Operand::Number => "number",
            Operand::Numbers => "number+",
        })
    }
}

/// An operand value as read off the stream
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Index(u64),
    Int(i64),
    Number(NumericValue),
    Numbers(Vec<f64>),
}

/// Builds the instruction from operands in production order.
///
/// `None` means the operands do not fit the builder's pattern, i.e. the
/// rule's operand shape and builder disagree.
type Builder = fn(Vec<Value>) -> Option<Instruction>;

/// Grammar rule for one statement
pub struct Production {
    /// Mnemonic token kind
    pub mnemonic: &'static str,
    /// Operand shape, read left to right
    pub operands: &'static [Operand],
    build: Builder,
}

impl Production {
    /// Read this production's operands and build the instruction.
    ///
    /// The mnemonic, spanning `span`, has already been consumed.
    pub(crate) fn parse<I>(
        &self,
        stream: &mut TokenStream<I>,
        span: Range<usize>,
    ) -> Result<Instruction, ParseError>
    where
        I: Iterator<Item = Result<Spanned, LexError>>,
    {
        let mut values = Vec::with_capacity(self.operands.len());
        for operand in self.operands {
            values.push(match operand {
                Operand::Index => Value::Index(stream.expect_index()?),
                Operand::PosInt => Value::Int(stream.expect_pos_int()?),
                Operand::Int => Value::Int(stream.expect_int()?),
                Operand::Number => Value::Number(stream.expect_number()?),
                Operand::Numbers => Value::Numbers(stream.expect_numbers()?),
            });
        }
        (self.build)(values).ok_or(ParseError::MalformedRule {
            mnemonic: self.mnemonic,
            span,
        })
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)?;
        for operand in self.operands {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}

/// All productions, keyed by mnemonic kind
pub fn productions() -> &'static IndexMap<&'static str, Production> {
    static PRODUCTIONS: OnceLock<IndexMap<&'static str, Production>> = OnceLock::new();
    PRODUCTIONS.get_or_init(build_productions)
}

/// Production for a statement-leading token
pub fn production_for(token: &Token) -> Option<&'static Production> {
    if !token.is_mnemonic() {
        return None;
    }
    productions().get(token.kind())
}

fn build_productions() -> IndexMap<&'static str, Production> {
    use Operand::*;

    macro_rules! rule {
        ($mnemonic:literal, [$($operand:ident),*], $build:expr) => {
            (
                $mnemonic,
                Production {
                    mnemonic: $mnemonic,
                    operands: &[$($operand),*],
                    build: $build,
                },
            )
        };
    }

    IndexMap::from([
        rule!("STO", [Index, Number], |ops| match ops.as_slice() {
            [Value::Index(r), Value::Number(value)] => Some(Instruction::Sto {
                register: RegisterId(*r),
                value: *value,
            }),
            _ => None,
        }),
        rule!("PR", [Index], |ops| match ops.as_slice() {
            [Value::Index(r)] => Some(Instruction::Pr {
                register: RegisterId(*r),
            }),
            _ => None,
        }),
        rule!("ADD", [Index, Number], |ops| match ops.as_slice() {
            [Value::Index(r), Value::Number(value)] => Some(Instruction::Add {
                register: RegisterId(*r),
                value: *value,
            }),
            _ => None,
        }),
        rule!("CMX", [Index, PosInt, PosInt], |ops| match ops.as_slice() {
            [Value::Index(m), Value::Int(rows), Value::Int(cols)] => Some(Instruction::Cmx {
                matrix: MatrixId(*m),
                rows: *rows,
                cols: *cols,
            }),
            _ => None,
        }),
        rule!("PMX", [Index], |ops| match ops.as_slice() {
            [Value::Index(m)] => Some(Instruction::Pmx {
                matrix: MatrixId(*m),
            }),
            _ => None,
        }),
        rule!("SMX", [Index, Numbers], |ops| {
            let mut ops = ops.into_iter();
            match (ops.next(), ops.next(), ops.next()) {
                (Some(Value::Index(m)), Some(Value::Numbers(values)), None) => {
                    Some(Instruction::Smx {
                        matrix: MatrixId(m),
                        values,
                    })
                }
                _ => None,
            }
        }),
        rule!("PDE", [Index, Index], |ops| match ops.as_slice() {
            [Value::Index(stencil), Value::Index(m)] => Some(Instruction::Pde {
                stencil: MatrixId(*stencil),
                matrix: MatrixId(*m),
            }),
            _ => None,
        }),
        rule!("BNE", [Index, PosInt, Int], |ops| match ops.as_slice() {
            [Value::Index(r), Value::Int(compare), Value::Int(offset)] => {
                Some(Instruction::Bne {
                    register: RegisterId(*r),
                    compare: *compare,
                    offset: *offset,
                })
            }
            _ => None,
        }),
    ])
}
