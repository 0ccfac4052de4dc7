//! Hand-written parser for the stencil bytecode language
//!
//! Turns the lexer's token stream into a [`Program`]. Each statement is a
//! mnemonic followed by a fixed operand shape looked up in a grammar table
//! built once per process.

pub mod parser;

pub use parser::{parse, parse_source, ParseError, END_OF_INPUT};

// Re-export lexer
pub use stencil_lexer::Token;
pub use stencil_runtime::{Instruction, Program};
