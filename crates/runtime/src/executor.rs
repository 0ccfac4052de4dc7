//! Program evaluator
//!
//! Plain fetch-execute loop: `pc := 0; while pc < len { program[pc].execute(); pc += 1 }`.
//! `BNE` moves the program counter by leaving it one short of its
//! destination.

use std::io::Write;

use tracing::{error, info, instrument, trace};

use crate::bytecode::Program;
use crate::error::Result;
use crate::storage::{MatrixBank, RegisterBank};
use crate::types::RunConfig;

/// Mutable interpreter state for one run
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Index of the instruction being executed
    pub pc: i64,
    /// Register bank
    pub registers: RegisterBank,
    /// Matrix bank
    pub matrices: MatrixBank,
    /// Options for this run
    pub config: RunConfig,
    program_length: i64,
}

impl ExecutionContext {
    /// Fresh context for a program of `program_length` instructions
    pub fn new(program_length: usize, config: RunConfig) -> Self {
        Self {
            pc: 0,
            registers: RegisterBank::default(),
            matrices: MatrixBank::default(),
            config,
            program_length: program_length as i64,
        }
    }

    /// Length of the running program; branch destinations must fall inside it
    pub fn program_length(&self) -> i64 {
        self.program_length
    }
}

/// Drives a program against its execution context
pub struct Evaluator<'p> {
    program: &'p Program,
    context: ExecutionContext,
}

impl<'p> Evaluator<'p> {
    pub fn new(program: &'p Program, config: RunConfig) -> Self {
        Self {
            program,
            context: ExecutionContext::new(program.len(), config),
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn into_context(self) -> ExecutionContext {
        self.context
    }

    /// Check whether the program counter has run off the end
    pub fn is_finished(&self) -> bool {
        self.context.pc >= self.context.program_length
    }

    /// Execute one instruction.
    ///
    /// Returns `Ok(false)` once the program has finished.
    pub fn step(&mut self, out: &mut dyn Write) -> Result<bool> {
        let Some(instruction) = self.program.get(self.context.pc) else {
            return Ok(false);
        };
        trace!(pc = self.context.pc, %instruction, "execute");
        instruction.execute(&mut self.context, out)?;
        self.context.pc += 1;
        Ok(true)
    }

    /// Run to completion or to the first error.
    ///
    /// Output written before an error stays written.
    #[instrument(skip_all, fields(instructions = self.program.len()))]
    pub fn run(&mut self, out: &mut dyn Write) -> Result<()> {
        info!("run starting");
        let mut executed: u64 = 0;
        loop {
            match self.step(out) {
                Ok(true) => executed += 1,
                Ok(false) => break,
                Err(e) => {
                    error!(pc = self.context.pc, kind = e.name(), error = %e, "run aborted");
                    return Err(e);
                }
            }
        }
        out.flush()?;
        info!(executed, "run complete");
        Ok(())
    }
}

/// Run `program` against a fresh context and hand the final state back
pub fn evaluate(
    program: &Program,
    config: RunConfig,
    out: &mut dyn Write,
) -> Result<ExecutionContext> {
    let mut evaluator = Evaluator::new(program, config);
    evaluator.run(out)?;
    Ok(evaluator.into_context())
}
