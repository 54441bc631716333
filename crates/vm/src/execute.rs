//! Main execution loop and opcode dispatch for the stackasm VM.

use crate::error::RuntimeError;
use crate::frame::Frame;
use crate::machine::{frame_error, CallFrame, Step, OUTER_FRAME_SIZE, VM};
use stackasm_common::{Instruction, Opcode, Operand, Program};

impl<'a> VM<'a> {
    /// Run the program to completion and return its result.
    pub fn execute(&mut self) -> Result<i64, RuntimeError> {
        self.execute_traced(|_| {})
    }

    /// Run the program to completion, reporting every executed step.
    pub fn execute_traced<F>(&mut self, mut on_step: F) -> Result<i64, RuntimeError>
    where
        F: FnMut(&Step<'a>),
    {
        self.start()?;
        while let Some(step) = self.step()? {
            on_step(&step);
        }
        self.result()
    }

    /// Push the outer frame and call the start label with no arguments.
    ///
    /// Any previous run state is discarded.
    pub fn start(&mut self) -> Result<(), RuntimeError> {
        let entry = self.config.entry.clone();
        let body = self.label(&entry, None)?;
        let frame = self.allocate(&entry, None)?;
        let outer = Frame::new(OUTER_FRAME_SIZE, self.config.frame_policy).map_err(|_| {
            RuntimeError::OutOfMemory {
                at: None,
                size: OUTER_FRAME_SIZE,
            }
        })?;

        self.call_stack.clear();
        self.call_stack.push(CallFrame {
            return_ip: 0,
            frame: outer,
        });
        self.call_stack.push(CallFrame {
            return_ip: self.program.len(),
            frame,
        });
        self.ip = body;
        Ok(())
    }

    /// Returns true once the start label has returned.
    pub fn is_finished(&self) -> bool {
        self.call_stack.len() == 1
    }

    /// The program result: slot 0 of the outer frame.
    pub fn result(&self) -> Result<i64, RuntimeError> {
        match self.call_stack.as_slice() {
            [outer] => outer.frame.top().map_err(|e| frame_error(e, self.ip)),
            _ => Err(RuntimeError::NotFinished),
        }
    }

    /// Execute one instruction.
    ///
    /// Returns `Ok(None)` when there is nothing to run: before [`VM::start`]
    /// or after the start label has returned.
    pub fn step(&mut self) -> Result<Option<Step<'a>>, RuntimeError> {
        if self.call_stack.len() <= 1 {
            return Ok(None);
        }

        let program: &'a Program = self.program;
        let at = self.ip;
        let instr = program
            .get(at)
            .ok_or(RuntimeError::UnexpectedEndOfProgram { at })?;

        // Fall through unless the instruction redirects.
        self.ip = at + 1;

        match &instr.opcode {
            Opcode::Branch => self.exec_branch(at, instr)?,
            Opcode::Push => {
                let [value] = self.fixed_operands(at, instr)?;
                self.push(value, at)?;
            }
            Opcode::Add => self.exec_binary(at, instr, |a, b| a.wrapping_add(b))?,
            Opcode::Sub => self.exec_binary(at, instr, |a, b| a.wrapping_sub(b))?,
            Opcode::Mul => self.exec_binary(at, instr, |a, b| a.wrapping_mul(b))?,
            Opcode::Equals => self.exec_binary(at, instr, |a, b| i64::from(a == b))?,
            Opcode::Div => self.exec_div(at, instr)?,
            Opcode::Ret => {
                // Evaluated in the returning frame, deposited in the caller's.
                let values = self.evaluate_operands(at, instr)?;
                self.exec_ret(at, values)?;
            }
            Opcode::Call(target) => {
                // Arguments are evaluated in the caller's frame.
                let args = self.evaluate_operands(at, instr)?;
                self.exec_call(at, target, args)?;
            }
        }

        Ok(Some(Step {
            at,
            instruction: instr,
            depth: self.call_stack.len(),
            next_ip: self.ip,
        }))
    }

    // ---- Operands ----

    fn evaluate(&self, at: usize, token: &str) -> Result<i64, RuntimeError> {
        let operand = Operand::parse(token).map_err(|_| RuntimeError::NumberParseFailure {
            at,
            token: token.to_string(),
        })?;
        match operand {
            Operand::Literal(value) => Ok(value),
            Operand::Slot(slot) => self.read(slot, at),
        }
    }

    fn evaluate_operands(&self, at: usize, instr: &Instruction) -> Result<Vec<i64>, RuntimeError> {
        instr
            .operands
            .iter()
            .map(|token| self.evaluate(at, token))
            .collect()
    }

    fn fixed_operands<const N: usize>(
        &self,
        at: usize,
        instr: &Instruction,
    ) -> Result<[i64; N], RuntimeError> {
        let values = self.evaluate_operands(at, instr)?;
        <[i64; N]>::try_from(values).map_err(|_| operand_count(at, instr, N))
    }

    // ---- Arithmetic ----

    fn exec_binary(
        &mut self,
        at: usize,
        instr: &Instruction,
        op: impl Fn(i64, i64) -> i64,
    ) -> Result<(), RuntimeError> {
        let [a, b] = self.fixed_operands(at, instr)?;
        self.push(op(a, b), at)
    }

    /// Pushes the remainder, then the quotient on top of it.
    fn exec_div(&mut self, at: usize, instr: &Instruction) -> Result<(), RuntimeError> {
        let [a, b] = self.fixed_operands(at, instr)?;
        if b == 0 {
            return Err(RuntimeError::DivisionByZero { at });
        }
        self.push(a.wrapping_rem(b), at)?;
        self.push(a.wrapping_div(b), at)
    }

    // ---- Control flow ----

    fn exec_branch(&mut self, at: usize, instr: &Instruction) -> Result<(), RuntimeError> {
        let [target] = instr.operands.as_slice() else {
            return Err(operand_count(at, instr, 1));
        };
        if self.read(0, at)? == 1 {
            self.ip = self.label(target, Some(at))?;
        }
        Ok(())
    }

    fn exec_call(&mut self, at: usize, target: &str, args: Vec<i64>) -> Result<(), RuntimeError> {
        let body = self.label(target, Some(at))?;

        let active = self.call_stack.len().saturating_sub(1);
        if active >= self.config.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                at,
                limit: self.config.max_call_depth,
            });
        }

        let mut frame = self.allocate(target, Some(at))?;
        for value in args {
            frame.push(value).map_err(|e| frame_error(e, at))?;
        }

        self.call_stack.push(CallFrame {
            return_ip: at + 1,
            frame,
        });
        self.ip = body;
        Ok(())
    }

    fn exec_ret(&mut self, at: usize, values: Vec<i64>) -> Result<(), RuntimeError> {
        let finished = self
            .call_stack
            .pop()
            .ok_or(RuntimeError::UnexpectedEndOfProgram { at })?;
        self.ip = finished.return_ip;
        for value in values {
            self.push(value, at)?;
        }
        Ok(())
    }
}

fn operand_count(at: usize, instr: &Instruction, expected: usize) -> RuntimeError {
    RuntimeError::InvalidOperandCount {
        at,
        opcode: instr.opcode.mnemonic().to_string(),
        expected,
        found: instr.operands.len(),
    }
}
