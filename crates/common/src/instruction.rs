//! A single loaded instruction: opcode plus its raw operand tokens.
//!
//! Operand tokens stay as text. Literal operands are only parsed when the
//! instruction executes, so a malformed literal in code that never runs is
//! not an error.

use std::fmt;

use crate::opcode::Opcode;

/// One line of executable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The operation, decided at load time.
    pub opcode: Opcode,
    /// Lowercase operand tokens, in source order.
    pub operands: Vec<String>,
    /// 1-based source line the instruction was loaded from.
    pub line: usize,
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(opcode: Opcode, operands: Vec<String>, line: usize) -> Self {
        Self {
            opcode,
            operands,
            line,
        }
    }

    /// Build an instruction from a token list, the first token being the
    /// opcode. Returns `None` for an empty list.
    pub fn from_tokens(mut tokens: Vec<String>, line: usize) -> Option<Self> {
        if tokens.is_empty() {
            return None;
        }
        let operands = tokens.split_off(1);
        let opcode = Opcode::from_mnemonic(&tokens[0]);
        Some(Self::new(opcode, operands, line))
    }

    /// Returns true for `ret`.
    pub fn is_return(&self) -> bool {
        self.opcode == Opcode::Ret
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}
