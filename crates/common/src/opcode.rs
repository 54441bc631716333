//! Opcode definitions for the stackasm instruction language.
//!
//! The opcode of every instruction is decided once, when the program is
//! loaded. Any identifier that is not a built-in mnemonic names a label
//! and is treated as a call.

use std::fmt;

/// Identifies the operation to perform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Push one value onto the current frame.
    Push,
    /// Push `a + b`.
    Add,
    /// Push `a - b`.
    Sub,
    /// Push `a * b`.
    Mul,
    /// Push `a % b`, then `a / b`.
    Div,
    /// Push 1 if `a == b`, else 0.
    Equals,
    /// Jump to a label when the top of the current frame is 1.
    Branch,
    /// Return to the caller, depositing every operand in its frame.
    Ret,
    /// Call the label of this name.
    Call(String),
}

/// Every built-in opcode, in definition order. Calls are not included.
pub const BUILTIN_OPCODES: [Opcode; 8] = [
    Opcode::Push,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Equals,
    Opcode::Branch,
    Opcode::Ret,
];

impl Opcode {
    /// Resolve a lowercase mnemonic. Unknown names become calls.
    pub fn from_mnemonic(mnemonic: &str) -> Self {
        BUILTIN_OPCODES
            .iter()
            .find(|opcode| opcode.mnemonic() == mnemonic)
            .cloned()
            .unwrap_or_else(|| Opcode::Call(mnemonic.to_string()))
    }

    /// Returns the source mnemonic (the label name for calls).
    pub fn mnemonic(&self) -> &str {
        match self {
            Opcode::Push => "push",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Equals => "equals?",
            Opcode::Branch => "branch",
            Opcode::Ret => "ret",
            Opcode::Call(target) => target,
        }
    }

    /// Number of operands this opcode requires, or `None` if it is variadic.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Opcode::Push | Opcode::Branch => Some(1),
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Equals => Some(2),
            Opcode::Ret | Opcode::Call(_) => None,
        }
    }

    /// The label this instruction transfers control to, if any.
    ///
    /// For `branch` the target is an operand, so only calls answer here.
    pub fn call_target(&self) -> Option<&str> {
        match self {
            Opcode::Call(target) => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
