//! Resolution errors for stackasm programs.
//!
//! Errors tied to an instruction carry its index (`at`) and source line.

use thiserror::Error;

/// Errors found during static resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A label's body lies outside the program.
    #[error("label '{label}' has no body")]
    InvalidLabel { label: String },

    /// A stack-relative operand is not `s` followed by a decimal index.
    #[error("line {line}: invalid stack operand '{token}' at instruction {at}")]
    NumberParseFailure {
        at: usize,
        line: usize,
        token: String,
    },

    /// A call or branch names a label that was never declared.
    #[error("line {line}: undefined label '{label}' at instruction {at}")]
    UndefinedTarget {
        at: usize,
        line: usize,
        label: String,
    },

    /// An instruction has the wrong number of operands.
    #[error("line {line}: {opcode} expects {expected} operand(s), found {found} at instruction {at}")]
    InvalidOperandCount {
        at: usize,
        line: usize,
        opcode: String,
        expected: usize,
        found: usize,
    },
}
