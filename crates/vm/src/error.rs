//! Runtime errors for the stackasm VM.
//!
//! These are errors that can only happen at runtime. Every error raised by
//! an instruction includes its index (`at`) for debugging.

use stackasm_loader::LoadError;
use stackasm_resolver::ResolveError;
use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Call or branch to a label with no body or no frame size.
    /// `at` is `None` for the call to the start label.
    #[error("unknown label '{label}'{}", site(.at))]
    InvalidLabel { at: Option<usize>, label: String },

    /// An operand token is not a literal or a well-formed `sN`.
    #[error("invalid number '{token}' at instruction {at}")]
    NumberParseFailure { at: usize, token: String },

    /// An opcode received the wrong number of operands.
    #[error("{opcode} expects {expected} operand(s), found {found} at instruction {at}")]
    InvalidOperandCount {
        at: usize,
        opcode: String,
        expected: usize,
        found: usize,
    },

    /// `div` with a zero divisor.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// Push into a full frame under the strict frame policy.
    #[error("frame capacity {capacity} exceeded at instruction {at}")]
    StackOverflow { at: usize, capacity: usize },

    /// Read of a slot below the bottom of the current frame.
    #[error("slot s{slot} read from frame holding {depth} value(s) at instruction {at}")]
    StackUnderflow { at: usize, slot: usize, depth: usize },

    /// Nested calls exceeded the configured limit.
    #[error("call depth exceeded limit {limit} at instruction {at}")]
    CallDepthExceeded { at: usize, limit: usize },

    /// A frame could not be allocated.
    #[error("cannot allocate frame of {size} slot(s){}", site(.at))]
    OutOfMemory { at: Option<usize>, size: usize },

    /// The instruction pointer left the program before the start label returned.
    #[error("unexpected end of program at instruction {at}")]
    UnexpectedEndOfProgram { at: usize },

    /// The result was requested before the start label returned.
    #[error("program has not finished")]
    NotFinished,
}

fn site(at: &Option<usize>) -> String {
    match at {
        Some(at) => format!(" at instruction {at}"),
        None => " at program start".to_string(),
    }
}

/// Any failure of a whole interpretation: load, resolve or run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The program text could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Frame sizes could not be inferred.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Execution failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
