//! stackasm common types.
//!
//! This crate provides the data structures shared by the loader, the
//! resolver and the VM:
//!
//! - [`Opcode`]: the closed set of built-in operations plus calls
//! - [`Operand`]: integer literals and `sN` stack-relative references
//! - [`Instruction`]: an opcode with its raw operand tokens
//! - [`Program`]: the instruction store and its [`LabelTable`]
//! - [`OperandError`]: operand parse failures
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod operand;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::OperandError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use operand::Operand;
pub use program::{LabelTable, Program};
