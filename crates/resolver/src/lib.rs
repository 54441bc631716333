//! stackasm resolver — static analysis run before execution.
//!
//! Two passes over a loaded [`Program`]:
//!
//! 1. **Frame sizes**: the capacity every call to a label allocates,
//!    inferred from the deepest `sN` operand on its straight-line body.
//! 2. **Targets**: every call and `branch` names a declared label and
//!    built-in opcodes carry the right operand count.
//!
//! The VM only needs pass 1. [`check`] runs both and collects every error.
//!
//! # Usage
//!
//! ```
//! use stackasm_common::{Instruction, Opcode, Program, LabelTable};
//! use stackasm_resolver::resolve;
//!
//! let mut labels = LabelTable::new();
//! labels.insert("main".to_string(), 0);
//! let program = Program::new(
//!     vec![
//!         Instruction::new(Opcode::Add, vec!["s0".into(), "s1".into()], 2),
//!         Instruction::new(Opcode::Ret, vec!["s0".into()], 3),
//!     ],
//!     labels,
//! );
//!
//! let sizes = resolve(&program).unwrap();
//! assert_eq!(sizes["main"], 2);
//! ```

pub mod error;
pub mod frame_size;
pub mod targets;

pub use error::ResolveError;
pub use frame_size::{frame_size, resolve, FrameSizeTable, MIN_FRAME_SIZE};
pub use targets::check_targets;

use stackasm_common::Program;

/// Run every pass and return the frame-size table.
///
/// Returns `Err(Vec<ResolveError>)` with all errors found. Frame-size
/// inference stops at its first error; the target pass reports all of its
/// findings regardless.
pub fn check(program: &Program) -> Result<FrameSizeTable, Vec<ResolveError>> {
    let mut all_errors = Vec::new();

    let sizes = match resolve(program) {
        Ok(sizes) => Some(sizes),
        Err(e) => {
            all_errors.push(e);
            None
        }
    };

    all_errors.extend(check_targets(program));

    match sizes {
        Some(sizes) if all_errors.is_empty() => Ok(sizes),
        _ => Err(all_errors),
    }
}
