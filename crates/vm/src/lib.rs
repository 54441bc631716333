//! stackasm virtual machine — executes loaded programs.
//!
//! The VM is a call stack of bounded frames:
//! - Every call allocates a frame sized by the resolver's table
//! - Operands are literals or `sN` slots of the current frame
//! - `ret` discards the frame and deposits its operands in the caller's
//!
//! An outer frame of size 1 sits under the start label's frame. When the
//! start label returns, slot 0 of the outer frame is the program result.
//!
//! # Usage
//!
//! ```
//! use stackasm_vm::{interpret, Config};
//!
//! let text = "\
//! main:
//!     helper 7
//!     ret s0
//! helper:
//!     add s0 10
//!     ret s0
//! ";
//! assert_eq!(interpret(text, &Config::default()), Ok(17));
//! ```

pub mod error;
pub mod execute;
pub mod frame;
pub mod machine;

pub use error::{Error, RuntimeError};
pub use frame::{Frame, FramePolicy};
pub use machine::{Config, Step, DEFAULT_ENTRY, DEFAULT_MAX_CALL_DEPTH, VM};

use stackasm_common::Program;

/// Resolve frame sizes and execute a loaded program.
///
/// # Errors
///
/// Returns [`Error::Resolve`] if frame sizes cannot be inferred and
/// [`Error::Runtime`] if execution fails.
pub fn run(program: &Program, config: &Config) -> Result<i64, Error> {
    let frame_sizes = stackasm_resolver::resolve(program)?;
    let mut vm = VM::new(program, &frame_sizes, config.clone());
    Ok(vm.execute()?)
}

/// Load, resolve and execute program text.
pub fn interpret(text: &str, config: &Config) -> Result<i64, Error> {
    let program = stackasm_loader::load(text)?;
    run(&program, config)
}
