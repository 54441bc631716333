//! VM state management: configuration, call stack, frames.

use std::fmt;

use crate::error::RuntimeError;
use crate::frame::{Frame, FrameError, FramePolicy};
use stackasm_common::{Instruction, Program};
use stackasm_resolver::FrameSizeTable;

/// Label called to start a program.
pub const DEFAULT_ENTRY: &str = "main";

/// Nested label invocations allowed before the VM gives up.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 100_000;

/// Capacity of the synthetic frame that receives the program result.
pub const OUTER_FRAME_SIZE: usize = 1;

/// Execution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Label the program starts at.
    pub entry: String,
    /// Behaviour of a push into a full frame.
    pub frame_policy: FramePolicy,
    /// Maximum number of active label invocations.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry: DEFAULT_ENTRY.to_string(),
            frame_policy: FramePolicy::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// One entry of the call stack.
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// Instruction index to resume at after `ret`.
    /// Unused for the outer frame.
    pub return_ip: usize,
    /// Values owned by this invocation.
    pub frame: Frame,
}

/// Record of one executed instruction, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    /// Index of the instruction that ran.
    pub at: usize,
    /// The instruction itself.
    pub instruction: &'a Instruction,
    /// Call-stack depth after the instruction, outer frame included.
    pub depth: usize,
    /// Instruction pointer after the instruction.
    pub next_ip: usize,
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5} line {:<4} depth {:<3} {} -> {}",
            self.at, self.instruction.line, self.depth, self.instruction, self.next_ip
        )
    }
}

/// The stackasm virtual machine.
pub struct VM<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Frame capacity of every label.
    pub(crate) frame_sizes: &'a FrameSizeTable,
    /// Execution settings.
    pub(crate) config: Config,
    /// Call stack; index 0 is the outer frame once started.
    pub(crate) call_stack: Vec<CallFrame>,
    /// Instruction pointer.
    pub(crate) ip: usize,
}

impl<'a> VM<'a> {
    /// Create a new VM. Nothing runs until [`VM::start`].
    pub fn new(program: &'a Program, frame_sizes: &'a FrameSizeTable, config: Config) -> Self {
        Self {
            program,
            frame_sizes,
            config,
            call_stack: Vec::new(),
            ip: 0,
        }
    }

    /// Current instruction pointer.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Current call-stack depth, outer frame included.
    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    /// The frame of the innermost active call.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.call_stack.last().map(|entry| &entry.frame)
    }

    /// Allocate a frame for a call to `label`.
    pub(crate) fn allocate(&self, label: &str, at: Option<usize>) -> Result<Frame, RuntimeError> {
        let size = *self
            .frame_sizes
            .get(label)
            .ok_or_else(|| RuntimeError::InvalidLabel {
                at,
                label: label.to_string(),
            })?;
        Frame::new(size, self.config.frame_policy)
            .map_err(|_| RuntimeError::OutOfMemory { at, size })
    }

    /// Body start of `label`.
    pub(crate) fn label(&self, label: &str, at: Option<usize>) -> Result<usize, RuntimeError> {
        self.program
            .label(label)
            .ok_or_else(|| RuntimeError::InvalidLabel {
                at,
                label: label.to_string(),
            })
    }

    /// Read a slot of the current frame.
    pub(crate) fn read(&self, slot: usize, at: usize) -> Result<i64, RuntimeError> {
        let frame = self
            .current_frame()
            .ok_or(RuntimeError::StackUnderflow { at, slot, depth: 0 })?;
        frame.get(slot).map_err(|e| frame_error(e, at))
    }

    /// Push onto the current frame.
    pub(crate) fn push(&mut self, value: i64, at: usize) -> Result<(), RuntimeError> {
        let entry = self
            .call_stack
            .last_mut()
            .ok_or(RuntimeError::UnexpectedEndOfProgram { at })?;
        entry.frame.push(value).map_err(|e| frame_error(e, at))
    }
}

/// Attach an instruction index to a frame bounds violation.
pub(crate) fn frame_error(err: FrameError, at: usize) -> RuntimeError {
    match err {
        FrameError::Overflow { capacity } => RuntimeError::StackOverflow { at, capacity },
        FrameError::Underflow { slot, depth } => RuntimeError::StackUnderflow { at, slot, depth },
    }
}
