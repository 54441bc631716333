//! Frame-size inference.
//!
//! For every label, scan forward from its body start and record the
//! deepest `sN` operand seen, up to and including the first `ret`. The
//! scan is straight-line: it crosses other label declarations freely and
//! never follows `branch` targets. A body that branches elsewhere before
//! returning can therefore get a frame that is too small for the code it
//! actually runs.

use std::collections::BTreeMap;

use crate::error::ResolveError;
use stackasm_common::operand::parse_slot;
use stackasm_common::{Instruction, Opcode, Operand, Program};

/// Label name → frame capacity allocated on every call to it.
pub type FrameSizeTable = BTreeMap<String, usize>;

/// Every frame holds at least the slot its result may be read from.
pub const MIN_FRAME_SIZE: usize = 1;

/// Compute the frame size of every declared label.
///
/// Labels that are never called still get an entry.
pub fn resolve(program: &Program) -> Result<FrameSizeTable, ResolveError> {
    program
        .labels
        .keys()
        .map(|label| Ok((label.clone(), frame_size(program, label)?)))
        .collect()
}

/// Compute the frame size of a single label.
pub fn frame_size(program: &Program, label: &str) -> Result<usize, ResolveError> {
    let start = program
        .label(label)
        .filter(|&start| start <= program.len())
        .ok_or_else(|| ResolveError::InvalidLabel {
            label: label.to_string(),
        })?;

    let mut size = MIN_FRAME_SIZE;
    for (at, instr) in program.instructions.iter().enumerate().skip(start) {
        size = size.max(slots_referenced(at, instr)?);
        if instr.is_return() {
            break;
        }
    }
    Ok(size)
}

/// Number of slots an instruction needs: deepest `sN` plus one.
fn slots_referenced(at: usize, instr: &Instruction) -> Result<usize, ResolveError> {
    // The operand of `branch` is a label name, never a value.
    if instr.opcode == Opcode::Branch {
        return Ok(0);
    }

    let mut needed = 0;
    for token in instr.operands.iter().filter(|t| Operand::is_slot_token(t)) {
        let count = parse_slot(token)
            .ok()
            .and_then(|slot| slot.checked_add(1))
            .ok_or_else(|| ResolveError::NumberParseFailure {
                at,
                line: instr.line,
                token: token.clone(),
            })?;
        needed = needed.max(count);
    }
    Ok(needed)
}
