//! Control-flow target and operand-count checks.
//!
//! Every call and every `branch` must name a declared label, and built-in
//! opcodes must carry the number of operands they consume. Execution
//! reports these problems only when the offending instruction runs; this
//! pass finds all of them up front.

use crate::error::ResolveError;
use stackasm_common::{Instruction, Opcode, Program};

/// Run the target check over the whole program.
pub fn check_targets(program: &Program) -> Vec<ResolveError> {
    let mut errors = Vec::new();

    for (at, instr) in program.instructions.iter().enumerate() {
        if let Some(error) = check_arity(at, instr) {
            errors.push(error);
            continue;
        }

        let target = match instr.opcode {
            Opcode::Branch => instr.operands.first().map(String::as_str),
            _ => instr.opcode.call_target(),
        };

        if let Some(label) = target {
            if program.label(label).is_none() {
                errors.push(ResolveError::UndefinedTarget {
                    at,
                    line: instr.line,
                    label: label.to_string(),
                });
            }
        }
    }

    errors
}

fn check_arity(at: usize, instr: &Instruction) -> Option<ResolveError> {
    let expected = instr.opcode.arity()?;
    let found = instr.operands.len();
    (found != expected).then(|| ResolveError::InvalidOperandCount {
        at,
        line: instr.line,
        opcode: instr.opcode.mnemonic().to_string(),
        expected,
        found,
    })
}
