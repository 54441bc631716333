//! Listing: loaded program → normalised program text.
//!
//! Labels are printed flush left, instructions indented by four spaces.
//! Comments and blank lines are gone and every token is lowercase.

use crate::parser::LABEL_END_CHAR;
use stackasm_common::{Instruction, Program};

const INDENT: &str = "    ";

/// Render a program as normalised text.
///
/// Loading the output again yields the same instructions and labels
/// (source line numbers aside).
pub fn list(program: &Program) -> String {
    let mut lines = Vec::with_capacity(program.len() + program.labels.len());

    for (index, instr) in program.instructions.iter().enumerate() {
        push_labels(&mut lines, program, index);
        lines.push(render(instr));
    }
    push_labels(&mut lines, program, program.len());

    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

fn push_labels(lines: &mut Vec<String>, program: &Program, index: usize) {
    lines.extend(
        program
            .labels_at(index)
            .map(|label| format!("{label}{LABEL_END_CHAR}")),
    );
}

fn render(instr: &Instruction) -> String {
    format!("{INDENT}{instr}")
}
