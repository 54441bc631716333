//! Line parser: token list → label declaration or instruction.

use crate::error::LoadError;
use stackasm_common::Instruction;

/// A label declaration is a single token ending in this character.
pub const LABEL_END_CHAR: char = ':';

/// Result of parsing one non-blank line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ParsedLine {
    /// A label declaration, terminator stripped.
    Label(String),
    /// An executable instruction.
    Instruction(Instruction),
}

/// Parse the tokens of a single line.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(
    tokens: Vec<String>,
    line_num: usize,
) -> Result<Option<ParsedLine>, LoadError> {
    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    let Some(name) = first.strip_suffix(LABEL_END_CHAR) else {
        return Ok(Instruction::from_tokens(tokens, line_num).map(ParsedLine::Instruction));
    };

    if tokens.len() != 1 || name.is_empty() {
        return Err(LoadError::InvalidLabelDeclaration {
            line: line_num,
            text: tokens.join(" "),
        });
    }

    Ok(Some(ParsedLine::Label(name.to_string())))
}
