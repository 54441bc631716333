//! stackasm loader — program text → [`Program`].
//!
//! Each line is stripped of its `;` comment, split on whitespace and
//! lowercased. Blank lines vanish, `name:` lines register a label against
//! the next instruction, and every other line becomes one instruction.
//!
//! # Usage
//!
//! ```
//! use stackasm_loader::{list, load};
//!
//! let program = load("MAIN:\n  push 5 ; five\n  ret s0\n").unwrap();
//! assert_eq!(program.len(), 2);
//! assert_eq!(program.label("main"), Some(0));
//! assert_eq!(list(&program), "main:\n    push 5\n    ret s0\n");
//! ```

pub mod error;

mod lexer;
mod listing;
mod parser;

pub use error::LoadError;
pub use lexer::COMMENT_CHAR;
pub use listing::list;
pub use parser::LABEL_END_CHAR;

use std::io::BufRead;

use lexer::tokenize_line;
use parser::{parse_line, ParsedLine};
use stackasm_common::{Instruction, LabelTable, Program};

/// Load program text held in memory.
///
/// Returns the first error encountered.
pub fn load(text: &str) -> Result<Program, LoadError> {
    let mut loader = Loader::default();
    for (idx, line) in text.lines().enumerate() {
        loader.add_line(line, idx + 1)?;
    }
    Ok(loader.finish())
}

/// Load program text from a line source.
///
/// A read failure aborts loading with [`LoadError::Io`].
pub fn load_reader<R: BufRead>(reader: R) -> Result<Program, LoadError> {
    let mut loader = Loader::default();
    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.map_err(|e| LoadError::io(line_num, &e))?;
        loader.add_line(&line, line_num)?;
    }
    Ok(loader.finish())
}

/// Incremental program builder fed one line at a time.
#[derive(Debug, Default)]
struct Loader {
    instructions: Vec<Instruction>,
    labels: LabelTable,
}

impl Loader {
    fn add_line(&mut self, line: &str, line_num: usize) -> Result<(), LoadError> {
        match parse_line(tokenize_line(line), line_num)? {
            None => Ok(()),
            Some(ParsedLine::Instruction(instr)) => {
                self.instructions.push(instr);
                Ok(())
            }
            Some(ParsedLine::Label(name)) => {
                if self.labels.contains_key(&name) {
                    return Err(LoadError::DuplicateLabel {
                        line: line_num,
                        label: name,
                    });
                }
                // The label addresses the next instruction to be appended.
                self.labels.insert(name, self.instructions.len());
                Ok(())
            }
        }
    }

    fn finish(self) -> Program {
        Program::new(self.instructions, self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackasm_common::Opcode;

    #[test]
    fn load_minimal() {
        let program = load("main:\npush 5\nret s0\n").unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program.instructions[0].opcode, Opcode::Push);
        assert_eq!(program.instructions[0].operands, vec!["5"]);
        assert_eq!(program.instructions[1].opcode, Opcode::Ret);
        assert_eq!(program.label("main"), Some(0));
    }

    #[test]
    fn label_points_past_itself() {
        let program = load("push 1\nhelper:\nret s0\n").unwrap();
        assert_eq!(program.label("helper"), Some(1));
    }

    #[test]
    fn comments_and_blanks_ignored() {
        let text = "\
; header comment

main:   ; entry
    push 5  ; five

    ret s0
";
        let program = load(text).unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program.instructions[0].line, 4);
        assert_eq!(program.instructions[1].line, 6);
    }

    #[test]
    fn labels_case_insensitive() {
        let program = load("Main:\nRET S0\n").unwrap();
        assert_eq!(program.label("main"), Some(0));
        assert_eq!(program.instructions[0].operands, vec!["s0"]);
    }

    #[test]
    fn trailing_label_addresses_end() {
        let program = load("main:\nret 1\nend:\n").unwrap();
        assert_eq!(program.label("end"), Some(1));
    }

    #[test]
    fn consecutive_labels_share_index() {
        let program = load("a:\nb:\nret 1\n").unwrap();
        assert_eq!(program.label("a"), Some(0));
        assert_eq!(program.label("b"), Some(0));
    }

    #[test]
    fn error_label_with_extra_tokens() {
        let err = load("main: push 5\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidLabelDeclaration { line: 1, .. }
        ));
    }

    #[test]
    fn error_duplicate_label_reports_second_line() {
        let err = load("main:\nret 1\nMAIN:\nret 2\n").unwrap_err();
        assert_eq!(
            err,
            LoadError::DuplicateLabel {
                line: 3,
                label: "main".to_string()
            }
        );
    }

    #[test]
    fn load_reader_matches_load() {
        let text = "main:\n  add 2 3\n  ret s0\n";
        assert_eq!(load_reader(text.as_bytes()).unwrap(), load(text).unwrap());
    }

    #[test]
    fn load_reader_propagates_read_failure() {
        // Invalid UTF-8 on line 2.
        let bytes: &[u8] = b"main:\n\xff\xfe\n";
        let err = load_reader(bytes).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Io {
                line: 2,
                kind: std::io::ErrorKind::InvalidData,
                ..
            }
        ));
    }

    #[test]
    fn empty_text_is_empty_program() {
        let program = load("").unwrap();
        assert!(program.is_empty());
        assert!(program.labels.is_empty());
    }
}
