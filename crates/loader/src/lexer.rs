//! Tokenizer for stackasm program text.

/// Everything from this character to end of line is ignored.
pub const COMMENT_CHAR: char = ';';

/// Tokenize a single line of program text.
///
/// Strips the comment, splits on whitespace and lowercases every token.
/// Returns an empty Vec for blank lines and comment-only lines.
pub(crate) fn tokenize_line(line: &str) -> Vec<String> {
    let code = match line.find(COMMENT_CHAR) {
        Some(pos) => &line[..pos],
        None => line,
    };

    code.split_whitespace().map(str::to_lowercase).collect()
}
