//! Operand values: integer literals and stack-relative slot references.

use std::fmt;

use crate::error::OperandError;

/// Prefix marking a stack-relative operand (`s0`, `s1`, ...).
pub const STACK_PREFIX: char = 's';

/// A decoded operand token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// A signed decimal literal.
    Literal(i64),
    /// Offset from the top of the current frame (0 = most recent value).
    Slot(usize),
}

impl Operand {
    /// Parse an operand token.
    ///
    /// Literals are an optional `-` followed by decimal digits. Slots are
    /// `s` followed by decimal digits. Anything else is a
    /// [`OperandError::NumberParseFailure`].
    pub fn parse(token: &str) -> Result<Self, OperandError> {
        match token.strip_prefix(STACK_PREFIX) {
            Some(_) => parse_slot(token).map(Operand::Slot),
            None => parse_literal(token).map(Operand::Literal),
        }
    }

    /// Returns true if the token carries the stack-relative prefix.
    ///
    /// The token may still fail to parse.
    pub fn is_slot_token(token: &str) -> bool {
        token.starts_with(STACK_PREFIX)
    }
}

/// Parse the slot offset of an `sN` token.
pub fn parse_slot(token: &str) -> Result<usize, OperandError> {
    let digits = token
        .strip_prefix(STACK_PREFIX)
        .ok_or_else(|| parse_failure(token))?;
    if !is_decimal(digits) {
        return Err(parse_failure(token));
    }
    digits.parse().map_err(|_| parse_failure(token))
}

fn parse_literal(token: &str) -> Result<i64, OperandError> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if !is_decimal(digits) {
        return Err(parse_failure(token));
    }
    token.parse().map_err(|_| parse_failure(token))
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_failure(token: &str) -> OperandError {
    OperandError::NumberParseFailure {
        token: token.to_string(),
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(v) => write!(f, "{v}"),
            Operand::Slot(n) => write!(f, "{STACK_PREFIX}{n}"),
        }
    }
}
