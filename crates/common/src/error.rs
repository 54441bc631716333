//! Operand parse errors for stackasm programs.

use thiserror::Error;

/// Errors that occur while interpreting an operand token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    /// The token is neither a decimal literal nor a well-formed `sN` slot.
    #[error("invalid number '{token}'")]
    NumberParseFailure { token: String },
}
