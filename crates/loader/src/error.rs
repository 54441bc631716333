//! Error types for the stackasm loader.

use std::io;

use thiserror::Error;

/// Errors produced while loading program text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A label declaration carried extra tokens or an empty name.
    #[error("line {line}: invalid label declaration '{text}'")]
    InvalidLabelDeclaration { line: usize, text: String },

    /// The same label was declared twice.
    #[error("line {line}: duplicate label '{label}'")]
    DuplicateLabel { line: usize, label: String },

    /// The line source failed.
    #[error("line {line}: read failure: {message}")]
    Io {
        line: usize,
        kind: io::ErrorKind,
        message: String,
    },
}

impl LoadError {
    /// Wrap a read failure at the given line.
    pub(crate) fn io(line: usize, err: &io::Error) -> Self {
        LoadError::Io {
            line,
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// 1-based line the error occurred on.
    pub fn line(&self) -> usize {
        match self {
            LoadError::InvalidLabelDeclaration { line, .. }
            | LoadError::DuplicateLabel { line, .. }
            | LoadError::Io { line, .. } => *line,
        }
    }
}
