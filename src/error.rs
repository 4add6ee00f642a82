//! Error types for parsing, encoding and typing.

use std::io;
use thiserror::Error;

/// Malformed escape syntax. Aborts the whole input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input ends with a lone backslash.
    #[error("trailing backslash at byte {position} has no character to escape")]
    TrailingBackslash { position: usize },

    /// A `\"` group was opened but never closed.
    #[error("combo opened at byte {position} is missing its closing \\\"")]
    UnterminatedCombo { position: usize },
}

/// Failure to turn one emission unit into a report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Nothing in the unit maps to a key or modifier. Recoverable: the unit is skipped.
    #[error("no key mapping for {unit}")]
    Unresolved { unit: String },

    /// More keys than a boot keyboard report has slots for.
    #[error("combo needs {keys} key slots, a report holds at most 6")]
    ComboOverflow { keys: usize },
}

impl EncodeError {
    /// Whether typing can carry on past this unit.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EncodeError::Unresolved { .. })
    }
}

/// Errors that stop [`Engine::type_str`](crate::Engine::type_str).
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid input: {0}")]
    Encode(#[from] EncodeError),

    /// Writing a press report failed.
    #[error("failed to write key press report: {0}")]
    PressWrite(#[source] io::Error),

    /// Writing the matching release report failed.
    #[error("failed to write key release report: {0}")]
    ReleaseWrite(#[source] io::Error),
}
