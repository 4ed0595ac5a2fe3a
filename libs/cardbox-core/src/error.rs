//! Error types for cardbox-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while loading a dataset.
///
/// Row-level problems (short rows, bad difficulty values, empty subjects) are
/// normalized or dropped silently; only dataset-level failures surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no parseable card rows in dataset")]
    EmptyDeck,

    #[error("emphasis marker {marker:?} cannot be used in a pipe-delimited row")]
    ReservedMarker { marker: char },
}

/// Errors raised by card navigation. Always recoverable: the pointer and the
/// rest of the session state are left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("no chapter is active")]
    NoActiveChapter,

    #[error("card number {requested} out of range (valid: 1-{total})")]
    OutOfRange { requested: usize, total: usize },
}
