//! Error taxonomy for navigation commands.
//!
//! None of these errors are fatal. Command entry points log them at debug
//! level and turn them into a silent no-op, so a malformed or foreign buffer
//! simply yields no movement.

use thiserror::Error;

/// Errors produced while scanning a results buffer or driving the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// Navigation is only defined for exactly one caret.
    #[error("expected exactly one caret, found {0}")]
    AmbiguousSelection(usize),

    /// A scan reached the buffer boundary without a usable line.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The candidate list for a jump was empty.
    #[error("no navigation candidates")]
    NoCandidates,

    /// The command was invoked on a view that is not a Find Results buffer.
    #[error("view is not a Find Results buffer")]
    NotFindResults,

    /// An opened view did not report loaded in time.
    #[error("view did not finish loading within {timeout_ms}ms")]
    LoadTimeout { timeout_ms: u64 },

    /// The host editor rejected a request.
    #[error("host error: {0}")]
    Host(String),
}

/// Result alias used across the crate.
pub type NavResult<T> = Result<T, NavError>;
