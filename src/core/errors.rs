/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;
use thiserror::Error;

use super::index::Index;

/// Result type used throughout the toolkit
pub type KlResult<T> = Result<T, KlError>;

/// Kind tag carried by every [`KlError`]
///
/// Stable across message changes, so callers match on this rather than on text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    OutOfRange,
    NullReference,
    DuplicateIndex,
    OperationNotSupported,
    InvalidInputData,
    IoError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::NullReference => "null_reference",
            ErrorKind::DuplicateIndex => "duplicate_index",
            ErrorKind::OperationNotSupported => "operation_not_supported",
            ErrorKind::InvalidInputData => "invalid_input_data",
            ErrorKind::IoError => "io_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Toolkit error with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KlError {
    #[error("Index {index} out of range for length {len}")]
    #[diagnostic(
        code(kl::out_of_range),
        help("Valid positions are 0..len; relative addressing also accepts -len..-1.")
    )]
    OutOfRange { index: Index, len: usize },

    #[error("Key not found: {0}")]
    #[diagnostic(
        code(kl::key_not_found),
        help("Check presence with `has` or use `get_opt` for optional lookups.")
    )]
    KeyNotFound(SmartString),

    #[error("Null reference")]
    #[diagnostic(
        code(kl::null_reference),
        help("The handle is empty: it was reset, released, moved out of, or never assigned.")
    )]
    NullReference,

    #[error("Duplicate index: {0}")]
    #[diagnostic(code(kl::duplicate_index))]
    DuplicateIndex(SmartString),

    #[error("Operation not supported {op}: {reason}")]
    #[diagnostic(code(kl::operation_not_supported))]
    OperationNotSupported { op: SmartString, reason: SmartString },

    #[error("Invalid input data: [{received}], expected: [{expected}]")]
    #[diagnostic(code(kl::invalid_input_data))]
    InvalidInputData {
        received: SmartString,
        expected: SmartString,
    },

    #[error("IOException: {0}")]
    #[diagnostic(code(kl::io_error))]
    Io(#[from] std::io::Error),
}

impl KlError {
    /// Kind tag of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            KlError::OutOfRange { .. } | KlError::KeyNotFound(_) => ErrorKind::OutOfRange,
            KlError::NullReference => ErrorKind::NullReference,
            KlError::DuplicateIndex(_) => ErrorKind::DuplicateIndex,
            KlError::OperationNotSupported { .. } => ErrorKind::OperationNotSupported,
            KlError::InvalidInputData { .. } => ErrorKind::InvalidInputData,
            KlError::Io(_) => ErrorKind::IoError,
        }
    }

    #[inline]
    pub fn out_of_range(index: Index, len: usize) -> Self {
        KlError::OutOfRange { index, len }
    }

    pub fn key_not_found(key: impl fmt::Debug) -> Self {
        KlError::KeyNotFound(format!("{:?}", key).into())
    }

    pub fn operation_not_supported(op: &str, reason: &str) -> Self {
        KlError::OperationNotSupported {
            op: op.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_input_data(received: &str, expected: &str) -> Self {
        KlError::InvalidInputData {
            received: received.into(),
            expected: expected.into(),
        }
    }

    pub fn duplicate_index(location: &str) -> Self {
        KlError::DuplicateIndex(location.into())
    }

    /// Wrap an I/O failure described only by a message
    pub fn io(why: &str) -> Self {
        KlError::Io(std::io::Error::new(std::io::ErrorKind::Other, why.to_string()))
    }

    /// Wrap the last failure reported by the platform (`errno` / `GetLastError`)
    pub fn last_os_error() -> Self {
        KlError::Io(std::io::Error::last_os_error())
    }
}
