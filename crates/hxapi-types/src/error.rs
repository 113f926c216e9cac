use thiserror::Error;

use crate::typedef::Int32;

/// Errors raised when raw controller values do not fit the typed vocabulary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HxError {
    /// A `Bool` held something other than `FALSE` or `TRUE`.
    #[error("invalid Bool value {0} (expected 0 or 1)")]
    InvalidBool(Int32),

    /// Raw communication-medium value with no matching variant.
    #[error("unknown communication medium value {0}")]
    UnknownMedium(Int32),

    /// Communication-medium name that could not be parsed.
    #[error("unknown communication medium name {0:?}")]
    UnknownMediumName(String),

    /// Text content longer than `TEXT_MAXSIZE` bytes.
    #[error("text of {len} bytes exceeds maximum of {max} bytes", max = crate::typedef::TEXT_MAXSIZE)]
    TextTooLong {
        /// Length of the rejected content in bytes.
        len: usize,
    },

    /// Text content containing a NUL byte before its end.
    #[error("text contains NUL byte at position {position}")]
    InteriorNul {
        /// Byte offset of the NUL.
        position: usize,
    },

    /// Text content is not valid UTF-8.
    #[error("text is not valid UTF-8")]
    InvalidUtf8,
}

/// Convenience type alias for conversions into the typed vocabulary.
pub type HxResult<T> = Result<T, HxError>;
