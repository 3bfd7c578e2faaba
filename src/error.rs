//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, BitError>;

/// Input-contract violations reported to the immediate caller.
///
/// None of these are retryable: they describe a call that can never succeed
/// with the same arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitError {
    /// An argument is outside its documented domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two operands were required to have the same length.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A bit position is outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operation is undefined on a sequence carrying substitutions.
    #[error("{0} is not supported on a contracted sequence")]
    UnsupportedOnCompressedSequence(&'static str),

    /// The combination of operands is not allowed.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Malformed bit text.
    #[error("unexpected character {found:?} at position {position}")]
    Parse { position: usize, found: char },

    /// A decoded value does not fit the requested type.
    #[error("overflow: {0}")]
    Overflow(String),
}

impl BitError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, len })
        }
    }

    pub(crate) fn check_lengths(left: usize, right: usize) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Self::LengthMismatch { left, right })
        }
    }
}
