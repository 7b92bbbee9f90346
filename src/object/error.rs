use thiserror::Error;

use super::Kind;

/// Describes the error conditions that might arise while decoding git objects.
#[derive(Debug, Error)]
pub enum Error {
    /// The commit's header is structurally unusable (typically because
    /// the mandatory `tree` line is missing).
    #[error("malformed commit: {0}")]
    MalformedCommit(String),

    /// A tree record was truncated or otherwise could not be split into
    /// mode, name, and object ID.
    #[error("malformed tree at byte {offset}: {reason}")]
    MalformedTree { offset: usize, reason: &'static str },

    /// A numeric file mode that is not one of the five modes git recognizes.
    #[error("unknown file mode {0:o}")]
    UnknownMode(u32),

    /// No decoder exists for this kind of object.
    #[error("decoding {0} objects is not supported")]
    UnsupportedKind(Kind),

    /// The declared size of a raw object disagrees with its content.
    #[error("declared size {declared} does not match content length {actual}")]
    SizeMismatch { declared: u64, actual: u64 },

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for object decoding operations.
pub type Result<T> = std::result::Result<T, Error>;
