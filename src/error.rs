//! Error types for paper and pencil operations.

use thiserror::Error;

/// Faults raised by position-based paper access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A position (or the end of an edited span) lies past the end of the paper.
    #[error("position {position} is out of bounds for paper of length {len}")]
    OutOfBounds { position: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
