use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Offset {offset} is outside the line (length {len})")]
    BoundaryOutOfRange { offset: usize, len: usize },

    /// `index` is 0-based; the message counts lines from 1
    #[error("Line {} does not exist (document has {count} lines)", .index + 1)]
    LineOutOfRange { index: usize, count: usize },

    #[error("Unknown classifier: {0}")]
    UnknownClassifier(String),
}

pub type Result<T> = std::result::Result<T, Error>;
