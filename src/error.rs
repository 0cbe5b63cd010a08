use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum MTreeError {
    /// A coordinate vector's length differs from the dimension established
    /// by the tree's first insertion. The tree is left untouched.
    #[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The node capacity passed at construction must admit at least one entry.
    #[error("max node size must be at least 1, got {0}")]
    InvalidNodeSize(usize),
}

pub type Result<T> = std::result::Result<T, MTreeError>;
