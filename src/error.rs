//! RelsetError: unified error type for relset public APIs
//!
//! This error type is used throughout the relset library to provide robust,
//! non-panicking error handling for all public APIs.

use thiserror::Error;

/// Unified error type for relset operations.
#[derive(Debug, Error)]
pub enum RelsetError {
    /// A key was required but is absent from the forward mapping.
    #[error("no entry for key `{0}`")]
    MissingKey(String),
    /// An item was required but is absent from every key's value set.
    #[error("item `{0}` is not present in any value set")]
    MissingItem(String),
    /// An item was removed from a key whose set does not contain it.
    #[error("item `{item}` is not a member of the set for key `{key}`")]
    ItemNotInKey {
        /// The item that was looked up.
        item: String,
        /// The key whose set was inspected.
        key: String,
    },
    /// The forward and reverse sides of a relation disagree.
    #[error("reverse index inconsistent: {0}")]
    CorruptReverseIndex(String),
    /// A file split was requested with a zero part or line count.
    #[error("{0} must be at least 1")]
    ZeroSplitSize(&'static str),
    /// A column designation string could not be parsed.
    #[error("invalid column designation: {0}")]
    InvalidColumnSpec(String),
    /// More elements were requested than the sampled groups contain.
    #[error("cannot sample {requested} element(s) from a population of {available}")]
    SampleTooLarge {
        /// Number of elements requested.
        requested: usize,
        /// Total number of elements available.
        available: usize,
    },
    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
