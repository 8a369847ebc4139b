use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// A UTF-16 key holds a surrogate that is not part of a valid pair.
    #[error("invalid key: unpaired surrogate {unit:#06x} at index {index}")]
    InvalidKey { index: usize, unit: u16 },

    #[error("unknown edge order {0:?} (expected \"insertion\" or \"lexicographic\")")]
    UnknownEdgeOrder(String),
}

pub type Result<T> = std::result::Result<T, TrieError>;
