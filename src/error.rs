//! Defines the [`Error`] type returned from fallible operations across the crate.

use thiserror::Error as ThisError;

/// Errors raised while validating a pattern's tile list.
#[derive(Clone, Debug, ThisError, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigError {
    /// A pattern must name exactly [`crate::pattern::PATTERN_SIZE`] tiles.
    #[error("WrongTileCount: pattern has {0} tiles, expected {1}")]
    WrongTileCount(usize, usize),

    /// A pattern tile must be a non-blank tile on the board, i.e. in `1..=24`.
    #[error("TileOutOfRange: tile {0} is not in 1..=24")]
    TileOutOfRange(u8),

    /// The same tile appeared twice in a pattern's tile list.
    #[error("DuplicateTile: tile {0} appears more than once in the pattern")]
    DuplicateTile(u8),
}

/// Errors raised when validating a proposed initial state for the 24-puzzle.
#[derive(Clone, Debug, ThisError, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationError {
    /// The state did not contain exactly 25 tile values.
    #[error("WrongLength: state has {0} entries, expected 25")]
    WrongLength(usize),

    /// The state's values are not a permutation of `0..25`.
    #[error("NotAPermutation: value {0} is missing or duplicated")]
    NotAPermutation(u8),
}

/// The top-level error type for this crate.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A pattern's tile list failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An I/O operation on a queue or database file failed, including a database
    /// file whose size does not match the expected dense-array size.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An initial puzzle state failed validation.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// An internal invariant was violated: a popped node after the search should
    /// have terminated, a visited bit was set when it should not have been, or a
    /// database entry exceeded the 125-layer diameter bound.
    #[error("invariant violation: {0}")]
    Invariant(&'static str),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
