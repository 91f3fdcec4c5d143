//! Error types for the dice engine.

use thiserror::Error;

/// Errors that can occur while operating on a user's dice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// A reroll addressed a normal die that is not part of the cached roll.
    ///
    /// `index` is zero-based; the message shows it one-based, the way the
    /// user typed it.
    #[error("there is no normal die #{} to reroll (you have {len} normal dice)", index + 1)]
    IndexOutOfRange {
        /// The offending zero-based index.
        index: usize,
        /// Number of normal dice in the cached roll.
        len: usize,
    },
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
