//! Error type for sequence operations.
//!
//! Failing operations check before they mutate, so a returned error always
//! leaves the sequence exactly as it was.

use thiserror::Error;

/// Recoverable failures of [`SortedSequence`](super::SortedSequence) operations.
///
/// # Examples
///
/// ```rust
/// use sorted_sequence::sequence::SequenceError;
///
/// let error = SequenceError::IndexOutOfRange { index: 5, length: 3 };
/// assert_eq!(
///     format!("{error}"),
///     "index 5 is out of range for sequence of length 3"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// `delete` or `delete_all` found no element equal to the target.
    #[error("value not found in sequence")]
    NotFound,

    /// Indexed access past the end of the sequence.
    #[error("index {index} is out of range for sequence of length {length}")]
    IndexOutOfRange {
        /// The requested zero-based index.
        index: usize,
        /// The length of the sequence at the time of the access.
        length: usize,
    },
}

impl SequenceError {
    /// Returns `true` if this error reports a missing value.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
