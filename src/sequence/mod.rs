//! Order-maintaining sequence containers.
//!
//! This module provides:
//!
//! - [`SortedSequence`]: singly-linked chain kept sorted on every mutation
//! - [`Direction`]: the active sort order (ascending or descending)
//! - [`SequenceError`]: recoverable failures of lookups and indexed access
//!
//! # Examples
//!
//! ```rust
//! use sorted_sequence::sequence::{Direction, SequenceError, SortedSequence};
//!
//! let mut sequence: SortedSequence<i32> = SortedSequence::with_direction(Direction::Descending);
//! sequence.extend([1, 2, 2, 3]);
//! assert_eq!(format!("{sequence}"), "[3, 2, 2, 1]");
//!
//! assert_eq!(sequence.delete_all(&2), Ok(2));
//! assert_eq!(sequence.delete(&2), Err(SequenceError::NotFound));
//! assert_eq!(sequence.len(), 2);
//! ```
//!
//! # Ownership
//!
//! Every node is owned by exactly one predecessor, the first one by the
//! container itself:
//!
//! ```text
//! head -> [1] -> [3] -> [5] -> None
//! ```
//!
//! Splicing a node in or out rewires a single link, and a deep copy allocates
//! one fresh node per source node.

mod direction;
mod error;
mod sorted;

pub use direction::Direction;
pub use error::SequenceError;
pub use sorted::{SortedSequence, SortedSequenceIntoIterator, SortedSequenceIterator};
