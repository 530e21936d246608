//! # sorted-sequence
//!
//! A singly-linked sequence container that keeps its elements sorted at all
//! times, in either ascending or descending order.
//!
//! ## Overview
//!
//! [`SortedSequence`](sequence::SortedSequence) owns a forward chain of nodes.
//! Every mutation (insert, delete, merge, duplicate removal, changing the sort
//! direction) preserves the sort invariant and the cached length, so the
//! container can always be read back in order.
//!
//! - **Stable insertion**: equal values land after the ones already present
//! - **Value semantics**: `Clone` is a deep copy, no nodes are ever shared
//! - **Recoverable failures**: missing values and bad indices are reported as
//!   [`SequenceError`](sequence::SequenceError), never as panics
//!
//! ## Feature Flags
//!
//! - `tracing`: emit TRACE-level events for structural operations
//!
//! ## Example
//!
//! ```rust
//! use sorted_sequence::prelude::*;
//!
//! let mut sequence = SortedSequence::new();
//! for value in [5, 3, 8, 1] {
//!     sequence.insert(value);
//! }
//! assert_eq!(sequence.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
//!
//! sequence.set_order(Direction::Descending);
//! assert_eq!(sequence.value_at(0), Ok(&8));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use sorted_sequence::prelude::*;
/// ```
pub mod prelude {
    pub use crate::sequence::*;
}

/// Emits a TRACE-level event when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($argument:tt)*) => {
        ::tracing::trace!($($argument)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($argument:tt)*) => {};
}

pub(crate) use trace_event;

pub mod sequence;
