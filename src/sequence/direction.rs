//! Sort direction of a [`SortedSequence`](super::SortedSequence).

use std::cmp::Ordering;
use std::fmt;

/// The order in which a sequence keeps its elements.
///
/// # Examples
///
/// ```rust
/// use sorted_sequence::sequence::Direction;
/// use std::cmp::Ordering;
///
/// assert_eq!(Direction::default(), Direction::Ascending);
/// assert_eq!(Direction::Ascending.compare(&1, &2), Ordering::Less);
/// assert_eq!(Direction::Descending.compare(&1, &2), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest element first.
    #[default]
    Ascending,
    /// Largest element first.
    Descending,
}

impl Direction {
    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Compares two values as they are ordered under this direction.
    ///
    /// `Ordering::Less` means `left` belongs before `right` in the chain.
    #[inline]
    #[must_use]
    pub fn compare<T: Ord>(self, left: &T, right: &T) -> Ordering {
        match self {
            Self::Ascending => left.cmp(right),
            Self::Descending => right.cmp(left),
        }
    }

    /// Returns `true` if `left` must come strictly before `right`.
    #[inline]
    pub(crate) fn precedes<T: Ord>(self, left: &T, right: &T) -> bool {
        self.compare(left, right) == Ordering::Less
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => formatter.write_str("ascending"),
            Self::Descending => formatter.write_str("descending"),
        }
    }
}
