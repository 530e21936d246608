//! Singly-linked sequence kept in sorted order.
//!
//! This module provides [`SortedSequence`], a forward chain of uniquely owned
//! nodes whose elements are always sorted under the sequence's
//! [`Direction`].
//!
//! # Overview
//!
//! - O(n) stable insertion at the sorted position
//! - O(n) deletion of the first equal element
//! - O(k) deletion of every equal element, where k is the length of the
//!   prefix that is not yet past the target
//! - O(n) duplicate removal in a single pass
//! - O(n log n) change of direction
//! - O(1) length, O(n) indexed access
//!
//! # Examples
//!
//! ```rust
//! use sorted_sequence::sequence::SortedSequence;
//!
//! let mut sequence: SortedSequence<i32> = SortedSequence::new();
//! sequence.extend([5, 3, 8, 1]);
//!
//! let collected: Vec<&i32> = sequence.iter().collect();
//! assert_eq!(collected, vec![&1, &3, &5, &8]);
//! assert_eq!(sequence.len(), 4);
//! ```
//!
//! # Stable Insertion
//!
//! Insertion stops at the first node that does not strictly precede the new
//! value, so equal values keep their arrival order:
//!
//! ```text
//! [1, 2a, 3].insert(2b)  =>  [1, 2a, 2b, 3]
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};
use std::ops::Index;

use super::{Direction, SequenceError};
use crate::trace_event;

type Link<T> = Option<Box<Node<T>>>;

/// Internal node of the chain.
///
/// Each node exclusively owns its successor.
struct Node<T> {
    element: T,
    next: Link<T>,
}

/// Detaches the node held by `link` and moves its successor into its place.
///
/// Returns the detached element, or `None` if `link` was empty.
fn unlink<T>(link: &mut Link<T>) -> Option<T> {
    link.take().map(|node| {
        let Node { element, next } = *node;
        *link = next;
        element
    })
}

/// Walks forward while `predicate` holds and returns the first link it fails on.
///
/// The returned link is either the node that stopped the walk or the empty
/// link at the end of the chain.
fn seek<T, P>(mut cursor: &mut Link<T>, mut predicate: P) -> &mut Link<T>
where
    P: FnMut(&T) -> bool,
{
    while cursor
        .as_ref()
        .is_some_and(|node| predicate(&node.element))
    {
        if let Some(node) = cursor {
            cursor = &mut node.next;
        }
    }
    cursor
}

/// Releases a chain node by node so long chains never recurse in `Drop`.
fn release_chain<T>(mut link: Link<T>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

/// A singly-linked sequence that keeps its elements sorted.
///
/// Elements are ordered by their `Ord` implementation, smallest first for
/// [`Direction::Ascending`] and largest first for [`Direction::Descending`].
///
/// # Time Complexity
///
/// | Operation           | Complexity |
/// |---------------------|------------|
/// | `new`               | O(1)       |
/// | `insert`            | O(n)       |
/// | `delete`            | O(n)       |
/// | `delete_all`        | O(n)       |
/// | `merge`             | O(n * m)   |
/// | `remove_duplicates` | O(n)       |
/// | `set_order`         | O(n log n) |
/// | `len`               | O(1)       |
/// | `value_at`          | O(n)       |
/// | `clone`             | O(n)       |
///
/// # Examples
///
/// ```rust
/// use sorted_sequence::sequence::{Direction, SortedSequence};
///
/// let mut sequence = SortedSequence::with_direction(Direction::Descending);
/// sequence.insert(1);
/// sequence.insert(3);
/// sequence.insert(2);
/// assert_eq!(sequence.first(), Some(&3));
/// ```
pub struct SortedSequence<T> {
    /// First node of the chain, `None` exactly when `length == 0`.
    head: Link<T>,
    /// Number of nodes reachable from `head`.
    length: usize,
    /// Active sort order.
    direction: Direction,
}

impl<T> SortedSequence<T> {
    /// Creates a new empty sequence in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::{Direction, SortedSequence};
    ///
    /// let sequence: SortedSequence<i32> = SortedSequence::new();
    /// assert!(sequence.is_empty());
    /// assert_eq!(sequence.direction(), Direction::Ascending);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_direction(Direction::Ascending)
    }

    /// Creates a new empty sequence that sorts in the given direction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::{Direction, SortedSequence};
    ///
    /// let sequence: SortedSequence<i32> = SortedSequence::with_direction(Direction::Descending);
    /// assert_eq!(sequence.direction(), Direction::Descending);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_direction(direction: Direction) -> Self {
        Self {
            head: None,
            length: 0,
            direction,
        }
    }

    /// Builds a sequence from elements that are already in chain order.
    fn build_from_vec(mut elements: Vec<T>, direction: Direction) -> Self {
        let length = elements.len();
        let mut head: Link<T> = None;
        while let Some(element) = elements.pop() {
            head = Some(Box::new(Node {
                element,
                next: head,
            }));
        }
        Self {
            head,
            length,
            direction,
        }
    }

    /// Moves every element out of the chain, in chain order.
    fn drain_elements(&mut self) -> Vec<T> {
        let mut elements = Vec::with_capacity(self.length);
        while let Some(element) = self.pop_first() {
            elements.push(element);
        }
        elements
    }

    /// Returns the number of elements in the sequence.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the sequence contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the active sort direction.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns an iterator over references to the elements in sorted order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::SortedSequence;
    ///
    /// let sequence: SortedSequence<i32> = [3, 1, 2].into_iter().collect();
    /// let collected: Vec<&i32> = sequence.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> SortedSequenceIterator<'_, T> {
        SortedSequenceIterator {
            current: self.head.as_deref(),
            remaining: self.length,
        }
    }

    /// Returns the first element in chain order.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the last element in chain order.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.iter().last()
    }

    /// Returns a reference to the element at `index`, or `None` if out of range.
    ///
    /// # Complexity
    ///
    /// O(n) where n = index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Returns a reference to the element at the zero-based `index`.
    ///
    /// The reference is read-only: stored values cannot be changed through
    /// indexed access.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] if `index >= self.len()`,
    /// which includes every index into an empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::{SequenceError, SortedSequence};
    ///
    /// let sequence: SortedSequence<i32> = [5, 3, 8].into_iter().collect();
    /// assert_eq!(sequence.value_at(1), Ok(&5));
    /// assert_eq!(
    ///     sequence.value_at(5),
    ///     Err(SequenceError::IndexOutOfRange { index: 5, length: 3 })
    /// );
    /// ```
    pub fn value_at(&self, index: usize) -> Result<&T, SequenceError> {
        self.get(index).ok_or(SequenceError::IndexOutOfRange {
            index,
            length: self.length,
        })
    }

    /// Calls `visitor` on every element, in chain order, with mutable access
    /// to the element itself.
    ///
    /// The chain structure cannot be changed through the visitor. If the
    /// visitor changes values in a way that breaks the ordering, later
    /// operations see an unsorted chain; [`is_sorted`](Self::is_sorted)
    /// detects this.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::SortedSequence;
    ///
    /// let mut sequence: SortedSequence<i32> = [1, 2, 3].into_iter().collect();
    /// sequence.traverse(|element| *element *= 10);
    /// assert_eq!(format!("{sequence}"), "[10, 20, 30]");
    /// ```
    pub fn traverse<F>(&mut self, mut visitor: F)
    where
        F: FnMut(&mut T),
    {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            visitor(&mut node.element);
            cursor = node.next.as_deref_mut();
        }
    }

    /// Removes and returns the first element in chain order.
    pub fn pop_first(&mut self) -> Option<T> {
        let element = unlink(&mut self.head)?;
        self.length -= 1;
        Some(element)
    }

    /// Releases every element and resets the sequence.
    ///
    /// Afterwards the sequence is empty and its direction is
    /// [`Direction::Ascending`], whatever it was before.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::{Direction, SortedSequence};
    ///
    /// let mut sequence = SortedSequence::with_direction(Direction::Descending);
    /// sequence.insert(1);
    /// sequence.clear();
    /// assert!(sequence.is_empty());
    /// assert_eq!(sequence.direction(), Direction::Ascending);
    /// ```
    pub fn clear(&mut self) {
        trace_event!(released = self.length, "clearing sequence");
        release_chain(self.head.take());
        self.length = 0;
        self.direction = Direction::Ascending;
    }
}

impl<T: Ord> SortedSequence<T> {
    /// Inserts `value` at its sorted position.
    ///
    /// The value is placed before the first element it strictly precedes, so
    /// it lands after any elements equal to it.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::SortedSequence;
    ///
    /// let mut sequence = SortedSequence::new();
    /// sequence.insert(5);
    /// sequence.insert(3);
    /// sequence.insert(8);
    /// sequence.insert(1);
    /// assert_eq!(format!("{sequence}"), "[1, 3, 5, 8]");
    /// ```
    pub fn insert(&mut self, value: T) {
        let direction = self.direction;
        let slot = seek(&mut self.head, |element| !direction.precedes(&value, element));
        let next = slot.take();
        *slot = Some(Box::new(Node {
            element: value,
            next,
        }));
        self.length += 1;
    }

    /// Removes the first element equal to `value` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NotFound`] if no element equals `value`; the
    /// sequence is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::{SequenceError, SortedSequence};
    ///
    /// let mut sequence: SortedSequence<i32> = [5, 3, 8, 1].into_iter().collect();
    /// assert_eq!(sequence.delete(&3), Ok(3));
    /// assert_eq!(sequence.delete(&3), Err(SequenceError::NotFound));
    /// assert_eq!(sequence.len(), 3);
    /// ```
    pub fn delete(&mut self, value: &T) -> Result<T, SequenceError> {
        let slot = seek(&mut self.head, |element| element != value);
        match unlink(slot) {
            Some(element) => {
                self.length -= 1;
                Ok(element)
            }
            None => {
                trace_event!(length = self.length, "delete found no matching element");
                Err(SequenceError::NotFound)
            }
        }
    }

    /// Removes every element equal to `value` and returns how many were removed.
    ///
    /// Only the leading run of elements that are not yet past `value` under
    /// the active direction is scanned; the walk stops at the first element
    /// `value` strictly precedes.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NotFound`] if no element equals `value`; the
    /// sequence is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::SortedSequence;
    ///
    /// let mut sequence: SortedSequence<i32> = [1, 2, 2, 3].into_iter().collect();
    /// assert_eq!(sequence.delete_all(&2), Ok(2));
    /// assert_eq!(format!("{sequence}"), "[1, 3]");
    /// ```
    pub fn delete_all(&mut self, value: &T) -> Result<usize, SequenceError> {
        let direction = self.direction;
        let mut released = 0;
        let mut cursor = &mut self.head;
        while cursor
            .as_ref()
            .is_some_and(|node| !direction.precedes(value, &node.element))
        {
            if cursor.as_ref().is_some_and(|node| node.element == *value) {
                unlink(cursor);
                released += 1;
            } else if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }

        if released == 0 {
            trace_event!(length = self.length, "delete_all found no matching element");
            return Err(SequenceError::NotFound);
        }
        self.length -= released;
        trace_event!(released, length = self.length, "delete_all released elements");
        Ok(released)
    }

    /// Collapses every run of equal adjacent elements into one element.
    ///
    /// Returns the number of elements removed. Only adjacent duplicates are
    /// detected, which covers all duplicates while the chain is sorted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::SortedSequence;
    ///
    /// let mut sequence: SortedSequence<i32> = [1, 2, 2, 3].into_iter().collect();
    /// assert_eq!(sequence.remove_duplicates(), 1);
    /// assert_eq!(format!("{sequence}"), "[1, 2, 3]");
    /// ```
    pub fn remove_duplicates(&mut self) -> usize {
        let mut released = 0;
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            while node
                .next
                .as_ref()
                .is_some_and(|next| next.element == node.element)
            {
                unlink(&mut node.next);
                released += 1;
            }
            cursor = node.next.as_deref_mut();
        }
        self.length -= released;
        trace_event!(released, length = self.length, "removed duplicate elements");
        released
    }

    /// Changes the sort direction, re-sorting the elements if needed.
    ///
    /// Setting the current direction is a no-op and an empty sequence only
    /// records the new direction. Otherwise the elements are stably re-sorted,
    /// so equal elements keep their current relative order.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::{Direction, SortedSequence};
    ///
    /// let mut sequence: SortedSequence<i32> = [3, 1, 2].into_iter().collect();
    /// sequence.set_order(Direction::Descending);
    /// assert_eq!(format!("{sequence}"), "[3, 2, 1]");
    /// ```
    pub fn set_order(&mut self, direction: Direction) {
        if self.direction == direction {
            return;
        }
        if self.is_empty() {
            self.direction = direction;
            return;
        }

        trace_event!(
            from = %self.direction,
            to = %direction,
            length = self.length,
            "re-sorting sequence"
        );
        let mut elements = self.drain_elements();
        elements.sort_by(|left, right| direction.compare(left, right));
        *self = Self::build_from_vec(elements, direction);
    }

    /// Returns `true` if any element equals `value`.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|element| element == value)
    }

    /// Returns `true` if the chain is ordered under the active direction.
    ///
    /// This holds after every operation of this type; it can only fail after a
    /// [`traverse`](Self::traverse) visitor reordered the values.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        let direction = self.direction;
        self.iter()
            .zip(self.iter().skip(1))
            .all(|(previous, next)| !direction.precedes(next, previous))
    }
}

impl<T: Clone> SortedSequence<T> {
    /// Deep-copies the chain, one new node per source node, in order.
    fn clone_chain(&self) -> Link<T> {
        let mut head: Link<T> = None;
        let mut tail = &mut head;
        for element in self {
            let node = tail.insert(Box::new(Node {
                element: element.clone(),
                next: None,
            }));
            tail = &mut node.next;
        }
        head
    }

    /// Replaces the contents of `self` with a deep copy of `source`.
    ///
    /// All existing nodes are released first. Length and direction are taken
    /// from `source`, and the two sequences share no nodes afterwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::{Direction, SortedSequence};
    ///
    /// let source: SortedSequence<i32> = [1, 2].into_iter().collect();
    /// let mut target = SortedSequence::with_direction(Direction::Descending);
    /// target.insert(9);
    ///
    /// target.assign(&source);
    /// assert_eq!(target, source);
    /// ```
    pub fn assign(&mut self, source: &Self) {
        release_chain(self.head.take());
        self.head = source.clone_chain();
        self.length = source.length;
        self.direction = source.direction;
    }
}

impl<T: Ord + Clone> SortedSequence<T> {
    /// Inserts a copy of every element of `other`, one at a time.
    ///
    /// `other` is left untouched and its direction does not matter: each copy
    /// is inserted at its sorted position under `self`'s direction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_sequence::sequence::{Direction, SortedSequence};
    ///
    /// let mut sequence: SortedSequence<i32> = [1, 4].into_iter().collect();
    /// let mut other: SortedSequence<i32> = SortedSequence::with_direction(Direction::Descending);
    /// other.extend([3, 2]);
    ///
    /// sequence.merge(&other);
    /// assert_eq!(format!("{sequence}"), "[1, 2, 3, 4]");
    /// assert_eq!(other.len(), 2);
    /// ```
    pub fn merge(&mut self, other: &Self) {
        for element in other {
            self.insert(element.clone());
        }
    }
}

static_assertions::assert_impl_all!(SortedSequence<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(SortedSequence<std::rc::Rc<i32>>: Send, Sync);

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`SortedSequence`].
pub struct SortedSequenceIterator<'a, T> {
    current: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for SortedSequenceIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_deref();
            self.remaining -= 1;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SortedSequenceIterator<'_, T> {}

impl<T> FusedIterator for SortedSequenceIterator<'_, T> {}

/// An owning iterator over elements of a [`SortedSequence`].
pub struct SortedSequenceIntoIterator<T> {
    sequence: SortedSequence<T>,
}

impl<T> Iterator for SortedSequenceIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.sequence.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.sequence.length, Some(self.sequence.length))
    }
}

impl<T> ExactSizeIterator for SortedSequenceIntoIterator<T> {}

impl<T> FusedIterator for SortedSequenceIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for SortedSequence<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SortedSequence<T> {
    fn drop(&mut self) {
        release_chain(self.head.take());
    }
}

impl<T: Clone> Clone for SortedSequence<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.clone_chain(),
            length: self.length,
            direction: self.direction,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<T> Index<usize> for SortedSequence<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics with the [`SequenceError::IndexOutOfRange`] message if `index`
    /// is out of range.
    fn index(&self, index: usize) -> &Self::Output {
        match self.value_at(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Collects into an ascending sequence.
///
/// The result is the same as inserting the elements one by one in iteration
/// order, but built with a single stable sort.
impl<T: Ord> FromIterator<T> for SortedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut elements: Vec<T> = iter.into_iter().collect();
        elements.sort();
        Self::build_from_vec(elements, Direction::Ascending)
    }
}

impl<T: Ord> Extend<T> for SortedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T: Ord + Copy + 'a> Extend<&'a T> for SortedSequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> IntoIterator for SortedSequence<T> {
    type Item = T;
    type IntoIter = SortedSequenceIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SortedSequenceIntoIterator { sequence: self }
    }
}

impl<'a, T> IntoIterator for &'a SortedSequence<T> {
    type Item = &'a T;
    type IntoIter = SortedSequenceIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for SortedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.direction == other.direction
            && self.length == other.length
            && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SortedSequence<T> {}

impl<T: Hash> Hash for SortedSequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.direction.hash(state);
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for SortedSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Element whose ordering only looks at `key`, so equal elements can be
    /// told apart by `tag`.
    #[derive(Debug, Clone, Copy)]
    struct Tagged {
        key: i32,
        tag: char,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl Eq for Tagged {}

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.key.cmp(&other.key)
        }
    }

    const fn tagged(key: i32, tag: char) -> Tagged {
        Tagged { key, tag }
    }

    fn tags(sequence: &SortedSequence<Tagged>) -> String {
        sequence.iter().map(|element| element.tag).collect()
    }

    fn collect(sequence: &SortedSequence<i32>) -> Vec<i32> {
        sequence.iter().copied().collect()
    }

    fn chain_length<T>(sequence: &SortedSequence<T>) -> usize {
        let mut count = 0;
        let mut current = sequence.head.as_deref();
        while let Some(node) = current {
            count += 1;
            current = node.next.as_deref();
        }
        count
    }

    // =========================================================================
    // Chain Primitives
    // =========================================================================

    #[rstest]
    fn test_unlink_relinks_successor() {
        let mut sequence = SortedSequence::build_from_vec(vec![1, 2, 3], Direction::Ascending);
        assert_eq!(unlink(&mut sequence.head), Some(1));
        sequence.length -= 1;
        assert_eq!(collect(&sequence), vec![2, 3]);
    }

    #[rstest]
    fn test_unlink_empty_link() {
        let mut link: Link<i32> = None;
        assert_eq!(unlink(&mut link), None);
    }

    #[rstest]
    fn test_seek_stops_at_first_failing_node() {
        let mut sequence =
            SortedSequence::build_from_vec(vec![1, 2, 3, 4], Direction::Ascending);
        let slot = seek(&mut sequence.head, |element| *element < 3);
        assert_eq!(slot.as_ref().map(|node| node.element), Some(3));
    }

    #[rstest]
    fn test_seek_reaches_end() {
        let mut sequence = SortedSequence::build_from_vec(vec![1, 2], Direction::Ascending);
        let slot = seek(&mut sequence.head, |_| true);
        assert!(slot.is_none());
    }

    #[rstest]
    fn test_build_from_vec_keeps_order() {
        let sequence = SortedSequence::build_from_vec(vec![3, 2, 1], Direction::Descending);
        assert_eq!(collect(&sequence), vec![3, 2, 1]);
        assert_eq!(sequence.len(), 3);
        assert_eq!(chain_length(&sequence), 3);
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    #[rstest]
    #[case(Direction::Ascending, vec![1, 3, 5, 8])]
    #[case(Direction::Descending, vec![8, 5, 3, 1])]
    fn test_insert_orders_by_direction(#[case] direction: Direction, #[case] expected: Vec<i32>) {
        let mut sequence = SortedSequence::with_direction(direction);
        for value in [5, 3, 8, 1] {
            sequence.insert(value);
        }
        assert_eq!(collect(&sequence), expected);
        assert_eq!(sequence.len(), 4);
        assert_eq!(chain_length(&sequence), 4);
    }

    #[rstest]
    fn test_insert_is_stable() {
        let mut sequence = SortedSequence::new();
        sequence.insert(tagged(1, 'a'));
        sequence.insert(tagged(2, 'b'));
        sequence.insert(tagged(2, 'c'));
        sequence.insert(tagged(0, 'd'));
        sequence.insert(tagged(2, 'e'));
        assert_eq!(tags(&sequence), "dabce");
    }

    #[rstest]
    fn test_insert_is_stable_descending() {
        let mut sequence = SortedSequence::with_direction(Direction::Descending);
        sequence.insert(tagged(2, 'a'));
        sequence.insert(tagged(1, 'b'));
        sequence.insert(tagged(2, 'c'));
        assert_eq!(tags(&sequence), "acb");
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    #[rstest]
    fn test_delete_removes_first_equal() {
        let mut sequence: SortedSequence<Tagged> = SortedSequence::new();
        sequence.extend([tagged(1, 'a'), tagged(1, 'b')]);
        let removed = sequence.delete(&tagged(1, 'z'));
        assert_eq!(removed.map(|element| element.tag), Ok('a'));
        assert_eq!(tags(&sequence), "b");
    }

    #[rstest]
    fn test_delete_missing_leaves_sequence_unchanged() {
        let mut sequence: SortedSequence<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(sequence.delete(&4), Err(SequenceError::NotFound));
        assert_eq!(collect(&sequence), vec![1, 2, 3]);
        assert_eq!(sequence.len(), 3);
    }

    #[rstest]
    fn test_delete_all_stops_after_run() {
        let mut sequence: SortedSequence<i32> = [1, 2, 2, 3, 4].into_iter().collect();
        // The 2 planted behind the 3 lies past the run and must survive.
        sequence.traverse(|element| {
            if *element == 4 {
                *element = 2;
            }
        });
        assert_eq!(sequence.delete_all(&2), Ok(2));
        assert_eq!(collect(&sequence), vec![1, 3, 2]);
        assert_eq!(sequence.len(), 3);
    }

    #[rstest]
    fn test_delete_all_descending() {
        let mut sequence: SortedSequence<i32> = SortedSequence::with_direction(Direction::Descending);
        sequence.extend([3, 2, 2, 1, 2]);
        assert_eq!(sequence.delete_all(&2), Ok(3));
        assert_eq!(collect(&sequence), vec![3, 1]);
        assert_eq!(chain_length(&sequence), sequence.len());
    }

    #[rstest]
    fn test_delete_all_at_head() {
        let mut sequence: SortedSequence<i32> = [1, 1, 1].into_iter().collect();
        assert_eq!(sequence.delete_all(&1), Ok(3));
        assert!(sequence.is_empty());
        assert!(sequence.head.is_none());
    }

    #[rstest]
    fn test_delete_all_missing() {
        let mut sequence: SortedSequence<i32> = [1, 3].into_iter().collect();
        assert_eq!(sequence.delete_all(&2), Err(SequenceError::NotFound));
        assert_eq!(sequence.len(), 2);
    }

    // =========================================================================
    // Duplicates
    // =========================================================================

    #[rstest]
    fn test_remove_duplicates_keeps_first_of_run() {
        let mut sequence: SortedSequence<Tagged> = SortedSequence::new();
        sequence.extend([tagged(1, 'a'), tagged(1, 'b'), tagged(2, 'c'), tagged(2, 'd')]);
        assert_eq!(sequence.remove_duplicates(), 2);
        assert_eq!(tags(&sequence), "ac");
        assert_eq!(chain_length(&sequence), 2);
    }

    #[rstest]
    fn test_remove_duplicates_empty_and_single() {
        let mut empty: SortedSequence<i32> = SortedSequence::new();
        assert_eq!(empty.remove_duplicates(), 0);

        let mut single: SortedSequence<i32> = std::iter::once(7).collect();
        assert_eq!(single.remove_duplicates(), 0);
        assert_eq!(single.len(), 1);
    }

    // =========================================================================
    // Direction Changes
    // =========================================================================

    #[rstest]
    fn test_set_order_preserves_relative_order_of_equals() {
        let mut sequence: SortedSequence<Tagged> = SortedSequence::new();
        sequence.extend([tagged(2, 'a'), tagged(1, 'b'), tagged(2, 'c'), tagged(3, 'd')]);
        assert_eq!(tags(&sequence), "bacd");

        sequence.set_order(Direction::Descending);
        assert_eq!(tags(&sequence), "dacb");
        assert_eq!(sequence.direction(), Direction::Descending);
        assert_eq!(chain_length(&sequence), 4);
    }

    #[rstest]
    fn test_set_order_empty_only_records_direction() {
        let mut sequence: SortedSequence<i32> = SortedSequence::new();
        sequence.set_order(Direction::Descending);
        assert_eq!(sequence.direction(), Direction::Descending);
        assert!(sequence.is_empty());
    }

    #[rstest]
    fn test_set_order_same_direction_is_noop() {
        let mut sequence: SortedSequence<i32> = [2, 1].into_iter().collect();
        sequence.set_order(Direction::Ascending);
        assert_eq!(collect(&sequence), vec![1, 2]);
    }

    // =========================================================================
    // Copy and Assignment
    // =========================================================================

    #[rstest]
    fn test_clone_does_not_share_nodes() {
        let original: SortedSequence<i32> = [1, 2, 3].into_iter().collect();
        let copy = original.clone();
        let original_head = original.head.as_deref().map(std::ptr::from_ref);
        let copy_head = copy.head.as_deref().map(std::ptr::from_ref);
        assert_ne!(original_head, copy_head);
        assert_eq!(original, copy);
    }

    #[rstest]
    fn test_clone_from_replaces_contents() {
        let source = SortedSequence::build_from_vec(vec![9, 4], Direction::Descending);
        let mut target: SortedSequence<i32> = [1, 2, 3].into_iter().collect();
        target.clone_from(&source);
        assert_eq!(collect(&target), vec![9, 4]);
        assert_eq!(target.len(), 2);
        assert_eq!(target.direction(), Direction::Descending);
    }

    #[rstest]
    fn test_assign_from_empty() {
        let source: SortedSequence<i32> = SortedSequence::new();
        let mut target: SortedSequence<i32> = [1, 2].into_iter().collect();
        target.assign(&source);
        assert!(target.is_empty());
        assert!(target.head.is_none());
    }

    // =========================================================================
    // Long Chains
    // =========================================================================

    #[rstest]
    fn test_long_chain_clone_compare_and_drop() {
        let elements: Vec<u32> = (0..200_000).collect();
        let sequence = SortedSequence::build_from_vec(elements, Direction::Ascending);
        let copy = sequence.clone();
        assert_eq!(sequence, copy);
        drop(sequence);
        assert_eq!(copy.len(), 200_000);
    }

    #[rstest]
    fn test_long_chain_set_order() {
        let elements: Vec<u32> = (0..100_000).collect();
        let mut sequence = SortedSequence::build_from_vec(elements, Direction::Ascending);
        sequence.set_order(Direction::Descending);
        assert_eq!(sequence.first(), Some(&99_999));
        assert!(sequence.is_sorted());
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    #[rstest]
    fn test_iter_is_exact_size() {
        let sequence: SortedSequence<i32> = [3, 1, 2].into_iter().collect();
        let mut iter = sequence.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    #[rstest]
    fn test_into_iter_consumes_in_order() {
        let sequence: SortedSequence<i32> = [3, 1, 2].into_iter().collect();
        let mut iter = sequence.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[rstest]
    fn test_from_iter_matches_repeated_insert() {
        let input = [tagged(2, 'a'), tagged(1, 'b'), tagged(2, 'c'), tagged(1, 'd')];
        let collected: SortedSequence<Tagged> = input.into_iter().collect();
        let mut inserted = SortedSequence::new();
        for element in input {
            inserted.insert(element);
        }
        assert_eq!(tags(&collected), tags(&inserted));
    }
}
