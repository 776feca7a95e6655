// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! IntervalSet: sorted, non-overlapping half-open intervals built by
//! incremental insertion.
//!
//! Invariants (always held):
//!    - intervals are sorted by `start()`
//!    - adjacent elements satisfy `a.end() <= b.start()`
//!    - no element is empty
//!    - every point covered by an inserted interval is covered by exactly one element
//!
//! Touching intervals such as `[0, 1)` and `[1, 2)` share no point and are kept
//! as separate elements.
//!
//! Complexity:
//!    - insert: `O(log n)` to locate the first candidate, `O(n)` to shift or compact
//!    - contains_point, overlaps: `O(log n)`

use core::ops::Deref;
use interval_merge_core::primitives::Interval;
use num_traits::Zero;
use std::{fmt, ops::Sub};

/// A collection of sorted, non-overlapping, half-open `[start, end)` intervals.
///
/// The set grows only through [`IntervalSet::insert`], which folds one
/// interval at a time into the existing elements. When the inserted interval
/// overlaps an element, that element absorbs it; if its upper bound grows, the
/// following elements it now reaches are rolled up into it.
///
/// ## Invariants
///
/// 1.  **Sorted**: intervals are sorted in ascending order of `start`.
/// 2.  **Disjoint**: for every neighbouring pair `a`, `b` we have `a.end() <= b.start()`.
///     Intervals that merely touch are not coalesced.
/// 3.  **Lossless**: the union of the elements equals the union of everything inserted.
///
/// Empty and inverted intervals (`start >= end`) cover no points and are ignored
/// by [`IntervalSet::insert`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntervalSet<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> Default for IntervalSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntervalSet<T> {
    /// Creates a new, empty `IntervalSet`.
    ///
    /// The underlying vector does not allocate until the first element is pushed.
    #[inline]
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Creates a new, empty `IntervalSet` with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            intervals: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of disjoint intervals in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if the set contains no intervals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns a slice containing all intervals in the set.
    ///
    /// The slice is guaranteed to be sorted and contain no overlapping intervals.
    #[inline]
    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.intervals
    }

    #[inline]
    pub fn into_intervals(self) -> Vec<Interval<T>> {
        self.intervals
    }

    /// Clears the set, removing all intervals.
    ///
    /// Note that this method has no effect on the allocated capacity of the
    /// underlying vector.
    #[inline]
    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Finds the index of the first interval `i` such that `intervals[i].end() > point`.
    ///
    /// Ends are sorted as well because elements are disjoint, so every interval
    /// before the returned index lies entirely at or below `point`.
    #[inline]
    fn find_first_ending_after(&self, point: T) -> usize
    where
        T: Ord + Copy,
    {
        self.intervals
            .partition_point(|interval| interval.end() <= point)
    }

    /// Folds `source` into the set.
    ///
    /// Every element that ends at or before `source.start()` is left alone. The
    /// first remaining element (the candidate) decides what happens:
    ///
    /// - `source` ends at or before the candidate starts: `source` is inserted
    ///   in front of it.
    /// - `source` starts strictly inside the candidate: the candidate's end grows
    ///   to `max(candidate.end, source.end)` and a rollup follows.
    /// - otherwise `source` starts at or before the candidate and reaches into
    ///   it: the candidate becomes `[source.start, max(candidate.end, source.end))`
    ///   and a rollup follows.
    ///
    /// Without a candidate `source` lies beyond every element and is appended.
    ///
    /// Empty and inverted intervals are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_merge::intervalset::IntervalSet;
    /// use interval_merge_core::primitives::Interval;
    ///
    /// let mut set = IntervalSet::new();
    /// set.insert(Interval::new(25, 30));
    /// set.insert(Interval::new(2, 19));
    /// set.insert(Interval::new(14, 23));
    /// set.insert(Interval::new(4, 8));
    /// assert_eq!(set.as_slice(), &[Interval::new(2, 23), Interval::new(25, 30)]);
    /// ```
    pub fn insert(&mut self, source: Interval<T>)
    where
        T: Ord + Copy,
    {
        if source.is_empty() {
            return;
        }

        let candidate_index = self.find_first_ending_after(source.start());
        let Some(&candidate) = self.intervals.get(candidate_index) else {
            self.intervals.push(source);
            debug_assert!(Self::are_invariants_held(&self.intervals));
            return;
        };

        if source.precedes(&candidate) {
            self.intervals.insert(candidate_index, source);
        } else if candidate.contains_strictly(source.start()) {
            self.rollup(candidate_index, candidate.end().max(source.end()));
        } else {
            // source.start() <= candidate.start() < source.end()
            let merged_end = candidate.end().max(source.end());
            self.intervals[candidate_index] = Interval::new(source.start(), merged_end);
            self.rollup(candidate_index, merged_end);
        }
        debug_assert!(Self::are_invariants_held(&self.intervals));
    }

    /// Absorbs every interval after `from` that starts below `end`, growing
    /// `end` as it goes, and writes the final upper bound back to `from`.
    ///
    /// The scan stops at the first interval starting at or after `end`; sort
    /// order guarantees nothing later can reach back. The element at `from`
    /// itself is never removed.
    fn rollup(&mut self, from: usize, mut end: T)
    where
        T: Ord + Copy,
    {
        let mut scan_index = from + 1;
        while scan_index < self.intervals.len() && self.intervals[scan_index].start() < end {
            end = end.max(self.intervals[scan_index].end());
            scan_index += 1;
        }
        if scan_index > from + 1 {
            self.intervals.drain(from + 1..scan_index);
        }
        self.intervals[from] = self.intervals[from].with_end(end);
    }

    /// Returns `true` if the given point is contained within any interval in the set.
    #[inline]
    pub fn contains_point(&self, point: T) -> bool
    where
        T: Ord + Copy,
    {
        let candidate_index = self.find_first_ending_after(point);
        candidate_index < self.intervals.len() && self.intervals[candidate_index].start() <= point
    }

    /// Returns `true` if any interval in the set shares a point with `query_interval`.
    #[inline]
    pub fn overlaps(&self, query_interval: Interval<T>) -> bool
    where
        T: Ord + Copy,
    {
        if self.intervals.is_empty() || query_interval.is_empty() {
            return false;
        }
        let candidate_index = self.find_first_ending_after(query_interval.start());
        candidate_index < self.intervals.len()
            && self.intervals[candidate_index].start() < query_interval.end()
    }

    /// Total number of points covered by the set.
    ///
    /// ```
    /// use interval_merge::intervalset::IntervalSet;
    /// use interval_merge_core::primitives::Interval;
    ///
    /// let set: IntervalSet<i64> = [Interval::new(0, 4), Interval::new(2, 6), Interval::new(10, 11)]
    ///     .into_iter()
    ///     .collect();
    /// assert_eq!(set.measure(), 7);
    /// ```
    #[inline]
    pub fn measure(&self) -> T
    where
        T: Copy + PartialOrd + Sub<Output = T> + Zero,
    {
        self.intervals
            .iter()
            .fold(T::zero(), |total, interval| total + interval.length())
    }

    /// A debug-only check to ensure the set's invariants (sorted, non-overlapping, non-empty) hold.
    ///
    /// In release builds, this function is a no-op and compiles away.
    #[inline]
    #[cfg(debug_assertions)]
    fn are_invariants_held(intervals: &[Interval<T>]) -> bool
    where
        T: Ord + Copy,
    {
        intervals.iter().all(|interval| !interval.is_empty())
            && intervals
                .windows(2)
                .all(|pair| pair[0].end() <= pair[1].start())
    }

    #[inline]
    #[cfg(not(debug_assertions))]
    fn are_invariants_held(_intervals: &[Interval<T>]) -> bool {
        true
    }
}

/// Inserts every interval in iteration order.
impl<T> Extend<Interval<T>> for IntervalSet<T>
where
    T: Ord + Copy,
{
    #[inline]
    fn extend<I: IntoIterator<Item = Interval<T>>>(&mut self, iter: I) {
        for interval in iter {
            self.insert(interval);
        }
    }
}

/// Collects by inserting the intervals one at a time, in iteration order.
impl<T> FromIterator<Interval<T>> for IntervalSet<T>
where
    T: Ord + Copy,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Allows an `IntervalSet` to be treated as a slice `&[Interval<T>]`.
impl<T> Deref for IntervalSet<T> {
    type Target = [Interval<T>];
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.intervals
    }
}

impl<'a, T> IntoIterator for &'a IntervalSet<T> {
    type Item = &'a Interval<T>;
    type IntoIter = core::slice::Iter<'a, Interval<T>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

impl<T> IntoIterator for IntervalSet<T> {
    type Item = Interval<T>;
    type IntoIter = std::vec::IntoIter<Interval<T>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<T> From<IntervalSet<T>> for Vec<Interval<T>> {
    #[inline]
    fn from(set: IntervalSet<T>) -> Self {
        set.intervals
    }
}

/// Formats the set as its intervals separated by `, `, e.g. `[2, 23), [25, 30)`.
impl<T: fmt::Display> fmt::Display for IntervalSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}
