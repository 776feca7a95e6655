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

//! # Core Primitives
//!
//! The half-open [`Interval`] used throughout the merging crates.
//!
//! An interval is a plain value: it is never mutated in place by callers and
//! construction performs no validation. Whether `start <= end` holds is left to
//! the consumer; the merge algorithms treat an interval with `start >= end` as
//! covering no points.

use num_traits::Zero;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Range, Sub};

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive, so `[start, end)` contains
/// every value `x` with `start <= x < end`. Two intervals that touch at a shared
/// boundary, such as `[1, 3)` and `[3, 5)`, do not overlap.
///
/// # Examples
///
/// ```
/// use interval_merge_core::primitives::Interval;
///
/// let interval = Interval::new(1, 5);
/// assert_eq!(interval.start(), 1);
/// assert_eq!(interval.end(), 5);
/// assert!(interval.contains(3));
/// assert!(!interval.contains(5));
/// assert_eq!(interval.length(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates a new half-open interval `[start, end)`.
    ///
    /// The bounds are stored exactly as given. In particular an inverted pair
    /// (`start > end`) is neither rejected nor swapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_merge_core::primitives::Interval;
    ///
    /// let interval = Interval::new(3, 5);
    /// assert_eq!(interval.start(), 3);
    /// assert_eq!(interval.end(), 5);
    ///
    /// let inverted = Interval::new(5, 3);
    /// assert_eq!(inverted.start(), 5);
    /// assert!(inverted.is_inverted());
    /// ```
    #[inline]
    pub const fn new(start: T, end: T) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
        }
    }

    /// Returns the inclusive lower bound.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// Returns the exclusive upper bound.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_exclusive
    }

    /// Returns a copy of this interval with its lower bound replaced.
    #[inline]
    pub fn with_start(self, start: T) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: self.end_exclusive,
        }
    }

    /// Returns a copy of this interval with its upper bound replaced.
    #[inline]
    pub fn with_end(self, end: T) -> Self {
        Self {
            start_inclusive: self.start_inclusive,
            end_exclusive: end,
        }
    }

    /// Checks if the interval covers no points.
    ///
    /// Both zero-width intervals (`start == end`) and inverted intervals
    /// (`start > end`) are empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_merge_core::primitives::Interval;
    ///
    /// assert!(Interval::new(5, 5).is_empty());
    /// assert!(Interval::new(7, 2).is_empty());
    /// assert!(!Interval::new(1, 5).is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialOrd,
    {
        self.start_inclusive >= self.end_exclusive
    }

    /// Checks if the lower bound lies above the upper bound.
    #[inline]
    pub fn is_inverted(&self) -> bool
    where
        T: PartialOrd,
    {
        self.start_inclusive > self.end_exclusive
    }

    /// Checks if the interval contains a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_merge_core::primitives::Interval;
    ///
    /// let interval = Interval::new(1, 5);
    /// assert!(interval.contains(1)); // start is inclusive
    /// assert!(interval.contains(4));
    /// assert!(!interval.contains(5)); // end is exclusive
    /// assert!(!interval.contains(0));
    /// ```
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start_inclusive && x < self.end_exclusive
    }

    /// Checks if `x` lies strictly between the bounds, excluding `start` itself.
    #[inline]
    pub fn contains_strictly(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x > self.start_inclusive && x < self.end_exclusive
    }

    /// Checks if this interval ends at or before the start of `other`.
    ///
    /// Touching intervals precede each other without overlapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_merge_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert!(a.precedes(&Interval::new(5, 10)));
    /// assert!(a.precedes(&Interval::new(6, 10)));
    /// assert!(!a.precedes(&Interval::new(4, 8)));
    /// ```
    #[inline]
    pub fn precedes(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.end_exclusive <= other.start_inclusive
    }

    /// Checks if the two intervals share at least one point.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_merge_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert!(a.intersects(&Interval::new(4, 6)));
    /// assert!(!a.intersects(&Interval::new(5, 7)));
    /// assert!(!a.intersects(&Interval::new(3, 3)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        !self.is_empty()
            && !other.is_empty()
            && self.start_inclusive < other.end_exclusive
            && other.start_inclusive < self.end_exclusive
    }

    /// Measures the number of points covered by the interval.
    ///
    /// Empty and inverted intervals measure zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_merge_core::primitives::Interval;
    ///
    /// assert_eq!(Interval::new(2, 5).length(), 3);
    /// assert_eq!(Interval::new(5, 2).length(), 0);
    /// ```
    #[inline]
    pub fn length(&self) -> T
    where
        T: Copy + PartialOrd + Sub<Output = T> + Zero,
    {
        if self.is_empty() {
            T::zero()
        } else {
            self.end_exclusive - self.start_inclusive
        }
    }

    /// Converts the interval into a `start..end` range.
    #[inline]
    pub fn to_range(&self) -> Range<T>
    where
        T: Copy,
    {
        self.start_inclusive..self.end_exclusive
    }
}

impl<T: Ord> PartialOrd for Interval<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Intervals order by `start`, ties broken by `end`.
impl<T: Ord> Ord for Interval<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_inclusive
            .cmp(&other.start_inclusive)
            .then_with(|| self.end_exclusive.cmp(&other.end_exclusive))
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    /// Formats the interval as `[start, end)`.
    ///
    /// ```
    /// use interval_merge_core::primitives::Interval;
    ///
    /// assert_eq!(format!("{}", Interval::new(-4, 2)), "[-4, 2)");
    /// ```
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T> From<Range<T>> for Interval<T> {
    #[inline]
    fn from(r: Range<T>) -> Self {
        Interval::new(r.start, r.end)
    }
}

impl<T> From<Interval<T>> for Range<T> {
    #[inline]
    fn from(interval: Interval<T>) -> Self {
        interval.start_inclusive..interval.end_exclusive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_bounds_as_given() {
        let i = Interval::new(-4i64, 9i64);
        assert_eq!(i.start(), -4);
        assert_eq!(i.end(), 9);

        let inverted = Interval::new(5i32, 3i32);
        assert_eq!(inverted.start(), 5);
        assert_eq!(inverted.end(), 3);
        assert!(inverted.is_inverted());
    }

    #[test]
    fn test_is_empty_for_zero_width_and_inverted() {
        assert!(Interval::new(5u32, 5u32).is_empty());
        assert!(Interval::new(6u32, 5u32).is_empty());
        assert!(!Interval::new(1u32, 2u32).is_empty());
        assert!(!Interval::new(1u32, 2u32).is_inverted());
    }

    #[test]
    fn test_contains_inclusive_start_and_exclusive_end() {
        let i = Interval::new(10i32, 20i32);
        assert!(i.contains(10));
        assert!(i.contains(19));
        assert!(!i.contains(20));
        assert!(!i.contains(9));
    }

    #[test]
    fn test_contains_strictly_excludes_start() {
        let i = Interval::new(10i32, 20i32);
        assert!(!i.contains_strictly(10));
        assert!(i.contains_strictly(11));
        assert!(!i.contains_strictly(20));
    }

    #[test]
    fn test_touching_intervals_do_not_intersect() {
        let a = Interval::new(0i32, 1i32);
        let b = Interval::new(1i32, 2i32);
        assert!(a.precedes(&b));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_intersects_nested_and_partial() {
        let outer = Interval::new(0i32, 10i32);
        assert!(outer.intersects(&Interval::new(2, 3)));
        assert!(outer.intersects(&Interval::new(9, 12)));
        assert!(outer.intersects(&Interval::new(-3, 1)));
        assert!(!outer.intersects(&Interval::new(10, 12)));
    }

    #[test]
    fn test_length_clamps_inverted_to_zero() {
        assert_eq!(Interval::new(-4i32, 2i32).length(), 6);
        assert_eq!(Interval::new(3i32, 3i32).length(), 0);
        assert_eq!(Interval::new(3i32, 1i32).length(), 0);
    }

    #[test]
    fn test_with_start_and_with_end_leave_original_untouched() {
        let i = Interval::new(2i32, 4i32);
        let j = i.with_start(0).with_end(8);
        assert_eq!(i, Interval::new(2, 4));
        assert_eq!(j, Interval::new(0, 8));
    }

    #[test]
    fn test_ordering_is_by_start_then_end() {
        let mut v = vec![
            Interval::new(5i32, 6i32),
            Interval::new(1, 9),
            Interval::new(1, 3),
            Interval::new(-2, 0),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Interval::new(-2, 0),
                Interval::new(1, 3),
                Interval::new(1, 9),
                Interval::new(5, 6),
            ]
        );
    }

    #[test]
    fn test_range_round_trip() {
        let i: Interval<char> = ('a'..'d').into();
        assert_eq!(i.start(), 'a');
        assert_eq!(i.end(), 'd');
        let r: Range<char> = i.into();
        assert_eq!(r, 'a'..'d');
        assert_eq!(i.to_range(), 'a'..'d');
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(25, 30).to_string(), "[25, 30)");
        assert_eq!(Interval::new('a', 'g').to_string(), "[a, g)");
    }
}
