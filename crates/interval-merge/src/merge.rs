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

//! Batch entry points over in-memory input.

use crate::{fleet::combine, intervalset::IntervalSet};
use interval_merge_core::{IntervalBound, primitives::Interval};
use rayon::prelude::*;
use std::ops::Range;
use tracing::{debug, instrument};

/// Merges `intervals` by inserting them one at a time, in input order, into an
/// empty [`IntervalSet`].
///
/// The result is sorted, non-overlapping and covers exactly the points covered
/// by the input. It does not depend on the input order.
///
/// # Examples
///
/// ```
/// use interval_merge::merge::merge;
/// use interval_merge_core::primitives::Interval;
///
/// let merged = merge([
///     Interval::new(25, 30),
///     Interval::new(2, 19),
///     Interval::new(14, 23),
///     Interval::new(4, 8),
/// ]);
/// assert_eq!(merged.as_slice(), &[Interval::new(2, 23), Interval::new(25, 30)]);
/// ```
#[inline]
pub fn merge<T, I>(intervals: I) -> IntervalSet<T>
where
    T: Ord + Copy,
    I: IntoIterator<Item = Interval<T>>,
{
    intervals.into_iter().collect()
}

/// [`merge`] over standard library ranges.
///
/// ```
/// use interval_merge::merge::merge_ranges;
///
/// assert_eq!(merge_ranges(vec![0..4, 2..6, 0..2]), vec![0..6]);
/// assert_eq!(merge_ranges(vec!['a'..'d', 'c'..'d', 'a'..'g']), vec!['a'..'g']);
/// ```
pub fn merge_ranges<T, I>(ranges: I) -> Vec<Range<T>>
where
    T: Ord + Copy,
    I: IntoIterator<Item = Range<T>>,
{
    merge(ranges.into_iter().map(Interval::from))
        .into_iter()
        .map(Range::from)
        .collect()
}

/// Merges a slice on the rayon pool.
///
/// The slice is cut into chunks of `chunk_len` intervals (a `chunk_len` of zero
/// is treated as one). Each chunk is merged independently, then the partial
/// sets are combined in chunk order exactly like the fleet combine phase. The
/// result equals [`merge`] over the whole slice.
#[instrument(level = "debug", skip(intervals), fields(len = intervals.len()))]
pub fn merge_par<T>(intervals: &[Interval<T>], chunk_len: usize) -> IntervalSet<T>
where
    T: IntervalBound,
{
    let partials: Vec<IntervalSet<T>> = intervals
        .par_chunks(chunk_len.max(1))
        .map(|chunk| merge(chunk.iter().copied()))
        .collect();
    debug!(partials = partials.len(), "Chunks merged");
    combine(partials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervalset::test_support::{
        assert_invariants, assert_same_coverage, iv, small_intervals,
    };
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn generate(size: usize, seed: u64) -> Vec<Interval<i64>> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let max_start = (size as i64) * 100;
        (0..size)
            .map(|_| {
                let start = rng.random_range(0..max_start.max(1));
                Interval::new(start, start + rng.random_range(0..10))
            })
            .collect()
    }

    #[test]
    fn test_merge_accepts_any_iterator() {
        let from_vec = merge(vec![iv(0, 1), iv(2, 3)]);
        let from_array = merge([iv(0, 1), iv(2, 3)]);
        let from_iter = merge((0..2).map(|i| iv(2 * i, 2 * i + 1)));
        assert_eq!(from_vec, from_array);
        assert_eq!(from_vec, from_iter);
    }

    #[test]
    fn test_merge_ranges_table() {
        let table: Vec<(Vec<Range<i32>>, Vec<Range<i32>>)> = vec![
            (vec![], vec![]),
            (vec![0..1], vec![0..1]),
            (vec![1..2, 3..6, 8..12], vec![1..2, 3..6, 8..12]),
            (vec![25..30, 2..19, 14..23, 4..8], vec![2..23, 25..30]),
            (vec![25..30, 2..19, 14..23, 4..8, 0..40], vec![0..40]),
            (vec![0..2, 20..22, 3..5, 7..8, 1..8], vec![0..8, 20..22]),
            (vec![-4..0, -1..2], vec![-4..2]),
        ];
        for (input, expected) in table {
            let res = merge_ranges(input.clone());
            assert_eq!(
                res, expected,
                "expected merge {:?} to be {:?} but got {:?}",
                input, expected, res
            );
        }
    }

    #[test]
    fn test_merge_generated_input_holds_invariants() {
        for size in [1usize, 10, 100, 1_000] {
            let input = generate(size, 0);
            let merged = merge(input.iter().copied());
            assert!(merged.len() <= size);
            for w in merged.windows(2) {
                assert!(w[0].end() <= w[1].start());
            }
            let merged_len: i64 = merged.measure();
            let input_upper: i64 = input.iter().map(|i| i.length()).sum();
            assert!(merged_len <= input_upper);
        }
    }

    #[test]
    fn test_merge_par_matches_merge_on_generated_input() {
        let input = generate(2_000, 7);
        let expected = merge(input.iter().copied());
        for chunk_len in [0usize, 1, 3, 64, 2_000, 10_000] {
            assert_eq!(merge_par(&input, chunk_len), expected, "chunk_len {}", chunk_len);
        }
    }

    #[test]
    fn test_merge_par_empty() {
        assert!(merge_par::<i32>(&[], 8).is_empty());
    }

    proptest! {
        #[test]
        fn proptest_merge_par_partition_independent(
            input in small_intervals(),
            chunk_len in 1usize..12,
        ) {
            let res = merge_par(&input, chunk_len);
            assert_invariants(&res);
            assert_same_coverage(&input, &res);
            prop_assert_eq!(res, merge(input.iter().copied()));
        }
    }
}
