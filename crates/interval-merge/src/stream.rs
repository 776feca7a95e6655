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

//! Merging intervals delivered one at a time through a channel.
//!
//! The source is a [`crossbeam_channel::Receiver`]. It is exhausted once every
//! sender has been dropped and the buffered intervals have been drained.
//! Receiving blocks the calling thread; nothing here polls.

use crate::{
    err::InterruptedError,
    interrupt::{Interrupt, Received, recv_or_interrupt},
    intervalset::IntervalSet,
};
use crossbeam_channel::Receiver;
use interval_merge_core::primitives::Interval;
use tracing::{debug, instrument, trace, warn};

/// Merges every interval received from `source`, in delivery order, until the
/// source is exhausted.
///
/// Equivalent to [`crate::merge::merge`] over the delivered sequence.
///
/// # Examples
///
/// ```
/// use interval_merge::stream::merge_from_source;
/// use interval_merge_core::primitives::Interval;
///
/// let (tx, rx) = crossbeam_channel::unbounded();
/// std::thread::spawn(move || {
///     for (a, b) in [(25, 30), (2, 19), (14, 23), (4, 8)] {
///         tx.send(Interval::new(a, b)).unwrap();
///     }
/// });
/// let merged = merge_from_source(&rx);
/// assert_eq!(merged.as_slice(), &[Interval::new(2, 23), Interval::new(25, 30)]);
/// ```
#[instrument(level = "debug", skip_all)]
pub fn merge_from_source<T>(source: &Receiver<Interval<T>>) -> IntervalSet<T>
where
    T: Ord + Copy,
{
    let mut merged = IntervalSet::new();
    let mut received = 0usize;
    for interval in source.iter() {
        merged.insert(interval);
        received += 1;
        trace!(received, "Interval merged");
    }
    debug!(received, merged = merged.len(), "Source exhausted");
    merged
}

/// Like [`merge_from_source`], but stops as soon as `interrupt` is triggered.
///
/// A blocked receive is woken by the interrupt. On interruption the intervals
/// merged so far are returned inside the error.
#[instrument(level = "debug", skip_all)]
pub fn merge_from_source_until<T>(
    source: &Receiver<Interval<T>>,
    interrupt: &Interrupt,
) -> Result<IntervalSet<T>, InterruptedError<T>>
where
    T: Ord + Copy,
{
    let mut merged = IntervalSet::new();
    let mut received = 0usize;
    loop {
        match recv_or_interrupt(source, interrupt) {
            Received::Item(interval) => {
                merged.insert(interval);
                received += 1;
                trace!(received, "Interval merged");
            }
            Received::Exhausted => {
                debug!(received, merged = merged.len(), "Source exhausted");
                return Ok(merged);
            }
            Received::Interrupted => {
                warn!(received, merged = merged.len(), "Stream merge interrupted");
                return Err(InterruptedError::new(merged, received));
            }
        }
    }
}
