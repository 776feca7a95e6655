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

//! # Fleet Merge
//!
//! Consumes one shared source with a fixed pool of workers and combines their
//! partial results.
//!
//! ## Phases
//!
//! 1. Fan-out: `workers` scoped threads receive from the same
//!    [`crossbeam_channel::Receiver`]. The channel hands every interval to exactly
//!    one worker, so the partition of the input across workers depends on
//!    scheduling and is not deterministic.
//! 2. Local merge: each worker inserts what it receives into its own
//!    [`IntervalSet`]. Workers share nothing but the receiver.
//! 3. Join: the call waits for every worker to observe exhaustion (or the
//!    interrupt). A panicking worker is re-raised on the calling thread.
//! 4. Combine: a single thread inserts every interval of every partial set, in
//!    worker order, into one fresh set.
//!
//! The final set does not depend on how the input was partitioned: two
//! intervals end up in the same element exactly when they are connected by a
//! chain of overlapping intervals, whichever worker saw them.

use crate::{
    config::FleetConfig,
    err::InterruptedError,
    interrupt::{Interrupt, Received, recv_or_interrupt},
    intervalset::IntervalSet,
};
use crossbeam_channel::Receiver;
use interval_merge_core::{IntervalBound, primitives::Interval};
use std::{
    fmt::Display,
    num::NonZeroUsize,
    panic,
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, debug_span, info, instrument, warn};

/// Per-worker counters collected during a fleet run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerStats {
    received: usize,
    partial_len: usize,
}

impl WorkerStats {
    /// Number of intervals this worker received from the source.
    #[inline]
    pub fn received(&self) -> usize {
        self.received
    }

    /// Number of disjoint intervals in this worker's partial set.
    #[inline]
    pub fn partial_len(&self) -> usize {
        self.partial_len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetStats {
    workers: Vec<WorkerStats>,
    elapsed: Duration,
}

impl FleetStats {
    /// Statistics of each worker, in spawn order.
    #[inline]
    pub fn workers(&self) -> &[WorkerStats] {
        &self.workers
    }

    /// Total number of intervals received across all workers.
    #[inline]
    pub fn received(&self) -> usize {
        self.workers.iter().map(WorkerStats::received).sum()
    }

    /// Wall-clock time from spawning the workers to the end of the combine phase.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Display for FleetStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FleetStats(workers: {}, received: {}, elapsed: {:?})",
            self.workers.len(),
            self.received(),
            self.elapsed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetOutcome<T> {
    merged: IntervalSet<T>,
    stats: FleetStats,
}

impl<T> FleetOutcome<T> {
    #[inline]
    pub fn merged(&self) -> &IntervalSet<T> {
        &self.merged
    }

    #[inline]
    pub fn stats(&self) -> &FleetStats {
        &self.stats
    }

    #[inline]
    pub fn into_merged(self) -> IntervalSet<T> {
        self.merged
    }
}

struct WorkerReport<T> {
    partial: IntervalSet<T>,
    stats: WorkerStats,
    interrupted: bool,
}

/// Runs fleet merges with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct FleetMerger {
    config: FleetConfig,
}

impl FleetMerger {
    #[inline]
    pub fn new(config: FleetConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Merges everything `source` delivers until it is exhausted.
    #[instrument(skip_all, fields(workers = self.config.workers.get()))]
    pub fn run<T>(&self, source: &Receiver<Interval<T>>) -> FleetOutcome<T>
    where
        T: IntervalBound,
    {
        let start_time = Instant::now();
        let reports = self.run_workers(|| source.recv().into());
        let (outcome, _) = Self::finish(reports, start_time);
        outcome
    }

    /// Like [`FleetMerger::run`], but every worker stops once `interrupt` is
    /// triggered.
    ///
    /// If any worker was stopped before seeing exhaustion, the combined partial
    /// result is returned inside the error.
    #[instrument(skip_all, fields(workers = self.config.workers.get()))]
    pub fn run_until<T>(
        &self,
        source: &Receiver<Interval<T>>,
        interrupt: &Interrupt,
    ) -> Result<FleetOutcome<T>, InterruptedError<T>>
    where
        T: IntervalBound,
    {
        let start_time = Instant::now();
        let reports = self.run_workers(|| recv_or_interrupt(source, interrupt));
        let (outcome, interrupted) = Self::finish(reports, start_time);
        if interrupted {
            let received = outcome.stats.received();
            warn!(received, merged = outcome.merged.len(), "Fleet merge interrupted");
            return Err(InterruptedError::new(outcome.merged, received));
        }
        Ok(outcome)
    }

    fn run_workers<T, F>(&self, receive: F) -> Vec<WorkerReport<T>>
    where
        T: IntervalBound,
        F: Fn() -> Received<T> + Sync,
    {
        let workers = self.config.workers.get();
        let receive = &receive;
        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| scope.spawn(move || run_worker(worker, receive)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
                .collect()
        })
    }

    fn finish<T>(reports: Vec<WorkerReport<T>>, start_time: Instant) -> (FleetOutcome<T>, bool)
    where
        T: IntervalBound,
    {
        let interrupted = reports.iter().any(|report| report.interrupted);
        let workers: Vec<WorkerStats> = reports.iter().map(|report| report.stats).collect();
        let merged = combine(reports.into_iter().map(|report| report.partial));
        let stats = FleetStats {
            workers,
            elapsed: start_time.elapsed(),
        };
        info!(
            received = stats.received(),
            merged = merged.len(),
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Fleet merge finished"
        );
        (FleetOutcome { merged, stats }, interrupted)
    }
}

fn run_worker<T, F>(worker: usize, receive: &F) -> WorkerReport<T>
where
    T: Ord + Copy,
    F: Fn() -> Received<T>,
{
    let _span = debug_span!("fleet_worker", worker).entered();
    let mut partial = IntervalSet::new();
    let mut received = 0usize;
    let interrupted = loop {
        match receive() {
            Received::Item(interval) => {
                partial.insert(interval);
                received += 1;
            }
            Received::Exhausted => break false,
            Received::Interrupted => break true,
        }
    };
    debug!(received, partial_len = partial.len(), interrupted, "Worker finished");
    WorkerReport {
        stats: WorkerStats {
            received,
            partial_len: partial.len(),
        },
        partial,
        interrupted,
    }
}

/// Combines partial sets by inserting each of their intervals, in order, into
/// one fresh [`IntervalSet`].
///
/// ```
/// use interval_merge::{fleet::combine, merge::merge};
/// use interval_merge_core::primitives::Interval;
///
/// let left = merge([Interval::new(25, 30), Interval::new(2, 19)]);
/// let right = merge([Interval::new(14, 23), Interval::new(4, 8)]);
/// let combined = combine([left, right]);
/// assert_eq!(combined.as_slice(), &[Interval::new(2, 23), Interval::new(25, 30)]);
/// ```
pub fn combine<T, I>(partials: I) -> IntervalSet<T>
where
    T: Ord + Copy,
    I: IntoIterator<Item = IntervalSet<T>>,
{
    let mut merged = IntervalSet::new();
    for partial in partials {
        merged.extend(partial);
    }
    merged
}

/// Merges everything `source` delivers using `worker_count` concurrent workers.
///
/// Blocks until the source is exhausted and every worker has finished. The
/// result equals [`crate::merge::merge`] over the delivered intervals, in any
/// order.
///
/// # Examples
///
/// ```
/// use interval_merge::fleet::merge_fleet;
/// use interval_merge_core::primitives::Interval;
/// use std::num::NonZeroUsize;
///
/// let (tx, rx) = crossbeam_channel::unbounded();
/// for (a, b) in [(0, 1), (2, 3), (3, 4), (4, 5), (0, 5)] {
///     tx.send(Interval::new(a, b)).unwrap();
/// }
/// drop(tx);
///
/// let merged = merge_fleet(&rx, NonZeroUsize::new(4).unwrap());
/// assert_eq!(merged.as_slice(), &[Interval::new(0, 5)]);
/// ```
pub fn merge_fleet<T>(source: &Receiver<Interval<T>>, worker_count: NonZeroUsize) -> IntervalSet<T>
where
    T: IntervalBound,
{
    FleetMerger::new(FleetConfig {
        workers: worker_count,
    })
    .run(source)
    .into_merged()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        intervalset::test_support::{assert_invariants, assert_same_coverage, iv, small_intervals},
        merge::merge,
    };
    use proptest::prelude::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(FleetMerger: Send, Sync);
    assert_impl_all!(FleetOutcome<i64>: Send, Sync);
    assert_impl_all!(Receiver<Interval<i64>>: Send, Sync);

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero worker count")
    }

    fn feed(input: &[Interval<i32>]) -> Receiver<Interval<i32>> {
        let (tx, rx) = crossbeam_channel::unbounded();
        for &interval in input {
            tx.send(interval).expect("receiver alive");
        }
        rx
    }

    #[test]
    fn test_empty_source() {
        assert!(merge_fleet(&feed(&[]), workers(3)).is_empty());
    }

    #[test]
    fn test_scenarios_match_batch() {
        let table = vec![
            vec![iv(0, 1)],
            vec![iv(0, 1), iv(2, 3), iv(5, 12)],
            vec![iv(25, 30), iv(2, 19), iv(14, 23), iv(4, 8)],
            vec![iv(25, 30), iv(2, 19), iv(14, 23), iv(4, 8), iv(0, 40)],
            vec![iv(-4, 0), iv(-1, 2)],
            vec![iv(0, 1), iv(2, 3), iv(3, 4), iv(4, 5), iv(0, 5)],
        ];
        for input in table {
            for n in [1, 2, 4, 16] {
                let res = merge_fleet(&feed(&input), workers(n));
                assert_eq!(res, merge(input.iter().copied()), "input {:?}, workers {}", input, n);
            }
        }
    }

    #[test]
    fn test_more_workers_than_items() {
        let input = [iv(25, 30), iv(2, 19), iv(14, 23), iv(4, 8)];
        let outcome = FleetMerger::new(FleetConfig { workers: workers(12) }).run(&feed(&input));
        assert_eq!(outcome.merged().as_slice(), &[iv(2, 23), iv(25, 30)]);
        assert_eq!(outcome.stats().workers().len(), 12);
        assert_eq!(outcome.stats().received(), input.len());
        assert!(
            outcome
                .stats()
                .workers()
                .iter()
                .filter(|w| w.received() == 0)
                .count()
                >= 8
        );
    }

    #[test]
    fn test_every_item_delivered_exactly_once_with_live_producer() {
        let (tx, rx) = crossbeam_channel::bounded(4);
        let count = 5_000;
        let outcome = thread::scope(|scope| {
            scope.spawn(move || {
                for i in 0..count {
                    // Disjoint and separated by gaps, so nothing merges.
                    tx.send(iv(3 * i, 3 * i + 1)).expect("receiver alive");
                }
            });
            FleetMerger::new(FleetConfig { workers: workers(6) }).run(&rx)
        });
        assert_eq!(outcome.stats().received(), count as usize);
        assert_eq!(outcome.merged().len(), count as usize);
        let partial_total: usize = outcome.stats().workers().iter().map(|w| w.partial_len()).sum();
        assert_eq!(partial_total, count as usize);
        assert_invariants(outcome.merged());
    }

    #[test]
    fn test_combine_preserves_cross_worker_overlap() {
        let a = merge([iv(0, 2), iv(10, 12)]);
        let b = merge([iv(1, 11)]);
        assert_eq!(combine([a.clone(), b.clone()]).as_slice(), &[iv(0, 12)]);
        assert_eq!(combine([b, a]).as_slice(), &[iv(0, 12)]);
        assert!(combine(Vec::<IntervalSet<i32>>::new()).is_empty());
    }

    #[test]
    fn test_run_until_without_interrupt_completes() {
        let interrupt = Interrupt::new();
        let input = [iv(0, 2), iv(20, 22), iv(3, 5), iv(7, 8), iv(1, 8)];
        let outcome = FleetMerger::new(FleetConfig { workers: workers(3) })
            .run_until(&feed(&input), &interrupt)
            .expect("not interrupted");
        assert_eq!(outcome.merged().as_slice(), &[iv(0, 8), iv(20, 22)]);
    }

    #[test]
    fn test_run_until_stops_blocked_workers() {
        let interrupt = Interrupt::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(iv(0, 2)).expect("send");
        tx.send(iv(1, 4)).expect("send");
        tx.send(iv(10, 11)).expect("send");

        let merger = FleetMerger::new(FleetConfig { workers: workers(4) });
        let result = thread::scope(|scope| {
            let run = scope.spawn(|| merger.run_until(&rx, &interrupt));
            // The sender stays alive, so the workers can only finish through the interrupt.
            while !rx.is_empty() {
                thread::yield_now();
            }
            interrupt.trigger();
            run.join().expect("fleet thread")
        });
        drop(tx);

        let err = result.expect_err("interrupted");
        assert_eq!(err.received(), 3);
        assert_eq!(err.partial().as_slice(), &[iv(0, 4), iv(10, 11)]);
    }

    #[test]
    fn test_worker_panic_is_propagated() {
        let merger = FleetMerger::new(FleetConfig { workers: workers(2) });
        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            merger.run_workers::<i32, _>(|| panic!("worker failed"))
        }));
        assert!(result.is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn proptest_fleet_partition_independent(
            input in small_intervals(),
            worker_count in 1usize..8,
        ) {
            let res = merge_fleet(&feed(&input), workers(worker_count));
            assert_invariants(&res);
            assert_same_coverage(&input, &res);
            prop_assert_eq!(res, merge(input.iter().copied()));
        }

        #[test]
        fn proptest_combine_over_any_partition(
            input in small_intervals(),
            cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..5),
        ) {
            let mut bounds: Vec<usize> = cuts.iter().map(|c| c.index(input.len() + 1)).collect();
            bounds.push(0);
            bounds.push(input.len());
            bounds.sort_unstable();
            let partials = bounds
                .windows(2)
                .map(|w| merge(input[w[0]..w[1]].iter().copied()));
            prop_assert_eq!(combine(partials), merge(input.iter().copied()));
        }
    }
}
