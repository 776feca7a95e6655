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

//! # Interval Merge (`interval-merge`)
//!
//! Collapses collections of half-open intervals `[start, end)` into a sorted
//! sequence of pairwise disjoint intervals covering exactly the same points.
//!
//! Two intervals are merged only if they share at least one point. Touching
//! intervals such as `[0, 1)` and `[1, 2)` stay separate. Empty and inverted
//! intervals (`start >= end`) cover nothing and are ignored.
//!
//! ## Entry points
//!
//! - [`intervalset::IntervalSet`]: the incremental merged set. Each
//!   [`insert`](intervalset::IntervalSet::insert) keeps it sorted and disjoint.
//! - [`merge::merge`] and [`merge::merge_ranges`]: merge a finite collection.
//! - [`merge::merge_par`]: merge a slice in parallel chunks on the rayon pool.
//! - [`stream::merge_from_source`]: drain a `crossbeam_channel::Receiver`
//!   until every sender is gone.
//! - [`fleet::merge_fleet`] and [`fleet::FleetMerger`]: drain one receiver
//!   with several workers and combine their partial results.
//!
//! Every entry point produces the same result for the same multiset of
//! intervals, regardless of order or partitioning.
//!
//! ## Interruption
//!
//! [`stream::merge_from_source_until`] and [`fleet::FleetMerger::run_until`]
//! observe an [`interrupt::Interrupt`]. Once it is triggered, blocked receivers
//! wake up and the partial result is handed back inside
//! [`err::InterruptedError`].

pub mod config;
pub mod err;
pub mod fleet;
pub mod interrupt;
pub mod intervalset;
pub mod merge;
pub mod stream;

pub mod prelude {
    pub use crate::config::FleetConfig;
    pub use crate::err::{FleetConfigError, InterruptedError};
    pub use crate::fleet::{FleetMerger, FleetOutcome, FleetStats, WorkerStats, combine, merge_fleet};
    pub use crate::interrupt::Interrupt;
    pub use crate::intervalset::IntervalSet;
    pub use crate::merge::{merge, merge_par, merge_ranges};
    pub use crate::stream::{merge_from_source, merge_from_source_until};
    pub use interval_merge_core::{IntervalBound, primitives::Interval};
}
