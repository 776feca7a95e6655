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

use crossbeam_channel::SendError;
use interval_merge::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{error::Error, fmt::Display, thread, time::Instant};
use tracing::{error, info, info_span};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type T = i64;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Disagreement {
    size: usize,
    strategy: &'static str,
}

impl Display for Disagreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} merge disagrees with batch merge for {} intervals",
            self.strategy, self.size
        )
    }
}

impl Error for Disagreement {}

fn generate(size: usize, seed: u64) -> Vec<Interval<T>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let domain = (size as T).max(1) * 100;
    (0..size)
        .map(|_| {
            let start = rng.random_range(0..domain);
            let length = rng.random_range(0..10);
            Interval::new(start, start + length)
        })
        .collect()
}

fn run_stream(input: &[Interval<T>]) -> Result<IntervalSet<T>, SendError<Interval<T>>> {
    let (tx, rx) = crossbeam_channel::bounded(64);
    thread::scope(|scope| {
        let producer = scope.spawn(move || -> Result<(), SendError<Interval<T>>> {
            for &interval in input {
                tx.send(interval)?;
            }
            Ok(())
        });
        let merged = merge_from_source(&rx);
        producer
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            .map(|()| merged)
    })
}

fn run_fleet(input: &[Interval<T>], merger: &FleetMerger) -> FleetOutcome<T> {
    let (tx, rx) = crossbeam_channel::unbounded();
    for &interval in input {
        // The receiver is alive for the whole loop.
        let _ = tx.send(interval);
    }
    drop(tx);
    merger.run(&rx)
}

fn check(
    size: usize,
    strategy: &'static str,
    expected: &IntervalSet<T>,
    actual: &IntervalSet<T>,
) -> Result<(), Disagreement> {
    if expected == actual {
        return Ok(());
    }
    error!(
        size,
        strategy,
        expected = expected.len(),
        actual = actual.len(),
        "Merge results disagree"
    );
    Err(Disagreement { size, strategy })
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let sizes = [1usize, 10, 100, 1_000, 10_000, 100_000];
    let base_seed: u64 = 42;
    let merger = FleetMerger::new(FleetConfig::default());
    info!(workers = merger.config().workers().get(), "Starting interval merge demo");

    for (i, &size) in sizes.iter().enumerate() {
        let _span = info_span!("instance", size).entered();
        let input = generate(size, base_seed + i as u64);

        let t0 = Instant::now();
        let batch = merge(input.iter().copied());
        let batch_elapsed = t0.elapsed();

        let t1 = Instant::now();
        let stream = run_stream(&input)?;
        let stream_elapsed = t1.elapsed();

        let fleet = run_fleet(&input, &merger);

        let t2 = Instant::now();
        let par = merge_par(&input, (size / 8).max(64));
        let par_elapsed = t2.elapsed();

        check(size, "stream", &batch, &stream)?;
        check(size, "fleet", &batch, fleet.merged())?;
        check(size, "par", &batch, &par)?;

        info!(
            merged = batch.len(),
            covered = batch.measure(),
            batch_us = batch_elapsed.as_micros() as u64,
            stream_us = stream_elapsed.as_micros() as u64,
            fleet_us = fleet.stats().elapsed().as_micros() as u64,
            par_us = par_elapsed.as_micros() as u64,
            "{}",
            fleet.stats()
        );
    }

    Ok(())
}
