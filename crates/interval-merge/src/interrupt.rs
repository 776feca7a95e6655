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

//! Cooperative cancellation for stream and fleet consumers.
//!
//! An [`Interrupt`] is shared by reference between the thread that may cancel
//! a merge and every consumer blocked on a source. Triggering it sets a flag
//! and disconnects an internal wake channel, which releases every consumer
//! blocked in [`recv_or_interrupt`] at once without any polling.

use crossbeam_channel::{Receiver, Sender, select_biased};
use interval_merge_core::primitives::Interval;
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

/// Uninhabited; the wake channel only ever reports disconnection.
#[derive(Debug)]
enum Never {}

#[derive(Debug)]
pub struct Interrupt {
    triggered: AtomicBool,
    wake_sender: Mutex<Option<Sender<Never>>>,
    wake_receiver: Receiver<Never>,
}

impl Interrupt {
    #[inline]
    pub fn new() -> Self {
        let (wake_sender, wake_receiver) = crossbeam_channel::bounded(0);
        Self {
            triggered: AtomicBool::new(false),
            wake_sender: Mutex::new(Some(wake_sender)),
            wake_receiver,
        }
    }

    /// Requests every consumer observing this interrupt to stop.
    ///
    /// Idempotent; later calls have no further effect.
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::Release);
        let sender = self
            .wake_sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(sender);
    }

    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }
}

impl Default for Interrupt {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a single receive from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Received<T> {
    Item(Interval<T>),
    Exhausted,
    Interrupted,
}

impl<T> From<Result<Interval<T>, crossbeam_channel::RecvError>> for Received<T> {
    #[inline]
    fn from(msg: Result<Interval<T>, crossbeam_channel::RecvError>) -> Self {
        match msg {
            Ok(interval) => Received::Item(interval),
            Err(_) => Received::Exhausted,
        }
    }
}

/// Blocks until `source` yields an interval, `source` is exhausted, or
/// `interrupt` is triggered. A triggered interrupt always wins over pending items.
pub(crate) fn recv_or_interrupt<T>(
    source: &Receiver<Interval<T>>,
    interrupt: &Interrupt,
) -> Received<T> {
    if interrupt.is_triggered() {
        return Received::Interrupted;
    }
    select_biased! {
        recv(interrupt.wake_receiver) -> _ => Received::Interrupted,
        recv(source) -> msg => msg.into(),
    }
}
