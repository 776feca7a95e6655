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

use crate::intervalset::IntervalSet;
use std::fmt::{Debug, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FleetConfigError {
    ZeroWorkers,
}

impl Display for FleetConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FleetConfigError::ZeroWorkers => write!(f, "A fleet needs at least one worker"),
        }
    }
}

impl std::error::Error for FleetConfigError {}

/// Consumption stopped because an [`crate::interrupt::Interrupt`] was triggered
/// before the source was exhausted.
///
/// Carries everything merged up to that point. The partial set satisfies all
/// [`IntervalSet`] invariants, it just does not cover the intervals that were
/// never received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptedError<T> {
    partial: IntervalSet<T>,
    received: usize,
}

impl<T> InterruptedError<T> {
    #[inline]
    pub fn new(partial: IntervalSet<T>, received: usize) -> Self {
        Self { partial, received }
    }

    #[inline]
    pub fn partial(&self) -> &IntervalSet<T> {
        &self.partial
    }

    #[inline]
    pub fn into_partial(self) -> IntervalSet<T> {
        self.partial
    }

    /// Number of intervals received from the source before stopping.
    #[inline]
    pub fn received(&self) -> usize {
        self.received
    }
}

impl<T> Display for InterruptedError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Merge interrupted after receiving {} intervals; partial result holds {} intervals",
            self.received,
            self.partial.len()
        )
    }
}

impl<T: Debug> std::error::Error for InterruptedError<T> {}
