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

use crate::err::FleetConfigError;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetConfig {
    pub workers: NonZeroUsize,
}

impl FleetConfig {
    #[inline]
    pub fn new(workers: usize) -> Result<Self, FleetConfigError> {
        NonZeroUsize::new(workers)
            .map(|workers| Self { workers })
            .ok_or(FleetConfigError::ZeroWorkers)
    }

    #[inline]
    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    #[inline]
    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }
}

/// One worker per available hardware thread, or a single worker if that
/// cannot be determined.
impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_workers() {
        assert_eq!(FleetConfig::new(0), Err(FleetConfigError::ZeroWorkers));
    }

    #[test]
    fn test_new_accepts_positive_workers() {
        let cfg = FleetConfig::new(3).expect("three workers");
        assert_eq!(cfg.workers().get(), 3);
    }

    #[test]
    fn test_default_has_at_least_one_worker() {
        assert!(FleetConfig::default().workers().get() >= 1);
    }

    #[test]
    fn test_with_workers_overrides() {
        let two = NonZeroUsize::new(2).expect("non-zero");
        assert_eq!(FleetConfig::default().with_workers(two).workers(), two);
    }
}
