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

//! Shared building blocks for the interval merging crates.
//!
//! The only primitive is [`primitives::Interval`], a half-open `[start, end)`
//! range. [`IntervalBound`] names the requirements every bound type has to
//! satisfy so that intervals can be merged, streamed and handed across threads.

use std::fmt::Debug;

pub mod primitives;

/// The ordered domain an [`primitives::Interval`] ranges over.
///
/// Any totally ordered `Copy` type that can be sent between threads qualifies,
/// which covers every primitive integer as well as `char`.
pub trait IntervalBound: Ord + Copy + Debug + Send + Sync {}
impl<T> IntervalBound for T where T: Ord + Copy + Debug + Send + Sync {}
