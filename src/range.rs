//! Index-range partitioning.
//!
//! A [`Range`] is an inclusive-inclusive interval into the input slice's index
//! space. [`partition`] splits a space into `K` contiguous, pairwise-disjoint
//! ranges using truncating integer division; [`partition_range`] applies the
//! same split inside an existing range, which is how the engine produces the
//! nested level-2 ranges.
//!
//! When the space does not divide evenly, the remainder at the tail is handled
//! according to [`TailPolicy`]: either folded into the last range (full
//! coverage) or left uncovered at each level independently.

use crate::error::ReduceError;

/// Contiguous inclusive index interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Inclusive start index.
    pub start: usize,
    /// Inclusive end index.
    pub end: usize,
}

impl Range {
    /// Construct a range.
    ///
    /// # Panics
    /// Panics if `start > end`; an empty range is never a valid unit of work.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "invalid range: start {start} > end {end}");
        Self { start, end }
    }

    /// Number of indices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; kept for idiomatic pairing with [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// What to do with the `len mod fanout` remainder left over by the truncating
/// division in [`partition`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TailPolicy {
    /// Extend the last range to the end of the space, so the remainder is
    /// scanned by the last task and the ranges cover the space exactly.
    #[default]
    Cover,
    /// Leave the remainder uncovered, reproducing the reference program's
    /// truncation. Applied at each level independently, so under a nested
    /// split every branch drops its own tail.
    Truncate,
}

/// Split `[0, len)` into `fanout` contiguous ranges of `len / fanout` indices
/// each, with the tail handled per `policy`.
///
/// Fails with [`ReduceError::EmptyRange`] when `fanout > len`, i.e. when the
/// truncated range size would be zero.
///
/// # Panics
/// Panics if `fanout == 0`.
pub fn partition(len: usize, fanout: usize, policy: TailPolicy) -> Result<Vec<Range>, ReduceError> {
    assert!(fanout > 0, "fanout must be positive");
    let size = len / fanout;
    if size == 0 {
        return Err(ReduceError::EmptyRange {
            elements: len,
            tasks: fanout,
        });
    }
    let mut ranges = Vec::with_capacity(fanout);
    for i in 0..fanout {
        let start = i * size;
        let end = if i == fanout - 1 && policy == TailPolicy::Cover {
            len - 1
        } else {
            start + size - 1
        };
        ranges.push(Range::new(start, end));
    }
    Ok(ranges)
}

/// Apply the same split inside `range`, offsetting the produced ranges so they
/// stay within `[range.start, range.end]`.
pub fn partition_range(
    range: Range,
    fanout: usize,
    policy: TailPolicy,
) -> Result<Vec<Range>, ReduceError> {
    let ranges = partition(range.len(), fanout, policy)?;
    Ok(ranges
        .into_iter()
        .map(|r| Range::new(range.start + r.start, range.start + r.end))
        .collect())
}
