//! Two-level fan-out reduction engine.
//!
//! This module implements the spawn/join orchestration:
//! 1. The input's index space is split into `l1` outer ranges and one branch
//!    worker is spawned per range.
//! 2. Each branch worker splits its own range into `l2` inner ranges, spawns
//!    one leaf worker per range, joins them all, and combines their minima.
//! 3. The top level joins every branch worker and combines into the answer.
//!
//! A parent's only blocking point is its join, and a child's result is read
//! only through that join, so no synchronization beyond the join's
//! happens-before edge is needed. Sibling workers complete in any order.

use std::panic;
use std::thread;

use crate::error::ReduceError;
use crate::range::{partition, partition_range, Range, TailPolicy};
use crate::utils::default_fanout;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How worker tasks are dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Executor {
    /// One scoped OS thread per range at both levels, matching the reference
    /// model: `l1 + l1 * l2` live threads at peak.
    #[default]
    Threads,
    /// Run both levels on rayon's global pool. Bounded concurrency for large
    /// fan-outs; the computed minimum is unaffected, only scheduling differs.
    #[cfg(feature = "parallel")]
    Pool,
}

/// Scan a single range directly and return its minimum.
///
/// This is the unit of work executed by leaf workers. A degenerate range
/// (`start == end`) returns that element.
///
/// # Panics
/// Panics if `range.end` is out of bounds for `data`.
#[inline]
pub fn scan_min<T: Ord + Copy>(data: &[T], range: Range) -> T {
    data[range.start..=range.end]
        .iter()
        .copied()
        .min()
        .expect("range is non-empty by construction")
}

/// Combine child results into the parent's minimum, failing with the first
/// child error.
///
/// Every child has already been joined when this runs; short-circuiting here
/// therefore never skips a join, it only stops the fold.
fn combine<T: Ord>(
    parts: impl IntoIterator<Item = Result<T, ReduceError>>,
) -> Result<T, ReduceError> {
    let mut min = None;
    for part in parts {
        let value = part?;
        min = Some(match min {
            Some(current) if current < value => current,
            _ => value,
        });
    }
    Ok(min.expect("every level has at least one child"))
}

/// Two-level fan-out minimum reduction over a borrowed slice.
///
/// Typical usage:
/// ```
/// use fanmin::FanoutMin;
///
/// let data = [5i64, 3, 9, 1, 7, 2, 8, 4];
/// let engine = FanoutMin::with_fanout(&data, 2, 2);
/// assert_eq!(engine.run().unwrap(), 1);
/// ```
pub struct FanoutMin<'a, T> {
    data: &'a [T],
    l1: usize,
    l2: usize,
    policy: TailPolicy,
    executor: Executor,
}

impl<'a, T> FanoutMin<'a, T>
where
    T: Ord + Copy + Send + Sync,
{
    /// Create an engine with a heuristic fan-out derived from the machine's
    /// available parallelism (see [`default_fanout`]).
    pub fn new(data: &'a [T]) -> Self {
        let (l1, l2) = default_fanout(data.len());
        Self::with_fanout(data, l1, l2)
    }

    /// Create an engine with explicit level-1 and level-2 fan-outs.
    ///
    /// # Panics
    /// Panics if `l1 == 0` or `l2 == 0`.
    pub fn with_fanout(data: &'a [T], l1: usize, l2: usize) -> Self {
        assert!(l1 > 0, "level-1 fanout must be positive");
        assert!(l2 > 0, "level-2 fanout must be positive");
        Self {
            data,
            l1,
            l2,
            policy: TailPolicy::default(),
            executor: Executor::default(),
        }
    }

    /// Replace the tail policy (default [`TailPolicy::Cover`]).
    pub fn tail_policy(mut self, policy: TailPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the executor (default [`Executor::Threads`]).
    pub fn executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    /// Return the configured `(l1, l2)` fan-out.
    pub fn fanout(&self) -> (usize, usize) {
        (self.l1, self.l2)
    }

    /// Run the reduction and return the minimum of the covered index space.
    ///
    /// Fails with [`ReduceError::EmptyRange`] when the slice holds fewer than
    /// `l1 * l2` elements (some leaf range would be empty), before any worker
    /// is spawned; fails with [`ReduceError::TaskSpawn`] when worker creation
    /// fails. A failed run never returns a partial result.
    pub fn run(&self) -> Result<T, ReduceError> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "fanmin_run",
            elements = self.data.len(),
            l1 = self.l1,
            l2 = self.l2
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let tasks = self.l1.saturating_mul(self.l2);
        if self.data.len() < tasks {
            return Err(ReduceError::EmptyRange {
                elements: self.data.len(),
                tasks,
            });
        }
        let outer = partition(self.data.len(), self.l1, self.policy)?;

        match self.executor {
            Executor::Threads => self.run_threads(outer),
            #[cfg(feature = "parallel")]
            Executor::Pool => self.run_pool(outer),
        }
    }

    /// Thread-per-range dispatch: spawn all branch workers, join them all,
    /// then combine.
    fn run_threads(&self, outer: Vec<Range>) -> Result<T, ReduceError> {
        thread::scope(|scope| {
            let mut spawned = Vec::with_capacity(outer.len());
            for (index, range) in outer.into_iter().enumerate() {
                let handle = thread::Builder::new()
                    .name(format!("fanmin-branch-{index}"))
                    .spawn_scoped(scope, move || self.branch_threads(index, range))
                    .map_err(|source| ReduceError::TaskSpawn {
                        level: 1,
                        index,
                        source,
                    });
                spawned.push(handle);
            }
            combine(join_all(spawned))
        })
    }

    /// Branch worker body for [`Executor::Threads`]: split the assigned range,
    /// spawn one leaf thread per sub-range, join all, combine.
    fn branch_threads(&self, branch: usize, range: Range) -> Result<T, ReduceError> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("branch", branch, start = range.start, end = range.end);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let inner = partition_range(range, self.l2, self.policy)?;
        thread::scope(|scope| {
            let mut spawned = Vec::with_capacity(inner.len());
            for (index, leaf) in inner.into_iter().enumerate() {
                let data = self.data;
                let handle = thread::Builder::new()
                    .name(format!("fanmin-leaf-{branch}-{index}"))
                    .spawn_scoped(scope, move || Ok(scan_min(data, leaf)))
                    .map_err(|source| ReduceError::TaskSpawn {
                        level: 2,
                        index,
                        source,
                    });
                spawned.push(handle);
            }
            combine(join_all(spawned))
        })
    }

    /// Pool dispatch: the same two-level shape expressed as nested parallel
    /// iterators over rayon's global pool. Spawn failures cannot occur here;
    /// partition errors still flow through the shared combine.
    #[cfg(feature = "parallel")]
    fn run_pool(&self, outer: Vec<Range>) -> Result<T, ReduceError> {
        let results: Vec<_> = outer
            .into_par_iter()
            .enumerate()
            .map(|(branch, range)| self.branch_pool(branch, range))
            .collect();
        combine(results)
    }

    #[cfg(feature = "parallel")]
    fn branch_pool(&self, branch: usize, range: Range) -> Result<T, ReduceError> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("branch", branch, start = range.start, end = range.end);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();
        #[cfg(not(feature = "tracing"))]
        let _ = branch;

        let inner = partition_range(range, self.l2, self.policy)?;
        let results: Vec<_> = inner
            .into_par_iter()
            .map(|leaf| Ok(scan_min(self.data, leaf)))
            .collect();
        combine(results)
    }
}

/// Join every spawned worker before any result is read. A handle that failed
/// to spawn carries its error straight into the combine; a worker panic is
/// resumed on the joining thread.
fn join_all<'scope, T>(
    spawned: Vec<Result<thread::ScopedJoinHandle<'scope, Result<T, ReduceError>>, ReduceError>>,
) -> Vec<Result<T, ReduceError>> {
    spawned
        .into_iter()
        .map(|handle| match handle {
            Ok(handle) => match handle.join() {
                Ok(result) => result,
                Err(payload) => panic::resume_unwind(payload),
            },
            Err(err) => Err(err),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn spawn_failure(level: u8, index: usize) -> ReduceError {
        ReduceError::TaskSpawn {
            level,
            index,
            source: io::Error::new(io::ErrorKind::WouldBlock, "resource exhausted"),
        }
    }

    #[test]
    fn scan_min_finds_minimum_in_range() {
        let data = [5i64, 3, 9, 1, 7, 2, 8, 4];
        assert_eq!(scan_min(&data, Range::new(0, 7)), 1);
        assert_eq!(scan_min(&data, Range::new(4, 7)), 2);
    }

    #[test]
    fn scan_min_degenerate_range_returns_single_element() {
        let data = [5i64, 3, 9];
        assert_eq!(scan_min(&data, Range::new(1, 1)), 3);
    }

    #[test]
    fn combine_takes_minimum_of_children() {
        let parts: Vec<Result<i64, ReduceError>> = vec![Ok(3), Ok(1), Ok(2)];
        assert_eq!(combine(parts).unwrap(), 1);
    }

    #[test]
    fn leaf_spawn_failure_fails_branch_combine() {
        // A branch joins [Ok(4), Err(spawn), Ok(-1)]; its combine must fail
        // with that error rather than fold the remaining children.
        let parts = vec![Ok(4i64), Err(spawn_failure(2, 1)), Ok(-1)];
        let err = combine(parts).unwrap_err();
        assert!(matches!(
            err,
            ReduceError::TaskSpawn {
                level: 2,
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn branch_failure_fails_top_level_combine() {
        let parts = vec![Ok(7i64), Err(spawn_failure(2, 0))];
        let err = combine(parts).unwrap_err();
        assert!(matches!(err, ReduceError::TaskSpawn { level: 2, .. }));
    }

    #[test]
    fn run_rejects_undersized_input_before_spawning() {
        let data = [1i64, 2, 3];
        let err = FanoutMin::with_fanout(&data, 2, 2).run().unwrap_err();
        assert!(matches!(
            err,
            ReduceError::EmptyRange {
                elements: 3,
                tasks: 4
            }
        ));
    }

    #[test]
    #[should_panic]
    fn with_fanout_panics_on_zero_l1() {
        let data = [1i64];
        let _ = FanoutMin::with_fanout(&data, 0, 1);
    }

    #[test]
    #[should_panic]
    fn with_fanout_panics_on_zero_l2() {
        let data = [1i64];
        let _ = FanoutMin::with_fanout(&data, 1, 0);
    }
}
