//! Two-level fan-out parallel minimum reduction.
//!
//! This crate finds the minimum of an immutable in-memory slice with a nested
//! divide-and-conquer fan-out:
//! 1. The index space is split into `l1` contiguous ranges and one branch
//!    worker runs per range.
//! 2. Each branch worker splits its own range into `l2` contiguous sub-ranges
//!    and spawns one leaf worker per sub-range.
//! 3. Every parent joins all of its children before combining their minima,
//!    so a result is only ever read after the task that wrote it terminated.
//!
//! ## Quick start
//! ```
//! use fanmin::FanoutMin;
//!
//! let data = [5i64, 3, 9, 1, 7, 2, 8, 4];
//! let min = FanoutMin::with_fanout(&data, 2, 2).run().unwrap();
//! assert_eq!(min, 1);
//! ```
//!
//! ## Tail policy
//! Ranges are sized by truncating integer division, so `len mod fanout`
//! indices are left over at each level. [`TailPolicy::Cover`] (the default)
//! folds the remainder into the last range, making the parallel result
//! provably equal to a sequential scan. [`TailPolicy::Truncate`] reproduces
//! the reference program, which silently drops each level's tail.
//!
//! ## Executors
//! [`Executor::Threads`] spawns one scoped OS thread per range at both levels
//! (`l1 + l1 * l2` live threads at peak), matching the reference model.
//! With the `parallel` feature, [`Executor::Pool`] dispatches the same
//! two-level shape onto rayon's global pool for bounded concurrency.
//!
//! The `threaded_search` binary generates a random input, runs the threaded
//! reduction and a sequential baseline, and reports both minima with
//! wall-clock timings.

pub mod builder;
pub mod engine;
pub mod error;
pub mod range;
pub mod utils;

pub use crate::builder::FanoutMinBuilder;
pub use crate::engine::{scan_min, Executor, FanoutMin};
pub use crate::error::ReduceError;
pub use crate::range::{partition, partition_range, Range, TailPolicy};
