//! Error taxonomy for partitioning and the spawn/join orchestration.

use std::io;
use thiserror::Error;

/// Failure of a reduction run.
///
/// Errors bubble strictly upward through the same join points used for
/// success: a branch fails its combine with the first child error it sees and
/// never produces a value computed from a subset of its children. Worker
/// panics are not converted into this type; they are resumed on the joining
/// thread.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// The requested fan-out exceeds the element count, so at least one range
    /// would be empty. Rejected at partition time, before any task is spawned.
    #[error("cannot split {elements} element(s) into {tasks} non-empty range(s)")]
    EmptyRange { elements: usize, tasks: usize },

    /// Worker creation failed. `level` is 1 for branch workers and 2 for leaf
    /// workers.
    #[error("failed to spawn level {level} worker {index}")]
    TaskSpawn {
        level: u8,
        index: usize,
        #[source]
        source: io::Error,
    },
}
