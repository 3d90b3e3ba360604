//! Assorted utilities and helpers.

use std::thread;

/// Pick a default `(l1, l2)` fan-out for `len` elements.
///
/// Level 1 follows the machine's available parallelism (capped at `len`);
/// level 2 is a square-root split of the per-branch element count. The pair
/// always satisfies `l1 * l2 <= len` for non-empty inputs, so an engine built
/// from it never fails validation.
pub fn default_fanout(len: usize) -> (usize, usize) {
    if len <= 1 {
        return (1, 1);
    }
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let l1 = workers.min(len);
    let per_branch = len / l1;
    let l2 = ((per_branch as f64).sqrt().ceil() as usize).clamp(1, per_branch);
    (l1, l2)
}
