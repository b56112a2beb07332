//! One-shot ordering of property keys
//!
//! Each object's key set is sorted exactly once, right after creation, so
//! that every later lookup can run as a binary search. The table is never
//! re-sorted afterward.

use comm_core::PropertyKey;

/// Sort keys ascending in place with a shell sort.
///
/// The gap sequence starts at half the slice length and halves each round;
/// within a gap, an insertion pass moves each element left past larger
/// predecessors spaced by the gap. Duplicates are preserved. The output is
/// deterministic for a given input; stability is not guaranteed.
pub fn shell_sort(keys: &mut [PropertyKey]) {
    let len = keys.len();
    let mut gap = len / 2;
    while gap > 0 {
        for idx in gap..len {
            let pending = keys[idx];
            let mut sub = idx;
            while sub >= gap && keys[sub - gap] > pending {
                keys[sub] = keys[sub - gap];
                sub -= gap;
            }
            keys[sub] = pending;
        }
        gap /= 2;
    }
}
