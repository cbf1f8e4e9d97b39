//! Growth policy shared by the sorted tables of groups and elements.

use crate::{AllocationSnafu, Result};
use snafu::ResultExt;

/// Make room for one more entry in a sorted table.
///
/// Capacity grows to one and a half times the current capacity plus one,
/// and never shrinks here.
/// On failure the table is left untouched.
pub(crate) fn reserve_one<T>(table: &mut Vec<T>) -> Result<()> {
    let len = table.len();
    let capacity = table.capacity();
    if len < capacity {
        return Ok(());
    }
    let new_capacity = std::cmp::max(len + 1, capacity * 3 / 2 + 1);
    table
        .try_reserve_exact(new_capacity - len)
        .context(AllocationSnafu {
            requested: new_capacity,
        })
}

/// Create an empty table with exactly the given capacity.
pub(crate) fn with_capacity<T>(capacity: usize) -> Result<Vec<T>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(capacity)
        .context(AllocationSnafu {
            requested: capacity,
        })?;
    Ok(table)
}
