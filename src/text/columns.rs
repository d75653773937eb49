//! Column arithmetic: splitting a width across columns and items across
//! column buckets.

use std::num::NonZeroUsize;

use crate::core::errors::{LayoutError, Result};

/// Width of each of `columns` columns sharing `total_width` cells with `gap`
/// cells between neighbours, rounded down.
///
/// A single column ignores `gap`. Gaps wider than the total yield 0.
pub fn column_width(total_width: usize, columns: usize, gap: usize) -> Result<usize> {
    let columns = nonzero(columns)?;
    Ok(split_width(total_width, columns, gap))
}

pub(crate) fn split_width(total_width: usize, columns: NonZeroUsize, gap: usize) -> usize {
    let gaps = (columns.get() - 1).saturating_mul(gap);
    total_width.saturating_sub(gaps) / columns.get()
}

/// Split `items` into exactly `columns` buckets, filled left to right with
/// `ceil(len / columns)` items each. Trailing buckets may be short or empty.
///
/// ```
/// use term_layout::text::columns::distribute;
///
/// let buckets = distribute(vec!["A", "B", "C", "D", "E"], 2).unwrap();
/// assert_eq!(buckets, vec![vec!["A", "B", "C"], vec!["D", "E"]]);
/// ```
pub fn distribute<T>(items: Vec<T>, columns: usize) -> Result<Vec<Vec<T>>> {
    let columns = nonzero(columns)?.get();
    let per_column = items.len().div_ceil(columns);

    let mut buckets: Vec<Vec<T>> = (0..columns)
        .map(|_| Vec::with_capacity(per_column))
        .collect();
    for (idx, item) in items.into_iter().enumerate() {
        buckets[idx / per_column].push(item);
    }
    Ok(buckets)
}

fn nonzero(columns: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(columns).ok_or(LayoutError::InvalidColumnCount { columns })
}
