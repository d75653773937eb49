//! Side-by-side multi-column text blocks.

use std::num::NonZeroUsize;

use crate::text::columns::split_width;
use crate::text::{Align, ELLIPSIS, fit_with_ellipsis};

/// Render `columns` (each a list of lines) next to each other within
/// `total_width`, separated by `gap` spaces.
///
/// Output has as many lines as the tallest column; shorter columns are
/// filled with blank cells. A single column is emitted unchanged and no
/// columns yields an empty string.
#[must_use]
pub fn render_columns<S: AsRef<str>>(columns: &[Vec<S>], total_width: usize, gap: usize) -> String {
    render_columns_with_ellipsis(columns, total_width, gap, ELLIPSIS)
}

/// [`render_columns`] with a custom truncation marker.
#[must_use]
pub fn render_columns_with_ellipsis<S: AsRef<str>>(
    columns: &[Vec<S>],
    total_width: usize,
    gap: usize,
    ellipsis: &str,
) -> String {
    let Some(count) = NonZeroUsize::new(columns.len()) else {
        return String::new();
    };
    if count.get() == 1 {
        return columns[0]
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
    }

    let width = split_width(total_width, count, gap);
    let height = columns.iter().map(Vec::len).max().unwrap_or(0);
    let separator = " ".repeat(gap);

    (0..height)
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    let cell = column.get(row).map_or("", AsRef::as_ref);
                    fit_with_ellipsis(cell, width, Align::Left, ellipsis)
                })
                .collect::<Vec<_>>()
                .join(&separator)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
