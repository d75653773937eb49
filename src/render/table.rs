//! Bordered table rendering with box-drawing character sets.

#![allow(missing_docs)]

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::terminal::capabilities::TerminalCapabilities;
use crate::text::{Align, display_width, fit_with_ellipsis};

/// Truncation marker used inside table cells.
const CELL_ELLIPSIS: &str = "…";
/// Spaces on each side of a cell's content.
const CELL_PADDING: usize = 1;

/// Box-drawing character set for tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    /// Plain ASCII (`+`, `-`, `|`).
    Compact,
}

impl BorderStyle {
    /// Unicode box drawing where the terminal supports it, ASCII otherwise.
    #[must_use]
    pub const fn for_capabilities(caps: &TerminalCapabilities) -> Self {
        if caps.supports_unicode {
            Self::Single
        } else {
            Self::Compact
        }
    }

    #[must_use]
    pub const fn chars(self) -> BorderChars {
        match self {
            Self::Single => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_mid: '┬',
                top_right: '┐',
                mid_left: '├',
                mid_mid: '┼',
                mid_right: '┤',
                bottom_left: '└',
                bottom_mid: '┴',
                bottom_right: '┘',
            },
            Self::Double => BorderChars {
                horizontal: '═',
                vertical: '║',
                top_left: '╔',
                top_mid: '╦',
                top_right: '╗',
                mid_left: '╠',
                mid_mid: '╬',
                mid_right: '╣',
                bottom_left: '╚',
                bottom_mid: '╩',
                bottom_right: '╝',
            },
            Self::Compact => BorderChars {
                horizontal: '-',
                vertical: '|',
                top_left: '+',
                top_mid: '+',
                top_right: '+',
                mid_left: '+',
                mid_mid: '+',
                mid_right: '+',
                bottom_left: '+',
                bottom_mid: '+',
                bottom_right: '+',
            },
        }
    }
}

impl FromStr for BorderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "compact" | "ascii" => Ok(Self::Compact),
            other => Err(format!(
                "unknown border style {other:?} (expected single, double or compact)"
            )),
        }
    }
}

/// Glyphs for one [`BorderStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_mid: char,
    pub top_right: char,
    pub mid_left: char,
    pub mid_mid: char,
    pub mid_right: char,
    pub bottom_left: char,
    pub bottom_mid: char,
    pub bottom_right: char,
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub header: String,
    /// Row key the cell value is read from.
    pub key: String,
    /// Total cell width including padding; sized to content when `None`.
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub align: Option<Align>,
}

impl TableColumn {
    #[must_use]
    pub fn new(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            key: key.into(),
            width: None,
            align: None,
        }
    }

    #[must_use]
    pub const fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}

/// A record a table row can be read from. Missing keys render empty.
pub trait TableRow {
    fn cell(&self, key: &str) -> Option<String>;
}

impl TableRow for HashMap<String, String> {
    fn cell(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl TableRow for BTreeMap<String, String> {
    fn cell(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl TableRow for serde_json::Map<String, serde_json::Value> {
    fn cell(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl TableRow for serde_json::Value {
    fn cell(&self, key: &str) -> Option<String> {
        self.as_object()?.cell(key)
    }
}

/// Options for [`table`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    pub border_style: BorderStyle,
}

/// Render a bordered grid: a header row, then one row per record, with a
/// rule between every row.
///
/// Cell values containing `\n` span several lines; a row is as tall as its
/// tallest cell.
#[must_use]
pub fn table<R: TableRow>(columns: &[TableColumn], rows: &[R], options: TableOptions) -> String {
    let chars = options.border_style.chars();

    let header: Vec<Vec<&str>> = columns
        .iter()
        .map(|column| column.header.split('\n').collect())
        .collect();
    let values: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.cell(&column.key).unwrap_or_default())
                .collect()
        })
        .collect();
    let cells: Vec<Vec<Vec<&str>>> = values
        .iter()
        .map(|row| row.iter().map(|value| value.split('\n').collect()).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            column.width.unwrap_or_else(|| {
                cells
                    .iter()
                    .map(|row| &row[idx])
                    .chain(std::iter::once(&header[idx]))
                    .flatten()
                    .map(|line| display_width(line))
                    .max()
                    .unwrap_or(0)
                    + 2 * CELL_PADDING
            })
        })
        .collect();
    let aligns: Vec<Align> = columns
        .iter()
        .map(|column| column.align.unwrap_or_default())
        .collect();

    let mut lines = Vec::with_capacity(cells.len() * 2 + 3);
    lines.push(rule(&widths, chars.top_left, chars.top_mid, chars.top_right, chars.horizontal));
    push_row(&mut lines, &header, &widths, &aligns, chars.vertical);

    for row in &cells {
        lines.push(rule(&widths, chars.mid_left, chars.mid_mid, chars.mid_right, chars.horizontal));
        push_row(&mut lines, row, &widths, &aligns, chars.vertical);
    }

    lines.push(rule(
        &widths,
        chars.bottom_left,
        chars.bottom_mid,
        chars.bottom_right,
        chars.horizontal,
    ));
    lines.join("\n")
}

fn rule(widths: &[usize], left: char, mid: char, right: char, fill: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            out.push(mid);
        }
        out.extend(std::iter::repeat_n(fill, *width));
    }
    out.push(right);
    out
}

/// Emit one logical row as one physical line per line of its tallest cell.
fn push_row(
    lines: &mut Vec<String>,
    row: &[Vec<&str>],
    widths: &[usize],
    aligns: &[Align],
    vertical: char,
) {
    let height = row.iter().map(Vec::len).max().unwrap_or(0).max(1);
    for line in 0..height {
        let values: Vec<&str> = row
            .iter()
            .map(|cell| cell.get(line).copied().unwrap_or(""))
            .collect();
        lines.push(row_line(&values, widths, aligns, vertical));
    }
}

fn row_line(values: &[&str], widths: &[usize], aligns: &[Align], vertical: char) -> String {
    let mut out = String::new();
    out.push(vertical);
    for ((value, width), align) in values.iter().zip(widths).zip(aligns) {
        let inner = width.saturating_sub(2 * CELL_PADDING);
        let pad = " ".repeat(CELL_PADDING.min(*width));
        out.push_str(&pad);
        out.push_str(&cell_text(value, inner, *align));
        if *width > CELL_PADDING {
            out.push_str(&pad);
        }
        out.push(vertical);
    }
    out
}

/// `value` fitted to exactly `inner` cells. Truncation can stop one cell
/// short at a double-width character; that gap is padded back.
fn cell_text(value: &str, inner: usize, align: Align) -> String {
    let mut text = fit_with_ellipsis(value, inner, align, CELL_ELLIPSIS);
    let short = inner.saturating_sub(display_width(&text));
    text.extend(std::iter::repeat_n(' ', short));
    text
}
