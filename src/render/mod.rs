//! Stateless renderers composing fitted text into printable blocks.
//!
//! Callers pass explicit widths (usually taken from the current
//! [`TerminalLayout`](crate::layout::TerminalLayout)); nothing here reads
//! terminal state.

pub mod blocks;
pub mod columns;
pub mod table;

pub use blocks::{
    HeaderOptions, RULE_CHAR, SectionOptions, apply_padding, header, section, separator,
};
pub use columns::{render_columns, render_columns_with_ellipsis};
pub use table::{BorderChars, BorderStyle, TableColumn, TableOptions, TableRow, table};
