//! Terminal display width of strings.
//!
//! CJK ideographs, CJK symbols/punctuation and the full-width forms block
//! occupy two cells; every other scalar value occupies one. All alignment and
//! truncation downstream is computed in these cells, never in `char` counts.

/// Display width of a single scalar value (1 or 2).
#[must_use]
pub const fn char_width(ch: char) -> usize {
    if is_wide(ch) { 2 } else { 1 }
}

/// Display width of `text` in terminal cells.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

const fn is_wide(ch: char) -> bool {
    matches!(
        ch as u32,
        0x4E00..=0x9FFF   // CJK Unified Ideographs
            | 0x3400..=0x4DBF // CJK Extension A
            | 0x3000..=0x303F // CJK Symbols and Punctuation
            | 0xFF00..=0xFFEF // Halfwidth and Fullwidth Forms
    )
}
