//! Fit text to an exact display width by truncating or padding.

use serde::{Deserialize, Serialize};

use super::width::{char_width, display_width};

/// Default truncation marker.
pub const ELLIPSIS: &str = "...";

/// Horizontal alignment used when padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Pad on the right.
    #[default]
    Left,
    /// Split padding, odd cell on the right.
    Center,
    /// Pad on the left.
    Right,
}

/// Fit `text` into `width` cells using the default [`ELLIPSIS`].
#[must_use]
pub fn fit(text: &str, width: usize, align: Align) -> String {
    fit_with_ellipsis(text, width, align, ELLIPSIS)
}

/// Fit `text` into `width` cells.
///
/// Text narrower than `width` is padded with spaces according to `align`;
/// for [`Align::Center`] the odd extra space goes on the right. Wider text is
/// truncated greedily and suffixed with `ellipsis`. When a double-width
/// character would straddle the cut, the result stays one cell short rather
/// than overflowing. When even `ellipsis` does not fit, as much of it as fits
/// is returned.
#[must_use]
pub fn fit_with_ellipsis(text: &str, width: usize, align: Align, ellipsis: &str) -> String {
    let text_width = display_width(text);

    if text_width > width {
        let ellipsis_width = display_width(ellipsis);
        if ellipsis_width > width {
            return take_prefix(ellipsis, width).to_owned();
        }
        let kept = take_prefix(text, width - ellipsis_width);
        let mut out = String::with_capacity(kept.len() + ellipsis.len());
        out.push_str(kept);
        out.push_str(ellipsis);
        return out;
    }

    pad(text, width - text_width, align)
}

/// Longest prefix of `text` whose display width is at most `budget`.
fn take_prefix(text: &str, budget: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        used += char_width(ch);
        if used > budget {
            return &text[..idx];
        }
    }
    text
}

fn pad(text: &str, missing: usize, align: Align) -> String {
    if missing == 0 {
        return text.to_owned();
    }
    let (left, right) = match align {
        Align::Left => (0, missing),
        Align::Right => (missing, 0),
        Align::Center => (missing / 2, missing - missing / 2),
    };
    let mut out = String::with_capacity(text.len() + missing);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', right));
    out
}
