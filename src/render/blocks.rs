//! Line-oriented block renderers: rules, headers, padding and sections.

#![allow(missing_docs)]

use crate::layout::model::Padding;
use crate::text::{Align, display_width, fit};

/// Default horizontal rule glyph.
pub const RULE_CHAR: char = '─';

/// `ch` repeated `width` times. Zero width yields an empty string.
#[must_use]
pub fn separator(width: usize, ch: char) -> String {
    std::iter::repeat_n(ch, width).collect()
}

/// Options for [`header`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    pub show_border: bool,
    /// Rule glyph; [`RULE_CHAR`] when `None`.
    pub rule: Option<char>,
}

/// A title fitted to `width`, optionally framed by rules above and below.
#[must_use]
pub fn header(title: &str, width: usize, align: Align, options: HeaderOptions) -> String {
    let rule = options.rule.unwrap_or(RULE_CHAR);
    let mut lines = Vec::with_capacity(3);
    if options.show_border {
        lines.push(separator(width, rule));
    }
    lines.push(fit(title, width, align));
    if options.show_border {
        lines.push(separator(width, rule));
    }
    lines.join("\n")
}

/// Pad a (possibly multi-line) block into a box `width` cells wide.
///
/// Each content line is left-fitted to the inner width and wrapped in the
/// left/right padding; top and bottom padding become blank lines of `width`.
#[must_use]
pub fn apply_padding(text: &str, padding: Padding, width: usize) -> String {
    let left = usize::from(padding.left);
    let right = usize::from(padding.right);
    let inner = width.saturating_sub(left + right);
    let blank = " ".repeat(width);

    let mut lines = Vec::new();
    lines.extend(std::iter::repeat_n(blank.clone(), usize::from(padding.top)));
    for line in text.split('\n') {
        lines.push(format!(
            "{}{}{}",
            " ".repeat(left),
            fit(line, inner, Align::Left),
            " ".repeat(right)
        ));
    }
    lines.extend(std::iter::repeat_n(blank, usize::from(padding.bottom)));
    lines.join("\n")
}

/// Border allowance added to a section's computed width.
const SECTION_BORDER_ALLOWANCE: usize = 4;

/// Options for [`section`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionOptions {
    pub show_border: bool,
    pub padding: Padding,
}

/// A titled block whose width is derived from its widest line.
///
/// Layout, top to bottom: optional rule, top padding, title, a rule (bordered)
/// or blank line, content lines, bottom padding, optional rule. Title and
/// content lines carry the left/right padding but are not fitted.
#[must_use]
pub fn section(title: &str, content: &str, options: SectionOptions) -> String {
    let padding = options.padding;
    let left = " ".repeat(usize::from(padding.left));
    let right = " ".repeat(usize::from(padding.right));
    let content_lines: Vec<&str> = content.split('\n').collect();

    let widest = content_lines
        .iter()
        .map(|line| display_width(line))
        .chain(std::iter::once(display_width(title)))
        .max()
        .unwrap_or(0);
    let total = widest
        + usize::from(padding.left)
        + usize::from(padding.right)
        + SECTION_BORDER_ALLOWANCE;
    let blank = " ".repeat(total);

    let mut lines = Vec::with_capacity(content_lines.len() + 6);
    if options.show_border {
        lines.push(separator(total, RULE_CHAR));
    }
    lines.extend(std::iter::repeat_n(blank.clone(), usize::from(padding.top)));
    lines.push(format!("{left}{title}{right}"));
    if options.show_border {
        lines.push(separator(total, RULE_CHAR));
    } else {
        lines.push(String::new());
    }
    for line in content_lines {
        lines.push(format!("{left}{line}{right}"));
    }
    lines.extend(std::iter::repeat_n(blank, usize::from(padding.bottom)));
    if options.show_border {
        lines.push(separator(total, RULE_CHAR));
    }
    lines.join("\n")
}
