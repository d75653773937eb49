//! Layout data model: modes, terminal snapshots, content regions and the
//! immutable [`TerminalLayout`] built from them.

#![allow(missing_docs)]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::text::columns::column_width;

/// Minimum terminal width accepted by layout validation.
pub const MIN_TERMINAL_WIDTH: u16 = 60;
/// Minimum terminal height accepted by layout validation.
pub const MIN_TERMINAL_HEIGHT: u16 = 20;

/// Widest terminal still classified as [`LayoutMode::Compact`].
pub const COMPACT_MAX_WIDTH: u16 = 79;
/// Widest terminal still classified as [`LayoutMode::Standard`].
pub const STANDARD_MAX_WIDTH: u16 = 120;

/// Column count used for [`LayoutMode::Wide`] layouts.
pub const WIDE_COLUMNS: u16 = 2;

/// Geometry reported when no interactive terminal is attached.
pub const DEFAULT_WIDTH: u16 = 80;
/// See [`DEFAULT_WIDTH`].
pub const DEFAULT_HEIGHT: u16 = 24;

/// Width-derived layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Narrow terminals (< 80 columns).
    Compact,
    /// Standard terminals (80..=120 columns).
    Standard,
    /// Wide terminals (> 120 columns).
    Wide,
}

impl LayoutMode {
    /// Classify a terminal width.
    #[must_use]
    pub const fn for_width(width: u16) -> Self {
        if width <= COMPACT_MAX_WIDTH {
            Self::Compact
        } else if width <= STANDARD_MAX_WIDTH {
            Self::Standard
        } else {
            Self::Wide
        }
    }

    /// Column count a layout in this mode is built with.
    #[must_use]
    pub const fn columns(self) -> u16 {
        match self {
            Self::Wide => WIDE_COLUMNS,
            Self::Compact | Self::Standard => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Standard => "standard",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "standard" => Ok(Self::Standard),
            "wide" => Ok(Self::Wide),
            other => Err(format!(
                "unknown layout mode {other:?} (expected compact, standard or wide)"
            )),
        }
    }
}

/// A terminal geometry snapshot. Produced fresh by every detection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
    pub is_tty: bool,
}

impl TerminalSize {
    #[must_use]
    pub const fn new(width: u16, height: u16, is_tty: bool) -> Self {
        Self {
            width,
            height,
            is_tty,
        }
    }

    /// Fixed geometry used off-TTY or when the driver reports nothing.
    #[must_use]
    pub const fn fallback(is_tty: bool) -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, is_tty)
    }
}

/// Role tag for a region. Carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRegionType {
    Header,
    Menu,
    Status,
    Content,
    Footer,
}

/// Zero-based cell coordinate of a region's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: u16,
    pub column: u16,
}

/// Region extent in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

/// Inner spacing of a region, in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Padding {
    #[must_use]
    pub const fn uniform(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    #[must_use]
    pub fn horizontal(self) -> u32 {
        u32::from(self.left) + u32::from(self.right)
    }

    #[must_use]
    pub fn vertical(self) -> u32 {
        u32::from(self.top) + u32::from(self.bottom)
    }
}

/// A rectangle inside a layout.
///
/// `content` is the caller's payload; the engine hands it back untouched and
/// never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRegion<C = ()> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentRegionType,
    pub position: Position,
    pub size: Size,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default, alias = "showBorder")]
    pub show_border: bool,
    #[serde(default)]
    pub content: C,
}

impl ContentRegion<()> {
    /// Region without a payload, no padding and no border.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ContentRegionType, position: Position, size: Size) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            size,
            padding: Padding::default(),
            show_border: false,
            content: (),
        }
    }
}

impl<C> ContentRegion<C> {
    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_border(mut self, show_border: bool) -> Self {
        self.show_border = show_border;
        self
    }

    /// Replace the payload, changing the content type.
    #[must_use]
    pub fn with_content<D>(self, content: D) -> ContentRegion<D> {
        ContentRegion {
            id: self.id,
            kind: self.kind,
            position: self.position,
            size: self.size,
            padding: self.padding,
            show_border: self.show_border,
            content,
        }
    }

    /// Width left for content after horizontal padding.
    #[must_use]
    pub fn inner_width(&self) -> u16 {
        self.size
            .width
            .saturating_sub(self.padding.left)
            .saturating_sub(self.padding.right)
    }

    /// Height left for content after vertical padding.
    #[must_use]
    pub fn inner_height(&self) -> u16 {
        self.size
            .height
            .saturating_sub(self.padding.top)
            .saturating_sub(self.padding.bottom)
    }
}

/// Complete layout for one terminal geometry. Never patched in place: a
/// refresh builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalLayout<C = ()> {
    pub width: u16,
    pub height: u16,
    pub mode: LayoutMode,
    pub columns: u16,
    pub regions: Vec<ContentRegion<C>>,
    pub timestamp: DateTime<Utc>,
}

impl<C> TerminalLayout<C> {
    /// Look up a region by id.
    #[must_use]
    pub fn region(&self, id: &str) -> Option<&ContentRegion<C>> {
        self.regions.iter().find(|region| region.id == id)
    }

    /// Per-column width when the full layout width is split into
    /// [`Self::columns`] columns separated by `gap` cells.
    pub fn column_width(&self, gap: usize) -> Result<usize> {
        column_width(usize::from(self.width), usize::from(self.columns), gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_thresholds_are_exact() {
        assert_eq!(LayoutMode::for_width(0), LayoutMode::Compact);
        assert_eq!(LayoutMode::for_width(79), LayoutMode::Compact);
        assert_eq!(LayoutMode::for_width(80), LayoutMode::Standard);
        assert_eq!(LayoutMode::for_width(120), LayoutMode::Standard);
        assert_eq!(LayoutMode::for_width(121), LayoutMode::Wide);
        assert_eq!(LayoutMode::for_width(u16::MAX), LayoutMode::Wide);
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("WIDE".parse::<LayoutMode>(), Ok(LayoutMode::Wide));
        assert_eq!(" standard ".parse::<LayoutMode>(), Ok(LayoutMode::Standard));
        assert!("huge".parse::<LayoutMode>().is_err());
        assert_eq!(LayoutMode::Compact.to_string(), "compact");
    }

    #[test]
    fn only_wide_mode_gets_multiple_columns() {
        assert_eq!(LayoutMode::Compact.columns(), 1);
        assert_eq!(LayoutMode::Standard.columns(), 1);
        assert_eq!(LayoutMode::Wide.columns(), 2);
    }

    #[test]
    fn region_inner_extent_subtracts_padding() {
        let region = ContentRegion::new(
            "body",
            ContentRegionType::Content,
            Position { row: 2, column: 0 },
            Size {
                width: 40,
                height: 10,
            },
        )
        .with_padding(Padding {
            top: 1,
            right: 2,
            bottom: 1,
            left: 3,
        });
        assert_eq!(region.inner_width(), 35);
        assert_eq!(region.inner_height(), 8);
    }

    #[test]
    fn region_deserializes_with_defaults() {
        let region: ContentRegion<serde_json::Value> = serde_json::from_str(
            r#"{
                "id": "status",
                "type": "status",
                "position": {"row": 0, "column": 0},
                "size": {"width": 80, "height": 3},
                "content": {"items": ["up", "down"]}
            }"#,
        )
        .expect("region json");
        assert_eq!(region.kind, ContentRegionType::Status);
        assert_eq!(region.padding, Padding::default());
        assert!(!region.show_border);
        assert_eq!(region.content["items"][1], "down");
    }

    #[test]
    fn layout_column_width_uses_own_column_count() {
        let layout: TerminalLayout = TerminalLayout {
            width: 140,
            height: 40,
            mode: LayoutMode::Wide,
            columns: 2,
            regions: Vec::new(),
            timestamp: Utc::now(),
        };
        assert_eq!(layout.column_width(2).expect("width"), 69);
        assert!(layout.region("missing").is_none());
    }
}
