//! TL-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::layout::model::LayoutMode;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Top-level error type for the layout engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("[TL-1001] Terminal too small: {width}x{height} (min: {min_width}x{min_height})")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error("[TL-1002] LayoutMode mismatch: expected {expected} for width {width}, got {actual}")]
    ModeMismatch {
        expected: LayoutMode,
        actual: LayoutMode,
        width: u16,
    },

    #[error("[TL-1003] WIDE mode requires columns >= 2, got {columns}")]
    WideColumns { columns: u16 },

    #[error("[TL-1004] Non-WIDE mode requires columns = 1, got {columns} ({mode})")]
    NarrowColumns { mode: LayoutMode, columns: u16 },

    #[error("[TL-1101] Region {id}: row {row} out of bounds (0-{max})")]
    RowOutOfBounds { id: String, row: u16, max: u16 },

    #[error("[TL-1102] Region {id}: column {column} out of bounds (0-{max})")]
    ColumnOutOfBounds { id: String, column: u16, max: u16 },

    #[error("[TL-1103] Region {id}: width {width} out of bounds (1-{max})")]
    WidthOutOfBounds { id: String, width: u16, max: u16 },

    #[error("[TL-1104] Region {id}: height {height} out of bounds (1-{max})")]
    HeightOutOfBounds { id: String, height: u16, max: u16 },

    #[error("[TL-1105] Region {id}: horizontal padding {padding} >= width {width}")]
    HorizontalPadding { id: String, padding: u32, width: u16 },

    #[error("[TL-1106] Region {id}: vertical padding {padding} >= height {height}")]
    VerticalPadding {
        id: String,
        padding: u32,
        height: u16,
    },

    #[error("[TL-2001] column count must be positive, got {columns}")]
    InvalidColumnCount { columns: usize },

    #[error("[TL-3001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[TL-3002] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[TL-3003] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[TL-3101] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LayoutError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TerminalTooSmall { .. } => "TL-1001",
            Self::ModeMismatch { .. } => "TL-1002",
            Self::WideColumns { .. } => "TL-1003",
            Self::NarrowColumns { .. } => "TL-1004",
            Self::RowOutOfBounds { .. } => "TL-1101",
            Self::ColumnOutOfBounds { .. } => "TL-1102",
            Self::WidthOutOfBounds { .. } => "TL-1103",
            Self::HeightOutOfBounds { .. } => "TL-1104",
            Self::HorizontalPadding { .. } => "TL-1105",
            Self::VerticalPadding { .. } => "TL-1106",
            Self::InvalidColumnCount { .. } => "TL-2001",
            Self::InvalidConfig { .. } => "TL-3001",
            Self::ConfigParse { .. } => "TL-3002",
            Self::Serialization { .. } => "TL-3003",
            Self::Io { .. } => "TL-3101",
        }
    }

    /// Whether this is a layout/region invariant violation (a programmer error
    /// in the caller's layout description rather than an input or I/O fault).
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::TerminalTooSmall { .. }
                | Self::ModeMismatch { .. }
                | Self::WideColumns { .. }
                | Self::NarrowColumns { .. }
                | Self::RowOutOfBounds { .. }
                | Self::ColumnOutOfBounds { .. }
                | Self::WidthOutOfBounds { .. }
                | Self::HeightOutOfBounds { .. }
                | Self::HorizontalPadding { .. }
                | Self::VerticalPadding { .. }
        )
    }

    /// Id of the region that failed validation, if the error is region-scoped.
    #[must_use]
    pub fn region_id(&self) -> Option<&str> {
        match self {
            Self::RowOutOfBounds { id, .. }
            | Self::ColumnOutOfBounds { id, .. }
            | Self::WidthOutOfBounds { id, .. }
            | Self::HeightOutOfBounds { id, .. }
            | Self::HorizontalPadding { id, .. }
            | Self::VerticalPadding { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for LayoutError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_code_and_detail() {
        let err = LayoutError::TerminalTooSmall {
            width: 50,
            height: 24,
            min_width: 60,
            min_height: 20,
        };
        let text = err.to_string();
        assert!(text.starts_with("[TL-1001]"));
        assert!(text.contains("Terminal too small: 50x24"));
        assert_eq!(err.code(), "TL-1001");
        assert!(err.is_structural());
    }

    #[test]
    fn region_errors_expose_offending_id() {
        let err = LayoutError::HorizontalPadding {
            id: "menu".into(),
            padding: 12,
            width: 10,
        };
        assert_eq!(err.region_id(), Some("menu"));
        assert!(err.to_string().contains("padding"));
        assert!(err.to_string().contains("Region menu"));
    }

    #[test]
    fn input_errors_are_not_structural() {
        let err = LayoutError::InvalidColumnCount { columns: 0 };
        assert!(!err.is_structural());
        assert_eq!(err.region_id(), None);
    }

    #[test]
    fn toml_errors_map_to_config_parse() {
        let parse = toml::from_str::<toml::Value>("[broken").unwrap_err();
        let err = LayoutError::from(parse);
        assert_eq!(err.code(), "TL-3002");
    }
}
