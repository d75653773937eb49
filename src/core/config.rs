//! TOML-backed engine configuration.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration.

#![allow(missing_docs)]

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{LayoutError, Result};
use crate::render::table::BorderStyle;
use crate::text::fit::ELLIPSIS;

/// Full configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// `[layout]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Cells between rendered columns.
    pub column_gap: usize,
    pub enable_cache: bool,
    /// Cache entry lifetime in milliseconds; `0` disables expiry.
    pub cache_ttl_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_gap: 2,
            enable_cache: true,
            cache_ttl_ms: 0,
        }
    }
}

/// `[render]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub border_style: BorderStyle,
    /// Marker appended to truncated layout lines and column cells. Table
    /// cells keep their own single-glyph marker.
    pub ellipsis: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            border_style: BorderStyle::Single,
            ellipsis: ELLIPSIS.to_owned(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| LayoutError::io(path, source))?;
        Self::from_toml_str(&raw)
    }

    /// Like [`Self::load`], but a missing file (or no path) yields defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(target: "config", path = %path.display(), "config file not found; using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(LayoutError::io(path, source)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.render.ellipsis.is_empty() {
            return Err(LayoutError::InvalidConfig {
                details: "render.ellipsis must not be empty".to_owned(),
            });
        }
        if self.logging.filter.trim().is_empty() {
            return Err(LayoutError::InvalidConfig {
                details: "logging.filter must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.layout.column_gap, 2);
        assert!(config.layout.enable_cache);
        assert_eq!(config.render.ellipsis, "...");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [layout]
            cache_ttl_ms = 1500

            [render]
            border_style = "double"
            "#,
        )
        .expect("partial config");
        assert_eq!(config.layout.cache_ttl_ms, 1500);
        assert_eq!(config.layout.column_gap, 2);
        assert_eq!(config.render.border_style, BorderStyle::Double);
        assert_eq!(config.render.ellipsis, "...");
    }

    #[test]
    fn empty_ellipsis_is_rejected() {
        let err = EngineConfig::from_toml_str("[render]\nellipsis = \"\"\n").expect_err("invalid");
        assert_eq!(err.code(), "TL-3001");
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let err = EngineConfig::from_toml_str("[layout]\ncolumns = 3\n").expect_err("unknown key");
        assert_eq!(err.code(), "TL-3002");
    }

    #[test]
    fn load_reads_file_and_missing_file_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tlay.toml");
        let mut file = fs::File::create(&path).expect("create");
        writeln!(file, "[logging]\nfilter = \"debug\"").expect("write");
        drop(file);

        let config = EngineConfig::load(&path).expect("load");
        assert_eq!(config.logging.filter, "debug");

        let missing = dir.path().join("missing.toml");
        assert_eq!(
            EngineConfig::load_or_default(Some(&missing)).expect("defaults"),
            EngineConfig::default()
        );
        assert_eq!(EngineConfig::load(&missing).expect_err("io").code(), "TL-3101");
        assert_eq!(
            EngineConfig::load_or_default(None).expect("defaults"),
            EngineConfig::default()
        );
    }
}
