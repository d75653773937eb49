//! Terminal capability detection for adaptive output.

#![allow(missing_docs)]

use std::env;
use std::ffi::OsStr;

use serde::Serialize;

use super::probe::TerminalSizeSource;

/// Operating system family, as far as rendering decisions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    Macos,
    FreeBsd,
    Other,
}

impl Platform {
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            "macos" => Self::Macos,
            "freebsd" => Self::FreeBsd,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn current() -> Self {
        Self::from_os(env::consts::OS)
    }
}

/// Detected terminal features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub width: u16,
    pub height: Option<u16>,
    pub platform: Platform,
    pub term: Option<String>,
}

impl TerminalCapabilities {
    /// Detect capabilities from `source` and the process environment
    /// (`TERM`, `NO_COLOR`).
    pub fn detect(source: &dyn TerminalSizeSource) -> Self {
        let term = env::var("TERM").ok();
        let no_color = env::var_os("NO_COLOR").is_some_and(|value| value != OsStr::new(""));
        Self::from_parts(source, term, no_color, Platform::current())
    }

    /// Capability assembly with every environmental input explicit.
    pub fn from_parts(
        source: &dyn TerminalSizeSource,
        term: Option<String>,
        no_color: bool,
        platform: Platform,
    ) -> Self {
        let probe = source.probe();
        let size = probe.resolve();
        Self {
            is_tty: probe.is_tty,
            supports_color: probe.is_tty && !no_color && term.as_deref() != Some("dumb"),
            supports_unicode: supports_unicode(term.as_deref(), platform),
            width: size.width,
            height: probe.rows,
            platform,
            term,
        }
    }
}

/// Whether box drawing and other non-ASCII glyphs are safe to emit.
///
/// Windows consoles, unset `TERM`, `dumb` and `vt100` are treated as ASCII
/// only; `xterm*`, `screen*` and `tmux*` as Unicode-capable. Anything else is
/// assumed ASCII only.
#[must_use]
pub fn supports_unicode(term: Option<&str>, platform: Platform) -> bool {
    if platform == Platform::Windows {
        return false;
    }
    match term {
        None | Some("dumb" | "vt100") => false,
        Some(term) => ["xterm", "screen", "tmux"]
            .iter()
            .any(|prefix| term.starts_with(prefix)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::probe::{SharedProbe, TerminalProbe};

    #[test]
    fn unicode_support_by_term() {
        assert!(supports_unicode(Some("xterm-256color"), Platform::Linux));
        assert!(supports_unicode(Some("screen"), Platform::Linux));
        assert!(supports_unicode(Some("tmux-256color"), Platform::Macos));
        assert!(!supports_unicode(Some("dumb"), Platform::Linux));
        assert!(!supports_unicode(Some("vt100"), Platform::Linux));
        assert!(!supports_unicode(Some("linux"), Platform::Linux));
        assert!(!supports_unicode(None, Platform::Linux));
        assert!(!supports_unicode(Some("xterm"), Platform::Windows));
    }

    #[test]
    fn platform_mapping() {
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("macos"), Platform::Macos);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("freebsd"), Platform::FreeBsd);
        assert_eq!(Platform::from_os("haiku"), Platform::Other);
    }

    #[test]
    fn color_requires_tty_and_no_opt_out() {
        let tty = SharedProbe::new(TerminalProbe::tty(100, 30));
        let caps = TerminalCapabilities::from_parts(&tty, Some("xterm".into()), false, Platform::Linux);
        assert!(caps.supports_color);
        assert!(caps.supports_unicode);
        assert_eq!(caps.width, 100);
        assert_eq!(caps.height, Some(30));

        let caps = TerminalCapabilities::from_parts(&tty, Some("xterm".into()), true, Platform::Linux);
        assert!(!caps.supports_color);

        let piped = SharedProbe::new(TerminalProbe::detached());
        let caps = TerminalCapabilities::from_parts(&piped, Some("xterm".into()), false, Platform::Linux);
        assert!(!caps.supports_color);
        assert!(!caps.is_tty);
        assert_eq!(caps.width, 80);
        assert_eq!(caps.height, None);
    }
}
