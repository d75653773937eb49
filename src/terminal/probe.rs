//! Terminal geometry probes.
//!
//! A probe reports what the terminal driver knows right now: whether stdout
//! is a TTY and, if so, its size. Missing geometry is not an error; it
//! degrades to the fixed default size.

#![allow(missing_docs)]

use std::io::{self, IsTerminal as _};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::layout::model::TerminalSize;

/// Raw snapshot from a terminal driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalProbe {
    pub is_tty: bool,
    pub columns: Option<u16>,
    pub rows: Option<u16>,
}

impl TerminalProbe {
    #[must_use]
    pub const fn tty(columns: u16, rows: u16) -> Self {
        Self {
            is_tty: true,
            columns: Some(columns),
            rows: Some(rows),
        }
    }

    #[must_use]
    pub const fn detached() -> Self {
        Self {
            is_tty: false,
            columns: None,
            rows: None,
        }
    }

    /// Resolve into a [`TerminalSize`]: the reported geometry when this is a
    /// TTY with both (non-zero) dimensions known, the default otherwise.
    #[must_use]
    pub fn resolve(self) -> TerminalSize {
        match (self.is_tty, self.columns, self.rows) {
            (true, Some(width), Some(height)) if width > 0 && height > 0 => {
                TerminalSize::new(width, height, true)
            }
            _ => TerminalSize::fallback(self.is_tty),
        }
    }
}

/// Source of terminal geometry snapshots.
pub trait TerminalSizeSource {
    fn probe(&self) -> TerminalProbe;
}

/// Probes the process's real stdout through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutProbe;

impl TerminalSizeSource for StdoutProbe {
    fn probe(&self) -> TerminalProbe {
        let is_tty = io::stdout().is_terminal();
        if !is_tty {
            return TerminalProbe::detached();
        }
        match crossterm::terminal::size() {
            Ok((columns, rows)) => TerminalProbe::tty(columns, rows),
            Err(err) => {
                tracing::debug!(target: "terminal.probe", error = %err, "size query failed");
                TerminalProbe {
                    is_tty,
                    columns: None,
                    rows: None,
                }
            }
        }
    }
}

/// Probe with geometry controlled by the host, e.g. an embedding UI that
/// already tracks its own size, or tests simulating a resize.
///
/// Clones share the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedProbe {
    inner: Arc<Mutex<TerminalProbe>>,
}

impl SharedProbe {
    #[must_use]
    pub fn new(initial: TerminalProbe) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn set(&self, probe: TerminalProbe) {
        *self.inner.lock() = probe;
    }

    /// Simulate a TTY resize to `columns` x `rows`.
    pub fn resize(&self, columns: u16, rows: u16) {
        self.set(TerminalProbe::tty(columns, rows));
    }
}

impl TerminalSizeSource for SharedProbe {
    fn probe(&self) -> TerminalProbe {
        *self.inner.lock()
    }
}
