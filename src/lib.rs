//! Responsive terminal layout engine.
//!
//! Detects the terminal geometry, classifies it into a [`LayoutMode`],
//! builds validated [`TerminalLayout`]s out of caller-described regions and
//! keeps them current across debounced resizes. The [`text`] and [`render`]
//! modules shape strings to exact display widths for printing into those
//! layouts.
//!
//! ```
//! use term_layout::manager::{LayoutManager, LayoutOptions};
//! use term_layout::terminal::{ManualResizeSignal, SharedProbe, TerminalProbe};
//! use term_layout::LayoutMode;
//!
//! let probe = SharedProbe::new(TerminalProbe::tty(140, 40));
//! let mut manager: LayoutManager =
//!     LayoutManager::new(Box::new(probe), Box::new(ManualResizeSignal::new()));
//! let layout = manager
//!     .refresh_layout(None, LayoutOptions::default())
//!     .expect("140x40 is a valid terminal");
//! assert_eq!(layout.mode, LayoutMode::Wide);
//! assert_eq!(layout.columns, 2);
//! ```

pub mod core;
pub mod layout;
pub mod manager;
pub mod render;
pub mod terminal;
pub mod text;

#[cfg(feature = "cli")]
pub mod cli_app;
#[cfg(feature = "cli")]
pub mod logger;

pub use crate::core::errors::{LayoutError, Result};
pub use layout::{ContentRegion, ContentRegionType, LayoutMode, TerminalLayout, TerminalSize};
pub use manager::LayoutManager;
