//! Terminal-facing collaborators: geometry probes, resize signal sources and
//! capability detection.

pub mod capabilities;
pub mod probe;
pub mod signal;

pub use capabilities::{Platform, TerminalCapabilities, supports_unicode};
pub use probe::{SharedProbe, StdoutProbe, TerminalProbe, TerminalSizeSource};
#[cfg(all(unix, feature = "signals"))]
pub use signal::SigwinchSignal;
pub use signal::{
    ChannelResizeSignal, ManualResizeSignal, NullResizeSignal, ResizeNotifier, ResizeSignal,
    platform_signal,
};
