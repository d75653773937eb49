//! Resize signal sources.
//!
//! A [`ResizeSignal`] is only listened to while attached; the layout manager
//! attaches it when the first resize subscriber registers and detaches it
//! when the last one leaves. Signals arriving while detached are dropped.

#![allow(missing_docs)]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// A source of "the terminal was resized" notifications.
pub trait ResizeSignal {
    /// Start listening. Attaching twice is a no-op.
    fn attach(&mut self) -> io::Result<()>;

    /// Stop listening and discard anything pending. Detaching twice is a no-op.
    fn detach(&mut self);

    /// Whether at least one resize arrived since the last call. Clears the
    /// pending state.
    fn take_pending(&mut self) -> bool;
}

/// Signal source that never fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResizeSignal;

impl ResizeSignal for NullResizeSignal {
    fn attach(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn detach(&mut self) {}

    fn take_pending(&mut self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
struct ManualState {
    attached: AtomicBool,
    pending: AtomicBool,
}

/// Signal source fired by hand. Clones share state, so a host (or a test)
/// keeps one clone to call [`ManualResizeSignal::trigger`] while the manager
/// owns another.
#[derive(Debug, Default, Clone)]
pub struct ManualResizeSignal {
    state: Arc<ManualState>,
}

impl ManualResizeSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a resize. Ignored while detached.
    pub fn trigger(&self) {
        if self.state.attached.load(Ordering::SeqCst) {
            self.state.pending.store(true, Ordering::SeqCst);
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.attached.load(Ordering::SeqCst)
    }
}

impl ResizeSignal for ManualResizeSignal {
    fn attach(&mut self) -> io::Result<()> {
        self.state.attached.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn detach(&mut self) {
        self.state.attached.store(false, Ordering::SeqCst);
        self.state.pending.store(false, Ordering::SeqCst);
    }

    fn take_pending(&mut self) -> bool {
        self.state.pending.swap(false, Ordering::SeqCst)
    }
}

/// Sending half of a [`ChannelResizeSignal`], handed to whatever thread reads
/// terminal events (for example a crossterm `Event::Resize` reader).
#[derive(Debug, Clone)]
pub struct ResizeNotifier {
    tx: Sender<()>,
}

impl ResizeNotifier {
    /// Report a resize. Returns `false` once the receiving side is gone.
    pub fn notify(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => true,
            Err(TrySendError::Disconnected(())) => false,
        }
    }
}

/// Signal source fed over a crossbeam channel.
#[derive(Debug)]
pub struct ChannelResizeSignal {
    rx: Receiver<()>,
    attached: bool,
}

impl ChannelResizeSignal {
    /// Bursts beyond this many undrained notifications collapse into one.
    const CAPACITY: usize = 64;

    #[must_use]
    pub fn channel() -> (Self, ResizeNotifier) {
        let (tx, rx) = crossbeam_channel::bounded(Self::CAPACITY);
        (
            Self {
                rx,
                attached: false,
            },
            ResizeNotifier { tx },
        )
    }

    fn drain(&self) -> bool {
        self.rx.try_iter().count() > 0
    }
}

impl ResizeSignal for ChannelResizeSignal {
    fn attach(&mut self) -> io::Result<()> {
        if !self.attached {
            // Anything queued before attaching predates the subscription.
            self.drain();
            self.attached = true;
        }
        Ok(())
    }

    fn detach(&mut self) {
        self.attached = false;
        self.drain();
    }

    fn take_pending(&mut self) -> bool {
        let fired = self.drain();
        fired && self.attached
    }
}

/// SIGWINCH listener backed by `signal-hook`.
#[cfg(all(unix, feature = "signals"))]
#[derive(Debug, Default)]
pub struct SigwinchSignal {
    flag: Arc<AtomicBool>,
    id: Option<signal_hook::SigId>,
}

#[cfg(all(unix, feature = "signals"))]
impl SigwinchSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(all(unix, feature = "signals"))]
impl ResizeSignal for SigwinchSignal {
    fn attach(&mut self) -> io::Result<()> {
        if self.id.is_none() {
            let id = signal_hook::flag::register(
                signal_hook::consts::SIGWINCH,
                Arc::clone(&self.flag),
            )?;
            self.id = Some(id);
        }
        Ok(())
    }

    fn detach(&mut self) {
        if let Some(id) = self.id.take() {
            signal_hook::low_level::unregister(id);
        }
        self.flag.store(false, Ordering::SeqCst);
    }

    fn take_pending(&mut self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}

#[cfg(all(unix, feature = "signals"))]
impl Drop for SigwinchSignal {
    fn drop(&mut self) {
        self.detach();
    }
}

/// The platform's native resize source: SIGWINCH on unix when the `signals`
/// feature is enabled, a silent source otherwise.
#[must_use]
pub fn platform_signal() -> Box<dyn ResizeSignal> {
    #[cfg(all(unix, feature = "signals"))]
    {
        Box::new(SigwinchSignal::new())
    }
    #[cfg(not(all(unix, feature = "signals")))]
    {
        Box::new(NullResizeSignal)
    }
}
