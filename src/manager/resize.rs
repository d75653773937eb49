//! Resize subscription hub and debounce timer.
//!
//! Subscribers live in a hub shared with their [`ResizeSubscription`]
//! handles. The hub owns the [`ResizeSignal`]: it is attached when the first
//! subscriber registers and detached when the last one leaves. Dispatch works
//! on a snapshot of the subscriber list, so callbacks may unsubscribe
//! themselves (or each other) while being called.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use crate::layout::model::TerminalLayout;
use crate::terminal::signal::ResizeSignal;

/// Quiet period after the last resize signal before subscribers are told.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Single reusable debounce deadline. Every signal pushes the deadline out;
/// nothing stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }
}

impl Debouncer {
    /// A debouncer with no signal pending.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record a signal at `now`, (re)starting the quiet period.
    pub fn signal(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// When the pending signal fires, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// A signal is waiting for its quiet period.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whether the quiet period has elapsed at `now`. Firing clears the
    /// deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending signal.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

type Callback<C> = Rc<RefCell<dyn FnMut(&TerminalLayout<C>)>>;

struct HubState<C> {
    next_id: u64,
    subscribers: Vec<(u64, Callback<C>)>,
    signal: Box<dyn ResizeSignal>,
    listening: bool,
}

impl<C> HubState<C> {
    fn remove(&mut self, id: u64) {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        if self.subscribers.len() == before {
            return;
        }
        tracing::debug!(
            target: "layout.resize",
            id,
            remaining = self.subscribers.len(),
            "resize subscriber removed"
        );
        if self.subscribers.is_empty() && self.listening {
            self.signal.detach();
            self.listening = false;
            tracing::debug!(target: "layout.resize", "resize listener detached");
        }
    }
}

/// Registry of resize callbacks plus the signal source they share.
pub(crate) struct ResizeHub<C> {
    state: Rc<RefCell<HubState<C>>>,
}

impl<C: 'static> ResizeHub<C> {
    pub(crate) fn new(signal: Box<dyn ResizeSignal>) -> Self {
        Self {
            state: Rc::new(RefCell::new(HubState {
                next_id: 0,
                subscribers: Vec::new(),
                signal,
                listening: false,
            })),
        }
    }

    pub(crate) fn subscribe<F>(&self, callback: F) -> ResizeSubscription
    where
        F: FnMut(&TerminalLayout<C>) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let callback: Callback<C> = Rc::new(RefCell::new(callback));
        state.subscribers.push((id, callback));

        if !state.listening {
            match state.signal.attach() {
                Ok(()) => {
                    state.listening = true;
                    tracing::debug!(target: "layout.resize", "resize listener attached");
                }
                Err(err) => {
                    tracing::warn!(
                        target: "layout.resize",
                        error = %err,
                        "could not attach resize listener; callbacks fire only on injected signals"
                    );
                }
            }
        }

        let hub: Weak<RefCell<HubState<C>>> = Rc::downgrade(&self.state);
        ResizeSubscription {
            cancel: Some(Box::new(move || {
                if let Some(state) = hub.upgrade() {
                    state.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Drain the signal source. Always `false` while nobody listens.
    pub(crate) fn take_pending(&self) -> bool {
        let mut state = self.state.borrow_mut();
        state.listening && state.signal.take_pending()
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    pub(crate) fn is_listening(&self) -> bool {
        self.state.borrow().listening
    }

    /// Call every live subscriber with `layout`. Returns how many were called.
    pub(crate) fn dispatch(&self, layout: &TerminalLayout<C>) -> usize {
        let snapshot: Vec<(u64, Callback<C>)> = self
            .state
            .borrow()
            .subscribers
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect();

        let mut called = 0;
        for (id, callback) in snapshot {
            // Skip anyone removed by an earlier callback in this round.
            let live = self
                .state
                .borrow()
                .subscribers
                .iter()
                .any(|(sub_id, _)| *sub_id == id);
            if !live {
                continue;
            }
            // A callback cannot re-enter itself, only the hub.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)(layout);
                called += 1;
            }
        }
        called
    }
}

impl<C> fmt::Debug for ResizeHub<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ResizeHub")
            .field("subscribers", &state.subscribers.len())
            .field("listening", &state.listening)
            .finish_non_exhaustive()
    }
}

/// Handle returned by `LayoutManager::on_resize`.
///
/// [`ResizeSubscription::unsubscribe`] is idempotent and safe to call from
/// inside any resize callback. Dropping the handle leaves the callback
/// registered.
pub struct ResizeSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl ResizeSubscription {
    /// Remove the callback. Later calls do nothing.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// `false` once unsubscribed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSubscription")
            .field("active", &self.is_active())
            .finish()
    }
}
