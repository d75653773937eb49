//! Debounced resize delivery through the layout manager.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use term_layout::layout::LayoutMode;
use term_layout::manager::{LayoutManager, RESIZE_DEBOUNCE, ResizeSubscription};
use term_layout::terminal::{ChannelResizeSignal, ManualResizeSignal, SharedProbe, TerminalProbe};

type Seen = Rc<RefCell<Vec<(u16, LayoutMode)>>>;

fn record(seen: &Seen) -> impl FnMut(&term_layout::TerminalLayout) + 'static {
    let seen = Rc::clone(seen);
    move |layout| seen.borrow_mut().push((layout.width, layout.mode))
}

#[test]
fn burst_of_signals_collapses_into_one_callback() {
    let probe = SharedProbe::new(TerminalProbe::tty(100, 30));
    let signal = ManualResizeSignal::new();
    let mut manager: LayoutManager =
        LayoutManager::new(Box::new(probe.clone()), Box::new(signal.clone()));
    let seen: Seen = Rc::default();
    let _subscription = manager.on_resize(record(&seen));

    let start = Instant::now();
    for (offset, width) in [(0, 110), (20, 130), (45, 140)] {
        probe.resize(width, 40);
        signal.trigger();
        let now = start + Duration::from_millis(offset);
        assert!(manager.poll_resize(now).expect("poll").is_none());
    }
    assert!(seen.borrow().is_empty());

    let due = manager.next_resize_deadline().expect("pending");
    assert_eq!(due, start + Duration::from_millis(45) + RESIZE_DEBOUNCE);

    // Geometry is read when the timer fires, not when the signal arrived.
    probe.resize(150, 40);
    assert!(
        manager
            .poll_resize(due - Duration::from_millis(1))
            .expect("poll")
            .is_none()
    );
    let layout = manager.poll_resize(due).expect("poll").expect("fired");
    assert_eq!(layout.width, 150);
    assert_eq!(*seen.borrow(), vec![(150, LayoutMode::Wide)]);
    assert!(manager.next_resize_deadline().is_none());
}

#[test]
fn unsubscribe_inside_callback_is_safe_and_idempotent() {
    let probe = SharedProbe::new(TerminalProbe::tty(100, 30));
    let signal = ManualResizeSignal::new();
    let mut manager: LayoutManager =
        LayoutManager::new(Box::new(probe), Box::new(signal.clone()));

    let slot: Rc<RefCell<Option<ResizeSubscription>>> = Rc::default();
    let once = Rc::new(RefCell::new(0));
    let subscription = {
        let slot = Rc::clone(&slot);
        let once = Rc::clone(&once);
        manager.on_resize(move |_| {
            *once.borrow_mut() += 1;
            if let Some(subscription) = slot.borrow_mut().as_mut() {
                subscription.unsubscribe();
                subscription.unsubscribe();
            }
        })
    };
    *slot.borrow_mut() = Some(subscription);

    let seen: Seen = Rc::default();
    let mut keeper = manager.on_resize(record(&seen));

    let start = Instant::now();
    for round in 0..2u64 {
        let at = start + Duration::from_secs(round);
        signal.trigger();
        manager.poll_resize(at).expect("poll");
        manager.poll_resize(at + RESIZE_DEBOUNCE).expect("poll");
    }
    assert_eq!(*once.borrow(), 1);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(manager.resize_subscriber_count(), 1);
    assert!(signal.is_attached());

    keeper.unsubscribe();
    assert!(!signal.is_attached());
    assert!(!manager.is_listening());
    keeper.unsubscribe();
}

#[test]
fn signals_without_subscribers_are_ignored() {
    let probe = SharedProbe::new(TerminalProbe::tty(100, 30));
    let signal = ManualResizeSignal::new();
    let mut manager: LayoutManager =
        LayoutManager::new(Box::new(probe), Box::new(signal.clone()));

    signal.trigger();
    let start = Instant::now();
    assert!(manager.poll_resize(start).expect("poll").is_none());
    assert!(manager.next_resize_deadline().is_none());
    assert!(manager.current_layout().is_none());
}

#[test]
fn channel_source_feeds_the_debouncer() {
    let probe = SharedProbe::new(TerminalProbe::tty(100, 30));
    let (signal, notifier) = ChannelResizeSignal::channel();
    let mut manager: LayoutManager = LayoutManager::new(Box::new(probe.clone()), Box::new(signal));
    let seen: Seen = Rc::default();
    let _subscription = manager.on_resize(record(&seen));

    let host = std::thread::spawn(move || {
        for _ in 0..3 {
            assert!(notifier.notify());
        }
    });
    host.join().expect("host thread");
    probe.resize(70, 25);

    let start = Instant::now();
    assert!(manager.poll_resize(start).expect("poll").is_none());
    let layout = manager
        .poll_resize(start + RESIZE_DEBOUNCE)
        .expect("poll")
        .expect("fired");
    assert_eq!(layout.mode, LayoutMode::Compact);
    assert_eq!(*seen.borrow(), vec![(70, LayoutMode::Compact)]);
}

#[test]
fn injected_signal_works_without_a_source() {
    let probe = SharedProbe::new(TerminalProbe::tty(125, 30));
    let mut manager: LayoutManager = LayoutManager::new(
        Box::new(probe),
        Box::new(term_layout::terminal::NullResizeSignal),
    );
    let seen: Seen = Rc::default();
    let _subscription = manager.on_resize(record(&seen));

    let start = Instant::now();
    manager.notify_resize(start);
    manager.notify_resize(start + Duration::from_millis(10));
    assert!(manager.poll_resize(start + RESIZE_DEBOUNCE).expect("poll").is_none());
    manager
        .poll_resize(start + Duration::from_millis(10) + RESIZE_DEBOUNCE)
        .expect("poll")
        .expect("fired");
    assert_eq!(*seen.borrow(), vec![(125, LayoutMode::Wide)]);
}
