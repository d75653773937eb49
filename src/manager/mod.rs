//! Layout manager: terminal detection, layout construction and caching, and
//! debounced resize notification.
//!
//! A [`LayoutManager`] is an ordinary value owned by the caller. It is not
//! `Send`: all access happens on the thread that drives it, and the host
//! pumps resize handling by calling [`LayoutManager::poll_resize`] from its
//! event loop.

pub mod cache;
pub mod resize;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Serialize;

use crate::core::config::LayoutConfig;
use crate::core::errors::Result;
use crate::layout::model::{
    ContentRegion, LayoutMode, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH, TerminalLayout,
    TerminalSize,
};
use crate::layout::validate::validate_layout;
use crate::terminal::probe::{StdoutProbe, TerminalSizeSource};
use crate::terminal::signal::{ResizeSignal, platform_signal};

pub use cache::{CacheKey, LayoutCache};
pub use resize::{Debouncer, RESIZE_DEBOUNCE, ResizeSubscription};

use resize::ResizeHub;

/// Default gap between columns, in cells.
pub const DEFAULT_COLUMN_GAP: usize = 2;

/// Per-call layout construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Report this mode instead of the requested one. Still validated
    /// against the detected width.
    pub force_mode: Option<LayoutMode>,
    /// Gap hosts use between rendered columns.
    pub column_gap: usize,
    /// Store the layout in the cache.
    pub enable_cache: bool,
    /// Lifetime of the layout stored by this call; `None` never expires.
    pub cache_ttl: Option<Duration>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            force_mode: None,
            column_gap: DEFAULT_COLUMN_GAP,
            enable_cache: true,
            cache_ttl: None,
        }
    }
}

impl LayoutOptions {
    /// Report `mode` regardless of width.
    #[must_use]
    pub const fn with_force_mode(mut self, mode: LayoutMode) -> Self {
        self.force_mode = Some(mode);
        self
    }

    /// Skip storing the layout.
    #[must_use]
    pub const fn without_cache(mut self) -> Self {
        self.enable_cache = false;
        self
    }
}

impl From<&LayoutConfig> for LayoutOptions {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            force_mode: None,
            column_gap: config.column_gap,
            enable_cache: config.enable_cache,
            cache_ttl: (config.cache_ttl_ms > 0)
                .then(|| Duration::from_millis(config.cache_ttl_ms)),
        }
    }
}

/// Usable area once reserved rows are taken off the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentSize {
    /// Full terminal width.
    pub width: u16,
    /// Rows left after the reserved ones.
    pub height: u16,
}

/// Verdict of [`validate_terminal_size`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeCheck {
    /// Both dimensions meet the minimum.
    pub is_valid: bool,
    /// Which dimension is too small.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// What the user can do about it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SizeCheck {
    const fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
            suggestion: None,
        }
    }

    fn invalid(message: String) -> Self {
        Self {
            is_valid: false,
            message: Some(message),
            suggestion: Some(format!(
                "Please resize your terminal to at least {MIN_TERMINAL_WIDTH}x{MIN_TERMINAL_HEIGHT} for optimal display."
            )),
        }
    }
}

/// Check `size` against the minimum terminal size. Width is reported first
/// when both dimensions are short.
#[must_use]
pub fn validate_terminal_size(size: TerminalSize) -> SizeCheck {
    if size.width < MIN_TERMINAL_WIDTH {
        return SizeCheck::invalid(format!(
            "Terminal too narrow ({} cols). Minimum: {MIN_TERMINAL_WIDTH} cols.",
            size.width
        ));
    }
    if size.height < MIN_TERMINAL_HEIGHT {
        return SizeCheck::invalid(format!(
            "Terminal too short ({} rows). Minimum: {MIN_TERMINAL_HEIGHT} rows.",
            size.height
        ));
    }
    SizeCheck::valid()
}

/// Builds, caches and refreshes [`TerminalLayout`]s for one terminal.
///
/// `C` is the opaque payload carried by each region.
pub struct LayoutManager<C = ()> {
    source: Box<dyn TerminalSizeSource>,
    current: Option<Arc<TerminalLayout<C>>>,
    cache: LayoutCache<C>,
    hub: ResizeHub<C>,
    debounce: Debouncer,
    options: LayoutOptions,
}

impl LayoutManager<()> {
    /// Manager reading the process's stdout with the platform resize source.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(StdoutProbe), platform_signal())
    }
}

impl<C: 'static> LayoutManager<C> {
    /// Manager reading geometry from `source` and resize notifications from
    /// `signal`.
    #[must_use]
    pub fn new(source: Box<dyn TerminalSizeSource>, signal: Box<dyn ResizeSignal>) -> Self {
        Self {
            source,
            current: None,
            cache: LayoutCache::new(),
            hub: ResizeHub::new(signal),
            debounce: Debouncer::default(),
            options: LayoutOptions::default(),
        }
    }

    /// Replace the options used by debounced refreshes.
    #[must_use]
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Options used by debounced refreshes.
    #[must_use]
    pub const fn options(&self) -> LayoutOptions {
        self.options
    }

    /// Current terminal geometry. Never fails; missing geometry yields the
    /// default size.
    #[must_use]
    pub fn detect_terminal_size(&self) -> TerminalSize {
        self.source.probe().resolve()
    }

    /// Layout mode implied by `width`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn calculate_layout_mode(&self, width: u16) -> LayoutMode {
        LayoutMode::for_width(width)
    }

    /// Build a layout for the current geometry.
    ///
    /// The reported mode is `options.force_mode` when set, `mode` otherwise;
    /// columns follow that mode. The layout is validated before anything is
    /// stored: on error the cache and the current layout are untouched.
    pub fn create_layout(
        &mut self,
        mode: LayoutMode,
        regions: Vec<ContentRegion<C>>,
        options: LayoutOptions,
    ) -> Result<Arc<TerminalLayout<C>>> {
        let size = self.detect_terminal_size();
        let mode = options.force_mode.unwrap_or(mode);

        let layout = TerminalLayout {
            width: size.width,
            height: size.height,
            mode,
            columns: mode.columns(),
            regions,
            timestamp: Utc::now(),
        };

        if let Err(err) = validate_layout(&layout) {
            tracing::debug!(target: "layout.manager", code = err.code(), error = %err, "layout rejected");
            return Err(err);
        }

        let layout = Arc::new(layout);
        tracing::debug!(
            target: "layout.manager",
            width = layout.width,
            height = layout.height,
            mode = %layout.mode,
            regions = layout.regions.len(),
            "layout created"
        );

        if options.enable_cache {
            let now = Instant::now();
            let expired = self.cache.prune(now);
            if expired > 0 {
                tracing::debug!(target: "layout.cache", expired, "pruned cache");
            }
            self.cache.store(Arc::clone(&layout), options.cache_ttl, now);
        }

        self.current = Some(Arc::clone(&layout));
        Ok(layout)
    }

    /// Last successfully created layout.
    #[must_use]
    pub fn current_layout(&self) -> Option<Arc<TerminalLayout<C>>> {
        self.current.clone()
    }

    /// Drop every cached layout. The current layout is kept.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Cached layout for `(mode, region_count)`. Entries expire after the
    /// `cache_ttl` of the [`create_layout`](Self::create_layout) call that
    /// stored them.
    pub fn cached_layout(
        &mut self,
        mode: LayoutMode,
        region_count: usize,
    ) -> Option<Arc<TerminalLayout<C>>> {
        self.cache.get(CacheKey { mode, region_count }, Instant::now())
    }

    /// Number of cached layouts, expired ones included until pruned.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Register `callback` for debounced resize notifications.
    ///
    /// The first subscriber attaches the resize signal, the last unsubscribe
    /// detaches it.
    pub fn on_resize<F>(&self, callback: F) -> ResizeSubscription
    where
        F: FnMut(&TerminalLayout<C>) + 'static,
    {
        self.hub.subscribe(callback)
    }

    /// Active resize subscriptions.
    #[must_use]
    pub fn resize_subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }

    /// Whether the resize signal is currently attached.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.hub.is_listening()
    }

    /// Record a resize signal at `now` without going through the signal
    /// source, e.g. from a host that reads resize events itself.
    pub fn notify_resize(&mut self, now: Instant) {
        self.debounce.signal(now);
    }

    /// When the pending debounced refresh is due, if one is pending.
    #[must_use]
    pub const fn next_resize_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Terminal area minus `reserved_rows` at the top.
    #[must_use]
    pub fn get_content_size(&self, reserved_rows: u16) -> ContentSize {
        let size = self.detect_terminal_size();
        ContentSize {
            width: size.width,
            height: size.height.saturating_sub(reserved_rows),
        }
    }

    /// See the free function [`validate_terminal_size`].
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn validate_terminal_size(&self, size: TerminalSize) -> SizeCheck {
        validate_terminal_size(size)
    }
}

impl<C: Clone + 'static> LayoutManager<C> {
    /// Re-detect geometry and rebuild with the mode that width implies.
    ///
    /// Uses `regions` when given, else the current layout's regions, else
    /// none.
    pub fn refresh_layout(
        &mut self,
        regions: Option<Vec<ContentRegion<C>>>,
        options: LayoutOptions,
    ) -> Result<Arc<TerminalLayout<C>>> {
        let size = self.detect_terminal_size();
        let mode = self.calculate_layout_mode(size.width);
        let regions = regions
            .or_else(|| self.current.as_ref().map(|layout| layout.regions.clone()))
            .unwrap_or_default();
        self.create_layout(mode, regions, options)
    }

    /// Drive resize handling.
    ///
    /// Drains the resize signal (each signal restarts the debounce period)
    /// and, once [`RESIZE_DEBOUNCE`] has passed since the last one, refreshes
    /// the layout and calls every subscriber with it. Returns the refreshed
    /// layout when that happened.
    ///
    /// A refresh that fails validation is returned as an error; subscribers
    /// are not called and the current layout is kept.
    pub fn poll_resize(&mut self, now: Instant) -> Result<Option<Arc<TerminalLayout<C>>>> {
        if self.hub.take_pending() {
            self.debounce.signal(now);
        }
        if !self.debounce.fire(now) {
            return Ok(None);
        }

        let layout = match self.refresh_layout(None, self.options) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::warn!(
                    target: "layout.resize",
                    code = err.code(),
                    error = %err,
                    "debounced layout refresh failed"
                );
                return Err(err);
            }
        };

        let notified = self.hub.dispatch(&layout);
        tracing::info!(
            target: "layout.resize",
            width = layout.width,
            height = layout.height,
            mode = %layout.mode,
            notified,
            "terminal resized"
        );
        Ok(Some(layout))
    }
}

impl<C> fmt::Debug for LayoutManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutManager")
            .field("has_layout", &self.current.is_some())
            .field("cached", &self.cache.len())
            .field("hub", &self.hub)
            .field("debounce", &self.debounce)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
