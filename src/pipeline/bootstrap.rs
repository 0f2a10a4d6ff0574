//! Bootstrap - Root container readiness.
//!
//! The root container can only be attached once the host's UI stack has
//! finished starting. Instead of waiting a fixed delay, readiness is an
//! explicit signal: the host flips it with `host_ready()`, and any root
//! setup requested before that runs at that moment.
//!
//! ```text
//! initialize ──► root requested ─┐
//!                                ├──► root created ──► ("system", "nativeUIReady")
//! host_ready() ──► ready = true ─┘          │
//!                                           └──► first view attached full-bleed
//! ```

use spark_signals::{Signal, signal};

/// Identifier used for events that do not belong to a view.
pub const SYSTEM_VIEW_ID: &str = "system";

/// Event emitted once the root container is in place.
pub const NATIVE_UI_READY: &str = "nativeUIReady";

/// Root bootstrap progress.
pub struct Bootstrap {
    ready: Signal<bool>,
    root_requested: bool,
    root_created: bool,
    announced: bool,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self {
            ready: signal(false),
            root_requested: false,
            root_created: false,
            announced: false,
        }
    }

    /// Reactive host-readiness flag.
    pub fn ready_signal(&self) -> Signal<bool> {
        self.ready.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    pub fn mark_ready(&self) {
        if !self.ready.get() {
            self.ready.set(true);
        }
    }

    pub fn request_root(&mut self) {
        self.root_requested = true;
    }

    pub fn root_requested(&self) -> bool {
        self.root_requested
    }

    pub fn root_created(&self) -> bool {
        self.root_created
    }

    /// Whether root setup should run now.
    pub fn root_due(&self) -> bool {
        self.root_requested && !self.root_created && self.is_ready()
    }

    pub fn mark_root_created(&mut self) {
        self.root_created = true;
    }

    /// The root container was dropped (registry reset).
    pub fn root_dropped(&mut self) {
        self.root_created = false;
    }

    /// Returns `true` the first time only.
    pub fn take_announcement(&mut self) -> bool {
        !std::mem::replace(&mut self.announced, true)
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}
