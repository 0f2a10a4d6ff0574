//! Pipeline - From inbound method calls to native mutation and back out.
//!
//! # Architecture
//!
//! ```text
//! UiHandle::call (any thread)
//!   │
//!   └─→ UI thread ─→ Coordinator::handle
//!                      ├─→ protocol:   MethodCall → Method (validated)
//!                      ├─→ engine:     factory / view registry / component updater
//!                      ├─→ layout:     one taffy pass per call if anything changed
//!                      └─→ result      true | value | BridgeError
//!
//! native trigger ─→ component binder ─→ EventChannel ─→ OutboundEvent receiver
//! ```
//!
//! Root bootstrap waits on an explicit host-readiness signal rather than a
//! timer (see [`bootstrap`]).

pub mod bootstrap;
mod coordinator;
mod events;
mod protocol;
mod ui_thread;

pub use bootstrap::{NATIVE_UI_READY, SYSTEM_VIEW_ID};
pub use coordinator::Coordinator;
pub use events::{EventChannel, OutboundEvent, normalize_event_name};
pub use protocol::{Method, MethodCall};
pub use ui_thread::{UiHandle, UiThread, with_coordinator};
