//! # dcmaui-native
//!
//! Native view coordination layer for DCMAUI.
//!
//! A remote UI runtime describes a view tree through method calls
//! (`createView`, `attachView`, `setChildren`, `updateView`, `deleteView`,
//! ...). This crate keeps a tree of native views consistent with that
//! description and sends native events back out.
//!
//! ## Architecture
//!
//! Views are records in an arena keyed by identifier. Parents list children
//! by id and children name their parent by id, so the tree has no reference
//! cycles. Layout is delegated to [taffy](https://github.com/DioxusLabs/taffy):
//! ```text
//! MethodCall → Coordinator → {ViewFactory | ViewRegistry | Component::update}
//!                          → taffy layout pass → native frames
//! native trigger → Component binder → EventChannel → OutboundEvent
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Frame, Rgba, Dimension, flex enums)
//! - [`native`] - The native view boundary and an in-memory implementation
//! - [`engine`] - Component registry, view factory, view registry
//! - [`layout`] - Property mapper and taffy layout pass
//! - [`primitives`] - Built-in components (View, Text, Button, ...)
//! - [`pipeline`] - Coordinator, protocol, events, UI thread
//!
//! ## Example
//!
//! ```
//! use dcmaui_native::{BridgeConfig, Coordinator, EventChannel, MethodCall};
//! use serde_json::json;
//!
//! let (events, outbound) = EventChannel::new();
//! let mut coordinator = Coordinator::new(BridgeConfig::default(), events);
//!
//! coordinator
//!     .handle(MethodCall::new(
//!         "createView",
//!         json!({ "viewId": "btn1", "viewType": "Button", "props": { "title": "OK" } }),
//!     ))
//!     .unwrap();
//! coordinator
//!     .handle(MethodCall::new(
//!         "simulateEvent",
//!         json!({ "viewId": "btn1", "eventName": "press", "params": {} }),
//!     ))
//!     .unwrap();
//!
//! let event = outbound.try_recv().unwrap();
//! assert_eq!((event.view_id.as_str(), event.event_name.as_str()), ("btn1", "press"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod native;
pub mod pipeline;
pub mod primitives;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::BridgeConfig;

pub use error::{BridgeError, BridgeResult, FactoryError, RegistryError};

pub use engine::{
    Component, ComponentRegistry, EventCallback, ViewFactory, ViewRecord, ViewRegistry,
};

pub use native::{Appearance, HeadlessView, NativeHandler, NativeView};

pub use layout::{apply_properties, compute_layout};

pub use pipeline::{
    Coordinator, EventChannel, Method, MethodCall, OutboundEvent, UiHandle, UiThread,
};

pub use primitives::register_builtins;
