//! Outbound event channel.
//!
//! Native events leave the coordinator as [`OutboundEvent`]s on an
//! `std::sync::mpsc` channel, one per trigger, in trigger order. Nothing is
//! buffered beyond the channel itself; with no receiver the event is logged
//! and dropped.

use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::EventCallback;
use crate::types::Props;

/// `(viewId, eventName, params)` as sent to the remote side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    pub view_id: String,
    pub event_name: String,
    pub params: Props,
}

impl OutboundEvent {
    pub fn new(view_id: impl Into<String>, event_name: impl Into<String>, params: Props) -> Self {
        Self {
            view_id: view_id.into(),
            event_name: event_name.into(),
            params,
        }
    }
}

/// Sending half of the outbound stream.
#[derive(Debug, Clone)]
pub struct EventChannel {
    sender: Sender<OutboundEvent>,
}

impl EventChannel {
    /// Create a channel and its receiving end.
    pub fn new() -> (Self, Receiver<OutboundEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    pub fn from_sender(sender: Sender<OutboundEvent>) -> Self {
        Self { sender }
    }

    /// Emit one event. Returns `false` if nobody is listening.
    pub fn send(&self, view_id: &str, event_name: &str, params: Props) -> bool {
        debug!(view_id, event_name, "outbound event");
        match self.sender.send(OutboundEvent::new(view_id, event_name, params)) {
            Ok(()) => true,
            Err(_) => {
                warn!(view_id, event_name, "event dropped, no receiver");
                false
            }
        }
    }

    /// Callback handed to component event binders.
    pub fn emitter(&self) -> EventCallback {
        let channel = self.clone();
        Rc::new(move |view_id: &str, event_name: &str, params: Props| {
            channel.send(view_id, event_name, params);
        })
    }
}

/// `onPress` → `press`, `onValueChange` → `valueChange`.
///
/// Only strips `on` when it is followed by an uppercase letter, so `once`
/// and `on` stay as they are.
pub fn normalize_event_name(name: &str) -> String {
    let Some(rest) = name.strip_prefix("on") else {
        return name.to_string();
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut normalized = String::with_capacity(rest.len());
            normalized.push(first.to_ascii_lowercase());
            normalized.push_str(chars.as_str());
            normalized
        }
        _ => name.to_string(),
    }
}
