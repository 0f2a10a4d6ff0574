//! HeadlessView - In-memory native view.
//!
//! Holds exactly the state a platform view would expose to the coordinator,
//! without drawing anything. Used by the built-in components.

use std::collections::HashMap;

use serde_json::Value;

use super::{Appearance, NativeHandler, NativeView};
use crate::types::{Frame, Props, ViewId};

/// Flexbox defaults of the native layout engine: column direction, no shrink.
fn default_style() -> taffy::Style {
    taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        flex_shrink: 0.0,
        ..Default::default()
    }
}

/// A native view with no platform backing.
pub struct HeadlessView {
    type_name: String,
    frame: Option<Frame>,
    superview: Option<ViewId>,
    subviews: Vec<ViewId>,
    style: taffy::Style,
    appearance: Appearance,
    attributes: Props,
    handlers: HashMap<String, NativeHandler>,
    layout_requests: u32,
}

impl HeadlessView {
    /// Create a view with no geometry.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            frame: None,
            superview: None,
            subviews: Vec::new(),
            style: default_style(),
            appearance: Appearance::default(),
            attributes: Props::new(),
            handlers: HashMap::new(),
            layout_requests: 0,
        }
    }

    /// Create a view with an initial frame.
    pub fn with_frame(type_name: impl Into<String>, frame: Frame) -> Self {
        let mut view = Self::new(type_name);
        view.frame = Some(frame);
        view
    }

    /// Number of times a native layout pass was requested.
    pub fn layout_requests(&self) -> u32 {
        self.layout_requests
    }

    /// Names of the events that currently have a handler.
    pub fn bound_events(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl NativeView for HeadlessView {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn frame(&self) -> Option<Frame> {
        self.frame
    }

    fn set_frame(&mut self, frame: Frame) {
        self.frame = Some(frame);
    }

    fn superview(&self) -> Option<&str> {
        self.superview.as_deref()
    }

    fn set_superview(&mut self, parent: Option<ViewId>) {
        self.superview = parent;
    }

    fn subviews(&self) -> &[ViewId] {
        &self.subviews
    }

    fn add_subview(&mut self, child: ViewId) {
        self.subviews.retain(|id| *id != child);
        self.subviews.push(child);
    }

    fn remove_subview(&mut self, child: &str) -> bool {
        let before = self.subviews.len();
        self.subviews.retain(|id| id != child);
        self.subviews.len() != before
    }

    fn style(&self) -> &taffy::Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut taffy::Style {
        &mut self.style
    }

    fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn set_attribute(&mut self, key: &str, value: Value) {
        self.attributes.insert(key.to_string(), value);
    }

    fn set_event_handler(&mut self, event: &str, handler: Option<NativeHandler>) {
        match handler {
            Some(handler) => {
                self.handlers.insert(event.to_string(), handler);
            }
            None => {
                self.handlers.remove(event);
            }
        }
    }

    fn has_event_handler(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    fn fire(&self, event: &str, params: &Props) -> bool {
        // Clone the Rc so the handler runs without borrowing the map.
        let Some(handler) = self.handlers.get(event).cloned() else {
            return false;
        };
        handler(params);
        true
    }

    fn set_needs_layout(&mut self) {
        self.layout_requests += 1;
    }
}
