//! Container primitives: View, ScrollView, ListView.
//!
//! Plain containers carry only layout and appearance. Scrolling containers
//! clip their content, can lay children out horizontally, and report
//! `scroll` / `scrollEnd` with the content offset.

use serde_json::Value;
use taffy::{FlexDirection, Overflow, Point};

use super::binding::{ParamShaper, bind_forwarding, content_offset, passthrough, unbind};
use crate::engine::{Component, EventCallback};
use crate::layout::apply_properties;
use crate::native::{HeadlessView, NativeView};
use crate::types::Props;

/// Flavour of container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Plain,
    Scroll,
    List,
}

/// Generic container component.
#[derive(Debug, Clone, Copy)]
pub struct Container {
    kind: ContainerKind,
}

impl Container {
    pub const fn new(kind: ContainerKind) -> Self {
        Self { kind }
    }

    fn type_name(&self) -> &'static str {
        match self.kind {
            ContainerKind::Plain => "View",
            ContainerKind::Scroll => "ScrollView",
            ContainerKind::List => "ListView",
        }
    }

    fn scrolls(&self) -> bool {
        self.kind != ContainerKind::Plain
    }
}

fn scroll_params(event: &str, raw: &Props) -> Props {
    match event {
        "scroll" | "scrollEnd" => content_offset(raw),
        _ => passthrough(event, raw),
    }
}

impl Component for Container {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        let mut view = HeadlessView::new(self.type_name());
        if self.scrolls() {
            view.style_mut().overflow = Point {
                x: Overflow::Scroll,
                y: Overflow::Scroll,
            };
        }
        Box::new(view)
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);

        if !self.scrolls() {
            return;
        }
        if let Some(horizontal) = props.get("horizontal").and_then(Value::as_bool) {
            view.style_mut().flex_direction = if horizontal {
                FlexDirection::Row
            } else {
                FlexDirection::Column
            };
            view.set_attribute("horizontal", Value::Bool(horizontal));
        }
        for key in ["showsVerticalScrollIndicator", "showsHorizontalScrollIndicator"] {
            if let Some(shows) = props.get(key).and_then(Value::as_bool) {
                view.set_attribute(key, Value::Bool(shows));
            }
        }
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        let shape: ParamShaper = if self.scrolls() { scroll_params } else { passthrough };
        bind_forwarding(view, view_id, events, emit, shape);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}
