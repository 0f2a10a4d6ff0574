//! ActivityIndicator and SafeAreaView.

use serde_json::{Value, json};

use super::binding::{apply_color, apply_text, bind_forwarding, number_or_zero, passthrough, unbind};
use crate::engine::{Component, EventCallback};
use crate::layout::apply_properties;
use crate::native::{HeadlessView, NativeView};
use crate::types::Props;

// =============================================================================
// ActivityIndicator
// =============================================================================

/// Spinner. Hidden while stopped unless `hidesWhenStopped` is false.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityIndicator;

fn flag(view: &dyn NativeView, key: &str) -> bool {
    view.attribute(key).and_then(Value::as_bool).unwrap_or(true)
}

impl Component for ActivityIndicator {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        let mut view = HeadlessView::new("ActivityIndicator");
        view.set_attribute("animating", Value::Bool(true));
        view.set_attribute("hidesWhenStopped", Value::Bool(true));
        view.set_attribute("size", json!("small"));
        Box::new(view)
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        for key in ["animating", "hidesWhenStopped"] {
            if let Some(on) = props.get(key).and_then(Value::as_bool) {
                view.set_attribute(key, Value::Bool(on));
            }
        }
        // `type` is the older name for `size`.
        apply_text(view, props, "type", "size");
        apply_text(view, props, "size", "size");
        apply_color(view, props, "color", "color");

        let hidden = !flag(view, "animating") && flag(view, "hidesWhenStopped");
        view.set_attribute("hidden", Value::Bool(hidden));
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, passthrough);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}

// =============================================================================
// SafeAreaView
// =============================================================================

/// Container padded by the host's safe-area insets on the listed `edges`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeAreaView;

const ALL_EDGES: [&str; 4] = ["top", "left", "right", "bottom"];

fn insets_params(event: &str, raw: &Props) -> Props {
    match event {
        "insetsChange" => {
            let source = match raw.get("insets") {
                Some(Value::Object(insets)) => insets,
                _ => raw,
            };
            let insets: Props = ALL_EDGES
                .iter()
                .map(|edge| (edge.to_string(), number_or_zero(source, edge)))
                .collect();
            let mut params = Props::new();
            params.insert("insets".into(), Value::Object(insets));
            params
        }
        _ => passthrough(event, raw),
    }
}

impl Component for SafeAreaView {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        let mut view = HeadlessView::new("SafeAreaView");
        view.set_attribute("edges", json!(ALL_EDGES));
        Box::new(view)
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        if let Some(Value::Array(edges)) = props.get("edges") {
            let edges: Vec<&str> = edges
                .iter()
                .filter_map(Value::as_str)
                .filter(|edge| ALL_EDGES.contains(edge))
                .collect();
            view.set_attribute("edges", json!(edges));
        }
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, insets_params);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}
