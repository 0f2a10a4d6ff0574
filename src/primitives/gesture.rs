//! GestureDetector - Container that reports touch gestures.
//!
//! Recognised events: `tap`, `doubleTap`, `longPress` (with `{x, y}`) and
//! `pan`, `panStart`, `panUpdate`, `panEnd` (with translation and velocity).

use serde_json::Value;

use super::binding::{bind_forwarding, number_or_zero, passthrough, unbind};
use crate::engine::{Component, EventCallback};
use crate::layout::apply_properties;
use crate::native::{HeadlessView, NativeView};
use crate::types::Props;

#[derive(Debug, Clone, Copy, Default)]
pub struct GestureDetector;

fn pick(raw: &Props, keys: &[&str]) -> Props {
    keys.iter()
        .map(|key| (key.to_string(), number_or_zero(raw, key)))
        .collect()
}

fn gesture_params(event: &str, raw: &Props) -> Props {
    match event {
        "tap" | "doubleTap" | "longPress" => pick(raw, &["x", "y"]),
        "pan" | "panStart" | "panUpdate" | "panEnd" => pick(
            raw,
            &["translationX", "translationY", "velocityX", "velocityY"],
        ),
        _ => passthrough(event, raw),
    }
}

impl Component for GestureDetector {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        Box::new(HeadlessView::new("GestureDetector"))
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        if let Some(delay) = props.get("longPressDelay").filter(|v| v.is_number()) {
            view.set_attribute("longPressDelay", delay.clone());
        }
        if let Some(enabled) = props.get("enabled").and_then(Value::as_bool) {
            view.set_attribute("enabled", Value::Bool(enabled));
        }
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, gesture_params);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tap_keeps_coordinates_only() {
        let raw = json!({"x": 12, "y": 7, "force": 0.4}).as_object().cloned().unwrap();
        let params = gesture_params("tap", &raw);
        assert_eq!(params.len(), 2);
        assert_eq!(params["x"], json!(12.0));
    }

    #[test]
    fn test_pan_defaults_missing_to_zero() {
        let raw = json!({"translationX": 5}).as_object().cloned().unwrap();
        let params = gesture_params("panUpdate", &raw);
        assert_eq!(params["translationX"], json!(5.0));
        assert_eq!(params["velocityY"], json!(0.0));
    }
}
