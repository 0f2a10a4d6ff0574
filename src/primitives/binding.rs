//! Shared helpers for the built-in components.
//!
//! Event forwarding: a native handler per event name that shapes the raw
//! native parameters into the outbound bag and hands it to the emitter.
//!
//! Leaf attributes: thin copies of a prop into a native attribute.

use std::rc::Rc;

use serde_json::{Value, json};
use tracing::debug;

use crate::engine::EventCallback;
use crate::native::{NativeHandler, NativeView};
use crate::types::{Props, Rgba};

/// Turns what the native control reported for `event` into outbound params.
pub type ParamShaper = fn(event: &str, raw: &Props) -> Props;

/// Pass native params through unchanged.
pub fn passthrough(_event: &str, raw: &Props) -> Props {
    raw.clone()
}

/// Install one forwarding handler per event name.
pub fn bind_forwarding(
    view: &mut dyn NativeView,
    view_id: &str,
    events: &[String],
    emit: &EventCallback,
    shape: ParamShaper,
) {
    for event in events {
        let id = view_id.to_string();
        let name = event.clone();
        let emit = Rc::clone(emit);
        let handler: NativeHandler = Rc::new(move |raw: &Props| {
            emit(&id, &name, shape(&name, raw));
        });
        view.set_event_handler(event, Some(handler));
        debug!(view_id, event = %event, "event bound");
    }
}

/// Remove the handlers for `events`.
pub fn unbind(view: &mut dyn NativeView, events: &[String]) {
    for event in events {
        view.set_event_handler(event, None);
    }
}

// =============================================================================
// Param shaping helpers
// =============================================================================

pub fn number_or_zero(raw: &Props, key: &str) -> Value {
    json!(raw.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}

pub fn bool_or(raw: &Props, key: &str, fallback: bool) -> bool {
    raw.get(key).and_then(Value::as_bool).unwrap_or(fallback)
}

/// `{contentOffset: {x, y}}` from either a nested offset or flat `x`/`y`.
pub fn content_offset(raw: &Props) -> Props {
    let source = match raw.get("contentOffset") {
        Some(Value::Object(offset)) => offset,
        _ => raw,
    };
    let mut params = Props::new();
    params.insert(
        "contentOffset".into(),
        json!({ "x": number_or_zero(source, "x"), "y": number_or_zero(source, "y") }),
    );
    params
}

// =============================================================================
// Leaf attribute helpers
// =============================================================================

/// Copy a string prop (numbers are stringified) into an attribute.
pub fn apply_text(view: &mut dyn NativeView, props: &Props, key: &str, attribute: &str) {
    match props.get(key) {
        Some(Value::String(s)) => view.set_attribute(attribute, Value::String(s.clone())),
        Some(Value::Number(n)) => view.set_attribute(attribute, Value::String(n.to_string())),
        Some(Value::Null) | None => {}
        Some(_) => debug!(property = key, "skipping non-text value"),
    }
}

pub fn apply_bool(view: &mut dyn NativeView, props: &Props, key: &str, attribute: &str) {
    match props.get(key) {
        Some(Value::Bool(b)) => view.set_attribute(attribute, Value::Bool(*b)),
        None => {}
        Some(_) => debug!(property = key, "skipping non-boolean value"),
    }
}

pub fn apply_number(view: &mut dyn NativeView, props: &Props, key: &str, attribute: &str) {
    match props.get(key) {
        Some(value @ Value::Number(_)) => view.set_attribute(attribute, value.clone()),
        None => {}
        Some(_) => debug!(property = key, "skipping non-numeric value"),
    }
}

/// Colours are validated and stored normalised as `#AARRGGBB`.
pub fn apply_color(view: &mut dyn NativeView, props: &Props, key: &str, attribute: &str) {
    let Some(value) = props.get(key) else { return };
    match value.as_str().and_then(Rgba::parse) {
        Some(c) => view.set_attribute(
            attribute,
            Value::String(format!("#{:02x}{:02x}{:02x}{:02x}", c.a, c.r, c.g, c.b)),
        ),
        None => debug!(property = key, "skipping unparseable color"),
    }
}
