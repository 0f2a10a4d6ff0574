//! Interactive controls: Button, Switch, CheckBox.
//!
//! Each control reports a fixed event vocabulary with a small param bag:
//!
//! | Control  | Event    | Params      |
//! |----------|----------|-------------|
//! | Button   | `press`  | `{}`        |
//! | Switch   | `change` | `{value}`   |
//! | CheckBox | `change` | `{checked}` |
//!
//! Other event names are forwarded with the native params unchanged.

use serde_json::{Value, json};

use super::binding::{apply_bool, apply_color, apply_text, bind_forwarding, bool_or, passthrough, unbind};
use crate::engine::{Component, EventCallback};
use crate::layout::apply_properties;
use crate::native::{HeadlessView, NativeView};
use crate::types::Props;

// =============================================================================
// Button
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Button;

fn button_params(event: &str, raw: &Props) -> Props {
    match event {
        "press" => Props::new(),
        _ => passthrough(event, raw),
    }
}

impl Component for Button {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        Box::new(HeadlessView::new("Button"))
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        apply_text(view, props, "title", "title");
        apply_color(view, props, "color", "color");
        apply_bool(view, props, "disabled", "disabled");
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, button_params);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}

// =============================================================================
// Switch
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Switch;

fn switch_params(event: &str, raw: &Props) -> Props {
    match event {
        "change" => {
            let mut params = Props::new();
            params.insert("value".into(), json!(bool_or(raw, "value", false)));
            params
        }
        _ => passthrough(event, raw),
    }
}

impl Component for Switch {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        let mut view = HeadlessView::new("Switch");
        view.set_attribute("value", Value::Bool(false));
        Box::new(view)
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        apply_bool(view, props, "value", "value");
        apply_bool(view, props, "disabled", "disabled");
        apply_color(view, props, "onTintColor", "onTintColor");
        apply_color(view, props, "thumbTintColor", "thumbTintColor");
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, switch_params);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}

// =============================================================================
// CheckBox
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckBox;

fn checkbox_params(event: &str, raw: &Props) -> Props {
    match event {
        "change" => {
            let checked = raw
                .get("checked")
                .or_else(|| raw.get("value"))
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let mut params = Props::new();
            params.insert("checked".into(), json!(checked));
            params
        }
        _ => passthrough(event, raw),
    }
}

impl Component for CheckBox {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        let mut view = HeadlessView::new("CheckBox");
        view.set_attribute("checked", Value::Bool(false));
        Box::new(view)
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        apply_bool(view, props, "value", "checked");
        apply_bool(view, props, "checked", "checked");
        apply_bool(view, props, "disabled", "disabled");
        apply_color(view, props, "tintColor", "tintColor");
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, checkbox_params);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (EventCallback, Rc<RefCell<Vec<(String, Props)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let emit: EventCallback = Rc::new(move |_: &str, name: &str, params: Props| {
            sink.borrow_mut().push((name.to_string(), params));
        });
        (emit, log)
    }

    #[test]
    fn test_button_press_params_empty() {
        let (emit, log) = recorder();
        let mut view = Button.construct(&Props::new());
        Button.bind_events(view.as_mut(), "btn1", &["press".to_string()], &emit);

        let raw = json!({"x": 10}).as_object().cloned().unwrap();
        assert!(view.fire("press", &raw));

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0], ("press".to_string(), Props::new()));
    }

    #[test]
    fn test_switch_change_value() {
        let (emit, log) = recorder();
        let mut view = Switch.construct(&Props::new());
        Switch.bind_events(view.as_mut(), "sw", &["change".to_string()], &emit);

        view.fire("change", &json!({"value": true}).as_object().cloned().unwrap());
        assert_eq!(log.borrow()[0].1["value"], json!(true));
    }

    #[test]
    fn test_checkbox_accepts_value_alias() {
        let mut view = CheckBox.construct(&Props::new());
        assert_eq!(view.attribute("checked"), Some(&json!(false)));

        CheckBox.update(view.as_mut(), &json!({"value": true}).as_object().cloned().unwrap());
        assert_eq!(view.attribute("checked"), Some(&json!(true)));

        let params = checkbox_params("change", &json!({"value": true}).as_object().cloned().unwrap());
        assert_eq!(params["checked"], json!(true));
    }

    #[test]
    fn test_unknown_event_passthrough() {
        let (emit, log) = recorder();
        let mut view = Button.construct(&Props::new());
        Button.bind_events(view.as_mut(), "btn1", &["longPress".to_string()], &emit);

        let raw = json!({"duration": 600}).as_object().cloned().unwrap();
        view.fire("longPress", &raw);
        assert_eq!(log.borrow()[0].1, raw);
    }
}
