//! Text entry and touchables.
//!
//! | Component | Events                                    | Params                                   |
//! |-----------|-------------------------------------------|------------------------------------------|
//! | TextInput | `changeText`, `submitEditing`             | `{text}`                                 |
//! | TextInput | `focus`, `blur`                           | `{}`                                     |
//! | Touchable | `press`, `longPress`, `pressIn`, `pressOut` | `{locationX, locationY, pageX, pageY}` |

use serde_json::{Value, json};

use super::binding::{
    apply_bool, apply_color, apply_number, apply_text, bind_forwarding, number_or_zero,
    passthrough, unbind,
};
use crate::engine::{Component, EventCallback};
use crate::layout::apply_properties;
use crate::native::{HeadlessView, NativeView};
use crate::types::Props;

// =============================================================================
// TextInput
// =============================================================================

/// Single-line text field. `value` is the current text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInput;

fn text_input_params(event: &str, raw: &Props) -> Props {
    match event {
        "changeText" | "submitEditing" => {
            let text = raw
                .get("text")
                .or_else(|| raw.get("value"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let mut params = Props::new();
            params.insert("text".into(), json!(text));
            params
        }
        "focus" | "blur" => Props::new(),
        _ => passthrough(event, raw),
    }
}

impl Component for TextInput {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        let mut view = HeadlessView::new("TextInput");
        view.set_attribute("value", Value::String(String::new()));
        view.set_attribute("editable", Value::Bool(true));
        Box::new(view)
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        apply_text(view, props, "value", "value");
        apply_text(view, props, "placeholder", "placeholder");
        apply_color(view, props, "placeholderTextColor", "placeholderTextColor");
        apply_color(view, props, "color", "color");
        apply_number(view, props, "fontSize", "fontSize");
        apply_text(view, props, "textAlign", "textAlign");
        apply_bool(view, props, "editable", "editable");
        apply_bool(view, props, "secureTextEntry", "secureTextEntry");
        apply_bool(view, props, "autoFocus", "autoFocus");
        apply_text(view, props, "keyboardType", "keyboardType");
        apply_text(view, props, "returnKeyType", "returnKeyType");
        apply_text(view, props, "clearButtonMode", "clearButtonMode");
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, text_input_params);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}

// =============================================================================
// Touchable
// =============================================================================

/// Pressable container (TouchableOpacity / TouchableHighlight).
#[derive(Debug, Clone, Copy, Default)]
pub struct Touchable;

fn touch_params(event: &str, raw: &Props) -> Props {
    match event {
        "press" | "longPress" | "pressIn" | "pressOut" => {
            let mut params = Props::new();
            for key in ["locationX", "locationY", "pageX", "pageY"] {
                params.insert(key.into(), number_or_zero(raw, key));
            }
            params
        }
        _ => passthrough(event, raw),
    }
}

impl Component for Touchable {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        let mut view = HeadlessView::new("Touchable");
        view.set_attribute("activeOpacity", json!(0.2));
        Box::new(view)
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        apply_number(view, props, "activeOpacity", "activeOpacity");
        apply_bool(view, props, "disabled", "disabled");
        apply_number(view, props, "delayLongPress", "delayLongPress");
        apply_number(view, props, "delayPressIn", "delayPressIn");
        apply_number(view, props, "delayPressOut", "delayPressOut");
        apply_color(view, props, "underlayColor", "underlayColor");
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, touch_params);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(value: Value) -> Props {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_text_input_attributes() {
        let mut view = TextInput.construct(&Props::new());
        assert_eq!(view.attribute("editable"), Some(&json!(true)));

        TextInput.update(
            view.as_mut(),
            &props(json!({"value": "hi", "placeholder": "Name", "editable": false})),
        );
        assert_eq!(view.attribute("value"), Some(&json!("hi")));
        assert_eq!(view.attribute("placeholder"), Some(&json!("Name")));
        assert_eq!(view.attribute("editable"), Some(&json!(false)));
    }

    #[test]
    fn test_text_input_params() {
        let change = text_input_params("changeText", &props(json!({"value": "abc"})));
        assert_eq!(change, props(json!({"text": "abc"})));
        assert!(text_input_params("focus", &props(json!({"x": 1}))).is_empty());
    }

    #[test]
    fn test_touch_params_default_to_zero() {
        let params = touch_params("pressIn", &props(json!({"locationX": 12.5})));
        assert_eq!(params["locationX"], json!(12.5));
        assert_eq!(params["pageY"], json!(0.0));
    }
}
