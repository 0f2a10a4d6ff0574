//! Leaf primitives: Text and Image.

use serde_json::Value;

use super::binding::{apply_color, apply_number, apply_text, bind_forwarding, passthrough, unbind};
use crate::engine::{Component, EventCallback};
use crate::layout::apply_properties;
use crate::native::{HeadlessView, NativeView};
use crate::types::Props;

/// Text label. `content` (or `text`) becomes the `content` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Component for Text {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        Box::new(HeadlessView::new("Text"))
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        apply_text(view, props, "text", "content");
        apply_text(view, props, "content", "content");
        apply_color(view, props, "color", "color");
        apply_number(view, props, "fontSize", "fontSize");
        apply_text(view, props, "fontWeight", "fontWeight");
        apply_text(view, props, "textAlign", "textAlign");
        apply_number(view, props, "numberOfLines", "numberOfLines");
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

/// Image view. `source` is a URI string or `{uri}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl Component for Image {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        Box::new(HeadlessView::new("Image"))
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);

        let source = match props.get("source") {
            Some(Value::String(uri)) => Some(uri.clone()),
            Some(Value::Object(map)) => map.get("uri").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };
        if let Some(uri) = source {
            view.set_attribute("source", Value::String(uri));
        }
        apply_text(view, props, "resizeMode", "resizeMode");
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_text_content_and_style() {
        let mut view = Text.construct(&Props::new());
        Text.update(
            view.as_mut(),
            &props(json!({"content": "Hello", "fontSize": 18, "color": "#000000", "width": 120})),
        );

        assert_eq!(view.attribute("content"), Some(&json!("Hello")));
        assert_eq!(view.attribute("fontSize"), Some(&json!(18)));
        assert_eq!(view.attribute("color"), Some(&json!("#ff000000")));
        assert_eq!(view.style().size.width, taffy::Dimension::Length(120.0));
    }

    #[test]
    fn test_text_content_is_incremental() {
        let mut view = Text.construct(&Props::new());
        Text.update(view.as_mut(), &props(json!({"text": "first"})));
        Text.update(view.as_mut(), &props(json!({"fontSize": 12})));
        assert_eq!(view.attribute("content"), Some(&json!("first")));
    }

    #[test]
    fn test_image_source_forms() {
        let mut view = Image.construct(&Props::new());
        Image.update(view.as_mut(), &props(json!({"source": {"uri": "https://x/y.png"}})));
        assert_eq!(view.attribute("source"), Some(&json!("https://x/y.png")));

        Image.update(view.as_mut(), &props(json!({"source": "asset://logo"})));
        assert_eq!(view.attribute("source"), Some(&json!("asset://logo")));
    }
}
