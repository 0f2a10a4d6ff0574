//! Modal and AnimatedView.
//!
//! A modal is a container presented above the tree while `visible` is true.
//! It reports `show` when presented and `dismiss` when hidden; both carry an
//! empty param bag.
//!
//! An animated view applies the final values of its `animation` map
//! (`opacity`, `translateX`, `translateY`, `scale`) and reports
//! `animationEnd` with the animation's `id` when there is one.

use serde_json::{Value, json};
use taffy::Display;

use super::binding::{apply_text, bind_forwarding, passthrough, unbind};
use crate::engine::{Component, EventCallback};
use crate::layout::apply_properties;
use crate::native::{HeadlessView, NativeView};
use crate::types::Props;

// =============================================================================
// Modal
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Modal;

fn modal_params(event: &str, raw: &Props) -> Props {
    match event {
        "show" | "dismiss" | "requestClose" => Props::new(),
        _ => passthrough(event, raw),
    }
}

impl Component for Modal {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        let mut view = HeadlessView::new("Modal");
        view.set_attribute("visible", Value::Bool(false));
        view.style_mut().display = Display::None;
        Box::new(view)
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);
        if let Some(visible) = props.get("visible").and_then(Value::as_bool) {
            view.set_attribute("visible", Value::Bool(visible));
        }
        // Presentation follows `visible`, whatever `display` the bag carried.
        let visible = view.attribute("visible").and_then(Value::as_bool).unwrap_or(false);
        if !visible {
            view.style_mut().display = Display::None;
        } else if view.style().display == Display::None {
            view.style_mut().display = Display::Flex;
        }
        apply_text(view, props, "animationType", "animationType");
        if let Some(transparent) = props.get("transparent").and_then(Value::as_bool) {
            view.set_attribute("transparent", Value::Bool(transparent));
        }
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, modal_params);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}

// =============================================================================
// AnimatedView
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct AnimatedView;

fn animation_params(event: &str, raw: &Props) -> Props {
    match event {
        "animationEnd" => {
            let mut params = Props::new();
            if let Some(id) = raw.get("animationId").or_else(|| raw.get("id")) {
                params.insert("animationId".into(), id.clone());
            }
            params.insert("finished".into(), json!(raw.get("finished").and_then(Value::as_bool).unwrap_or(true)));
            params
        }
        _ => passthrough(event, raw),
    }
}

impl Component for AnimatedView {
    fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
        Box::new(HeadlessView::new("AnimatedView"))
    }

    fn update(&self, view: &mut dyn NativeView, props: &Props) {
        apply_properties(view, props);

        let Some(Value::Object(animation)) = props.get("animation") else { return };
        if let Some(opacity) = animation.get("opacity").and_then(Value::as_f64) {
            view.appearance_mut().opacity = (opacity as f32).clamp(0.0, 1.0);
        }
        for key in ["translateX", "translateY", "scale", "duration"] {
            if let Some(value) = animation.get(key).filter(|v| v.is_number()) {
                view.set_attribute(key, value.clone());
            }
        }
        view.set_attribute("animation", Value::Object(animation.clone()));
    }

    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    ) {
        bind_forwarding(view, view_id, events, emit, animation_params);
    }

    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        unbind(view, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_visibility_drives_display() {
        let mut view = Modal.construct(&Props::new());
        assert_eq!(view.style().display, Display::None);

        Modal.update(view.as_mut(), &json!({"visible": true}).as_object().cloned().unwrap());
        assert_eq!(view.style().display, Display::Flex);
        assert_eq!(view.attribute("visible"), Some(&json!(true)));
    }

    #[test]
    fn test_hidden_modal_ignores_display() {
        let mut view = Modal.construct(&Props::new());
        Modal.update(view.as_mut(), &json!({"display": "flex"}).as_object().cloned().unwrap());
        assert_eq!(view.style().display, Display::None);

        Modal.update(view.as_mut(), &json!({"visible": true}).as_object().cloned().unwrap());
        Modal.update(view.as_mut(), &json!({"width": 200}).as_object().cloned().unwrap());
        assert_eq!(view.style().display, Display::Flex);
    }

    #[test]
    fn test_animation_final_values() {
        let mut view = AnimatedView.construct(&Props::new());
        let props = json!({"animation": {"opacity": 1.5, "translateX": 20, "duration": 300}});
        AnimatedView.update(view.as_mut(), props.as_object().unwrap());

        assert_eq!(view.appearance().opacity, 1.0);
        assert_eq!(view.attribute("translateX"), Some(&json!(20)));
    }

    #[test]
    fn test_animation_end_params() {
        let raw = json!({"id": "fade"}).as_object().cloned().unwrap();
        let params = animation_params("animationEnd", &raw);
        assert_eq!(params["animationId"], json!("fade"));
        assert_eq!(params["finished"], json!(true));
    }
}
