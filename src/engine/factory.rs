//! View Factory - Construct one native view from a type tag.

use std::rc::Rc;

use tracing::debug;

use super::component_registry::{Component, ComponentRegistry};
use crate::error::FactoryError;
use crate::native::NativeView;
use crate::types::{Frame, Props};

/// A freshly constructed, initialised view and the component that made it.
pub struct CreatedView {
    pub view: Box<dyn NativeView>,
    pub component: Rc<dyn Component>,
}

/// Builds native views through the component registry.
#[derive(Debug, Clone, Copy)]
pub struct ViewFactory {
    placeholder: Frame,
}

impl ViewFactory {
    /// `placeholder` is assigned to views that come out without geometry.
    pub fn new(placeholder: Frame) -> Self {
        Self { placeholder }
    }

    /// Resolve `view_type`, construct, then run the updater with the same props.
    pub fn create(
        &self,
        components: &ComponentRegistry,
        view_type: &str,
        props: &Props,
    ) -> Result<CreatedView, FactoryError> {
        let component = components
            .resolve(view_type)
            .ok_or_else(|| FactoryError::UnknownType(view_type.to_string()))?;

        let mut view = component.construct(props);
        component.update(view.as_mut(), props);

        if view.frame().is_none_or(|frame| frame.is_empty()) {
            debug!(view_type, "assigning placeholder frame");
            view.set_frame(self.placeholder);
        }

        Ok(CreatedView { view, component })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EventCallback;
    use crate::native::HeadlessView;
    use serde_json::json;

    /// Constructor leaves the title unset; the updater fills it in.
    struct TwoPhase;

    impl Component for TwoPhase {
        fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
            Box::new(HeadlessView::new("TwoPhase"))
        }

        fn update(&self, view: &mut dyn NativeView, props: &Props) {
            if let Some(title) = props.get("title") {
                view.set_attribute("title", title.clone());
            }
        }

        fn bind_events(
            &self,
            _view: &mut dyn NativeView,
            _view_id: &str,
            _events: &[String],
            _emit: &EventCallback,
        ) {
        }
    }

    struct Sized;

    impl Component for Sized {
        fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
            Box::new(HeadlessView::with_frame("Sized", Frame::new(1.0, 2.0, 30.0, 40.0)))
        }

        fn update(&self, _view: &mut dyn NativeView, _props: &Props) {}

        fn bind_events(
            &self,
            _view: &mut dyn NativeView,
            _view_id: &str,
            _events: &[String],
            _emit: &EventCallback,
        ) {
        }
    }

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register("TwoPhase", Rc::new(TwoPhase));
        registry.register("Sized", Rc::new(Sized));
        registry
    }

    #[test]
    fn test_unknown_type() {
        let factory = ViewFactory::new(Frame::new(0.0, 0.0, 100.0, 100.0));
        let err = factory.create(&registry(), "Blob", &Props::new()).err();
        assert_eq!(err, Some(FactoryError::UnknownType("Blob".into())));
    }

    #[test]
    fn test_update_runs_after_construct() {
        let factory = ViewFactory::new(Frame::new(0.0, 0.0, 100.0, 100.0));
        let props = json!({"title": "OK"}).as_object().cloned().unwrap();
        let created = factory.create(&registry(), "TwoPhase", &props).unwrap();

        assert_eq!(created.view.attribute("title"), Some(&json!("OK")));
        assert_eq!(created.view.frame(), Some(Frame::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn test_existing_frame_kept() {
        let factory = ViewFactory::new(Frame::new(0.0, 0.0, 100.0, 100.0));
        let created = factory.create(&registry(), "Sized", &Props::new()).unwrap();
        assert_eq!(created.view.frame(), Some(Frame::new(1.0, 2.0, 30.0, 40.0)));
    }
}
