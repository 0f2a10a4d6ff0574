//! Component Registry - Type tag to component mapping.
//!
//! A component knows how to construct one kind of native view, apply a
//! property bag to it, and wire its native events to the outbound channel.
//! Registration is open: hosts add or replace types at any time, and the
//! last registration for a tag wins.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::native::NativeView;
use crate::types::Props;

/// Outbound event callback: `(view_id, event_name, params)`.
pub type EventCallback = Rc<dyn Fn(&str, &str, Props)>;

/// Capability interface of one view type.
pub trait Component {
    /// Build the native view. May leave it partially configured; `update`
    /// always runs right after with the same props.
    fn construct(&self, props: &Props) -> Box<dyn NativeView>;

    /// Apply a property bag to an existing view.
    fn update(&self, view: &mut dyn NativeView, props: &Props);

    /// Install native handlers for `events` that forward to `emit`.
    fn bind_events(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        events: &[String],
        emit: &EventCallback,
    );

    /// Remove native handlers for `events`.
    fn unbind_events(&self, view: &mut dyn NativeView, events: &[String]) {
        let _ = (view, events);
    }
}

/// Name → component mapping.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Rc<dyn Component>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `component` under `type_tag`, replacing any previous entry.
    pub fn register(&mut self, type_tag: impl Into<String>, component: Rc<dyn Component>) {
        let type_tag = type_tag.into();
        if self.components.insert(type_tag.clone(), component).is_some() {
            debug!(type_tag = %type_tag, "component re-registered, last registration wins");
        }
    }

    /// Look up the component for a type tag.
    pub fn resolve(&self, type_tag: &str) -> Option<Rc<dyn Component>> {
        self.components.get(type_tag).cloned()
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.components.contains_key(type_tag)
    }

    /// Registered tags, sorted.
    pub fn registered_types(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.components.keys().cloned().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::HeadlessView;

    struct Tagged(&'static str);

    impl Component for Tagged {
        fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
            Box::new(HeadlessView::new(self.0))
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

    #[test]
    fn test_resolve_unknown() {
        let registry = ComponentRegistry::new();
        assert!(registry.resolve("View").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ComponentRegistry::new();
        registry.register("Card", Rc::new(Tagged("First")));
        registry.register("Card", Rc::new(Tagged("Second")));

        assert_eq!(registry.len(), 1);
        let component = registry.resolve("Card").unwrap();
        let view = component.construct(&Props::new());
        assert_eq!(view.type_name(), "Second");
    }

    #[test]
    fn test_registered_types_sorted() {
        let mut registry = ComponentRegistry::new();
        registry.register("Text", Rc::new(Tagged("Text")));
        registry.register("Button", Rc::new(Tagged("Button")));
        assert_eq!(registry.registered_types(), vec!["Button", "Text"]);
        assert!(registry.contains("Text"));
    }
}
