//! Native view boundary.
//!
//! The coordination layer never looks inside a platform view. Everything it
//! needs goes through [`NativeView`]: geometry, the native subview list, the
//! flexbox style handed to taffy, appearance, thin leaf attributes and event
//! handlers.
//!
//! Subviews are referenced by [`ViewId`], never by object reference, so the
//! native tree is an arena keyed by identifier and has no back-reference
//! cycles. The registry resolves ids to views when it needs to touch them.
//!
//! [`HeadlessView`] is the in-memory implementation used by the built-in
//! components and by hosts that render on their own.

mod headless;

use std::rc::Rc;

use serde_json::Value;

use crate::types::{Frame, Props, Rgba, ViewId};

pub use headless::HeadlessView;

/// Handler installed on a native control for one event name.
///
/// Receives the raw parameters the control reports.
pub type NativeHandler = Rc<dyn Fn(&Props)>;

/// Visual attributes set by the property mapper that are not layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub background_color: Option<Rgba>,
    pub border_color: Option<Rgba>,
    /// Border width in points.
    pub border_width: f32,
    /// Corner radius in points.
    pub border_radius: f32,
    /// 0.0 = invisible, 1.0 = opaque.
    pub opacity: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background_color: None,
            border_color: None,
            border_width: 0.0,
            border_radius: 0.0,
            opacity: 1.0,
        }
    }
}

/// Capability interface of a platform-owned view.
pub trait NativeView {
    /// Native class name, for diagnostics.
    fn type_name(&self) -> &str;

    /// Current geometry, if any has been assigned.
    fn frame(&self) -> Option<Frame>;
    fn set_frame(&mut self, frame: Frame);

    /// Identifier of the view this one is natively attached to.
    fn superview(&self) -> Option<&str>;
    fn set_superview(&mut self, parent: Option<ViewId>);

    /// Native children in z-order (last is frontmost).
    fn subviews(&self) -> &[ViewId];

    /// Append a subview. An id that is already present moves to the end.
    fn add_subview(&mut self, child: ViewId);

    /// Remove a subview; returns whether it was present.
    fn remove_subview(&mut self, child: &str) -> bool;

    /// Flexbox style consumed by the layout pass.
    fn style(&self) -> &taffy::Style;
    fn style_mut(&mut self) -> &mut taffy::Style;

    fn appearance(&self) -> &Appearance;
    fn appearance_mut(&mut self) -> &mut Appearance;

    /// Leaf attribute (text content, title, switch value...).
    fn attribute(&self, key: &str) -> Option<&Value>;
    fn set_attribute(&mut self, key: &str, value: Value);

    /// Install (`Some`) or remove (`None`) the handler for an event name.
    fn set_event_handler(&mut self, event: &str, handler: Option<NativeHandler>);
    fn has_event_handler(&self, event: &str) -> bool;

    /// Trigger an event as the native control would. Returns `false` when no
    /// handler is installed for `event`.
    fn fire(&self, event: &str, params: &Props) -> bool;

    /// Mark the view as needing a native layout pass.
    fn set_needs_layout(&mut self);
}
