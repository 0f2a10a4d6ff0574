//! ViewRecord - One live view in the registry.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use super::component_registry::Component;
use crate::native::NativeView;
use crate::types::{Props, ViewId};

bitflags! {
    /// Per-record bookkeeping flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ViewFlags: u8 {
        /// The bootstrap container attached to the host's root surface.
        const ROOT_CONTAINER = 1 << 0;
        /// Sized to fill its parent (the first view).
        const FULL_BLEED     = 1 << 1;
        /// Properties changed since the last layout pass.
        const LAYOUT_DIRTY   = 1 << 2;
    }
}

/// A registered view: its native handle plus the tree bookkeeping around it.
///
/// `children` is ordered (z-order and layout order); `parent` is a
/// back-reference by identifier only.
pub struct ViewRecord {
    pub id: ViewId,
    pub view_type: String,
    pub view: Box<dyn NativeView>,
    /// Component the view was created with; later re-registrations of the
    /// type tag do not affect existing views.
    pub component: Rc<dyn Component>,
    pub children: Vec<ViewId>,
    pub parent: Option<ViewId>,
    /// Last-applied property bag (reserved keys stripped).
    pub props: Props,
    /// Event names currently bound on the native view.
    pub events: BTreeSet<String>,
    pub flags: ViewFlags,
}

impl ViewRecord {
    pub fn new(
        id: impl Into<ViewId>,
        view_type: impl Into<String>,
        view: Box<dyn NativeView>,
        component: Rc<dyn Component>,
        props: Props,
    ) -> Self {
        Self {
            id: id.into(),
            view_type: view_type.into(),
            view,
            component,
            children: Vec::new(),
            parent: None,
            props,
            events: BTreeSet::new(),
            flags: ViewFlags::empty(),
        }
    }

    pub fn is_root_container(&self) -> bool {
        self.flags.contains(ViewFlags::ROOT_CONTAINER)
    }
}

impl fmt::Debug for ViewRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRecord")
            .field("id", &self.id)
            .field("view_type", &self.view_type)
            .field("children", &self.children)
            .field("parent", &self.parent)
            .field("events", &self.events)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
