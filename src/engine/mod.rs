//! Engine - Component registry, view factory and view registry.
//!
//! The engine holds the state the coordinator drives:
//! - ComponentRegistry: type tag → component (construct / update / bind events)
//! - ViewFactory: type tag + props → initialised native view
//! - ViewRegistry: identifier → record, plus ordered parent/child adjacency
//!
//! # Architecture
//!
//! Views are NOT linked objects. The tree is an arena of records keyed by
//! identifier; a record lists its children by id and names its parent by id:
//!
//! ```text
//! "root"   View    (parent=None,   children=["view_0"])
//! "view_0" View    (parent="root", children=["btn1", "label"])
//! "btn1"   Button  (parent="view_0")
//! "label"  Text    (parent="view_0")
//! ```
//!
//! So there are no reference cycles, and cascading delete is a walk over ids.

mod component_registry;
mod factory;
mod view_record;
mod view_registry;

pub use component_registry::{Component, ComponentRegistry, EventCallback};
pub use factory::{CreatedView, ViewFactory};
pub use view_record::{ViewFlags, ViewRecord};
pub use view_registry::{AttachOutcome, ChildrenChange, ViewRegistry};
