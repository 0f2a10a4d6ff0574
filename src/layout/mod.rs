//! Layout Module - Property mapping and flexbox layout using Taffy.
//!
//! # Architecture
//!
//! The coordination layer never positions pixels itself. It:
//!
//! 1. Maps property bags → Taffy styles and appearance ([`apply_properties`])
//! 2. Builds a Taffy tree from the registry under the root container
//! 3. Writes computed boxes back to the native views as frames
//!
//! # Example
//!
//! ```
//! use dcmaui_native::layout::apply_properties;
//! use dcmaui_native::native::{HeadlessView, NativeView};
//! use serde_json::json;
//!
//! let mut view = HeadlessView::new("View");
//! let props = json!({ "width": { "value": 50, "unit": "percent" } });
//! apply_properties(&mut view, props.as_object().unwrap());
//! assert_eq!(view.style().size.width, taffy::Dimension::Percent(0.5));
//! ```

mod props;
mod taffy_bridge;

pub use props::{apply_properties, parse_dimension};
pub use taffy_bridge::compute_layout;
