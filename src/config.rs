//! Bridge configuration.
//!
//! Every field has a default, so hosts only spell out what they change:
//!
//! ```
//! use dcmaui_native::config::BridgeConfig;
//!
//! let config = BridgeConfig::from_json(r#"{ "viewport": { "width": 320, "height": 480 } }"#).unwrap();
//! assert_eq!(config.viewport.width, 320.0);
//! assert_eq!(config.root_container_id, "root");
//! ```

use serde::Deserialize;

use crate::types::{Frame, Viewport};

/// Configuration shared by the coordinator and the view factory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Identifier of the bootstrap container attached to the host's root surface.
    pub root_container_id: String,

    /// Identifier of the first view, attached full-bleed under the root container.
    pub first_view_id: String,

    /// Reserved props key listing the event names to bind.
    pub event_listeners_key: String,

    /// Size of the host's root surface.
    pub viewport: Viewport,

    /// Geometry given to views that come out of the factory without one.
    pub placeholder_frame: Frame,

    /// Rewrite `onPress` style event names to `press` in `simulateEvent`.
    pub normalize_event_names: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            root_container_id: "root".to_string(),
            first_view_id: "view_0".to_string(),
            event_listeners_key: "_eventListeners".to_string(),
            viewport: Viewport::default(),
            placeholder_frame: Frame::new(0.0, 0.0, 100.0, 100.0),
            normalize_event_names: true,
        }
    }
}

impl BridgeConfig {
    /// Parse a (possibly partial) JSON configuration document.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}
