//! Inbound method-call protocol.
//!
//! A [`MethodCall`] is the JSON-shaped message the remote side sends. It is
//! parsed into a typed [`Method`] before anything touches the tree, so a
//! malformed call fails with `InvalidArguments` and changes nothing.
//!
//! ```
//! use dcmaui_native::pipeline::{Method, MethodCall};
//! use serde_json::json;
//!
//! let call = MethodCall::new("attachView", json!({ "parentId": "root", "childId": "view_1" }));
//! let method = Method::parse(&call).unwrap();
//! assert_eq!(method.name(), "attachView");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};
use crate::types::{Props, ViewId};

/// One inbound call: method name plus an argument map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub args: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// A call with no arguments.
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, Value::Null)
    }
}

/// A parsed, validated call.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    Initialize,
    CreateRootContainer,
    Ping,
    CreateView {
        view_id: ViewId,
        view_type: String,
        props: Props,
    },
    AttachView {
        parent_id: ViewId,
        child_id: ViewId,
    },
    SetChildren {
        parent_id: ViewId,
        child_ids: Vec<ViewId>,
    },
    UpdateView {
        view_id: ViewId,
        props: Props,
    },
    DeleteView {
        view_id: ViewId,
    },
    AddEventListeners {
        view_id: ViewId,
        event_types: Vec<String>,
    },
    /// Accepted whatever its arguments look like.
    RemoveEventListeners {
        view_id: Option<ViewId>,
        event_types: Vec<String>,
    },
    SimulateEvent {
        view_id: ViewId,
        event_name: String,
        params: Props,
    },
    LogViewTree,
    GetViewInfo {
        view_id: ViewId,
    },
    ResetViewRegistry,
}

// =============================================================================
// Argument extraction
// =============================================================================

/// Borrowed view of a call's argument map.
struct Args<'a> {
    method: &'a str,
    map: Option<&'a Props>,
}

impl<'a> Args<'a> {
    fn new(call: &'a MethodCall) -> BridgeResult<Self> {
        let map = match &call.args {
            Value::Object(map) => Some(map),
            Value::Null => None,
            _ => return Err(BridgeError::invalid(&call.method, "arguments must be a map")),
        };
        Ok(Self {
            method: &call.method,
            map,
        })
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map?.get(key)
    }

    fn string(&self, key: &str) -> BridgeResult<String> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(BridgeError::invalid(self.method, format!("{key} must be a string"))),
            None => Err(BridgeError::invalid(self.method, format!("missing {key}"))),
        }
    }

    fn map(&self, key: &str) -> BridgeResult<Props> {
        match self.get(key) {
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(BridgeError::invalid(self.method, format!("{key} must be a map"))),
            None => Err(BridgeError::invalid(self.method, format!("missing {key}"))),
        }
    }

    fn string_list(&self, key: &str) -> BridgeResult<Vec<String>> {
        let Some(value) = self.get(key) else {
            return Err(BridgeError::invalid(self.method, format!("missing {key}")));
        };
        string_list(value)
            .ok_or_else(|| BridgeError::invalid(self.method, format!("{key} must be a list of strings")))
    }
}

/// Parse a JSON list whose every element is a string.
pub fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

impl Method {
    /// Validate a call into a typed method.
    pub fn parse(call: &MethodCall) -> BridgeResult<Self> {
        // removeEventListeners always succeeds, so it never validates.
        if call.method == "removeEventListeners" {
            let map = call.args.as_object();
            return Ok(Self::RemoveEventListeners {
                view_id: map
                    .and_then(|m| m.get("viewId"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                event_types: map
                    .and_then(|m| m.get("eventTypes"))
                    .and_then(string_list)
                    .unwrap_or_default(),
            });
        }

        let args = Args::new(call)?;
        let method = match call.method.as_str() {
            "initialize" => Self::Initialize,
            "createRootContainer" => Self::CreateRootContainer,
            "ping" => Self::Ping,
            "createView" => Self::CreateView {
                view_id: args.string("viewId")?,
                view_type: args.string("viewType")?,
                props: args.map("props")?,
            },
            "attachView" => Self::AttachView {
                parent_id: args.string("parentId")?,
                child_id: args.string("childId")?,
            },
            "setChildren" => Self::SetChildren {
                parent_id: args.string("parentId")?,
                child_ids: args.string_list("childIds")?,
            },
            "updateView" => Self::UpdateView {
                view_id: args.string("viewId")?,
                props: args.map("props")?,
            },
            "deleteView" => Self::DeleteView {
                view_id: args.string("viewId")?,
            },
            "addEventListeners" => Self::AddEventListeners {
                view_id: args.string("viewId")?,
                event_types: args.string_list("eventTypes")?,
            },
            "simulateEvent" => {
                // `data` is the older name for `params`.
                let params = match args.get("params").or_else(|| args.get("data")) {
                    Some(Value::Object(map)) => map.clone(),
                    Some(Value::Null) | None => Props::new(),
                    Some(_) => return Err(BridgeError::invalid(&call.method, "params must be a map")),
                };
                Self::SimulateEvent {
                    view_id: args.string("viewId")?,
                    event_name: args.string("eventName")?,
                    params,
                }
            }
            "logViewTree" => Self::LogViewTree,
            "getViewInfo" => Self::GetViewInfo {
                view_id: args.string("viewId")?,
            },
            "resetViewRegistry" => Self::ResetViewRegistry,
            other => return Err(BridgeError::NotImplemented(other.to_string())),
        };
        Ok(method)
    }

    /// Wire name of the method.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::CreateRootContainer => "createRootContainer",
            Self::Ping => "ping",
            Self::CreateView { .. } => "createView",
            Self::AttachView { .. } => "attachView",
            Self::SetChildren { .. } => "setChildren",
            Self::UpdateView { .. } => "updateView",
            Self::DeleteView { .. } => "deleteView",
            Self::AddEventListeners { .. } => "addEventListeners",
            Self::RemoveEventListeners { .. } => "removeEventListeners",
            Self::SimulateEvent { .. } => "simulateEvent",
            Self::LogViewTree => "logViewTree",
            Self::GetViewInfo { .. } => "getViewInfo",
            Self::ResetViewRegistry => "resetViewRegistry",
        }
    }
}
