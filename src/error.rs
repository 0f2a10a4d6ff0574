//! Error types for dcmaui-native.
//!
//! `BridgeError` is what the method-call protocol returns to the remote side.
//! `RegistryError` is the narrower failure set of the view registry; it
//! converts into the protocol taxonomy with `From`.

use serde_json::{Value, json};
use thiserror::Error;

/// Errors returned synchronously to the caller of a bridge method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Malformed or missing call fields. No state was changed.
    #[error("Invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },

    /// A referenced identifier is not in the registry.
    #[error("View not found: {0}")]
    ViewNotFound(String),

    /// The view factory could not construct the view.
    #[error("Failed to create view {view_id}: {source}")]
    ViewCreationFailed {
        view_id: String,
        #[source]
        source: FactoryError,
    },

    /// An identifier was registered twice.
    #[error("Duplicate view identifier: {0}")]
    DuplicateIdentifier(String),

    /// The method name is not part of the protocol.
    #[error("Method not implemented: {0}")]
    NotImplemented(String),

    /// A call arrived on the UI thread while the coordinator was mid-dispatch.
    #[error("Re-entrant bridge call to {0} while a call is in progress")]
    Reentrant(String),

    /// The UI thread is gone.
    #[error("UI thread disconnected")]
    Disconnected,
}

impl BridgeError {
    /// Build an `InvalidArguments` error.
    pub fn invalid(method: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            method: method.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable wire code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments { .. } => "INVALID_ARGUMENTS",
            Self::ViewNotFound(_) => "VIEW_NOT_FOUND",
            Self::ViewCreationFailed { .. } => "VIEW_CREATION_FAILED",
            Self::DuplicateIdentifier(_) => "DUPLICATE_IDENTIFIER",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::Reentrant(_) => "REENTRANT_CALL",
            Self::Disconnected => "DISCONNECTED",
        }
    }

    /// Serialise as the `{code, message}` pair sent over the method channel.
    pub fn to_wire(&self) -> Value {
        json!({
            "code": self.code(),
            "message": self.to_string(),
        })
    }
}

/// Failures of the view factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// No component is registered for the type tag.
    #[error("unknown view type: {0}")]
    UnknownType(String),
}

/// Failures of the view registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("identifier already registered: {0}")]
    DuplicateIdentifier(String),

    #[error("identifier not registered: {0}")]
    NotFound(String),

    /// Attaching would make a view its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: String, child: String },
}

impl From<RegistryError> for BridgeError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::DuplicateIdentifier(id) => Self::DuplicateIdentifier(id),
            RegistryError::NotFound(id) => Self::ViewNotFound(id),
            RegistryError::Cycle { .. } => Self::invalid("attachView", err.to_string()),
        }
    }
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
