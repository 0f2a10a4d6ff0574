//! Coordinator - Keeps the native tree consistent with the remote description.
//!
//! Every inbound call is parsed into a [`Method`], applied to the registries
//! and native views, and answered synchronously. Per identifier a view moves
//! through:
//!
//! ```text
//! Unknown ──createView──► Created ──attachView/setChildren──► Attached
//!                            │                                  │
//!                            └───────updateView (any number)────┘
//!                                         │
//!                                     deleteView ──► gone (subtree too)
//! ```
//!
//! Registry bookkeeping happens first, then the same change is replayed on
//! the native views. Layout is requested by mutations and flushed once at
//! the end of each call.

use std::rc::Rc;

use serde_json::{Value, json};
use spark_signals::{Signal, signal};
use taffy::{Dimension as TaffyDimension, Size};
use tracing::{debug, info, warn};

use super::bootstrap::{Bootstrap, NATIVE_UI_READY, SYSTEM_VIEW_ID};
use super::events::{EventChannel, normalize_event_name};
use super::protocol::{Method, MethodCall, string_list};
use crate::config::BridgeConfig;
use crate::engine::{
    AttachOutcome, Component, ComponentRegistry, ViewFactory, ViewFlags, ViewRecord,
    ViewRegistry,
};
use crate::error::{BridgeError, BridgeResult};
use crate::layout::compute_layout;
use crate::primitives::register_builtins;
use crate::types::{Props, ViewId};

/// Owns the registries and drives them from inbound calls.
///
/// Not `Send`: it lives on the UI thread (see `UiThread`).
pub struct Coordinator {
    config: BridgeConfig,
    components: ComponentRegistry,
    factory: ViewFactory,
    views: ViewRegistry,
    events: EventChannel,
    bootstrap: Bootstrap,
    revision: Signal<u64>,
    layout_pending: bool,
}

impl Coordinator {
    /// Create a coordinator with the built-in components registered.
    pub fn new(config: BridgeConfig, events: EventChannel) -> Self {
        let mut components = ComponentRegistry::new();
        register_builtins(&mut components);

        Self {
            factory: ViewFactory::new(config.placeholder_frame),
            config,
            components,
            views: ViewRegistry::new(),
            events,
            bootstrap: Bootstrap::new(),
            revision: signal(0),
            layout_pending: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Register (or replace) a component type.
    pub fn register_component(&mut self, type_tag: impl Into<String>, component: Rc<dyn Component>) {
        self.components.register(type_tag, component);
    }

    /// Tree revision, bumped on every successful tree mutation.
    pub fn revision(&self) -> Signal<u64> {
        self.revision.clone()
    }

    /// Host readiness flag.
    pub fn ready_signal(&self) -> Signal<bool> {
        self.bootstrap.ready_signal()
    }

    fn bump_revision(&self) {
        self.revision.set(self.revision.get() + 1);
    }

    fn request_layout(&mut self) {
        self.layout_pending = true;
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Parse and apply one call.
    pub fn handle(&mut self, call: MethodCall) -> BridgeResult<Value> {
        let method = Method::parse(&call).inspect_err(|err| {
            debug!(method = %call.method, error = %err, "call rejected");
        })?;
        self.dispatch(method)
    }

    /// Apply one parsed call, then flush any requested layout.
    pub fn dispatch(&mut self, method: Method) -> BridgeResult<Value> {
        let name = method.name();
        debug!(method = name, "dispatch");

        let result = self.apply(method);
        self.flush_layout();

        if let Err(err) = &result {
            debug!(method = name, code = err.code(), error = %err, "call failed");
        }
        result
    }

    fn apply(&mut self, method: Method) -> BridgeResult<Value> {
        match method {
            Method::Initialize | Method::CreateRootContainer => {
                self.request_root();
                Ok(Value::Bool(true))
            }
            Method::Ping => Ok(Value::Bool(true)),
            Method::CreateView {
                view_id,
                view_type,
                props,
            } => self.create_view(&view_id, &view_type, props).map(|()| Value::Bool(true)),
            Method::AttachView {
                parent_id,
                child_id,
            } => self.attach_view(&parent_id, &child_id).map(|()| Value::Bool(true)),
            Method::SetChildren {
                parent_id,
                child_ids,
            } => self.set_children(&parent_id, &child_ids).map(|()| Value::Bool(true)),
            Method::UpdateView { view_id, props } => {
                self.update_view(&view_id, props).map(|()| Value::Bool(true))
            }
            Method::DeleteView { view_id } => self.delete_view(&view_id).map(|()| Value::Bool(true)),
            Method::AddEventListeners {
                view_id,
                event_types,
            } => self
                .add_event_listeners(&view_id, &event_types)
                .map(|()| Value::Bool(true)),
            Method::RemoveEventListeners {
                view_id,
                event_types,
            } => {
                self.remove_event_listeners(view_id.as_deref(), &event_types);
                Ok(Value::Bool(true))
            }
            Method::SimulateEvent {
                view_id,
                event_name,
                params,
            } => {
                self.simulate_event(&view_id, &event_name, params);
                Ok(Value::Bool(true))
            }
            Method::LogViewTree => Ok(Value::String(self.log_view_tree())),
            Method::GetViewInfo { view_id } => self.view_info(&view_id),
            Method::ResetViewRegistry => {
                self.reset_view_registry();
                Ok(Value::Bool(true))
            }
        }
    }

    // =========================================================================
    // Create / Update
    // =========================================================================

    /// Pull the reserved listener list out of a props bag.
    fn take_listeners(&self, method: &str, props: &mut Props) -> BridgeResult<Option<Vec<String>>> {
        match props.remove(&self.config.event_listeners_key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => string_list(&value).map(Some).ok_or_else(|| {
                BridgeError::invalid(
                    method,
                    format!("{} must be a list of strings", self.config.event_listeners_key),
                )
            }),
        }
    }

    pub fn create_view(&mut self, view_id: &str, view_type: &str, mut props: Props) -> BridgeResult<()> {
        // The first view is created remotely; the root container never is.
        if view_id == self.config.root_container_id {
            return Err(BridgeError::invalid(
                "createView",
                format!("{view_id} is reserved for the root container"),
            ));
        }
        if self.views.contains(view_id) {
            return Err(BridgeError::DuplicateIdentifier(view_id.to_string()));
        }
        let listeners = self.take_listeners("createView", &mut props)?;

        let created = self
            .factory
            .create(&self.components, view_type, &props)
            .map_err(|source| BridgeError::ViewCreationFailed {
                view_id: view_id.to_string(),
                source,
            })?;

        let record = ViewRecord::new(view_id, view_type, created.view, created.component, props);
        self.views.register(record)?;
        debug!(view_id, view_type, "view created");

        if let Some(events) = listeners.filter(|events| !events.is_empty()) {
            self.bind_events(view_id, &events)?;
        }
        if view_id == self.config.first_view_id {
            self.attach_first_view();
        }

        self.bump_revision();
        Ok(())
    }

    pub fn update_view(&mut self, view_id: &str, mut props: Props) -> BridgeResult<()> {
        if !self.views.contains(view_id) {
            return Err(BridgeError::ViewNotFound(view_id.to_string()));
        }
        let listeners = self.take_listeners("updateView", &mut props)?;
        if let Some(events) = listeners.filter(|events| !events.is_empty()) {
            self.bind_events(view_id, &events)?;
        }

        let record = self
            .views
            .get_mut(view_id)
            .ok_or_else(|| BridgeError::ViewNotFound(view_id.to_string()))?;
        let component = Rc::clone(&record.component);
        component.update(record.view.as_mut(), &props);
        record.props = props;
        record.flags.insert(ViewFlags::LAYOUT_DIRTY);

        self.request_layout();
        self.bump_revision();
        Ok(())
    }

    // =========================================================================
    // Tree mutation
    // =========================================================================

    /// Add `child` under `parent` natively, removing it from `old_parent` first.
    fn attach_native(&mut self, parent: &str, child: &str, old_parent: Option<&str>) {
        if let Some(old) = old_parent.and_then(|old| self.views.get_mut(old)) {
            old.view.remove_subview(child);
        }
        if let Some(record) = self.views.get_mut(parent) {
            record.view.add_subview(child.to_string());
            record.view.set_needs_layout();
        }
        if let Some(record) = self.views.get_mut(child) {
            record.view.set_superview(Some(parent.to_string()));
        }
    }

    pub fn attach_view(&mut self, parent_id: &str, child_id: &str) -> BridgeResult<()> {
        let outcome = self.views.add_child(child_id, parent_id)?;
        match outcome {
            AttachOutcome::Unchanged => {
                debug!(parent_id, child_id, "already attached");
            }
            AttachOutcome::Attached { previous_parent } => {
                self.attach_native(parent_id, child_id, previous_parent.as_deref());
                self.request_layout();
                self.bump_revision();
            }
        }
        Ok(())
    }

    pub fn set_children(&mut self, parent_id: &str, child_ids: &[ViewId]) -> BridgeResult<()> {
        if !self.views.contains(parent_id) {
            return Err(BridgeError::ViewNotFound(parent_id.to_string()));
        }
        let change = self.views.set_children(parent_id, child_ids)?;

        // Detach every current native child that is a registered view.
        let native_children: Vec<ViewId> = self
            .views
            .get(parent_id)
            .map(|record| record.view.subviews().to_vec())
            .unwrap_or_default()
            .into_iter()
            .filter(|id| self.views.contains(id))
            .collect();
        for child in &native_children {
            if let Some(parent) = self.views.get_mut(parent_id) {
                parent.view.remove_subview(child);
            }
            if let Some(record) = self.views.get_mut(child) {
                record.view.set_superview(None);
            }
        }

        for (child, old_parent) in &change.moved {
            if let Some(old) = self.views.get_mut(old_parent) {
                old.view.remove_subview(child);
            }
        }

        for child in &change.current {
            // Checked again: the registry may have skipped or kept it.
            if !self.views.contains(child) {
                continue;
            }
            self.attach_native(parent_id, child, None);
        }

        if let Some(parent) = self.views.get_mut(parent_id) {
            parent.view.set_needs_layout();
        }
        self.request_layout();
        self.bump_revision();
        Ok(())
    }

    pub fn delete_view(&mut self, view_id: &str) -> BridgeResult<()> {
        let Some(record) = self.views.get(view_id) else {
            return Err(BridgeError::ViewNotFound(view_id.to_string()));
        };
        if record.is_root_container() {
            return Err(BridgeError::invalid("deleteView", "the root container cannot be deleted"));
        }

        // Detach natively from the superview first.
        let superview = record.view.superview().map(str::to_string);
        if let Some(parent) = superview.and_then(|id| self.views.get_mut(&id)) {
            parent.view.remove_subview(view_id);
            parent.view.set_needs_layout();
        }

        let removed = self.views.remove_view(view_id);
        for mut record in removed {
            if !record.events.is_empty() {
                let events: Vec<String> = record.events.iter().cloned().collect();
                record.component.unbind_events(record.view.as_mut(), &events);
            }
            record.view.set_superview(None);
        }
        debug!(view_id, "view deleted");

        self.request_layout();
        self.bump_revision();
        Ok(())
    }

    // =========================================================================
    // Events
    // =========================================================================

    fn bind_events(&mut self, view_id: &str, events: &[String]) -> BridgeResult<()> {
        let emit = self.events.emitter();
        let record = self
            .views
            .get_mut(view_id)
            .ok_or_else(|| BridgeError::ViewNotFound(view_id.to_string()))?;

        let component = Rc::clone(&record.component);
        component.bind_events(record.view.as_mut(), &record.id, events, &emit);
        record.events.extend(events.iter().cloned());
        debug!(view_id, ?events, "listeners bound");
        Ok(())
    }

    pub fn add_event_listeners(&mut self, view_id: &str, events: &[String]) -> BridgeResult<()> {
        self.bind_events(view_id, events)
    }

    /// Accepted and acknowledged; bound handlers stay in place.
    pub fn remove_event_listeners(&mut self, view_id: Option<&str>, events: &[String]) {
        debug!(?view_id, ?events, "removeEventListeners acknowledged");
    }

    /// Emit an event as if the native control had fired it.
    ///
    /// The view does not need to exist or to have the listener bound.
    pub fn simulate_event(&mut self, view_id: &str, event_name: &str, params: Props) {
        let event_name = if self.config.normalize_event_names {
            normalize_event_name(event_name)
        } else {
            event_name.to_string()
        };
        if !self.views.contains(view_id) {
            warn!(view_id, event_name = %event_name, "simulating event for unregistered view");
        }
        self.events.send(view_id, &event_name, params);
    }

    /// Emit only if the view is registered; otherwise log and skip.
    pub fn send_event_checked(&self, view_id: &str, event_name: &str, params: Props) -> bool {
        if !self.views.contains(view_id) {
            warn!(view_id, event_name, "event for unregistered view skipped");
            return false;
        }
        self.events.send(view_id, event_name, params)
    }

    /// Trigger a native event on a view, as a platform control would.
    ///
    /// Returns `false` when the view is unknown or has no handler bound.
    pub fn fire_native(&self, view_id: &str, event_name: &str, params: &Props) -> bool {
        match self.views.get(view_id) {
            Some(record) => record.view.fire(event_name, params),
            None => false,
        }
    }

    // =========================================================================
    // Bootstrap
    // =========================================================================

    /// The host UI stack has finished starting.
    pub fn host_ready(&mut self) {
        info!("host ready");
        self.bootstrap.mark_ready();
        self.run_bootstrap();
        self.flush_layout();
    }

    fn request_root(&mut self) {
        self.bootstrap.request_root();
        if !self.bootstrap.is_ready() {
            debug!("root container requested, waiting for host");
        }
        self.run_bootstrap();
    }

    fn run_bootstrap(&mut self) {
        if !self.bootstrap.root_due() {
            return;
        }

        match self.create_root_container() {
            Ok(()) => {
                self.bootstrap.mark_root_created();
                info!(root = %self.config.root_container_id, "root container created");
                self.attach_first_view();
                if self.bootstrap.take_announcement() {
                    self.events.send(SYSTEM_VIEW_ID, NATIVE_UI_READY, Props::new());
                }
            }
            Err(err) => warn!(error = %err, "root container setup failed"),
        }
    }

    fn create_root_container(&mut self) -> BridgeResult<()> {
        let root_id = self.config.root_container_id.clone();
        let viewport = self.config.viewport;
        let props = json!({ "width": viewport.width, "height": viewport.height });
        let props = props.as_object().cloned().unwrap_or_default();

        let created = self
            .factory
            .create(&self.components, "View", &props)
            .map_err(|source| BridgeError::ViewCreationFailed {
                view_id: root_id.clone(),
                source,
            })?;
        let mut record = ViewRecord::new(root_id, "View", created.view, created.component, props);
        record.flags.insert(ViewFlags::ROOT_CONTAINER);
        self.views.register(record)?;

        self.request_layout();
        self.bump_revision();
        Ok(())
    }

    /// Attach the first view full-bleed under the root container once both
    /// exist. Repeating it is a no-op.
    fn attach_first_view(&mut self) {
        let root = self.config.root_container_id.clone();
        let first = self.config.first_view_id.clone();
        if !self.views.contains(&root) || !self.views.contains(&first) {
            return;
        }

        match self.views.add_child(&first, &root) {
            Ok(AttachOutcome::Unchanged) => {}
            Ok(AttachOutcome::Attached { previous_parent }) => {
                self.attach_native(&root, &first, previous_parent.as_deref());
                if let Some(record) = self.views.get_mut(&first) {
                    record.view.style_mut().size = Size {
                        width: TaffyDimension::Percent(1.0),
                        height: TaffyDimension::Percent(1.0),
                    };
                    record.flags.insert(ViewFlags::FULL_BLEED);
                }
                info!(view_id = %first, "first view attached to root container");
                self.request_layout();
            }
            Err(err) => warn!(error = %err, "first view attach failed"),
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn flush_layout(&mut self) {
        if !std::mem::take(&mut self.layout_pending) {
            return;
        }
        let root = self.config.root_container_id.clone();
        if let Err(err) = compute_layout(&mut self.views, &root, self.config.viewport) {
            warn!(error = %err, "layout pass failed");
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub fn log_view_tree(&self) -> String {
        let tree = self.views.describe_tree();
        info!(views = self.views.len(), "view tree:\n{tree}");
        tree
    }

    pub fn view_info(&self, view_id: &str) -> BridgeResult<Value> {
        let record = self
            .views
            .get(view_id)
            .ok_or_else(|| BridgeError::ViewNotFound(view_id.to_string()))?;

        Ok(json!({
            "id": record.id,
            "type": record.view_type,
            "props": record.props,
            "children": record.children,
            "parent": record.parent,
            "frame": record.view.frame(),
            "events": record.events,
            "fullBleed": record.flags.contains(ViewFlags::FULL_BLEED),
        }))
    }

    /// Drop every view and rebuild the root container if it was set up.
    pub fn reset_view_registry(&mut self) {
        for mut record in self.views.clear() {
            if !record.events.is_empty() {
                let events: Vec<String> = record.events.iter().cloned().collect();
                record.component.unbind_events(record.view.as_mut(), &events);
            }
        }
        self.bootstrap.root_dropped();
        info!("view registry reset");

        self.bump_revision();
        self.run_bootstrap();
    }
}
