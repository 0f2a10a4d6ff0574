//! View Registry - Owning store of live views and their tree adjacency.
//!
//! Manages:
//! - Identifier → record ownership (single owner per identifier)
//! - Ordered parent → children lists plus parent back-references
//! - Recursive subtree removal
//!
//! Only bookkeeping happens here. Native subview mutation is the
//! coordinator's job, so every operation reports what changed and the
//! caller replays it on the native views.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use tracing::{debug, warn};

use super::view_record::ViewRecord;
use crate::error::RegistryError;
use crate::types::ViewId;

/// Outcome of [`ViewRegistry::add_child`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Already the last-known child of that parent; nothing changed.
    Unchanged,
    /// Attached. `previous_parent` is the parent it was moved away from.
    Attached { previous_parent: Option<ViewId> },
}

/// Outcome of [`ViewRegistry::set_children`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildrenChange {
    /// Children before the call.
    pub previous: Vec<ViewId>,
    /// Children after the call, in order.
    pub current: Vec<ViewId>,
    /// `(child, old_parent)` for children taken from another parent.
    pub moved: Vec<(ViewId, ViewId)>,
    /// Ids that were skipped because they are not registered.
    pub skipped: Vec<ViewId>,
}

/// All live views keyed by identifier.
#[derive(Default)]
pub struct ViewRegistry {
    records: HashMap<ViewId, ViewRecord>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ViewRecord> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ViewRecord> {
        self.records.get_mut(id)
    }

    /// Ordered children of `id` (empty if unknown).
    pub fn children(&self, id: &str) -> &[ViewId] {
        self.records.get(id).map_or(&[], |record| &record.children)
    }

    pub fn parent(&self, id: &str) -> Option<&str> {
        self.records.get(id)?.parent.as_deref()
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<ViewId> {
        let mut ids: Vec<ViewId> = self.records.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Parentless records, sorted by identifier.
    pub fn roots(&self) -> Vec<ViewId> {
        let mut roots: Vec<ViewId> = self
            .records
            .values()
            .filter(|record| record.parent.is_none())
            .map(|record| record.id.clone())
            .collect();
        roots.sort();
        roots
    }

    /// Whether `ancestor` is `id` itself or appears on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
        let mut current = Some(id);
        while let Some(cursor) = current {
            if cursor == ancestor {
                return true;
            }
            current = self.parent(cursor);
        }
        false
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Take ownership of a record. Rejects an identifier that is already live.
    pub fn register(&mut self, record: ViewRecord) -> Result<(), RegistryError> {
        if self.records.contains_key(&record.id) {
            return Err(RegistryError::DuplicateIdentifier(record.id));
        }
        debug!(view_id = %record.id, view_type = %record.view_type, "view registered");
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    // =========================================================================
    // Adjacency
    // =========================================================================

    /// Append `child` to `parent`'s children, moving it from any other parent.
    pub fn add_child(&mut self, child: &str, parent: &str) -> Result<AttachOutcome, RegistryError> {
        if !self.contains(parent) {
            return Err(RegistryError::NotFound(parent.to_string()));
        }
        if !self.contains(child) {
            return Err(RegistryError::NotFound(child.to_string()));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(RegistryError::Cycle {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }

        if self.parent(child) == Some(parent) && self.children(parent).iter().any(|c| c == child) {
            return Ok(AttachOutcome::Unchanged);
        }

        let previous_parent = self.detach(child);
        if let Some(record) = self.records.get_mut(parent) {
            record.children.push(child.to_string());
        }
        if let Some(record) = self.records.get_mut(child) {
            record.parent = Some(parent.to_string());
        }

        debug!(child, parent, ?previous_parent, "child attached");
        Ok(AttachOutcome::Attached { previous_parent })
    }

    /// Remove `child` from its parent's list. Returns the old parent.
    pub fn detach(&mut self, child: &str) -> Option<ViewId> {
        let previous = self.records.get_mut(child)?.parent.take()?;
        if let Some(parent) = self.records.get_mut(&previous) {
            parent.children.retain(|id| id != child);
        }
        Some(previous)
    }

    /// Replace `parent`'s children with `ordered`.
    ///
    /// Unregistered ids, duplicates, and ids that would create a cycle are
    /// skipped with a warning. Children dropped from the list stay registered
    /// but become parentless.
    pub fn set_children(
        &mut self,
        parent: &str,
        ordered: &[ViewId],
    ) -> Result<ChildrenChange, RegistryError> {
        let previous = match self.records.get(parent) {
            Some(record) => record.children.clone(),
            None => return Err(RegistryError::NotFound(parent.to_string())),
        };

        let mut change = ChildrenChange {
            previous,
            ..ChildrenChange::default()
        };
        let mut seen = HashSet::new();

        for id in ordered {
            if !self.contains(id) {
                warn!(parent, child = %id, "setChildren: skipping unregistered child");
                change.skipped.push(id.clone());
                continue;
            }
            if self.is_ancestor_or_self(id, parent) {
                warn!(parent, child = %id, "setChildren: skipping child that would form a cycle");
                change.skipped.push(id.clone());
                continue;
            }
            if !seen.insert(id.as_str()) {
                continue;
            }
            change.current.push(id.clone());
        }

        for id in &change.previous {
            if !seen.contains(id.as_str()) {
                if let Some(record) = self.records.get_mut(id) {
                    record.parent = None;
                }
            }
        }

        for id in &change.current {
            let old_parent = self.records.get(id).and_then(|record| record.parent.clone());
            if let Some(old) = old_parent.filter(|old| old != parent) {
                if let Some(old_record) = self.records.get_mut(&old) {
                    old_record.children.retain(|c| c != id);
                }
                change.moved.push((id.clone(), old));
            }
            if let Some(record) = self.records.get_mut(id) {
                record.parent = Some(parent.to_string());
            }
        }

        if let Some(record) = self.records.get_mut(parent) {
            record.children = change.current.clone();
        }

        debug!(parent, children = ?change.current, "children replaced");
        Ok(change)
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove `id` and every descendant. Returns the removed records,
    /// descendants before their ancestors. Absent ids are a no-op.
    pub fn remove_view(&mut self, id: &str) -> Vec<ViewRecord> {
        if !self.contains(id) {
            warn!(view_id = id, "remove of unregistered view ignored");
            return Vec::new();
        }

        self.detach(id);
        let mut removed = Vec::new();
        self.release(id, &mut removed);
        debug!(view_id = id, count = removed.len(), "subtree removed");
        removed
    }

    fn release(&mut self, id: &str, removed: &mut Vec<ViewRecord>) {
        // Collect first; the recursive calls mutate the map.
        let children = self.children(id).to_vec();
        for child in children {
            // Only descend into children that still point back here.
            if self.parent(&child) == Some(id) {
                self.release(&child, removed);
            }
        }
        if let Some(record) = self.records.remove(id) {
            removed.push(record);
        }
    }

    /// Drop every record.
    pub fn clear(&mut self) -> Vec<ViewRecord> {
        self.records.drain().map(|(_, record)| record).collect()
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Indented `- id: Type` listing of every tree, roots sorted by id.
    pub fn describe_tree(&self) -> String {
        let mut out = String::new();
        for root in self.roots() {
            self.describe_into(&root, 0, &mut out);
        }
        out
    }

    fn describe_into(&self, id: &str, depth: usize, out: &mut String) {
        let Some(record) = self.records.get(id) else { return };
        let _ = writeln!(out, "{:indent$}- {}: {}", "", record.id, record.view_type, indent = depth * 2);
        for child in &record.children {
            self.describe_into(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Component, EventCallback};
    use crate::native::{HeadlessView, NativeView};
    use crate::types::Props;
    use std::rc::Rc;

    struct Plain;

    impl Component for Plain {
        fn construct(&self, _props: &Props) -> Box<dyn NativeView> {
            Box::new(HeadlessView::new("View"))
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

    fn record(id: &str) -> ViewRecord {
        ViewRecord::new(id, "View", Box::new(HeadlessView::new("View")), Rc::new(Plain), Props::new())
    }

    fn setup(ids: &[&str]) -> ViewRegistry {
        let mut registry = ViewRegistry::new();
        for id in ids {
            registry.register(record(id)).unwrap();
        }
        registry
    }

    fn ids(list: &[&str]) -> Vec<ViewId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = setup(&["a"]);
        let err = registry.register(record("a")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateIdentifier("a".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_child_not_found() {
        let mut registry = setup(&["p"]);
        assert_eq!(
            registry.add_child("ghost", "p"),
            Err(RegistryError::NotFound("ghost".into()))
        );
        assert_eq!(
            registry.add_child("p", "ghost"),
            Err(RegistryError::NotFound("ghost".into()))
        );
    }

    #[test]
    fn test_add_child_idempotent() {
        let mut registry = setup(&["p", "c"]);
        assert_eq!(
            registry.add_child("c", "p"),
            Ok(AttachOutcome::Attached { previous_parent: None })
        );
        assert_eq!(registry.add_child("c", "p"), Ok(AttachOutcome::Unchanged));
        assert_eq!(registry.children("p"), ids(&["c"]).as_slice());
    }

    #[test]
    fn test_add_child_moves_between_parents() {
        let mut registry = setup(&["p1", "p2", "c"]);
        registry.add_child("c", "p1").unwrap();
        let outcome = registry.add_child("c", "p2").unwrap();

        assert_eq!(
            outcome,
            AttachOutcome::Attached { previous_parent: Some("p1".into()) }
        );
        assert!(registry.children("p1").is_empty());
        assert_eq!(registry.parent("c"), Some("p2"));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut registry = setup(&["a", "b"]);
        registry.add_child("b", "a").unwrap();

        assert!(matches!(registry.add_child("a", "b"), Err(RegistryError::Cycle { .. })));
        assert!(matches!(registry.add_child("a", "a"), Err(RegistryError::Cycle { .. })));
    }

    #[test]
    fn test_set_children_skips_strays() {
        let mut registry = setup(&["p", "a", "b"]);
        let change = registry.set_children("p", &ids(&["a", "ghost", "b", "a"])).unwrap();

        assert_eq!(change.current, ids(&["a", "b"]));
        assert_eq!(change.skipped, ids(&["ghost"]));
        assert_eq!(registry.children("p"), ids(&["a", "b"]).as_slice());
        assert_eq!(registry.parent("b"), Some("p"));
    }

    #[test]
    fn test_set_children_detaches_dropped() {
        let mut registry = setup(&["p", "a", "b", "c"]);
        registry.set_children("p", &ids(&["a", "b", "c"])).unwrap();
        registry.set_children("p", &ids(&["c", "a"])).unwrap();

        assert_eq!(registry.children("p"), ids(&["c", "a"]).as_slice());
        assert!(registry.contains("b"));
        assert_eq!(registry.parent("b"), None);
    }

    #[test]
    fn test_set_children_steals_from_other_parent() {
        let mut registry = setup(&["p1", "p2", "a"]);
        registry.add_child("a", "p1").unwrap();
        let change = registry.set_children("p2", &ids(&["a"])).unwrap();

        assert_eq!(change.moved, vec![("a".to_string(), "p1".to_string())]);
        assert!(registry.children("p1").is_empty());
        assert_eq!(registry.parent("a"), Some("p2"));
    }

    #[test]
    fn test_remove_view_cascades() {
        let mut registry = setup(&["root", "p", "a", "b", "a1"]);
        registry.add_child("p", "root").unwrap();
        registry.add_child("a", "p").unwrap();
        registry.add_child("b", "p").unwrap();
        registry.add_child("a1", "a").unwrap();

        let removed = registry.remove_view("p");
        let removed_ids: Vec<&str> = removed.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(removed_ids, vec!["a1", "a", "b", "p"]);
        assert_eq!(registry.ids(), ids(&["root"]));
        assert!(registry.children("root").is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry = setup(&["a"]);
        assert!(registry.remove_view("ghost").is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_describe_tree() {
        let mut registry = setup(&["root", "a", "b"]);
        registry.add_child("a", "root").unwrap();
        registry.add_child("b", "a").unwrap();

        assert_eq!(registry.describe_tree(), "- root: View\n  - a: View\n    - b: View\n");
    }
}
