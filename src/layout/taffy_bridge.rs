//! Taffy Bridge - Layout pass over the view registry.
//!
//! Builds a Taffy tree from the registry subtree under the root container,
//! runs flexbox layout against the viewport, and writes each computed box
//! back to its native view as a parent-relative `Frame`.
//!
//! Views not reachable from the root keep whatever geometry they had.

use std::collections::HashMap;

use taffy::{AvailableSpace, NodeId, Size, TaffyError, TaffyTree};
use tracing::debug;

use crate::engine::{ViewFlags, ViewRegistry};
use crate::types::{Frame, ViewId, Viewport};

/// Ids of the subtree under `root`, parents before children.
///
/// Only follows children whose parent back-reference agrees, so a
/// half-updated adjacency can never make the walk revisit a node.
fn collect_subtree(registry: &ViewRegistry, root: &str) -> Vec<ViewId> {
    let mut order = Vec::new();
    if !registry.contains(root) {
        return order;
    }

    let mut stack = vec![root.to_string()];
    while let Some(id) = stack.pop() {
        for child in registry.children(&id).iter().rev() {
            if registry.parent(child) == Some(id.as_str()) {
                stack.push(child.clone());
            }
        }
        order.push(id);
    }
    order
}

/// Compute layout for the tree rooted at `root` and assign frames.
///
/// Returns the number of views laid out (0 when `root` is not registered).
pub fn compute_layout(
    registry: &mut ViewRegistry,
    root: &str,
    viewport: Viewport,
) -> Result<usize, TaffyError> {
    let ids = collect_subtree(registry, root);
    if ids.is_empty() {
        return Ok(0);
    }

    let mut tree: TaffyTree<()> = TaffyTree::new();

    // Maps: view id → Taffy NodeId
    let mut id_to_node: HashMap<&str, NodeId> = HashMap::with_capacity(ids.len());

    // First pass: create all nodes (without children)
    for id in &ids {
        let Some(record) = registry.get(id) else { continue };
        let node = tree.new_leaf(record.view.style().clone())?;
        id_to_node.insert(id.as_str(), node);
    }

    // Second pass: children in registry order
    for id in &ids {
        let Some(&parent_node) = id_to_node.get(id.as_str()) else { continue };
        let children: Vec<NodeId> = registry
            .children(id)
            .iter()
            .filter_map(|child| id_to_node.get(child.as_str()).copied())
            .collect();
        if !children.is_empty() {
            tree.set_children(parent_node, &children)?;
        }
    }

    let available = Size {
        width: AvailableSpace::Definite(viewport.width),
        height: AvailableSpace::Definite(viewport.height),
    };
    let Some(&root_node) = id_to_node.get(root) else {
        return Ok(0);
    };
    tree.compute_layout(root_node, available)?;

    // Extract results
    let mut frames: Vec<(&str, Frame)> = Vec::with_capacity(ids.len());
    for (id, node) in &id_to_node {
        let layout = tree.layout(*node)?;
        frames.push((
            *id,
            Frame::new(
                layout.location.x,
                layout.location.y,
                layout.size.width,
                layout.size.height,
            ),
        ));
    }

    let count = frames.len();
    for (id, frame) in frames {
        if let Some(record) = registry.get_mut(id) {
            record.view.set_frame(frame);
            record.flags.remove(ViewFlags::LAYOUT_DIRTY);
        }
    }

    debug!(root, count, "layout pass complete");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Component, EventCallback, ViewRecord};
    use crate::native::{HeadlessView, NativeView};
    use crate::types::Props;
    use std::rc::Rc;
    use taffy::{Dimension, FlexDirection, JustifyContent};

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

    fn add(registry: &mut ViewRegistry, id: &str, width: Dimension, height: Dimension) {
        let mut view = HeadlessView::new("View");
        view.style_mut().size = Size { width, height };
        let record = ViewRecord::new(id, "View", Box::new(view), Rc::new(Plain), Props::new());
        registry.register(record).unwrap();
    }

    fn frame(registry: &ViewRegistry, id: &str) -> Frame {
        registry.get(id).unwrap().view.frame().unwrap()
    }

    const VIEWPORT: Viewport = Viewport {
        width: 400.0,
        height: 800.0,
    };

    #[test]
    fn test_missing_root() {
        let mut registry = ViewRegistry::new();
        assert_eq!(compute_layout(&mut registry, "root", VIEWPORT).unwrap(), 0);
    }

    #[test]
    fn test_parent_child() {
        let mut registry = ViewRegistry::new();
        add(&mut registry, "root", Dimension::Length(400.0), Dimension::Length(800.0));
        add(&mut registry, "a", Dimension::Percent(0.5), Dimension::Length(100.0));
        add(&mut registry, "b", Dimension::Length(20.0), Dimension::Length(30.0));
        registry.add_child("a", "root").unwrap();
        registry.add_child("b", "root").unwrap();

        let count = compute_layout(&mut registry, "root", VIEWPORT).unwrap();

        assert_eq!(count, 3);
        assert_eq!(frame(&registry, "root"), Frame::new(0.0, 0.0, 400.0, 800.0));
        assert_eq!(frame(&registry, "a"), Frame::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(frame(&registry, "b"), Frame::new(0.0, 100.0, 20.0, 30.0));
    }

    #[test]
    fn test_row_direction_and_justify() {
        let mut registry = ViewRegistry::new();
        add(&mut registry, "root", Dimension::Length(400.0), Dimension::Length(100.0));
        add(&mut registry, "a", Dimension::Length(100.0), Dimension::Length(50.0));
        add(&mut registry, "b", Dimension::Length(100.0), Dimension::Length(50.0));
        {
            let style = registry.get_mut("root").unwrap().view.style_mut();
            style.flex_direction = FlexDirection::Row;
            style.justify_content = Some(JustifyContent::SpaceBetween);
        }
        registry.add_child("a", "root").unwrap();
        registry.add_child("b", "root").unwrap();

        compute_layout(&mut registry, "root", VIEWPORT).unwrap();

        assert_eq!(frame(&registry, "a").x, 0.0);
        assert_eq!(frame(&registry, "b").x, 300.0);
    }

    #[test]
    fn test_detached_views_keep_geometry() {
        let mut registry = ViewRegistry::new();
        add(&mut registry, "root", Dimension::Length(400.0), Dimension::Length(800.0));
        add(&mut registry, "loose", Dimension::Length(10.0), Dimension::Length(10.0));
        registry
            .get_mut("loose")
            .unwrap()
            .view
            .set_frame(Frame::new(5.0, 5.0, 100.0, 100.0));

        compute_layout(&mut registry, "root", VIEWPORT).unwrap();

        assert_eq!(frame(&registry, "loose"), Frame::new(5.0, 5.0, 100.0, 100.0));
    }
}
