/// Scene graph - slot map arena of nodes forming a directed acyclic graph.
///
/// Nodes may have several parents (the scene root is typically shared by
/// the main camera and every auxiliary pass camera). Edges are rejected when
/// they would close a cycle, so every traversal terminates.

use std::sync::Arc;
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use crate::camera::{PassCamera, RenderOrder};
use crate::error::{Error, Result};
use crate::engine_error;
use super::callbacks::NodeCallback;
use super::node::{Node, NodeKey, NodeKind, NodeMask, StateSet};

const LOG_SOURCE: &str = "multipass::SceneGraph";

/// Result of culling a camera's subgraph
#[derive(Debug, Clone, Default)]
pub struct CullResult {
    /// Non-camera nodes that passed the camera's cull mask, in traversal order
    pub drawn: Vec<NodeKey>,
    /// Camera nodes found below this camera (rendered as their own passes)
    pub nested_cameras: Vec<NodeKey>,
}

/// Scene graph arena
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    // ===== CREATION =====

    /// Create a detached group node
    pub fn create_group(&mut self, name: &str) -> NodeKey {
        self.nodes.insert(Node::new(name, NodeKind::Group))
    }

    /// Create a detached camera node
    pub fn create_camera(&mut self, name: &str, camera: PassCamera) -> NodeKey {
        self.nodes.insert(Node::new(name, NodeKind::Camera(Box::new(camera))))
    }

    /// Create a detached PPU processor attachment node
    pub fn create_processor_node(&mut self, name: &str) -> NodeKey {
        self.nodes.insert(Node::new(name, NodeKind::Processor))
    }

    // ===== ACCESS =====

    /// Whether the key refers to a live node
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Get a node
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the camera stored in a camera node
    pub fn camera(&self, key: NodeKey) -> Option<&PassCamera> {
        match &self.nodes.get(key)?.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Get the camera stored in a camera node, mutably
    pub fn camera_mut(&mut self, key: NodeKey) -> Option<&mut PassCamera> {
        match &mut self.nodes.get_mut(key)?.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Children of a node (empty if the key is dead)
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parents of a node (empty if the key is dead)
    pub fn parents(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(|n| n.parents.as_slice()).unwrap_or(&[])
    }

    /// Set a node's mask. Returns false if the key is dead.
    pub fn set_node_mask(&mut self, key: NodeKey, mask: NodeMask) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.mask = mask;
                true
            }
            None => false,
        }
    }

    /// Install the update callback of a node. Returns false if the key is dead.
    pub fn set_update_callback(&mut self, key: NodeKey, callback: Arc<dyn NodeCallback>) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.update_callback = Some(callback);
                true
            }
            None => false,
        }
    }

    /// Get the state set of a node, creating an empty one if needed
    pub fn get_or_create_state_set(&mut self, key: NodeKey) -> Option<&mut StateSet> {
        self.nodes
            .get_mut(key)
            .map(|node| node.state.get_or_insert_with(StateSet::default))
    }

    // ===== TOPOLOGY =====

    /// Add `child` under `parent`.
    ///
    /// Adding an existing edge again is a no-op.
    ///
    /// # Errors
    ///
    /// - either key is dead
    /// - the edge would create a cycle
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.contains(parent) || !self.contains(child) {
            engine_error!(LOG_SOURCE, "Cannot add child: node no longer exists");
            return Err(Error::InvalidResource("scene graph node no longer exists".to_string()));
        }

        if parent == child || self.is_reachable(child, parent) {
            let parent_name = &self.nodes[parent].name;
            let child_name = &self.nodes[child].name;
            engine_error!(LOG_SOURCE,
                "Adding '{}' under '{}' would create a cycle", child_name, parent_name);
            return Err(Error::InvalidGraph(format!(
                "'{}' under '{}' would create a cycle", child_name, parent_name
            )));
        }

        if self.nodes[parent].children.contains(&child) {
            return Ok(());
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parents.push(parent);
        Ok(())
    }

    /// Remove the edge `parent -> child`. Returns false if there was no such edge.
    pub fn remove_child(&mut self, parent: NodeKey, child: NodeKey) -> bool {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(index) = parent_node.children.iter().position(|&c| c == child) else {
            return false;
        };
        parent_node.children.remove(index);

        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parents.retain(|&p| p != parent);
        }
        true
    }

    /// Remove a node and all edges touching it. Its children stay alive.
    ///
    /// Returns false if the key is dead.
    pub fn remove_node(&mut self, key: NodeKey) -> bool {
        let Some(node) = self.nodes.remove(key) else {
            return false;
        };

        for parent in node.parents {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|&c| c != key);
            }
        }
        for child in node.children {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parents.retain(|&p| p != key);
            }
        }
        true
    }

    /// Whether `to` can be reached from `from` by following child edges
    pub fn is_reachable(&self, from: NodeKey, to: NodeKey) -> bool {
        let mut stack = vec![from];
        let mut visited = FxHashSet::default();

        while let Some(key) = stack.pop() {
            if key == to {
                return true;
            }
            if !visited.insert(key) {
                continue;
            }
            stack.extend_from_slice(self.children(key));
        }
        false
    }

    // ===== TRAVERSALS =====

    /// Update traversal from `root`.
    ///
    /// Every reachable node is visited once, children first; its update
    /// callback (if any) runs after its subgraph.
    pub fn update(&mut self, root: NodeKey) {
        let mut visited = FxHashSet::default();
        self.update_node(root, &mut visited);
    }

    fn update_node(&mut self, key: NodeKey, visited: &mut FxHashSet<NodeKey>) {
        if !visited.insert(key) {
            return;
        }

        let children = self.children(key).to_vec();
        for child in children {
            self.update_node(child, visited);
        }

        let callback = self.nodes.get(key).and_then(|n| n.update_callback.clone());
        if let Some(callback) = callback {
            callback.update(self, key);
        }
    }

    /// Cull the subgraph of a camera against its cull mask.
    ///
    /// Nested cameras are reported but not descended into: each camera is
    /// its own pass. Returns an empty result if `camera` is not a camera.
    pub fn cull(&self, camera: NodeKey) -> CullResult {
        let mut result = CullResult::default();
        let Some(pass_camera) = self.camera(camera) else {
            return result;
        };
        let cull_mask = pass_camera.cull_mask();

        let mut visited = FxHashSet::default();
        for &child in self.children(camera) {
            self.cull_node(child, cull_mask, &mut visited, &mut result);
        }
        result
    }

    fn cull_node(
        &self,
        key: NodeKey,
        cull_mask: NodeMask,
        visited: &mut FxHashSet<NodeKey>,
        result: &mut CullResult,
    ) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        if !node.mask.intersects(cull_mask) || !visited.insert(key) {
            return;
        }

        if node.is_camera() {
            result.nested_cameras.push(key);
            return;
        }

        result.drawn.push(key);
        for &child in &node.children {
            self.cull_node(child, cull_mask, visited, result);
        }
    }

    /// Cameras to render this frame, in execution order, starting from `root_camera`.
    ///
    /// For each camera: its pre-render cameras (by ascending priority), the
    /// camera itself, its nested-render cameras, then its post-render
    /// cameras (by ascending priority). Each camera appears at most once.
    pub fn render_passes(&self, root_camera: NodeKey) -> Vec<NodeKey> {
        let mut passes = Vec::new();
        let mut visited = FxHashSet::default();
        if self.camera(root_camera).is_some() {
            self.collect_passes(root_camera, &mut visited, &mut passes);
        }
        passes
    }

    fn collect_passes(
        &self,
        camera: NodeKey,
        visited: &mut FxHashSet<NodeKey>,
        passes: &mut Vec<NodeKey>,
    ) {
        if !visited.insert(camera) {
            return;
        }

        let mut nested = self.cull(camera).nested_cameras;
        // Stable sort keeps insertion order among equal priorities
        nested.sort_by_key(|&key| {
            self.camera(key)
                .map(|c| (c.render_order(), c.render_order_priority()))
                .unwrap_or((RenderOrder::NestedRender, 0))
        });

        let order_of = |key: NodeKey| {
            self.camera(key).map(|c| c.render_order()).unwrap_or(RenderOrder::NestedRender)
        };

        for &key in nested.iter().filter(|&&k| order_of(k) == RenderOrder::PreRender) {
            self.collect_passes(key, visited, passes);
        }
        passes.push(camera);
        for &key in nested.iter().filter(|&&k| order_of(k) != RenderOrder::PreRender) {
            self.collect_passes(key, visited, passes);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
