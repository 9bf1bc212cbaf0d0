/// Scene graph node types.
///
/// A node is either a plain group, a camera (which renders its children
/// as a separate pass), or the marker node of a PPU processor. Nodes are
/// stored in the `SceneGraph` arena and addressed by `NodeKey`.

use std::sync::Arc;
use bitflags::bitflags;
use rustc_hash::FxHashMap;
use slotmap::new_key_type;
use crate::camera::PassCamera;
use super::callbacks::NodeCallback;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a node within a SceneGraph.
    ///
    /// Generational: a key held by a callback stops resolving as soon as
    /// its node is removed, even if the slot is reused later.
    pub struct NodeKey;
}

// ===== MASKS =====

bitflags! {
    /// Node mask bits, tested against a camera cull mask during culling.
    ///
    /// A node is drawn by a camera when `node_mask & cull_mask` is non-empty.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeMask: u32 {
        /// Opaque scene geometry
        const SCENE_GEOMETRY = 1 << 0;
        /// Transparent geometry and effects
        const TRANSPARENT_EFFECTS = 1 << 1;
        /// Multipass output (PPU processor subtree)
        const MULTIPASS = 1 << 2;
        /// Overlays drawn by the main camera only (HUD, editor gizmos)
        const OVERLAY = 1 << 3;
    }
}

impl NodeMask {
    /// Cull mask of the main camera while a multipass scene is active:
    /// it only draws the PPU output and overlays.
    pub const MAIN_CAMERA_MULTIPASS: NodeMask = NodeMask::MULTIPASS.union(NodeMask::OVERLAY);

    /// Cull mask of the multipass capture camera: scene geometry, never the
    /// multipass subtree (disjoint from `MAIN_CAMERA_MULTIPASS`).
    pub const ADDITIONAL_CAMERA_MULTIPASS: NodeMask =
        NodeMask::SCENE_GEOMETRY.union(NodeMask::TRANSPARENT_EFFECTS);

    /// Cull mask of the pre-depth camera: opaque geometry only.
    pub const MULTIPASS_DEPTH_ONLY: NodeMask = NodeMask::SCENE_GEOMETRY;
}

impl Default for NodeMask {
    fn default() -> Self {
        NodeMask::all()
    }
}

// ===== STATE SET =====

/// Value carried by a uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

/// How often a uniform changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataVariance {
    /// Set once, never changes afterwards
    Static,
    /// Changes during the frame (e.g. toggled around a draw)
    Dynamic,
}

/// Named shader uniform attached to a node's state set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    pub value: UniformValue,
    pub variance: DataVariance,
}

/// Render state attached to a node (uniforms only).
#[derive(Debug, Clone, Default)]
pub struct StateSet {
    uniforms: FxHashMap<String, Uniform>,
}

impl StateSet {
    /// Get a uniform by name
    pub fn uniform(&self, name: &str) -> Option<&Uniform> {
        self.uniforms.get(name)
    }

    /// Get a uniform, creating it with `default` if missing
    pub fn get_or_create_uniform(&mut self, name: &str, default: UniformValue) -> &mut Uniform {
        self.uniforms.entry(name.to_string()).or_insert(Uniform {
            value: default,
            variance: DataVariance::Static,
        })
    }

    /// Boolean value of a uniform, if it exists and holds a bool
    pub fn bool_uniform(&self, name: &str) -> Option<bool> {
        match self.uniforms.get(name)?.value {
            UniformValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Number of uniforms
    pub fn uniform_count(&self) -> usize {
        self.uniforms.len()
    }
}

// ===== NODE =====

/// What a node is
pub enum NodeKind {
    /// Plain grouping node
    Group,
    /// Camera node: its children are rendered as a separate pass
    Camera(Box<PassCamera>),
    /// Attachment point of a PPU processor in the scene graph
    Processor,
}

/// Scene graph node
pub struct Node {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) parents: Vec<NodeKey>,
    pub(crate) mask: NodeMask,
    pub(crate) state: Option<StateSet>,
    pub(crate) update_callback: Option<Arc<dyn NodeCallback>>,
}

impl Node {
    pub(crate) fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            children: Vec::new(),
            parents: Vec::new(),
            mask: NodeMask::default(),
            state: None,
            update_callback: None,
        }
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node kind
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether this node is a camera
    pub fn is_camera(&self) -> bool {
        matches!(self.kind, NodeKind::Camera(_))
    }

    /// Children, in insertion order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Parents, in insertion order
    pub fn parents(&self) -> &[NodeKey] {
        &self.parents
    }

    /// Node mask
    pub fn mask(&self) -> NodeMask {
        self.mask
    }

    /// State set, if one was created
    pub fn state_set(&self) -> Option<&StateSet> {
        self.state.as_ref()
    }

    /// Whether an update callback is installed
    pub fn has_update_callback(&self) -> bool {
        self.update_callback.is_some()
    }
}
