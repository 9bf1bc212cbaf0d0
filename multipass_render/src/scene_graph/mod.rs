//! Scene graph module
//!
//! Minimal scene graph the multipass pipeline is wired on: an arena of
//! group, camera and processor nodes with masks, uniforms, update
//! callbacks and camera draw callbacks.

mod callbacks;
mod node;
mod scene_graph;

pub use callbacks::{DrawCallback, NodeCallback};
pub use node::{
    DataVariance, Node, NodeKey, NodeKind, NodeMask, StateSet, Uniform, UniformValue,
};
pub use scene_graph::{CullResult, SceneGraph};
