/// Scene graph callback traits.
///
/// Callbacks never own the nodes they touch: they capture `NodeKey`s and
/// resolve them through the graph at invocation time. A key whose node has
/// been removed simply stops resolving, and the callback becomes a no-op.

use super::node::NodeKey;
use super::scene_graph::SceneGraph;

/// Update callback, invoked once per frame during the update traversal.
///
/// Runs after the node's subgraph has been updated, so anything it reads
/// from other nodes already reflects this frame.
pub trait NodeCallback: Send + Sync {
    /// Called for `node` during the update traversal
    fn update(&self, graph: &mut SceneGraph, node: NodeKey);
}

/// Camera draw callback, invoked right before or right after a camera's pass.
pub trait DrawCallback: Send + Sync {
    /// Called for `camera` around its draw
    fn draw(&self, graph: &mut SceneGraph, camera: NodeKey);
}
