/// Depth-only pass toggle.
///
/// Installed as pre and post draw callback of the pre-depth camera: shaders
/// of the shared scene read `d3d_DepthOnlyPass` to skip color work while
/// the depth pass is drawn.

use crate::scene_graph::{DataVariance, DrawCallback, NodeKey, SceneGraph, UniformValue};

/// Boolean uniform set on the scene root while the pre-depth pass draws
pub const UNIFORM_DEPTH_ONLY_PASS: &str = "d3d_DepthOnlyPass";

/// When the callback runs relative to the camera's draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    PreDraw,
    PostDraw,
}

/// Sets `d3d_DepthOnlyPass` on a node: true before the draw, false after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthOnlyPassCallback {
    depth_camera: NodeKey,
    state_node: NodeKey,
    phase: DrawPhase,
}

impl DepthOnlyPassCallback {
    pub fn new(depth_camera: NodeKey, state_node: NodeKey, phase: DrawPhase) -> Self {
        Self { depth_camera, state_node, phase }
    }

    pub fn depth_camera(&self) -> NodeKey {
        self.depth_camera
    }

    /// Node whose state set carries the uniform
    pub fn state_node(&self) -> NodeKey {
        self.state_node
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    /// Write the uniform. Returns false if the state node is gone.
    pub fn apply(&self, graph: &mut SceneGraph) -> bool {
        let Some(state) = graph.get_or_create_state_set(self.state_node) else {
            return false;
        };

        let uniform = state.get_or_create_uniform(UNIFORM_DEPTH_ONLY_PASS, UniformValue::Bool(false));
        uniform.variance = DataVariance::Dynamic;
        uniform.value = UniformValue::Bool(self.phase == DrawPhase::PreDraw);
        true
    }
}

impl DrawCallback for DepthOnlyPassCallback {
    fn draw(&self, graph: &mut SceneGraph, _camera: NodeKey) {
        self.apply(graph);
    }
}

#[cfg(test)]
#[path = "depth_pass_tests.rs"]
mod tests;
