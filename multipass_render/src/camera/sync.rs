/// Camera synchronization callback.
///
/// Locks a follower camera onto a target camera: every update traversal
/// copies the target's projection and view matrices into the follower.

use crate::scene_graph::{NodeCallback, NodeKey, SceneGraph};
use super::camera::ReferenceFrame;

/// Update callback copying `target`'s matrices into `follower`.
///
/// Holds keys only. Once either camera is removed from the graph the
/// callback does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraSyncCallback {
    target: NodeKey,
    follower: NodeKey,
}

impl CameraSyncCallback {
    pub fn new(target: NodeKey, follower: NodeKey) -> Self {
        Self { target, follower }
    }

    /// Camera whose matrices are copied
    pub fn target(&self) -> NodeKey {
        self.target
    }

    /// Camera receiving the matrices
    pub fn follower(&self) -> NodeKey {
        self.follower
    }

    /// Copy the matrices once. Returns false if either camera is gone.
    pub fn sync(&self, graph: &mut SceneGraph) -> bool {
        let Some(target) = graph.camera(self.target) else {
            return false;
        };
        let projection = *target.projection_matrix();
        let view = *target.view_matrix();

        let Some(follower) = graph.camera_mut(self.follower) else {
            return false;
        };
        follower.set_reference_frame(ReferenceFrame::Absolute);
        follower.set_projection(projection);
        follower.set_view(view);
        true
    }
}

impl NodeCallback for CameraSyncCallback {
    fn update(&self, graph: &mut SceneGraph, _node: NodeKey) {
        self.sync(graph);
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
