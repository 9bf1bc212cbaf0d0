/// Per-frame report produced by `SceneManager::frame`.

use glam::Mat4;
use crate::scene_graph::NodeKey;

/// One camera pass of a frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub camera: NodeKey,
    pub camera_name: String,
    /// Nodes that passed the camera cull mask, in traversal order
    pub drawn: Vec<NodeKey>,
    pub view: Mat4,
    pub projection: Mat4,
    /// Value of the depth-only uniform on the scene root during the draw
    pub depth_only_pass: bool,
}

/// Every pass executed by one frame, in execution order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub frame_number: u64,
    pub draws: Vec<DrawRecord>,
}

impl FrameReport {
    /// Record of a camera's pass, if it was rendered
    pub fn draw_for(&self, camera: NodeKey) -> Option<&DrawRecord> {
        self.draws.iter().find(|draw| draw.camera == camera)
    }

    /// Cameras in execution order
    pub fn camera_order(&self) -> Vec<NodeKey> {
        self.draws.iter().map(|draw| draw.camera).collect()
    }

    /// Position of a camera's pass in the frame
    pub fn pass_index(&self, camera: NodeKey) -> Option<usize> {
        self.draws.iter().position(|draw| draw.camera == camera)
    }
}
