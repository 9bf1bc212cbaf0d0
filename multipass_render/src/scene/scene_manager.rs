//! Scene manager: owns the scene graph, the scene root and the main camera,
//! and drives frames.

use crate::engine_error;
use crate::error::{Error, Result};
use crate::camera::PassCamera;
use crate::scene_graph::{NodeKey, SceneGraph};
use super::depth_pass::UNIFORM_DEPTH_ONLY_PASS;
use super::frame::{DrawRecord, FrameReport};
use super::scene_base::{GraphicsQuality, SceneBase};

const LOG_SOURCE: &str = "multipass::SceneManager";

pub struct SceneManager {
    graph: SceneGraph,
    /// Root of the rendered content, shared by every pass camera
    scene_node: NodeKey,
    main_camera: Option<NodeKey>,
    frame_number: u64,
}

impl SceneManager {
    /// Create a scene manager with an empty scene root and no main camera
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let scene_node = graph.create_group("SceneRoot");
        Self {
            graph,
            scene_node,
            main_camera: None,
            frame_number: 0,
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Root node of the rendered content
    pub fn scene_node(&self) -> NodeKey {
        self.scene_node
    }

    /// Main scene camera, if one is set and still alive
    pub fn main_camera(&self) -> Option<NodeKey> {
        self.main_camera.filter(|&key| self.graph.camera(key).is_some())
    }

    /// Make an existing camera node the main camera.
    ///
    /// The scene root is parented under it.
    ///
    /// # Errors
    ///
    /// `camera` is not a live camera node.
    pub fn set_main_camera(&mut self, camera: NodeKey) -> Result<()> {
        if self.graph.camera(camera).is_none() {
            engine_error!(LOG_SOURCE, "Main camera must be a live camera node");
            return Err(Error::InvalidResource("main camera is not a camera node".to_string()));
        }
        self.graph.add_child(camera, self.scene_node)?;
        self.main_camera = Some(camera);
        Ok(())
    }

    /// Create a camera node and make it the main camera
    pub fn create_main_camera(&mut self, name: &str, camera: PassCamera) -> Result<NodeKey> {
        let key = self.graph.create_camera(name, camera);
        self.set_main_camera(key)?;
        Ok(key)
    }

    /// Build a scene into this manager
    pub fn create_scene(&mut self, scene: &mut dyn SceneBase, quality: GraphicsQuality) -> Result<()> {
        scene.create_scene(self, quality)
    }

    /// Number of frames rendered so far
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Run one frame: update traversal, then every camera pass in render order.
    ///
    /// Without a main camera nothing is rendered and the report is empty.
    pub fn frame(&mut self) -> FrameReport {
        self.frame_number += 1;
        let mut report = FrameReport {
            frame_number: self.frame_number,
            draws: Vec::new(),
        };

        let Some(main_camera) = self.main_camera() else {
            return report;
        };

        self.graph.update(main_camera);

        for camera in self.graph.render_passes(main_camera) {
            if let Some(draw) = self.draw_camera(camera) {
                report.draws.push(draw);
            }
        }
        report
    }

    fn draw_camera(&mut self, camera: NodeKey) -> Option<DrawRecord> {
        let pre_draw = self.graph.camera(camera)?.pre_draw_callback().cloned();
        if let Some(callback) = pre_draw {
            callback.draw(&mut self.graph, camera);
        }

        let culled = self.graph.cull(camera);
        let depth_only_pass = self
            .graph
            .node(self.scene_node)
            .and_then(|node| node.state_set())
            .and_then(|state| state.bool_uniform(UNIFORM_DEPTH_ONLY_PASS))
            .unwrap_or(false);

        let pass_camera = self.graph.camera(camera)?;
        let record = DrawRecord {
            camera,
            camera_name: self.graph.node(camera).map(|n| n.name().to_string()).unwrap_or_default(),
            drawn: culled.drawn,
            view: *pass_camera.view_matrix(),
            projection: *pass_camera.projection_matrix(),
            depth_only_pass,
        };

        let post_draw = pass_camera.post_draw_callback().cloned();
        if let Some(callback) = post_draw {
            callback.draw(&mut self.graph, camera);
        }
        Some(record)
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;
