/// Stock post-processing scene: one generic unit named after the scene.
///
/// A multipass scene splices it into its pipeline through `add_scene`,
/// either below the processor root or below the pipeline's last unit.

use crate::engine_bail;
use crate::error::Result;
use crate::ppu::{Processor, Unit, UnitKey};
use crate::scene_graph::NodeKey;
use super::scene_base::{GraphicsQuality, PostProcessScene, SceneBase, SceneType};
use super::scene_manager::SceneManager;

const LOG_SOURCE: &str = "multipass::PpuScene";

pub struct PpuScene {
    name: String,
    scene_node: Option<NodeKey>,
    first_unit: Option<UnitKey>,
    add_to_root_ppu_scene: bool,
    add_to_multipass_output: bool,
}

impl PpuScene {
    pub const SCENE_TYPE: SceneType = SceneType {
        name: "PPU Scene",
        category: "Scene",
        description: "Adds a post processing stage to a multipass scene.",
    };

    /// Create a scene attaching below the multipass output by default
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scene_node: None,
            first_unit: None,
            add_to_root_ppu_scene: false,
            add_to_multipass_output: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_add_to_root_ppu_scene(&mut self, value: bool) {
        self.add_to_root_ppu_scene = value;
    }

    pub fn set_add_to_multipass_output(&mut self, value: bool) {
        self.add_to_multipass_output = value;
    }
}

impl SceneBase for PpuScene {
    fn scene_type(&self) -> SceneType {
        Self::SCENE_TYPE
    }

    fn scene_node(&self) -> Option<NodeKey> {
        self.scene_node
    }

    fn create_scene(&mut self, manager: &mut SceneManager, _quality: GraphicsQuality) -> Result<()> {
        if self.scene_node.is_some() {
            engine_bail!(LOG_SOURCE, "PPU scene '{}' already created", self.name);
        }
        let root = manager.scene_node();
        let node = manager.graph_mut().create_group(&self.name);
        manager.graph_mut().add_child(root, node)?;
        self.scene_node = Some(node);
        Ok(())
    }

    fn as_ppu_scene(&mut self) -> Option<&mut dyn PostProcessScene> {
        Some(self)
    }
}

impl PostProcessScene for PpuScene {
    fn add_to_root_ppu_scene(&self) -> bool {
        self.add_to_root_ppu_scene
    }

    fn add_to_multipass_output(&self) -> bool {
        self.add_to_multipass_output
    }

    fn first_unit(&self) -> Option<UnitKey> {
        self.first_unit
    }

    fn attach_units(&mut self, processor: &mut Processor, parent: Option<UnitKey>) -> Result<UnitKey> {
        if let Some(existing) = self.first_unit.filter(|&key| processor.contains(key)) {
            engine_bail!(LOG_SOURCE, "PPU scene '{}' is already attached as unit {:?}", self.name, existing);
        }

        let unit = processor.add_unit(Unit::in_out().with_name(&self.name));
        let attached = match parent {
            Some(parent) => processor.add_child(parent, unit),
            None => processor.add_to_root(unit),
        };
        if let Err(error) = attached {
            processor.remove_unit(unit);
            return Err(error);
        }

        self.first_unit = Some(unit);
        Ok(unit)
    }
}

#[cfg(test)]
#[path = "ppu_scene_tests.rs"]
mod tests;
