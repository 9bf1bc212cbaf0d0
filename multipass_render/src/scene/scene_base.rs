/// Scene abstraction shared by every scene the scene manager can build.

use crate::error::Result;
use crate::ppu::{Processor, UnitKey};
use crate::scene_graph::NodeKey;
use super::scene_manager::SceneManager;

/// Identity of a scene type, as listed by tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneType {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

/// Requested graphics quality, forwarded to `create_scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum GraphicsQuality {
    Minimum,
    Low,
    #[default]
    Medium,
    High,
    Maximum,
}

/// A scene that builds its content into a scene manager's graph.
pub trait SceneBase {
    /// Scene type descriptor
    fn scene_type(&self) -> SceneType;

    /// Root node of this scene's content, once created
    fn scene_node(&self) -> Option<NodeKey>;

    /// Build the scene's nodes into `manager`.
    fn create_scene(&mut self, manager: &mut SceneManager, quality: GraphicsQuality) -> Result<()>;

    /// Post-processing capability, if this scene contributes PPU units
    fn as_ppu_scene(&mut self) -> Option<&mut dyn PostProcessScene> {
        None
    }
}

/// A scene contributing units to a PPU processor.
pub trait PostProcessScene {
    /// Attach below the processor root
    fn add_to_root_ppu_scene(&self) -> bool;

    /// Attach below the current last unit of a multipass pipeline
    fn add_to_multipass_output(&self) -> bool;

    /// Entry unit of this scene, once attached
    fn first_unit(&self) -> Option<UnitKey>;

    /// Insert this scene's units into `processor`, below `parent` or below
    /// the processor root when `parent` is `None`. Returns the entry unit.
    fn attach_units(&mut self, processor: &mut Processor, parent: Option<UnitKey>) -> Result<UnitKey>;
}
