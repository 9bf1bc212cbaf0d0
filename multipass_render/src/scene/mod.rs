//! Scene module
//!
//! Scene manager and frame driver, the scene abstraction, the multipass
//! scene builder and the stock post-processing scene.

mod depth_pass;
mod frame;
mod multipass_config;
mod multipass_scene;
mod ppu_scene;
mod scene_base;
mod scene_manager;

pub use depth_pass::{DepthOnlyPassCallback, DrawPhase, UNIFORM_DEPTH_ONLY_PASS};
pub use frame::{DrawRecord, FrameReport};
pub use multipass_config::MultipassConfig;
pub use multipass_scene::{AttachedScene, MultipassScene};
pub use ppu_scene::PpuScene;
pub use scene_base::{GraphicsQuality, PostProcessScene, SceneBase, SceneType};
pub use scene_manager::SceneManager;
