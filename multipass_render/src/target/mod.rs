//! Render target module
//!
//! Off-screen textures that pass cameras render into, and the factory
//! that allocates them.

mod render_texture;
mod target_factory;

pub use render_texture::{
    FilterMode, ImageFormat, RenderTexture, SourceFormat, SourceType,
};
pub use target_factory::create_render_texture;
