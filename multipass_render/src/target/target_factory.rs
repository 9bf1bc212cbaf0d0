/// Render texture factory.
///
/// Allocates the color and depth textures attached to pass cameras.

use std::sync::Arc;
use super::render_texture::{
    FilterMode, ImageFormat, RenderTexture, SourceFormat, SourceType,
};

/// Create a 2D render texture of exactly `width` x `height`.
///
/// - `is_depth`: depth-component source layout, otherwise RGBA
/// - `use_nearest_filter`: nearest min/mag filtering, otherwise linear
/// - `internal_format`: stored verbatim, never validated
///
/// Width and height must be non-zero.
pub fn create_render_texture(
    width: u32,
    height: u32,
    is_depth: bool,
    use_nearest_filter: bool,
    internal_format: ImageFormat,
) -> Arc<RenderTexture> {
    debug_assert!(width > 0 && height > 0, "render texture size must be non-zero: {}x{}", width, height);

    let filter = if use_nearest_filter { FilterMode::Nearest } else { FilterMode::Linear };
    let source_format = if is_depth { SourceFormat::DepthComponent } else { SourceFormat::Rgba };

    Arc::new(RenderTexture {
        width,
        height,
        min_filter: filter,
        mag_filter: filter,
        source_format,
        source_type: SourceType::Float,
        internal_format,
    })
}

#[cfg(test)]
#[path = "target_factory_tests.rs"]
mod tests;
