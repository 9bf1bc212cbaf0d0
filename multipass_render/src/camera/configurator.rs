/// Pass camera configuration for render-to-texture.
///
/// Sets clear state, viewport, near/far policy and FBO mode on a camera,
/// then allocates and attaches its depth and/or color textures.

use std::sync::Arc;
use glam::Vec4;
use crate::error::Result;
use crate::{engine_bail, engine_err};
use crate::target::{create_render_texture, ImageFormat, RenderTexture};
use super::camera::{
    BufferComponent, ClearMask, ComputeNearFar, PassCamera, RenderTargetImplementation, Viewport,
};

/// Internal formats used for the textures a pass camera attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentFormats {
    pub color: ImageFormat,
    pub depth: ImageFormat,
}

/// Clear color of passes that write color
pub const CLEAR_COLOR_TRANSPARENT: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);

/// Clear color of depth-only passes (visual marker when inspecting the target)
pub const CLEAR_COLOR_DEPTH_ONLY: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

/// Configure `camera` to render into textures sized to `viewport`.
///
/// Depth is attached first (nearest filtering), then color on slot 0
/// (linear filtering). Returns the last attached texture: the color
/// texture when both are requested. A depth-only setup detaches any
/// existing color attachment.
///
/// # Errors
///
/// - neither color nor depth requested
/// - the viewport truncates to a zero-sized texture (sub-pixel, negative
///   or NaN width or height)
///
/// The camera is left untouched on error.
pub fn setup_pass_camera(
    camera: &mut PassCamera,
    viewport: Viewport,
    use_color: bool,
    use_depth: bool,
    formats: AttachmentFormats,
) -> Result<Arc<RenderTexture>> {
    if !use_color && !use_depth {
        engine_bail!("multipass::CameraConfigurator",
            "Must attach a texture either color or depth for a multipass camera");
    }

    let width = viewport.width as u32;
    let height = viewport.height as u32;
    if width == 0 || height == 0 {
        engine_bail!("multipass::CameraConfigurator",
            "Viewport {}x{} is too small for a render texture", viewport.width, viewport.height);
    }

    let mut clear_mask = ClearMask::DEPTH;
    if use_color {
        camera.set_clear_color(CLEAR_COLOR_TRANSPARENT);
        clear_mask |= ClearMask::COLOR;
    } else {
        camera.set_clear_color(CLEAR_COLOR_DEPTH_ONLY);
    }
    camera.set_clear_mask(clear_mask);

    camera.set_viewport(viewport);
    camera.set_compute_near_far(ComputeNearFar::DoNotCompute);
    camera.set_render_target_implementation(RenderTargetImplementation::FrameBufferObject);

    let mut depth_texture = None;
    if use_depth {
        let texture = create_render_texture(width, height, true, true, formats.depth);
        if !use_color {
            camera.detach(BufferComponent::ColorBuffer0);
        }
        camera.attach(BufferComponent::DepthBuffer, texture.clone());
        depth_texture = Some(texture);
    }

    if !use_color {
        return depth_texture.ok_or_else(|| engine_err!("multipass::CameraConfigurator",
            "Depth attachment missing after depth-only setup"));
    }

    let color_texture = create_render_texture(width, height, false, false, formats.color);
    camera.attach(BufferComponent::ColorBuffer0, color_texture.clone());
    Ok(color_texture)
}

#[cfg(test)]
#[path = "configurator_tests.rs"]
mod tests;
