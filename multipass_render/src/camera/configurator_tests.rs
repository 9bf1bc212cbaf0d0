/// Tests for setup_pass_camera
///
/// These tests validate clear state, attachments and the returned
/// texture for every color/depth combination.

use crate::error::Error;
use crate::target::{ImageFormat, SourceFormat, FilterMode};
use super::*;

fn formats() -> AttachmentFormats {
    AttachmentFormats {
        color: ImageFormat::RGBA16F,
        depth: ImageFormat::DEPTH_COMPONENT,
    }
}

fn viewport() -> Viewport {
    Viewport::new(0.0, 0.0, 800.0, 600.0)
}

// ============================================================================
// Tests: Color + depth
// ============================================================================

#[test]
fn test_color_and_depth_returns_color_texture() {
    let mut camera = PassCamera::new();
    let texture = setup_pass_camera(&mut camera, viewport(), true, true, formats()).unwrap();

    assert_eq!(texture.source_format(), SourceFormat::Rgba);
    assert!(Arc::ptr_eq(camera.attachment(BufferComponent::ColorBuffer0).unwrap(), &texture));
    assert!(camera.attachment(BufferComponent::DepthBuffer).unwrap().is_depth());
    assert_eq!(camera.attachment_count(), 2);
}

#[test]
fn test_color_pass_clear_state() {
    let mut camera = PassCamera::new();
    setup_pass_camera(&mut camera, viewport(), true, false, formats()).unwrap();

    assert_eq!(camera.clear_color(), CLEAR_COLOR_TRANSPARENT);
    assert_eq!(camera.clear_mask(), ClearMask::COLOR | ClearMask::DEPTH);
}

#[test]
fn test_common_settings_applied() {
    let mut camera = PassCamera::new();
    setup_pass_camera(&mut camera, viewport(), true, true, formats()).unwrap();

    assert_eq!(camera.viewport(), Some(&viewport()));
    assert_eq!(camera.compute_near_far(), ComputeNearFar::DoNotCompute);
    assert_eq!(camera.render_target_implementation(), RenderTargetImplementation::FrameBufferObject);
}

#[test]
fn test_textures_match_viewport_size_and_formats() {
    let mut camera = PassCamera::new();
    setup_pass_camera(&mut camera, viewport(), true, true, formats()).unwrap();

    let color = camera.attachment(BufferComponent::ColorBuffer0).unwrap();
    let depth = camera.attachment(BufferComponent::DepthBuffer).unwrap();
    assert_eq!((color.width(), color.height()), (800, 600));
    assert_eq!((depth.width(), depth.height()), (800, 600));
    assert_eq!(color.internal_format(), ImageFormat::RGBA16F);
    assert_eq!(depth.internal_format(), ImageFormat::DEPTH_COMPONENT);
    assert_eq!(color.min_filter(), FilterMode::Linear);
    assert_eq!(depth.min_filter(), FilterMode::Nearest);
}

// ============================================================================
// Tests: Depth only
// ============================================================================

#[test]
fn test_depth_only_returns_depth_texture() {
    let mut camera = PassCamera::new();
    let texture = setup_pass_camera(&mut camera, viewport(), false, true, formats()).unwrap();

    assert!(texture.is_depth());
    assert_eq!(camera.clear_color(), CLEAR_COLOR_DEPTH_ONLY);
    assert_eq!(camera.clear_mask(), ClearMask::DEPTH);
}

#[test]
fn test_depth_only_detaches_existing_color() {
    let mut camera = PassCamera::new();
    setup_pass_camera(&mut camera, viewport(), true, false, formats()).unwrap();
    assert!(camera.attachment(BufferComponent::ColorBuffer0).is_some());

    setup_pass_camera(&mut camera, viewport(), false, true, formats()).unwrap();
    assert!(camera.attachment(BufferComponent::ColorBuffer0).is_none());

    // Detach is idempotent
    setup_pass_camera(&mut camera, viewport(), false, true, formats()).unwrap();
    assert!(camera.attachment(BufferComponent::ColorBuffer0).is_none());
    assert_eq!(camera.attachment_count(), 1);
}

// ============================================================================
// Tests: Nothing requested
// ============================================================================

#[test]
fn test_neither_color_nor_depth_fails() {
    let mut camera = PassCamera::new();
    let result = setup_pass_camera(&mut camera, viewport(), false, false, formats());

    match result {
        Err(Error::BackendError(msg)) => assert!(msg.contains("either color or depth")),
        _ => panic!("Expected BackendError"),
    }
    assert_eq!(camera.attachment_count(), 0);
    assert!(camera.viewport().is_none());
}

#[test]
fn test_sub_pixel_viewport_fails() {
    let mut camera = PassCamera::new();
    let result = setup_pass_camera(&mut camera, Viewport::new(0.0, 0.0, 0.5, 0.5), true, true, formats());

    match result {
        Err(Error::BackendError(msg)) => assert!(msg.contains("too small")),
        _ => panic!("Expected BackendError"),
    }
    assert_eq!(camera.attachment_count(), 0);
    assert!(camera.viewport().is_none());
}

#[test]
fn test_negative_or_nan_viewport_fails() {
    let mut camera = PassCamera::new();
    assert!(setup_pass_camera(&mut camera, Viewport::new(0.0, 0.0, -800.0, 600.0), true, false, formats()).is_err());
    assert!(setup_pass_camera(&mut camera, Viewport::new(0.0, 0.0, 800.0, f32::NAN), false, true, formats()).is_err());
    assert_eq!(camera.attachment_count(), 0);
    assert_eq!(camera.render_target_implementation(), RenderTargetImplementation::FrameBuffer);
}
