/// PassCamera - render pass camera stored in a scene graph camera node.
///
/// Holds everything a pass needs to render its subgraph: matrices,
/// viewport, clear state, attachments, render order and cull mask.
/// The camera computes nothing; builders and callbacks set its fields.

use std::fmt;
use std::sync::Arc;
use bitflags::bitflags;
use glam::{Mat4, Vec4};
use crate::scene_graph::{DrawCallback, NodeMask};
use crate::target::RenderTexture;

/// Viewport rectangle and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-depth-range viewport at the given origin and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height, min_depth: 0.0, max_depth: 1.0 }
    }
}

bitflags! {
    /// Buffers cleared at the start of a pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Attachment slot of a camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferComponent {
    /// First color attachment
    ColorBuffer0,
    /// Depth attachment
    DepthBuffer,
}

/// Near/far plane policy during culling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeNearFar {
    /// Tighten near/far to the bounding volumes of drawn nodes
    UsingBoundingVolumes,
    /// Keep the projection's near/far exactly as set
    DoNotCompute,
}

/// Where the camera renders to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTargetImplementation {
    /// The window framebuffer
    FrameBuffer,
    /// An off-screen framebuffer object
    FrameBufferObject,
}

/// Whether matrices are relative to the parent camera or absolute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFrame {
    Relative,
    Absolute,
}

/// Render stage of a camera relative to its parent camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderOrder {
    /// Rendered before the parent camera
    PreRender,
    /// Rendered inline with the parent camera
    NestedRender,
    /// Rendered after the parent camera
    PostRender,
}

/// Render pass camera
pub struct PassCamera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    reference_frame: ReferenceFrame,
    viewport: Option<Viewport>,
    clear_color: Vec4,
    clear_mask: ClearMask,
    compute_near_far: ComputeNearFar,
    render_target_implementation: RenderTargetImplementation,
    color_attachment: Option<Arc<RenderTexture>>,
    depth_attachment: Option<Arc<RenderTexture>>,
    render_order: RenderOrder,
    render_order_priority: i32,
    cull_mask: NodeMask,
    pre_draw_callback: Option<Arc<dyn DrawCallback>>,
    post_draw_callback: Option<Arc<dyn DrawCallback>>,
}

impl PassCamera {
    /// Create a camera with identity matrices, no viewport and no attachments.
    pub fn new() -> Self {
        Self {
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            reference_frame: ReferenceFrame::Relative,
            viewport: None,
            clear_color: Vec4::new(0.2, 0.2, 0.4, 1.0),
            clear_mask: ClearMask::COLOR | ClearMask::DEPTH,
            compute_near_far: ComputeNearFar::UsingBoundingVolumes,
            render_target_implementation: RenderTargetImplementation::FrameBuffer,
            color_attachment: None,
            depth_attachment: None,
            render_order: RenderOrder::NestedRender,
            render_order_priority: 0,
            cull_mask: NodeMask::all(),
            pre_draw_callback: None,
            post_draw_callback: None,
        }
    }

    /// Create a window camera with a viewport and projection.
    pub fn with_viewport(viewport: Viewport, projection: Mat4) -> Self {
        let mut camera = Self::new();
        camera.viewport = Some(viewport);
        camera.projection_matrix = projection;
        camera
    }

    // ===== MATRICES =====

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    pub fn reference_frame(&self) -> ReferenceFrame {
        self.reference_frame
    }

    pub fn set_reference_frame(&mut self, frame: ReferenceFrame) {
        self.reference_frame = frame;
    }

    // ===== VIEWPORT / CLEAR =====

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
    }

    pub fn clear_mask(&self) -> ClearMask {
        self.clear_mask
    }

    pub fn set_clear_mask(&mut self, mask: ClearMask) {
        self.clear_mask = mask;
    }

    pub fn compute_near_far(&self) -> ComputeNearFar {
        self.compute_near_far
    }

    pub fn set_compute_near_far(&mut self, mode: ComputeNearFar) {
        self.compute_near_far = mode;
    }

    pub fn render_target_implementation(&self) -> RenderTargetImplementation {
        self.render_target_implementation
    }

    pub fn set_render_target_implementation(&mut self, implementation: RenderTargetImplementation) {
        self.render_target_implementation = implementation;
    }

    // ===== ATTACHMENTS =====

    /// Attach a texture to a slot, replacing any previous attachment
    pub fn attach(&mut self, component: BufferComponent, texture: Arc<RenderTexture>) {
        match component {
            BufferComponent::ColorBuffer0 => self.color_attachment = Some(texture),
            BufferComponent::DepthBuffer => self.depth_attachment = Some(texture),
        }
    }

    /// Detach a slot. Returns the texture that was attached, if any.
    ///
    /// Detaching an empty slot is a no-op.
    pub fn detach(&mut self, component: BufferComponent) -> Option<Arc<RenderTexture>> {
        match component {
            BufferComponent::ColorBuffer0 => self.color_attachment.take(),
            BufferComponent::DepthBuffer => self.depth_attachment.take(),
        }
    }

    /// Texture attached to a slot
    pub fn attachment(&self, component: BufferComponent) -> Option<&Arc<RenderTexture>> {
        match component {
            BufferComponent::ColorBuffer0 => self.color_attachment.as_ref(),
            BufferComponent::DepthBuffer => self.depth_attachment.as_ref(),
        }
    }

    /// Number of attached slots (0..=2)
    pub fn attachment_count(&self) -> usize {
        self.color_attachment.is_some() as usize + self.depth_attachment.is_some() as usize
    }

    // ===== RENDER ORDER / CULLING =====

    pub fn render_order(&self) -> RenderOrder {
        self.render_order
    }

    pub fn render_order_priority(&self) -> i32 {
        self.render_order_priority
    }

    /// Set the render stage and its priority (lower runs first)
    pub fn set_render_order(&mut self, order: RenderOrder, priority: i32) {
        self.render_order = order;
        self.render_order_priority = priority;
    }

    pub fn cull_mask(&self) -> NodeMask {
        self.cull_mask
    }

    pub fn set_cull_mask(&mut self, mask: NodeMask) {
        self.cull_mask = mask;
    }

    // ===== DRAW CALLBACKS =====

    pub fn pre_draw_callback(&self) -> Option<&Arc<dyn DrawCallback>> {
        self.pre_draw_callback.as_ref()
    }

    pub fn set_pre_draw_callback(&mut self, callback: Arc<dyn DrawCallback>) {
        self.pre_draw_callback = Some(callback);
    }

    pub fn post_draw_callback(&self) -> Option<&Arc<dyn DrawCallback>> {
        self.post_draw_callback.as_ref()
    }

    pub fn set_post_draw_callback(&mut self, callback: Arc<dyn DrawCallback>) {
        self.post_draw_callback = Some(callback);
    }
}

impl Default for PassCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PassCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassCamera")
            .field("viewport", &self.viewport)
            .field("clear_color", &self.clear_color)
            .field("clear_mask", &self.clear_mask)
            .field("render_order", &self.render_order)
            .field("render_order_priority", &self.render_order_priority)
            .field("cull_mask", &self.cull_mask)
            .field("attachments", &self.attachment_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
