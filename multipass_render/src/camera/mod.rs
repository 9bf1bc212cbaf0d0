//! Camera module - pass cameras, render-to-texture setup and camera sync.
//!
//! Cameras live inside scene graph camera nodes. The engine configures
//! them for off-screen rendering and keeps auxiliary cameras locked to
//! the main view.

mod camera;
mod configurator;
mod sync;

pub use camera::{
    BufferComponent, ClearMask, ComputeNearFar, PassCamera, ReferenceFrame, RenderOrder,
    RenderTargetImplementation, Viewport,
};
pub use configurator::{
    setup_pass_camera, AttachmentFormats, CLEAR_COLOR_DEPTH_ONLY, CLEAR_COLOR_TRANSPARENT,
};
pub use sync::CameraSyncCallback;
