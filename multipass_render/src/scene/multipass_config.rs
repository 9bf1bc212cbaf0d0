/// Feature toggles and formats of a multipass scene.
///
/// Read once by `MultipassScene::create_scene`; changing them afterwards
/// does not alter the built pipeline.

use crate::target::ImageFormat;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultipassConfig {
    /// Capture the main color buffer through a bypass unit
    pub enable_color_bypass: bool,
    /// Capture the main depth buffer through a bypass unit
    pub enable_depth_bypass: bool,
    /// Resample the captured color (needs the color bypass)
    pub enable_resample_color: bool,
    /// Scale applied on both axes by the resample unit
    pub color_resample_factor: f32,
    /// Render a depth-only pass before the color pass
    pub enable_pre_depth_pass: bool,
    pub color_image_format: ImageFormat,
    pub depth_image_format: ImageFormat,
    pub pre_depth_image_format: ImageFormat,
}

impl Default for MultipassConfig {
    fn default() -> Self {
        Self {
            enable_color_bypass: true,
            enable_depth_bypass: true,
            enable_resample_color: true,
            color_resample_factor: 0.5,
            enable_pre_depth_pass: true,
            color_image_format: ImageFormat::RGBA16F,
            depth_image_format: ImageFormat::DEPTH_COMPONENT,
            pre_depth_image_format: ImageFormat::DEPTH_COMPONENT32,
        }
    }
}

impl MultipassConfig {
    pub fn with_color_bypass(mut self, enable: bool) -> Self {
        self.enable_color_bypass = enable;
        self
    }

    pub fn with_depth_bypass(mut self, enable: bool) -> Self {
        self.enable_depth_bypass = enable;
        self
    }

    pub fn with_resample_color(mut self, enable: bool) -> Self {
        self.enable_resample_color = enable;
        self
    }

    pub fn with_color_resample_factor(mut self, factor: f32) -> Self {
        self.color_resample_factor = factor;
        self
    }

    pub fn with_pre_depth_pass(mut self, enable: bool) -> Self {
        self.enable_pre_depth_pass = enable;
        self
    }

    pub fn with_color_image_format(mut self, format: ImageFormat) -> Self {
        self.color_image_format = format;
        self
    }

    pub fn with_depth_image_format(mut self, format: ImageFormat) -> Self {
        self.depth_image_format = format;
        self
    }

    pub fn with_pre_depth_image_format(mut self, format: ImageFormat) -> Self {
        self.pre_depth_image_format = format;
        self
    }
}
