/// Render texture - a 2D image a camera renders into.
///
/// Created by `create_render_texture()` and shared (`Arc`) between the
/// camera attachment slot and whoever else samples it (PPU units, builders).
/// Immutable after creation.

/// Internal storage format tag.
///
/// Consumed verbatim: the renderer never validates a tag against hardware
/// capabilities. The constants cover the formats the multipass scene uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageFormat(pub i32);

impl ImageFormat {
    pub const RGBA8: ImageFormat = ImageFormat(0x8058);
    pub const RGBA16F: ImageFormat = ImageFormat(0x881A);
    pub const RGBA32F: ImageFormat = ImageFormat(0x8814);
    pub const DEPTH_COMPONENT: ImageFormat = ImageFormat(0x1902);
    pub const DEPTH_COMPONENT24: ImageFormat = ImageFormat(0x81A6);
    pub const DEPTH_COMPONENT32: ImageFormat = ImageFormat(0x81A7);
}

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Channel layout of the source data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Rgba,
    DepthComponent,
}

/// Element type of the source data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Float,
}

/// Off-screen 2D render texture
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTexture {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) min_filter: FilterMode,
    pub(crate) mag_filter: FilterMode,
    pub(crate) source_format: SourceFormat,
    pub(crate) source_type: SourceType,
    pub(crate) internal_format: ImageFormat,
}

impl RenderTexture {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn min_filter(&self) -> FilterMode {
        self.min_filter
    }

    pub fn mag_filter(&self) -> FilterMode {
        self.mag_filter
    }

    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn internal_format(&self) -> ImageFormat {
        self.internal_format
    }

    /// Whether this texture captures depth
    pub fn is_depth(&self) -> bool {
        self.source_format == SourceFormat::DepthComponent
    }
}
