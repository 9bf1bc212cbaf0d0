/// Post-processing unit - a named stage in a processor's unit graph.
///
/// Units are fully configured values; they are handed to a `Processor`
/// which owns them and wires the edges.

use slotmap::new_key_type;
use crate::camera::BufferComponent;
use crate::scene_graph::NodeKey;

new_key_type! {
    /// Stable key for a Unit within a Processor.
    pub struct UnitKey;
}

/// What a unit does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitKind {
    /// Brings a camera's output into the pipeline
    Camera { camera: NodeKey },
    /// Passes one camera attachment through unmodified
    CameraAttachmentBypass { component: BufferComponent },
    /// Passes the depth buffer through unmodified
    DepthBufferBypass,
    /// Rescales its input by independent X/Y factors
    InResampleOut { factor_x: f32, factor_y: f32 },
    /// Generic input/output processing stage
    InOut,
    /// Terminal sink writing the pipeline result to the framebuffer
    Out {
        /// Input whose size defines the output viewport (-1: use the camera viewport)
        viewport_reference_index: i32,
    },
}

/// A stage in the PPU graph
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub(crate) name: String,
    pub(crate) kind: UnitKind,
    pub(crate) children: Vec<UnitKey>,
    pub(crate) parents: Vec<UnitKey>,
}

impl Unit {
    /// Create an unnamed unit of the given kind
    pub fn new(kind: UnitKind) -> Self {
        Self {
            name: String::new(),
            kind,
            children: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Camera capture unit
    pub fn camera(camera: NodeKey) -> Self {
        Self::new(UnitKind::Camera { camera })
    }

    /// Camera attachment bypass unit
    pub fn camera_attachment_bypass(component: BufferComponent) -> Self {
        Self::new(UnitKind::CameraAttachmentBypass { component })
    }

    /// Depth buffer bypass unit
    pub fn depth_buffer_bypass() -> Self {
        Self::new(UnitKind::DepthBufferBypass)
    }

    /// Resample unit with the same factor on both axes
    pub fn in_resample_out(factor: f32) -> Self {
        Self::new(UnitKind::InResampleOut { factor_x: factor, factor_y: factor })
    }

    /// Generic processing unit
    pub fn in_out() -> Self {
        Self::new(UnitKind::InOut)
    }

    /// Output unit using the camera viewport
    pub fn out() -> Self {
        Self::new(UnitKind::Out { viewport_reference_index: -1 })
    }

    /// Set the name (builder style)
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    /// Set the resample factors. Returns false for non-resample units.
    pub fn set_resample_factors(&mut self, x: f32, y: f32) -> bool {
        match &mut self.kind {
            UnitKind::InResampleOut { factor_x, factor_y } => {
                *factor_x = x;
                *factor_y = y;
                true
            }
            _ => false,
        }
    }

    /// Out-edges, in insertion order
    pub fn children(&self) -> &[UnitKey] {
        &self.children
    }

    /// In-edges, in insertion order
    pub fn parents(&self) -> &[UnitKey] {
        &self.parents
    }
}
