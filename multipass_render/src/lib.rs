/*!
# Multipass Render

Multi-pass scene rendering pipeline builder.

Renders the main scene of a scene graph through an off-screen capture
camera and a post-processing unit (PPU) graph, with an optional depth
pre-pass, and keeps every auxiliary camera locked to the main view.

## Architecture

- **SceneGraph**: arena of group, camera and processor nodes
- **PassCamera**: render pass camera with attachments, masks and draw callbacks
- **create_render_texture**: render target factory
- **setup_pass_camera**: render-to-texture camera configuration
- **Processor**: PPU unit graph bound to a camera
- **MultipassScene**: builds the cameras and unit graph on top of a SceneManager
- **SceneManager**: owns the graph and drives frames
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod ppu;
pub mod property;
pub mod scene;
pub mod scene_graph;
pub mod target;

// Main multipass namespace module
pub mod multipass {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Render target sub-module
    pub mod target {
        pub use crate::target::*;
    }

    // Scene graph sub-module
    pub mod scene_graph {
        pub use crate::scene_graph::*;
    }

    // PPU sub-module
    pub mod ppu {
        pub use crate::ppu::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Property sub-module
    pub mod property {
        pub use crate::property::*;
    }
}

// Re-export math library at crate root
pub use glam;
