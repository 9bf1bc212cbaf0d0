//! Multipass scene - renders the main scene through an off-screen camera
//! and a post-processing unit graph.
//!
//! Building the scene (see `create_scene`) wires, on top of the scene
//! manager's graph:
//!
//! - a multipass capture camera rendering the whole scene into textures,
//!   kept locked to the main camera every frame
//! - an optional pre-depth camera rendering opaque depth before it
//! - a PPU processor bound to the main camera, whose unit graph starts at
//!   the capture camera and ends in the `PipelineResult` output unit
//!
//! Other post-processing scenes splice into the pipeline through
//! `add_scene`, below the processor root or below `last_unit()`.

use std::sync::Arc;
use glam::Vec4;
use crate::camera::{
    setup_pass_camera, AttachmentFormats, BufferComponent, CameraSyncCallback, ClearMask,
    ComputeNearFar, PassCamera, RenderOrder, RenderTargetImplementation, Viewport,
};
use crate::error::{Error, Result};
use crate::ppu::{Processor, Unit, UnitKey};
use crate::property::{PropertyContainer, PropertyDesc, PropertyValue};
use crate::scene_graph::{NodeKey, NodeMask};
use crate::target::RenderTexture;
use crate::{engine_debug, engine_error, engine_info};
use super::depth_pass::{DepthOnlyPassCallback, DrawPhase};
use super::multipass_config::MultipassConfig;
use super::scene_base::{GraphicsQuality, SceneBase, SceneType};
use super::scene_manager::SceneManager;

const LOG_SOURCE: &str = "multipass::MultipassScene";

/// A post-processing scene attached through `add_scene`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachedScene {
    pub scene_type: SceneType,
    pub scene_node: Option<NodeKey>,
    /// Entry unit the scene inserted into the processor
    pub first_unit: UnitKey,
}

static MULTIPASS_PROPERTIES: [PropertyDesc; 5] = [
    PropertyDesc {
        name: "EnableColorBypass",
        label: "Enable Color Bypass",
        description: "Setting this true renders the scene using the main scene cull mask to a color buffer.",
        group: "MultipassScene",
    },
    PropertyDesc {
        name: "EnableResampleColor",
        label: "Enable Resample Color",
        description: "Setting this true resamples the main scene by the color resample factor.",
        group: "MultipassScene",
    },
    PropertyDesc {
        name: "ColorResampleFactor",
        label: "Color Resample Factor",
        description: "A scale representing the resampled main color buffer, set Enable Resample Color to true to use this.",
        group: "MultipassScene",
    },
    PropertyDesc {
        name: "EnableDepthBypass",
        label: "Enable Depth Bypass",
        description: "Setting this true saves a depth buffer with the main draw.",
        group: "MultipassScene",
    },
    PropertyDesc {
        name: "EnablePreDepthPass",
        label: "Enables a depth pass before rendering a view in the scene.",
        description: "Setting this true computes a predepth pass.",
        group: "MultipassScene",
    },
];

/// Main camera settings overwritten by the build, restored on release
struct MainCameraState {
    clear_color: Vec4,
    clear_mask: ClearMask,
    compute_near_far: ComputeNearFar,
    render_target_implementation: RenderTargetImplementation,
    color_attachment: Option<Arc<RenderTexture>>,
    cull_mask: NodeMask,
}

impl MainCameraState {
    fn capture(camera: &PassCamera) -> Self {
        Self {
            clear_color: camera.clear_color(),
            clear_mask: camera.clear_mask(),
            compute_near_far: camera.compute_near_far(),
            render_target_implementation: camera.render_target_implementation(),
            color_attachment: camera.attachment(BufferComponent::ColorBuffer0).cloned(),
            cull_mask: camera.cull_mask(),
        }
    }

    fn restore(self, camera: &mut PassCamera) {
        camera.set_clear_color(self.clear_color);
        camera.set_clear_mask(self.clear_mask);
        camera.set_compute_near_far(self.compute_near_far);
        camera.set_render_target_implementation(self.render_target_implementation);
        match self.color_attachment {
            Some(texture) => camera.attach(BufferComponent::ColorBuffer0, texture),
            None => {
                camera.detach(BufferComponent::ColorBuffer0);
            }
        }
        camera.set_cull_mask(self.cull_mask);
    }
}

pub struct MultipassScene {
    name: String,
    config: MultipassConfig,
    scene_node: Option<NodeKey>,

    main_camera: Option<NodeKey>,
    main_camera_state: Option<MainCameraState>,
    multipass_camera: Option<NodeKey>,
    pre_depth_camera: Option<NodeKey>,
    pre_depth_texture: Option<Arc<RenderTexture>>,

    processor: Option<Processor>,
    processor_node: Option<NodeKey>,
    camera_unit: Option<UnitKey>,
    color_bypass: Option<UnitKey>,
    depth_bypass: Option<UnitKey>,
    resample_color: Option<UnitKey>,
    unit_out: Option<UnitKey>,
    first_unit: Option<UnitKey>,
    last_unit: Option<UnitKey>,

    child_scenes: Vec<AttachedScene>,
}

impl MultipassScene {
    pub const SCENE_TYPE: SceneType = SceneType {
        name: "Multipass Scene",
        category: "Scene",
        description: "Makes the main scene render to a render target.",
    };

    pub const TEXTURE_UNIT_PREDEPTH: i32 = 6;
    pub const TEXTURE_UNIT_REFLECTION: i32 = 7;

    pub const UNIFORM_DEPTH_ONLY_PASS: &'static str = super::depth_pass::UNIFORM_DEPTH_ONLY_PASS;
    pub const UNIFORM_PREDEPTH_TEXTURE: &'static str = "d3d_PreDepthTexture";
    pub const REFLECTION_TEXTURE_UNIFORM: &'static str = "d3d_ReflectionCubeMap";

    /// Render order priority of the capture camera: last of the pre-render passes
    pub const MULTIPASS_RENDER_PRIORITY: i32 = 1000;

    pub const UNIT_OUT_NAME: &'static str = "PipelineResult";
    pub const COLOR_BYPASS_NAME: &'static str = "ColorBypass";
    pub const DEPTH_BYPASS_NAME: &'static str = "DepthBypass";
    pub const RESAMPLE_COLOR_NAME: &'static str = "ResampleColor";
    pub const CAMERA_UNIT_NAME: &'static str = "MultipassCapture";

    /// Create an unbuilt scene with the default configuration
    pub fn new() -> Self {
        Self::with_config(MultipassConfig::default())
    }

    /// Create an unbuilt scene with `config`
    pub fn with_config(config: MultipassConfig) -> Self {
        Self {
            name: "MultipassScene".to_string(),
            config,
            scene_node: None,
            main_camera: None,
            main_camera_state: None,
            multipass_camera: None,
            pre_depth_camera: None,
            pre_depth_texture: None,
            processor: None,
            processor_node: None,
            camera_unit: None,
            color_bypass: None,
            depth_bypass: None,
            resample_color: None,
            unit_out: None,
            first_unit: None,
            last_unit: None,
            child_scenes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `create_scene` has succeeded
    pub fn is_built(&self) -> bool {
        self.multipass_camera.is_some()
    }

    // ===== CONFIGURATION =====

    pub fn config(&self) -> &MultipassConfig {
        &self.config
    }

    /// Mutable configuration. Changes after the build have no effect on it.
    pub fn config_mut(&mut self) -> &mut MultipassConfig {
        &mut self.config
    }

    pub fn enable_color_bypass(&self) -> bool {
        self.config.enable_color_bypass
    }

    pub fn set_enable_color_bypass(&mut self, enable: bool) {
        self.config.enable_color_bypass = enable;
    }

    pub fn enable_depth_bypass(&self) -> bool {
        self.config.enable_depth_bypass
    }

    pub fn set_enable_depth_bypass(&mut self, enable: bool) {
        self.config.enable_depth_bypass = enable;
    }

    pub fn enable_resample_color(&self) -> bool {
        self.config.enable_resample_color
    }

    pub fn set_enable_resample_color(&mut self, enable: bool) {
        self.config.enable_resample_color = enable;
    }

    pub fn color_resample_factor(&self) -> f32 {
        self.config.color_resample_factor
    }

    pub fn set_color_resample_factor(&mut self, factor: f32) {
        self.config.color_resample_factor = factor;
    }

    pub fn enable_pre_depth_pass(&self) -> bool {
        self.config.enable_pre_depth_pass
    }

    pub fn set_enable_pre_depth_pass(&mut self, enable: bool) {
        self.config.enable_pre_depth_pass = enable;
    }

    // ===== ACCESSORS =====

    /// Multipass capture camera
    pub fn camera(&self) -> Option<NodeKey> {
        self.multipass_camera
    }

    /// Replace the tracked capture camera
    pub fn set_camera(&mut self, camera: NodeKey) {
        self.multipass_camera = Some(camera);
    }

    /// Main camera the scene was built against
    pub fn main_camera(&self) -> Option<NodeKey> {
        self.main_camera
    }

    pub fn pre_depth_camera(&self) -> Option<NodeKey> {
        self.pre_depth_camera
    }

    /// Depth texture written by the pre-depth pass
    pub fn pre_depth_texture(&self) -> Option<&Arc<RenderTexture>> {
        self.pre_depth_texture.as_ref()
    }

    pub fn ppu_processor(&self) -> Option<&Processor> {
        self.processor.as_ref()
    }

    pub fn ppu_processor_mut(&mut self) -> Option<&mut Processor> {
        self.processor.as_mut()
    }

    /// Scene graph node carrying the processor
    pub fn processor_node(&self) -> Option<NodeKey> {
        self.processor_node
    }

    /// Unit bringing the capture camera into the pipeline
    pub fn camera_unit(&self) -> Option<UnitKey> {
        self.camera_unit
    }

    pub fn color_bypass(&self) -> Option<UnitKey> {
        self.color_bypass
    }

    pub fn depth_bypass(&self) -> Option<UnitKey> {
        self.depth_bypass
    }

    pub fn resample_color(&self) -> Option<UnitKey> {
        self.resample_color
    }

    /// Terminal output unit
    pub fn unit_out(&self) -> Option<UnitKey> {
        self.unit_out
    }

    pub fn first_unit(&self) -> Option<UnitKey> {
        self.first_unit
    }

    pub fn set_first_unit(&mut self, unit: UnitKey) {
        self.first_unit = Some(unit);
    }

    pub fn last_unit(&self) -> Option<UnitKey> {
        self.last_unit
    }

    pub fn set_last_unit(&mut self, unit: UnitKey) {
        self.last_unit = Some(unit);
    }

    /// Post-processing scenes attached through `add_scene`
    pub fn child_scenes(&self) -> &[AttachedScene] {
        &self.child_scenes
    }

    // ===== CHILD SCENES =====

    /// Splice a post-processing scene into the pipeline.
    ///
    /// The scene attaches below the processor root if it asks for it,
    /// otherwise below `last_unit()` if it asks for that. Returns false
    /// (after logging an error) when the scene is not a post-processing
    /// scene, no processor exists or the scene asks for neither.
    pub fn add_scene(&mut self, scene: &mut dyn SceneBase) -> bool {
        let scene_type = scene.scene_type();
        let scene_node = scene.scene_node();

        let Some(ppu) = scene.as_ppu_scene() else {
            engine_error!(LOG_SOURCE, "Scene '{}' is not a PPU scene", scene_type.name);
            return false;
        };

        let Some(processor) = self.processor.as_mut() else {
            engine_error!(LOG_SOURCE, "Multipass scene must have a valid PPU Processor.");
            return false;
        };

        let parent = if ppu.add_to_root_ppu_scene() {
            None
        } else if ppu.add_to_multipass_output() {
            match self.last_unit {
                Some(last) => Some(last),
                None => {
                    engine_error!(LOG_SOURCE, "PPU not added to scene, multipass pipeline has no last unit");
                    return false;
                }
            }
        } else {
            engine_error!(LOG_SOURCE, "PPU not added to scene no add method specified");
            return false;
        };

        match ppu.attach_units(processor, parent) {
            Ok(first_unit) => {
                engine_debug!(LOG_SOURCE, "Attached PPU scene '{}'", scene_type.name);
                self.child_scenes.push(AttachedScene { scene_type, scene_node, first_unit });
                true
            }
            Err(_) => false,
        }
    }

    // ===== TEARDOWN =====

    /// Remove everything the build added to `manager`.
    ///
    /// PPU units go first (children before parents), then the processor
    /// and scene nodes, then the capture cameras. The main camera gets back
    /// the clear state, render target, color attachment and cull mask it
    /// had before the build.
    pub fn release(mut self, manager: &mut SceneManager) {
        if let Some(mut processor) = self.processor.take() {
            let removed = processor.clear();
            engine_debug!(LOG_SOURCE, "Released {} PPU units", removed.len());
        }

        let graph = manager.graph_mut();
        let nodes = [
            self.processor_node.take(),
            self.scene_node.take(),
            self.multipass_camera.take(),
            self.pre_depth_camera.take(),
        ];
        for node in nodes.into_iter().flatten() {
            graph.remove_node(node);
        }

        if let (Some(main), Some(state)) = (self.main_camera, self.main_camera_state.take()) {
            if let Some(camera) = graph.camera_mut(main) {
                state.restore(camera);
            }
        }
        engine_info!(LOG_SOURCE, "Multipass scene '{}' released", self.name);
    }

    // ===== BUILD HELPERS =====

    fn build_error(message: &str) -> Error {
        engine_error!(LOG_SOURCE, "{}", message);
        Error::InitializationFailed(message.to_string())
    }

    /// Add `unit` below `parent` and track it as the newest unit
    fn add_pipeline_unit(processor: &mut Processor, parent: UnitKey, unit: Unit) -> Result<UnitKey> {
        engine_debug!(LOG_SOURCE, "Adding unit '{}'", unit.name());
        let key = processor.add_unit(unit);
        processor.add_child(parent, key)?;
        Ok(key)
    }

    fn track_unit(&mut self, unit: UnitKey) {
        if self.first_unit.is_none() {
            self.first_unit = Some(unit);
        }
        self.last_unit = Some(unit);
    }
}

impl SceneBase for MultipassScene {
    fn scene_type(&self) -> SceneType {
        Self::SCENE_TYPE
    }

    fn scene_node(&self) -> Option<NodeKey> {
        self.scene_node
    }

    /// Build the multipass pipeline against the manager's main camera.
    ///
    /// # Errors
    ///
    /// - the scene is already built
    /// - no main camera, or the main camera has no usable viewport
    /// - both color and depth bypass are disabled
    ///
    /// Each logs exactly one error and leaves the scene unbuilt.
    fn create_scene(&mut self, manager: &mut SceneManager, quality: GraphicsQuality) -> Result<()> {
        if self.is_built() {
            return Err(Self::build_error("Multipass scene is already built"));
        }

        let Some(main) = manager.main_camera() else {
            return Err(Self::build_error(
                "Must have a main scene camera available to setup a multipass scene."));
        };
        let viewport: Viewport = manager
            .graph()
            .camera(main)
            .and_then(|camera| camera.viewport().copied())
            .filter(|vp| vp.width >= 1.0 && vp.height >= 1.0)
            .ok_or_else(|| Self::build_error("Main scene camera must have a non-empty viewport."))?;

        let config = self.config;
        let formats = AttachmentFormats {
            color: config.color_image_format,
            depth: config.depth_image_format,
        };

        // Capture camera first: its setup is the only step that can reject the config
        let mut multipass = PassCamera::new();
        setup_pass_camera(&mut multipass, viewport, config.enable_color_bypass,
            config.enable_depth_bypass, formats)?;
        multipass.set_render_order(RenderOrder::PreRender, Self::MULTIPASS_RENDER_PRIORITY);
        multipass.set_cull_mask(NodeMask::ADDITIONAL_CAMERA_MULTIPASS);

        let scene_root = manager.scene_node();
        let graph = manager.graph_mut();

        if let Some(main_camera) = graph.camera_mut(main) {
            self.main_camera_state = Some(MainCameraState::capture(main_camera));
            setup_pass_camera(main_camera, viewport, true, false, formats)?;
            main_camera.set_cull_mask(NodeMask::MAIN_CAMERA_MULTIPASS);
        }

        // Own scene node with the processor below it
        let scene_node = graph.create_group(&self.name);
        graph.add_child(scene_root, scene_node)?;
        graph.set_node_mask(scene_node, NodeMask::MULTIPASS);

        let mut processor = Processor::new(main);
        processor.dirty_unit_subgraph();
        let processor_node = graph.create_processor_node("PPUProcessor");
        graph.add_child(scene_node, processor_node)?;

        let multipass_camera = graph.create_camera("MultipassCamera", multipass);
        graph.add_child(multipass_camera, scene_root)?;
        graph.set_update_callback(multipass_camera,
            Arc::new(CameraSyncCallback::new(main, multipass_camera)));

        let camera_unit = processor.add_root_unit(
            Unit::camera(multipass_camera).with_name(Self::CAMERA_UNIT_NAME));
        let unit_out = Unit::out().with_name(Self::UNIT_OUT_NAME);

        if config.enable_pre_depth_pass {
            let pre_depth = graph.create_camera("PreDepthCamera", PassCamera::new());
            let pre_depth_formats = AttachmentFormats {
                color: config.color_image_format,
                depth: config.pre_depth_image_format,
            };
            if let Some(camera) = graph.camera_mut(pre_depth) {
                camera.set_pre_draw_callback(Arc::new(
                    DepthOnlyPassCallback::new(pre_depth, scene_root, DrawPhase::PreDraw)));
                camera.set_post_draw_callback(Arc::new(
                    DepthOnlyPassCallback::new(pre_depth, scene_root, DrawPhase::PostDraw)));
                camera.set_render_order(RenderOrder::PreRender, 0);
                camera.set_cull_mask(NodeMask::MULTIPASS_DEPTH_ONLY);
                self.pre_depth_texture =
                    Some(setup_pass_camera(camera, viewport, false, true, pre_depth_formats)?);
            }
            graph.set_update_callback(pre_depth, Arc::new(CameraSyncCallback::new(main, pre_depth)));
            graph.add_child(pre_depth, scene_root)?;
            graph.add_child(main, pre_depth)?;
            self.pre_depth_camera = Some(pre_depth);
        }

        if config.enable_color_bypass {
            let unit = Unit::camera_attachment_bypass(BufferComponent::ColorBuffer0)
                .with_name(Self::COLOR_BYPASS_NAME);
            let key = Self::add_pipeline_unit(&mut processor, camera_unit, unit)?;
            self.color_bypass = Some(key);
            self.track_unit(key);
        }

        if config.enable_depth_bypass {
            let unit = Unit::depth_buffer_bypass().with_name(Self::DEPTH_BYPASS_NAME);
            let key = Self::add_pipeline_unit(&mut processor, camera_unit, unit)?;
            self.depth_bypass = Some(key);
            self.track_unit(key);
        }

        // Resample only ever hangs below the color bypass
        if let (true, Some(color_bypass)) = (config.enable_resample_color, self.color_bypass) {
            let unit = Unit::in_resample_out(config.color_resample_factor)
                .with_name(Self::RESAMPLE_COLOR_NAME);
            let key = Self::add_pipeline_unit(&mut processor, color_bypass, unit)?;
            self.resample_color = Some(key);
            self.last_unit = Some(key);
        }

        // Output reads the color bypass directly, or the capture when there is none
        let out_parent = self.color_bypass.unwrap_or(camera_unit);
        self.unit_out = Some(Self::add_pipeline_unit(&mut processor, out_parent, unit_out)?);

        graph.add_child(main, multipass_camera)?;

        self.scene_node = Some(scene_node);
        self.main_camera = Some(main);
        self.processor_node = Some(processor_node);
        self.camera_unit = Some(camera_unit);
        self.processor = Some(processor);
        self.multipass_camera = Some(multipass_camera);

        engine_info!(LOG_SOURCE, "Multipass scene built ({} x {}, quality {:?})",
            viewport.width, viewport.height, quality);
        Ok(())
    }
}

impl Default for MultipassScene {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyContainer for MultipassScene {
    fn properties(&self) -> &'static [PropertyDesc] {
        &MULTIPASS_PROPERTIES
    }

    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        let value = match name {
            "EnableColorBypass" => PropertyValue::Bool(self.config.enable_color_bypass),
            "EnableResampleColor" => PropertyValue::Bool(self.config.enable_resample_color),
            "ColorResampleFactor" => PropertyValue::Float(self.config.color_resample_factor),
            "EnableDepthBypass" => PropertyValue::Bool(self.config.enable_depth_bypass),
            "EnablePreDepthPass" => PropertyValue::Bool(self.config.enable_pre_depth_pass),
            _ => return None,
        };
        Some(value)
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        let config = &mut self.config;
        match (name, value) {
            ("EnableColorBypass", PropertyValue::Bool(v)) => config.enable_color_bypass = v,
            ("EnableResampleColor", PropertyValue::Bool(v)) => config.enable_resample_color = v,
            ("ColorResampleFactor", PropertyValue::Float(v)) => config.color_resample_factor = v,
            ("EnableDepthBypass", PropertyValue::Bool(v)) => config.enable_depth_bypass = v,
            ("EnablePreDepthPass", PropertyValue::Bool(v)) => config.enable_pre_depth_pass = v,
            _ => {
                let message = match self.property_desc(name) {
                    Some(_) => format!("Property '{}' cannot hold a {} value", name, value.type_name()),
                    None => format!("Unknown property '{}'", name),
                };
                engine_error!(LOG_SOURCE, "{}", message);
                return Err(Error::InvalidResource(message));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "multipass_scene_tests.rs"]
mod tests;
