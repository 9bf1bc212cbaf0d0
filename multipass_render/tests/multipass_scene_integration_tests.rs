//! Integration tests for the multipass scene build
//!
//! These tests drive the public API end to end and check the logged
//! errors of every failure path.
//!
//! Run with: cargo test --test multipass_scene_integration_tests

use multipass_render::multipass::Engine;
use multipass_render::multipass::camera::{PassCamera, Viewport};
use multipass_render::multipass::log::{LogEntry, LogSeverity, Logger};
use multipass_render::multipass::ppu::UnitKind;
use multipass_render::multipass::scene::{
    GraphicsQuality, MultipassConfig, MultipassScene, PostProcessScene, PpuScene, SceneBase,
    SceneManager, SceneType,
};
use multipass_render::multipass::scene_graph::NodeKey;
use multipass_render::multipass::Result;
use multipass_render::glam::Mat4;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn capture_logs() -> Arc<Mutex<Vec<LogEntry>>> {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    entries
}

fn errors(entries: &Arc<Mutex<Vec<LogEntry>>>) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == LogSeverity::Error)
        .cloned()
        .collect()
}

fn manager_with_camera() -> SceneManager {
    let mut manager = SceneManager::new();
    let camera = PassCamera::with_viewport(
        Viewport::new(0.0, 0.0, 1280.0, 720.0),
        Mat4::perspective_rh(1.0, 16.0 / 9.0, 0.1, 1000.0),
    );
    manager.create_main_camera("main", camera).unwrap();
    manager
}

fn built_scene(config: MultipassConfig) -> (SceneManager, MultipassScene) {
    let mut manager = manager_with_camera();
    let mut scene = MultipassScene::with_config(config);
    manager.create_scene(&mut scene, GraphicsQuality::High).unwrap();
    (manager, scene)
}

/// Scene without the post-processing capability
struct TerrainScene;

impl SceneBase for TerrainScene {
    fn scene_type(&self) -> SceneType {
        SceneType { name: "Terrain", category: "Scene", description: "Terrain tiles." }
    }

    fn scene_node(&self) -> Option<NodeKey> {
        None
    }

    fn create_scene(&mut self, _manager: &mut SceneManager, _quality: GraphicsQuality) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// BUILD TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_no_main_camera_logs_exactly_one_error() {
    let entries = capture_logs();
    let mut manager = SceneManager::new();
    let mut scene = MultipassScene::new();

    let result = scene.create_scene(&mut manager, GraphicsQuality::default());

    let logged = errors(&entries);
    Engine::reset_logger();

    assert!(result.is_err());
    assert!(scene.camera().is_none());
    assert!(!scene.is_built());
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].source, "multipass::MultipassScene");
    assert!(logged[0].message.contains("main scene camera"));
}

#[test]
#[serial]
fn test_integration_successful_build_logs_no_error() {
    let entries = capture_logs();
    let (_manager, scene) = built_scene(MultipassConfig::default());

    let logged = errors(&entries);
    let infos = entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == LogSeverity::Info && e.source == "multipass::MultipassScene")
        .count();
    Engine::reset_logger();

    assert!(scene.is_built());
    assert!(logged.is_empty());
    assert_eq!(infos, 1);
}

#[test]
#[serial]
fn test_integration_last_unit_is_resample() {
    let (_manager, scene) = built_scene(MultipassConfig::default()
        .with_color_bypass(true)
        .with_resample_color(true));

    assert_eq!(scene.last_unit(), scene.resample_color());
    assert_ne!(scene.last_unit(), scene.color_bypass());
}

#[test]
#[serial]
fn test_integration_resample_without_color_bypass_is_not_created() {
    let (_manager, scene) = built_scene(MultipassConfig::default()
        .with_color_bypass(false)
        .with_depth_bypass(true)
        .with_resample_color(true));
    let processor = scene.ppu_processor().unwrap();

    assert!(scene.resample_color().is_none());
    let resamples = processor
        .traversal_order()
        .into_iter()
        .filter(|&k| matches!(processor.unit(k).unwrap().kind(), UnitKind::InResampleOut { .. }))
        .count();
    assert_eq!(resamples, 0);
}

#[test]
#[serial]
fn test_integration_output_attaches_to_color_bypass_beside_resample() {
    let (_manager, scene) = built_scene(MultipassConfig::default());
    let processor = scene.ppu_processor().unwrap();
    let color = scene.color_bypass().unwrap();

    assert!(processor.children(color).contains(&scene.unit_out().unwrap()));
    assert!(processor.children(color).contains(&scene.resample_color().unwrap()));
    assert_eq!(processor.find_unit_by_name("PipelineResult"), scene.unit_out());
}

#[test]
#[serial]
fn test_integration_no_bypass_logs_one_error() {
    let entries = capture_logs();
    let mut manager = manager_with_camera();
    let mut scene = MultipassScene::with_config(MultipassConfig::default()
        .with_color_bypass(false)
        .with_depth_bypass(false));

    let result = manager.create_scene(&mut scene, GraphicsQuality::default());

    let logged = errors(&entries);
    Engine::reset_logger();

    assert!(result.is_err());
    assert!(scene.camera().is_none());
    assert_eq!(logged.len(), 1);
    assert!(logged[0].message.contains("either color or depth"));
}

// ============================================================================
// ADD SCENE TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_add_non_ppu_scene_does_not_mutate() {
    let (_manager, mut scene) = built_scene(MultipassConfig::default());
    let processor = scene.ppu_processor().unwrap();
    let order_before = processor.traversal_order();
    let roots_before = processor.roots().to_vec();

    assert!(!scene.add_scene(&mut TerrainScene));

    let processor = scene.ppu_processor().unwrap();
    assert_eq!(processor.traversal_order(), order_before);
    assert_eq!(processor.roots(), roots_before.as_slice());
    assert!(scene.child_scenes().is_empty());
}

#[test]
#[serial]
fn test_integration_add_ppu_scene_to_root_once() {
    let (mut manager, mut scene) = built_scene(MultipassConfig::default());
    let mut bloom = PpuScene::new("Bloom");
    bloom.set_add_to_root_ppu_scene(true);
    manager.create_scene(&mut bloom, GraphicsQuality::default()).unwrap();
    let roots_before = scene.ppu_processor().unwrap().roots().len();

    assert!(scene.add_scene(&mut bloom));

    let processor = scene.ppu_processor().unwrap();
    let unit = bloom.first_unit().unwrap();
    assert_eq!(processor.roots().len(), roots_before + 1);
    assert_eq!(processor.roots().iter().filter(|&&k| k == unit).count(), 1);
    assert!(processor.parents(unit).is_empty());
    assert_eq!(scene.child_scenes()[0].scene_node, bloom.scene_node());
}

#[test]
#[serial]
fn test_integration_add_ppu_scene_to_output_once() {
    let (_manager, mut scene) = built_scene(MultipassConfig::default());
    let last = scene.last_unit().unwrap();
    let mut blur = PpuScene::new("Blur");

    assert!(scene.add_scene(&mut blur));

    let processor = scene.ppu_processor().unwrap();
    let unit = blur.first_unit().unwrap();
    assert_eq!(processor.parents(unit), &[last]);
    assert_eq!(processor.children(last).iter().filter(|&&k| k == unit).count(), 1);
    assert!(!processor.roots().contains(&unit));
}

#[test]
#[serial]
fn test_integration_add_scene_without_processor_logs_error() {
    let entries = capture_logs();
    let mut scene = MultipassScene::new();
    let mut blur = PpuScene::new("Blur");

    let added = scene.add_scene(&mut blur);

    let logged = errors(&entries);
    Engine::reset_logger();

    assert!(!added);
    assert_eq!(logged.len(), 1);
    assert!(logged[0].message.contains("PPU Processor"));
}

#[test]
#[serial]
fn test_integration_release_then_rebuild() {
    let (mut manager, scene) = built_scene(MultipassConfig::default());
    let node_count_built = manager.graph().node_count();

    scene.release(&mut manager);
    assert_eq!(manager.graph().node_count(), 2);

    let mut rebuilt = MultipassScene::new();
    manager.create_scene(&mut rebuilt, GraphicsQuality::Low).unwrap();
    assert_eq!(manager.graph().node_count(), node_count_built);
}
