use crate::camera::BufferComponent;
use crate::ppu::UnitKind;
use crate::scene_graph::SceneGraph;
use super::*;

fn processor() -> Processor {
    let mut graph = SceneGraph::new();
    let camera = graph.create_group("camera");
    Processor::new(camera)
}

// ============================================================================
// Units and edges
// ============================================================================

#[test]
fn test_new_processor_is_empty() {
    let p = processor();
    assert_eq!(p.unit_count(), 0);
    assert!(p.roots().is_empty());
    assert!(p.traversal_order().is_empty());
    assert!(p.is_dirty());
}

#[test]
fn test_add_root_unit() {
    let mut p = processor();
    let key = p.add_root_unit(Unit::in_out().with_name("stage"));

    assert_eq!(p.roots(), &[key]);
    assert_eq!(p.unit(key).unwrap().name(), "stage");
    assert_eq!(p.unit_count(), 1);
}

#[test]
fn test_add_unit_is_detached() {
    let mut p = processor();
    let key = p.add_unit(Unit::in_out());

    assert!(p.contains(key));
    assert!(p.roots().is_empty());
    assert!(p.traversal_order().is_empty());
}

#[test]
fn test_add_to_root_twice_is_noop() {
    let mut p = processor();
    let key = p.add_unit(Unit::in_out());

    p.add_to_root(key).unwrap();
    p.add_to_root(key).unwrap();

    assert_eq!(p.roots().len(), 1);
}

#[test]
fn test_add_child_links_both_directions() {
    let mut p = processor();
    let parent = p.add_root_unit(Unit::in_out().with_name("parent"));
    let child = p.add_unit(Unit::out().with_name("child"));

    p.add_child(parent, child).unwrap();

    assert_eq!(p.children(parent), &[child]);
    assert_eq!(p.parents(child), &[parent]);
}

#[test]
fn test_add_child_duplicate_edge_is_noop() {
    let mut p = processor();
    let parent = p.add_root_unit(Unit::in_out());
    let child = p.add_unit(Unit::in_out());

    p.add_child(parent, child).unwrap();
    p.add_child(parent, child).unwrap();

    assert_eq!(p.children(parent).len(), 1);
    assert_eq!(p.parents(child).len(), 1);
}

#[test]
fn test_add_child_rejects_cycle() {
    let mut p = processor();
    let a = p.add_root_unit(Unit::in_out().with_name("a"));
    let b = p.add_unit(Unit::in_out().with_name("b"));
    let c = p.add_unit(Unit::in_out().with_name("c"));
    p.add_child(a, b).unwrap();
    p.add_child(b, c).unwrap();

    let result = p.add_child(c, a);
    assert!(matches!(result, Err(Error::InvalidGraph(_))));
    assert!(p.children(c).is_empty());
}

#[test]
fn test_add_child_rejects_self_edge() {
    let mut p = processor();
    let a = p.add_root_unit(Unit::in_out());
    assert!(p.add_child(a, a).is_err());
}

#[test]
fn test_add_child_rejects_removed_unit() {
    let mut p = processor();
    let a = p.add_root_unit(Unit::in_out());
    let b = p.add_unit(Unit::in_out());
    p.remove_unit(b);

    assert!(p.add_child(a, b).is_err());
    assert!(p.add_to_root(b).is_err());
}

#[test]
fn test_add_unit_drops_foreign_edges() {
    let mut p = processor();
    let a = p.add_root_unit(Unit::in_out());
    let b = p.add_unit(Unit::in_out());
    p.add_child(a, b).unwrap();

    let copy = p.unit(a).unwrap().clone();
    let key = p.add_unit(copy);
    assert!(p.children(key).is_empty());
}

// ============================================================================
// Unit kinds
// ============================================================================

#[test]
fn test_unit_constructors() {
    let mut graph = SceneGraph::new();
    let camera = graph.create_group("camera");

    assert_eq!(*Unit::camera(camera).kind(), UnitKind::Camera { camera });
    assert_eq!(
        *Unit::camera_attachment_bypass(BufferComponent::ColorBuffer0).kind(),
        UnitKind::CameraAttachmentBypass { component: BufferComponent::ColorBuffer0 }
    );
    assert_eq!(*Unit::depth_buffer_bypass().kind(), UnitKind::DepthBufferBypass);
    assert_eq!(
        *Unit::in_resample_out(0.5).kind(),
        UnitKind::InResampleOut { factor_x: 0.5, factor_y: 0.5 }
    );
    assert_eq!(*Unit::out().kind(), UnitKind::Out { viewport_reference_index: -1 });
    assert!(Unit::in_out().name().is_empty());
}

#[test]
fn test_set_resample_factors() {
    let mut resample = Unit::in_resample_out(0.5);
    assert!(resample.set_resample_factors(0.25, 0.75));
    assert_eq!(*resample.kind(), UnitKind::InResampleOut { factor_x: 0.25, factor_y: 0.75 });

    let mut other = Unit::in_out();
    assert!(!other.set_resample_factors(0.25, 0.75));
    assert_eq!(*other.kind(), UnitKind::InOut);
}

// ============================================================================
// Ordering and lookup
// ============================================================================

#[test]
fn test_traversal_order_is_topological() {
    let mut p = processor();
    let capture = p.add_root_unit(Unit::in_out().with_name("capture"));
    let color = p.add_unit(Unit::in_out().with_name("color"));
    let depth = p.add_unit(Unit::in_out().with_name("depth"));
    let out = p.add_unit(Unit::out().with_name("out"));
    p.add_child(capture, color).unwrap();
    p.add_child(capture, depth).unwrap();
    p.add_child(color, out).unwrap();
    p.add_child(depth, out).unwrap();

    let order = p.traversal_order();
    assert_eq!(order, vec![capture, color, depth, out]);
}

#[test]
fn test_traversal_order_emits_shared_units_once() {
    let mut p = processor();
    let capture = p.add_root_unit(Unit::in_out().with_name("capture"));
    let mut chain = vec![capture];
    for i in 0..500 {
        let unit = p.add_unit(Unit::in_out().with_name(&format!("stage{}", i)));
        p.add_child(capture, unit).unwrap();
        p.add_child(*chain.last().unwrap(), unit).unwrap();
        chain.push(unit);
    }
    p.add_to_root(chain[250]).unwrap();

    let order = p.traversal_order();
    assert_eq!(order.len(), p.unit_count());
    assert_eq!(order, chain);
}

#[test]
fn test_traversal_order_skips_detached_units() {
    let mut p = processor();
    let root = p.add_root_unit(Unit::in_out());
    p.add_unit(Unit::in_out());

    assert_eq!(p.traversal_order(), vec![root]);
}

#[test]
fn test_find_unit_by_name() {
    let mut p = processor();
    let a = p.add_root_unit(Unit::in_out().with_name("a"));
    let b = p.add_unit(Unit::in_out().with_name("b"));
    p.add_child(a, b).unwrap();

    assert_eq!(p.find_unit_by_name("b"), Some(b));
    assert_eq!(p.find_unit_by_name("missing"), None);
}

#[test]
fn test_is_reachable() {
    let mut p = processor();
    let a = p.add_root_unit(Unit::in_out());
    let b = p.add_unit(Unit::in_out());
    p.add_child(a, b).unwrap();

    assert!(p.is_reachable(a, b));
    assert!(!p.is_reachable(b, a));
}

// ============================================================================
// Removal and dirty state
// ============================================================================

#[test]
fn test_remove_unit_detaches_edges() {
    let mut p = processor();
    let a = p.add_root_unit(Unit::in_out());
    let b = p.add_unit(Unit::in_out());
    let c = p.add_unit(Unit::in_out());
    p.add_child(a, b).unwrap();
    p.add_child(b, c).unwrap();

    let removed = p.remove_unit(b);
    assert!(removed.is_some());
    assert!(p.children(a).is_empty());
    assert!(p.parents(c).is_empty());
    assert!(p.contains(c));
    assert!(p.remove_unit(b).is_none());
}

#[test]
fn test_clear_removes_children_before_parents() {
    let mut p = processor();
    let capture = p.add_root_unit(Unit::in_out().with_name("capture"));
    let bypass = p.add_unit(Unit::in_out().with_name("bypass"));
    let out = p.add_unit(Unit::out().with_name("out"));
    p.add_child(capture, bypass).unwrap();
    p.add_child(bypass, out).unwrap();

    let removed = p.clear();
    assert_eq!(removed, vec!["out".to_string(), "bypass".to_string(), "capture".to_string()]);
    assert_eq!(p.unit_count(), 0);
    assert!(p.roots().is_empty());
}

#[test]
fn test_dirty_flag() {
    let mut p = processor();
    let root = p.add_root_unit(Unit::in_out());

    assert_eq!(p.init(), vec![root]);
    assert!(!p.is_dirty());

    p.dirty_unit_subgraph();
    assert!(p.is_dirty());
    p.init();

    let child = p.add_unit(Unit::in_out());
    p.add_child(root, child).unwrap();
    assert!(p.is_dirty());
}
