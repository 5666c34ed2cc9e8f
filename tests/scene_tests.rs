//! Scene and Mesh Swap Tests
//!
//! Tests for:
//! - Scene: node add/remove, mesh node helper, mesh iteration
//! - Transform: dirty-checked matrix rebuild
//! - MeshSlot: exclusive displayed-mesh ownership, swap and clear,
//!   normalization applied as the node transform

use glam::Vec3;
use objbook::config::NormalizePolicy;
use objbook::playback::MeshSlot;
use objbook::resources::{Geometry, Material};
use objbook::scene::{Node, Scene};

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn box_geometry() -> Geometry {
    // Two corner vertices are enough to pin the bounding box:
    // x in [-2,2], y in [0,6], z in [-1,1].
    Geometry::new(
        vec![Vec3::new(-2.0, 0.0, -1.0), Vec3::new(2.0, 6.0, 1.0)],
        Vec::new(),
        Vec::new(),
    )
}

// ============================================================================
// Scene
// ============================================================================

#[test]
fn scene_add_and_remove_node() {
    let mut scene = Scene::new();
    let idx = scene.add_node(Node::new("thing"));
    assert!(scene.get_node(idx).is_some());

    scene.remove_node(idx);
    assert!(scene.get_node(idx).is_none());
}

#[test]
fn mesh_nodes_show_up_in_mesh_iteration() {
    let mut scene = Scene::new();
    scene.add_node(Node::new("empty"));
    scene.add_mesh_node("mesh", box_geometry(), Material::default());

    assert_eq!(scene.iter_meshes().count(), 1);
}

#[test]
fn invisible_nodes_are_skipped() {
    let mut scene = Scene::new();
    let idx = scene.add_mesh_node("mesh", box_geometry(), Material::default());
    scene.get_node_mut(idx).unwrap().visible = false;

    assert_eq!(scene.iter_meshes().count(), 0);
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn transform_matrix_rebuilds_only_on_change() {
    let mut t = objbook::scene::Transform::new();
    assert!(t.update_matrix(), "first update populates the cache");
    assert!(!t.update_matrix(), "unchanged TRS skips the rebuild");

    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_matrix());
    assert!(vec3_approx(
        t.matrix().transform_point3(Vec3::ZERO),
        Vec3::new(1.0, 2.0, 3.0)
    ));
}

// ============================================================================
// MeshSlot
// ============================================================================

#[test]
fn swap_replaces_the_previous_node() {
    let mut scene = Scene::new();
    let mut slot = MeshSlot::new();

    let first = slot.swap(&mut scene, box_geometry(), NormalizePolicy::None);
    assert_eq!(scene.iter_meshes().count(), 1);

    let second = slot.swap(&mut scene, box_geometry(), NormalizePolicy::None);
    assert_ne!(first, second);
    assert!(scene.get_node(first).is_none(), "previous mesh is removed");
    assert!(scene.get_node(second).is_some());
    assert_eq!(scene.iter_meshes().count(), 1);
    assert_eq!(slot.current(), Some(second));
}

#[test]
fn clear_empties_the_slot() {
    let mut scene = Scene::new();
    let mut slot = MeshSlot::new();

    slot.swap(&mut scene, box_geometry(), NormalizePolicy::None);
    slot.clear(&mut scene);

    assert_eq!(scene.iter_meshes().count(), 0);
    assert!(slot.current().is_none());
}

#[test]
fn fit_to_size_sets_scale_and_recenters() {
    let mut scene = Scene::new();
    let mut slot = MeshSlot::new();

    let idx = slot.swap(&mut scene, box_geometry(), NormalizePolicy::FitToSize(10.0));
    let node = scene.get_node(idx).unwrap();

    // Largest dimension is 6, so the scale is 10/6.
    let expected_scale = 10.0 / 6.0;
    assert!(vec3_approx(node.transform.scale, Vec3::splat(expected_scale)));

    // The box center (0, 3, 0) maps to the origin after scale + translation.
    let center = Vec3::new(0.0, 3.0, 0.0);
    assert!(vec3_approx(
        center * expected_scale + node.transform.position,
        Vec3::ZERO
    ));
}

#[test]
fn none_policy_leaves_the_transform_alone() {
    let mut scene = Scene::new();
    let mut slot = MeshSlot::new();

    let idx = slot.swap(&mut scene, box_geometry(), NormalizePolicy::None);
    let node = scene.get_node(idx).unwrap();
    assert!(vec3_approx(node.transform.scale, Vec3::ONE));
    assert!(vec3_approx(node.transform.position, Vec3::ZERO));
}
