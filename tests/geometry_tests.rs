//! Geometry and BoundingBox Tests
//!
//! Tests for:
//! - BoundingBox center, size, union, construction from points
//! - Fit-to-size transform (uniform scale + recenter)
//! - Area-weighted vertex normal computation

use glam::Vec3;
use objbook::resources::{BoundingBox, Geometry};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

// ============================================================================
// BoundingBox
// ============================================================================

#[test]
fn bbox_center_and_size() {
    let bb = BoundingBox {
        min: Vec3::new(-1.0, -2.0, -3.0),
        max: Vec3::new(1.0, 2.0, 3.0),
    };
    assert!(vec3_approx(bb.center(), Vec3::ZERO));
    assert!(vec3_approx(bb.size(), Vec3::new(2.0, 4.0, 6.0)));
}

#[test]
fn bbox_union() {
    let a = BoundingBox {
        min: Vec3::splat(-1.0),
        max: Vec3::splat(1.0),
    };
    let b = BoundingBox {
        min: Vec3::ZERO,
        max: Vec3::splat(3.0),
    };
    let u = a.union(&b);
    assert!(vec3_approx(u.min, Vec3::splat(-1.0)));
    assert!(vec3_approx(u.max, Vec3::splat(3.0)));
}

#[test]
fn bbox_from_points() {
    let bb = BoundingBox::from_points(&[
        Vec3::new(1.0, 5.0, -2.0),
        Vec3::new(-3.0, 0.0, 4.0),
        Vec3::new(2.0, 2.0, 2.0),
    ])
    .unwrap();
    assert!(vec3_approx(bb.min, Vec3::new(-3.0, 0.0, -2.0)));
    assert!(vec3_approx(bb.max, Vec3::new(2.0, 5.0, 4.0)));
}

#[test]
fn bbox_from_no_points_is_none() {
    assert!(BoundingBox::from_points(&[]).is_none());
}

// ============================================================================
// Fit Transform
// ============================================================================

#[test]
fn fit_transform_scales_largest_dimension() {
    // Box spanning x in [-2,2], y in [0,6], z in [-1,1]: max dimension 6.
    let bb = BoundingBox {
        min: Vec3::new(-2.0, 0.0, -1.0),
        max: Vec3::new(2.0, 6.0, 1.0),
    };
    let (scale, offset) = bb.fit_transform(10.0);
    assert!(approx(scale, 10.0 / 6.0));

    // The scaled center lands on the origin.
    let moved_center = bb.center() * scale + offset;
    assert!(vec3_approx(moved_center, Vec3::ZERO));
}

#[test]
fn fit_transform_of_degenerate_box_keeps_unit_scale() {
    let bb = BoundingBox {
        min: Vec3::new(3.0, 3.0, 3.0),
        max: Vec3::new(3.0, 3.0, 3.0),
    };
    let (scale, offset) = bb.fit_transform(10.0);
    assert!(approx(scale, 1.0));
    assert!(vec3_approx(offset, Vec3::new(-3.0, -3.0, -3.0)));
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn geometry_bounding_box_spans_positions() {
    let geometry = Geometry::new(
        vec![Vec3::new(-2.0, 0.0, -1.0), Vec3::new(2.0, 6.0, 1.0)],
        Vec::new(),
        Vec::new(),
    );
    let bb = geometry.bounding_box().unwrap();
    assert!(vec3_approx(bb.min, Vec3::new(-2.0, 0.0, -1.0)));
    assert!(vec3_approx(bb.max, Vec3::new(2.0, 6.0, 1.0)));
}

#[test]
fn empty_geometry_has_no_bounding_box() {
    let geometry = Geometry::new(Vec::new(), Vec::new(), Vec::new());
    assert!(geometry.bounding_box().is_none());
}

#[test]
fn computed_normals_point_out_of_the_face() {
    // Counter-clockwise triangle in the XY plane faces +Z.
    let mut geometry = Geometry::new(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        Vec::new(),
        vec![0, 1, 2],
    );
    geometry.compute_vertex_normals();

    assert_eq!(geometry.normals().len(), 3);
    for n in geometry.normals() {
        assert!(vec3_approx(*n, Vec3::Z));
    }
}

#[test]
fn computed_normals_are_area_weighted() {
    // Two faces share vertex 0: a large one facing +Z and a small one
    // facing +Y. The blend at the shared vertex leans toward +Z.
    let mut geometry = Geometry::new(
        vec![
            Vec3::ZERO,
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(0.5, 0.0, -0.5),
        ],
        Vec::new(),
        vec![0, 1, 2, 0, 1, 3],
    );
    geometry.compute_vertex_normals();

    let shared = geometry.normals()[0];
    assert!(shared.z > shared.y);
    assert!(approx(shared.length(), 1.0));
}

#[test]
fn out_of_range_indices_are_skipped() {
    let mut geometry = Geometry::new(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        Vec::new(),
        vec![0, 1, 9],
    );
    geometry.compute_vertex_normals();
    // No face contributed; normals fall back to zero vectors.
    assert!(geometry.normals().iter().all(|n| *n == Vec3::ZERO));
}
