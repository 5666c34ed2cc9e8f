//! Triangle geometry and bounding volumes.

use std::cell::RefCell;

use glam::Vec3;
use uuid::Uuid;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Some(Self { min, max })
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Uniform scale and translation that fit this box to `desired_size`.
    ///
    /// The scale brings the largest box dimension to `desired_size`; the
    /// translation puts the scaled box's center at the origin. Degenerate
    /// boxes (all dimensions zero) keep unit scale and are only recentered.
    #[must_use]
    pub fn fit_transform(&self, desired_size: f32) -> (f32, Vec3) {
        let max_dim = self.size().max_element();
        let scale = if max_dim > 0.0 {
            desired_size / max_dim
        } else {
            1.0
        };
        (scale, -self.center() * scale)
    }
}

/// Indexed triangle mesh data as the loader produces it.
///
/// Positions and normals run parallel; indices address them in triples.
/// The `uuid` identifies the geometry across the GPU upload cache; every
/// loaded frame is a fresh geometry, never an edit of a previous one.
#[derive(Debug)]
pub struct Geometry {
    pub uuid: Uuid,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,

    bounding_box: RefCell<Option<BoundingBox>>,
}

impl Geometry {
    #[must_use]
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            positions,
            normals,
            indices,
            bounding_box: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Recomputes per-vertex normals from the triangle faces.
    ///
    /// Face normals are accumulated unnormalized (the cross product's length
    /// is twice the triangle area, so large faces weigh more) and normalized
    /// once at the end. Out-of-range indices are skipped.
    pub fn compute_vertex_normals(&mut self) {
        let count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; count];

        for triangle in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            );
            if i0 >= count || i1 >= count || i2 >= count {
                continue;
            }
            let v0 = self.positions[i0];
            let v1 = self.positions[i1];
            let v2 = self.positions[i2];

            let face_normal = (v1 - v0).cross(v2 - v0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Bounding box over the positions, computed once and cached.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut cached = self.bounding_box.borrow_mut();
        if cached.is_none() {
            *cached = BoundingBox::from_points(&self.positions);
        }
        *cached
    }
}
