//! TRS transform with a dirty-checked matrix cache.

use glam::{Affine3A, Mat3, Quat, Vec3};

/// Position, rotation and scale of a scene node or camera.
///
/// The matrix is rebuilt lazily: [`update_matrix`](Self::update_matrix)
/// compares the public fields against a shadow copy and only recomputes when
/// something moved.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    matrix: Affine3A,

    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,

            matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        let mut t = Self::new();
        t.position = position;
        t
    }

    /// Rebuilds the cached matrix if the TRS fields changed since the last
    /// call. Returns whether a rebuild happened.
    pub fn update_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.matrix =
                Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);
            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }
        changed
    }

    /// The cached matrix. Call [`update_matrix`](Self::update_matrix) first
    /// when the TRS fields may have moved this tick.
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> &Affine3A {
        &self.matrix
    }

    /// Points the -Z axis at `target`.
    ///
    /// `target` and `up` are in the same coordinate space as `position`.
    /// Degenerate configurations (forward parallel to `up`) leave the
    /// rotation untouched.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();
        if forward.cross(up).length_squared() < 1e-4 {
            return;
        }
        let right = forward.cross(up).normalize();
        let new_up = right.cross(forward).normalize();

        let rot_mat = Mat3::from_cols(right, new_up, -forward);
        self.rotation = Quat::from_mat3(&rot_mat);
    }

    /// Forces a matrix rebuild on the next update.
    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
