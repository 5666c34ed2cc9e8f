//! Orbit camera controls: left-drag rotate, wheel zoom, right-drag pan.

use glam::{Vec2, Vec3};
use winit::event::MouseButton;

use crate::app::input::Input;
use crate::scene::transform::Transform;

const PHI_EPS: f32 = 0.0001;

/// Spherical-coordinate camera rig around a focus point, with exponential
/// damping on rotation.
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    /// Focus point the camera orbits.
    pub center: Vec3,
    /// Distance from the focus point.
    pub radius: f32,
    /// Azimuth angle around +Y.
    pub theta: f32,
    /// Polar angle from +Y, clamped away from the poles.
    pub phi: f32,

    pending_rotation: Vec2,
}

impl OrbitControls {
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 1.0,
            max_distance: 1000.0,

            center,
            radius,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,

            pending_rotation: Vec2::ZERO,
        }
    }

    /// Places the rig so the camera starts at `position` looking at `center`.
    #[must_use]
    pub fn looking_from(position: Vec3, center: Vec3) -> Self {
        let offset = position - center;
        let radius = offset.length().max(PHI_EPS);
        let mut controls = Self::new(center, radius);
        controls.phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        controls.theta = offset.x.atan2(offset.z);
        controls
    }

    /// Applies this tick's input and writes the camera pose into `transform`.
    ///
    /// `fov` is the camera's vertical field of view in radians (pan speed is
    /// scaled so a drag tracks the point under the cursor); `dt` is the tick
    /// delta in seconds.
    pub fn update(&mut self, transform: &mut Transform, input: &Input, fov: f32, dt: f32) {
        let screen_height = input.screen_size.y.max(1.0);

        if input.is_button_pressed(MouseButton::Left) {
            let rotate_per_pixel = 2.0 * std::f32::consts::PI / screen_height;
            self.pending_rotation -= input.cursor_delta * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            // Exponential decay normalized to a 60 Hz reference tick, so the
            // feel does not depend on the refresh rate.
            let retention = (1.0 - self.damping_factor).powf(dt * 60.0);
            let applied = self.pending_rotation * (1.0 - retention);
            self.theta += applied.x;
            self.phi += applied.y;
            self.pending_rotation *= retention;
        } else {
            self.theta += self.pending_rotation.x;
            self.phi += self.pending_rotation.y;
            self.pending_rotation = Vec2::ZERO;
        }
        self.phi = self.phi.clamp(PHI_EPS, std::f32::consts::PI - PHI_EPS);

        if input.scroll_delta.y != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(input.scroll_delta.y.abs());
            if input.scroll_delta.y > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        }

        if input.is_button_pressed(MouseButton::Right) {
            let target_world_height = 2.0 * self.radius * (fov * 0.5).tan();
            let pixels_to_world = target_world_height / screen_height;

            let forward = -self.unit_offset();
            let right = forward.cross(Vec3::Y).normalize();
            let up = right.cross(forward).normalize();

            self.center += (right * -input.cursor_delta.x + up * input.cursor_delta.y)
                * pixels_to_world
                * self.pan_speed;
        }

        transform.position = self.center + self.unit_offset() * self.radius;
        transform.look_at(self.center, Vec3::Y);
    }

    /// Unit vector from the focus point toward the camera.
    fn unit_offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }
}
