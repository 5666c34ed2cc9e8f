//! Surface appearance of a rendered mesh.

use glam::Vec4;

/// Flat lit material: one base color fed through the lambert shading in the
/// forward shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: Vec4,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: Vec4::new(0.8, 0.8, 0.8, 1.0),
        }
    }
}

impl Material {
    #[must_use]
    pub fn with_color(r: f32, g: f32, b: f32) -> Self {
        Self {
            base_color: Vec4::new(r, g, b, 1.0),
        }
    }
}
