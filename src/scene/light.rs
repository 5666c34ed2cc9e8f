//! Scene lighting.

use glam::Vec3;

/// Light flavor. The viewer's fixed rig is one ambient plus one directional.
#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional {
        /// Direction the light travels, normalized.
        direction: Vec3,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_ambient(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Ambient,
        }
    }

    /// Directional light shining from `position` toward the origin.
    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32, position: Vec3) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional {
                direction: (-position).normalize_or_zero(),
            },
        }
    }
}
