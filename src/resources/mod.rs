//! CPU-side render resources: geometry data and materials.

pub mod geometry;
pub mod material;

pub use geometry::{BoundingBox, Geometry};
pub use material::Material;
