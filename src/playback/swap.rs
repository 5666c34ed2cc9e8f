//! Displayed-mesh ownership and atomic swap.

use glam::Vec3;

use crate::config::NormalizePolicy;
use crate::resources::{Geometry, Material};
use crate::scene::{NodeIndex, Scene};

/// Exclusive owner of the scene node holding the currently displayed mesh.
///
/// Exactly one frame mesh is conceptually visible at a time; the slot is the
/// only place that keeps its node handle, so replacing it atomically is a
/// remove-then-add within one tick.
#[derive(Debug, Default)]
pub struct MeshSlot {
    current: Option<NodeIndex>,
}

impl MeshSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Node currently displayed, if any.
    #[must_use]
    pub fn current(&self) -> Option<NodeIndex> {
        self.current
    }

    /// Replaces the displayed mesh with `geometry`.
    ///
    /// Applies the normalization policy as the node transform: a uniform
    /// scale bringing the largest bounding-box dimension to the target size,
    /// and a translation placing the scaled box's center at the origin. The
    /// previous node is removed in the same call.
    pub fn swap(
        &mut self,
        scene: &mut Scene,
        geometry: Geometry,
        policy: NormalizePolicy,
    ) -> NodeIndex {
        let fit = match policy {
            NormalizePolicy::FitToSize(size) => {
                geometry.bounding_box().map(|bb| bb.fit_transform(size))
            }
            NormalizePolicy::None => None,
        };

        if let Some(previous) = self.current.take() {
            scene.remove_node(previous);
        }

        let node_id = scene.add_mesh_node("flipbook frame", geometry, Material::default());
        if let Some((scale, offset)) = fit
            && let Some(node) = scene.get_node_mut(node_id)
        {
            node.transform.scale = Vec3::splat(scale);
            node.transform.position = offset;
        }
        self.current = Some(node_id);
        node_id
    }

    /// Removes the displayed mesh, e.g. when a new session starts.
    pub fn clear(&mut self, scene: &mut Scene) {
        if let Some(previous) = self.current.take() {
            scene.remove_node(previous);
        }
    }
}
