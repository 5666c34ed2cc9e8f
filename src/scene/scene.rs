//! Scene container.

use glam::Vec4;
use thunderdome::Arena;

use crate::resources::{Geometry, Material};
use crate::scene::NodeIndex;
use crate::scene::light::Light;
use crate::scene::node::{Mesh, Node};

/// Flat scene: an arena of nodes, the light rig, and a background color.
pub struct Scene {
    pub nodes: Arena<Node>,
    pub lights: Vec<Light>,
    /// Clear color, RGBA.
    pub background: Vec4,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            lights: Vec::new(),
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        self.nodes.insert(node)
    }

    /// Creates a node carrying `geometry` and returns its handle.
    pub fn add_mesh_node(
        &mut self,
        name: &str,
        geometry: Geometry,
        material: Material,
    ) -> NodeIndex {
        self.add_node(Node::new(name).with_mesh(Mesh::new(geometry, material)))
    }

    /// Removes a node; the handle becomes invalid and its mesh is dropped.
    pub fn remove_node(&mut self, idx: NodeIndex) {
        self.nodes.remove(idx);
    }

    #[must_use]
    pub fn get_node(&self, idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(idx)
    }

    #[must_use]
    pub fn get_node_mut(&mut self, idx: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(idx)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Visible nodes that carry a mesh.
    pub fn iter_meshes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.visible && node.mesh.is_some())
    }

    /// Refreshes every node's cached transform matrix. Call once per frame
    /// before rendering.
    pub fn update(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.transform.update_matrix();
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
