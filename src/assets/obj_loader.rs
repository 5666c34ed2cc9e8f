//! Wavefront OBJ parsing.

use glam::Vec3;
use obj::ObjData;
use rustc_hash::FxHashMap;

use crate::errors::{ObjbookError, Result};
use crate::resources::Geometry;

/// Parses an OBJ document into a [`Geometry`].
///
/// Polygons are fan-triangulated and flattened across objects and groups.
/// Position/normal index pairs are deduplicated into a single indexed vertex
/// stream. Authored normals are kept; documents without `vn` records (baked
/// sequence exporters frequently omit them) get area-weighted normals
/// computed from the faces instead.
pub fn parse_obj(bytes: &[u8]) -> Result<Geometry> {
    let data = ObjData::load_buf(bytes)?;
    let has_normals = !data.normal.is_empty();

    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut remap: FxHashMap<(usize, Option<usize>), u32> = FxHashMap::default();

    for object in &data.objects {
        for group in &object.groups {
            for poly in &group.polys {
                let corners = &poly.0;
                if corners.len() < 3 {
                    continue;
                }
                for i in 1..corners.len() - 1 {
                    for k in [0, i, i + 1] {
                        let &obj::IndexTuple(pi, _, ni) = &corners[k];
                        let next = positions.len() as u32;
                        let index = match remap.entry((pi, ni)) {
                            std::collections::hash_map::Entry::Occupied(e) => *e.get(),
                            std::collections::hash_map::Entry::Vacant(e) => {
                                let Some(&p) = data.position.get(pi) else {
                                    return Err(ObjbookError::ObjParseError(format!(
                                        "position index {pi} out of range"
                                    )));
                                };
                                positions.push(Vec3::from_array(p));
                                if has_normals {
                                    let n = ni
                                        .and_then(|n| data.normal.get(n))
                                        .copied()
                                        .unwrap_or([0.0; 3]);
                                    normals.push(Vec3::from_array(n));
                                }
                                *e.insert(next)
                            }
                        };
                        indices.push(index);
                    }
                }
            }
        }
    }

    let mut geometry = Geometry::new(positions, normals, indices);
    if !has_normals {
        geometry.compute_vertex_normals();
    }
    Ok(geometry)
}
