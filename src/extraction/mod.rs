mod clip;
mod contour;
mod zone_filter;

pub use clip::{ClipHalfSpace, ClipState};
pub use contour::ContourGrid;
pub use zone_filter::{FilterZones, ZoneVisibility};

use crate::catalog::{MaterialId, ZoneId};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A triangle mesh whose vertices carry field attributes.
///
/// All per-vertex arrays have the same length as `vertices`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributedMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Unit vertex normals.
    pub normals: Vec<Vector3>,
    /// Temperature in deg C.
    pub temperature: Vec<f64>,
    pub material_id: Vec<MaterialId>,
    pub zone_id: Vec<ZoneId>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl AttributedMesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// `true` when the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends one vertex with its attributes and returns its index.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_vertex(
        &mut self,
        position: Point3,
        normal: Vector3,
        temperature: f64,
        material_id: MaterialId,
        zone_id: ZoneId,
    ) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.temperature.push(temperature);
        self.material_id.push(material_id);
        self.zone_id.push(zone_id);
        index
    }

    /// Copies vertex `source` of `other` into `self`.
    fn push_from(&mut self, other: &Self, source: usize) -> u32 {
        self.push_vertex(
            other.vertices[source],
            other.normals[source],
            other.temperature[source],
            other.material_id[source],
            other.zone_id[source],
        )
    }

    /// Sorted, deduplicated zone ids present on the vertices.
    #[must_use]
    pub fn zone_ids_present(&self) -> Vec<ZoneId> {
        let mut ids = self.zone_id.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Recomputes vertex normals as the normalized sum of area-weighted face
    /// normals.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vector3::zeros(); self.vertices.len()];
        for tri in &self.indices {
            let [a, b, c] = tri.map(|i| i as usize);
            let face = (self.vertices[b] - self.vertices[a])
                .cross(&(self.vertices[c] - self.vertices[a]));
            acc[a] += face;
            acc[b] += face;
            acc[c] += face;
        }
        self.normals = acc
            .into_iter()
            .map(|n| {
                let len = n.norm();
                if len < TOLERANCE {
                    Vector3::zeros()
                } else {
                    n / len
                }
            })
            .collect();
    }

    /// Keeps the triangles accepted by `keep`, then drops vertices no kept
    /// triangle references. Surviving vertices keep their relative order.
    #[must_use]
    pub fn retain_triangles<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Self, &[u32; 3]) -> bool,
    {
        let kept: Vec<[u32; 3]> = self
            .indices
            .iter()
            .filter(|tri| keep(self, *tri))
            .copied()
            .collect();
        self.compacted(kept)
    }

    /// Rebuilds the mesh around `indices`, dropping unreferenced vertices.
    fn compacted(&self, indices: Vec<[u32; 3]>) -> Self {
        let mut used = vec![false; self.vertices.len()];
        for tri in &indices {
            for &v in tri {
                used[v as usize] = true;
            }
        }

        let mut out = Self::default();
        let mut remap = vec![u32::MAX; self.vertices.len()];
        for old in (0..used.len()).filter(|&i| used[i]) {
            remap[old] = out.push_from(self, old);
        }
        out.indices = indices
            .into_iter()
            .map(|tri| tri.map(|v| remap[v as usize]))
            .collect();
        out
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Two triangles forming the unit square in the z = 0 plane, split
    /// between zones 1 (bottom-left) and 2 (top-right).
    pub fn two_zone_square() -> AttributedMesh {
        let mut mesh = AttributedMesh::default();
        let n = Vector3::z();
        mesh.push_vertex(Point3::new(0.0, 0.0, 0.0), n, 100.0, 1, 1);
        mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), n, 200.0, 1, 1);
        mesh.push_vertex(Point3::new(0.0, 1.0, 0.0), n, 300.0, 1, 1);
        mesh.push_vertex(Point3::new(1.0, 1.0, 0.0), n, 400.0, 2, 2);
        mesh.indices = vec![[0, 1, 2], [1, 3, 2]];
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::two_zone_square;
    use super::*;

    #[test]
    fn counts() {
        let mesh = two_zone_square();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.is_empty());
        assert!(AttributedMesh::default().is_empty());
    }

    #[test]
    fn normals_of_flat_square_point_up() {
        let mut mesh = two_zone_square();
        mesh.normals.clear();
        mesh.compute_normals();
        for n in &mesh.normals {
            assert!((n - Vector3::z()).norm() < 1e-12);
        }
    }

    #[test]
    fn retain_drops_unreferenced_vertices() {
        let mesh = two_zone_square();
        let first_only = mesh.retain_triangles(|_, tri| tri[0] == 0);
        assert_eq!(first_only.vertex_count(), 3);
        assert_eq!(first_only.indices, vec![[0, 1, 2]]);
        assert_eq!(first_only.temperature, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn retain_all_is_identity() {
        let mesh = two_zone_square();
        assert_eq!(mesh.retain_triangles(|_, _| true), mesh);
    }

    #[test]
    fn zone_ids_present_are_sorted_unique() {
        assert_eq!(two_zone_square().zone_ids_present(), vec![1, 2]);
    }
}
