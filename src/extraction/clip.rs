use std::collections::HashMap;

use crate::geometry::{ClipAxis, HalfSpace};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::AttributedMesh;

/// The clip parameters, as set by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipState {
    pub enabled: bool,
    pub axis: ClipAxis,
    pub origin: Point3,
}

impl Default for ClipState {
    fn default() -> Self {
        Self {
            enabled: false,
            axis: ClipAxis::Z,
            origin: Point3::origin(),
        }
    }
}

impl ClipState {
    /// The active half-space, `None` when clipping is disabled.
    #[must_use]
    pub fn half_space(&self) -> Option<HalfSpace> {
        self.enabled.then(|| HalfSpace::new(self.origin, self.axis))
    }
}

/// Cuts a mesh against a [`HalfSpace`], keeping the side where
/// `dot(p - origin, normal) <= 0`.
///
/// Triangles straddling the plane are split; the new vertices sit on the
/// plane with linearly interpolated temperature and normal, and take their
/// material and zone from the kept endpoint.
pub struct ClipHalfSpace<'a> {
    mesh: &'a AttributedMesh,
    half_space: HalfSpace,
}

impl<'a> ClipHalfSpace<'a> {
    /// Creates a new `ClipHalfSpace` operation.
    #[must_use]
    pub fn new(mesh: &'a AttributedMesh, half_space: HalfSpace) -> Self {
        Self { mesh, half_space }
    }

    /// Executes the clip, returning a new mesh.
    #[must_use]
    pub fn execute(&self) -> AttributedMesh {
        let mesh = self.mesh;
        let distance: Vec<f64> = mesh
            .vertices
            .iter()
            .map(|p| self.half_space.signed_distance(p))
            .collect();

        let mut out = AttributedMesh::default();
        let mut remap = vec![u32::MAX; mesh.vertex_count()];
        for v in (0..distance.len()).filter(|&v| distance[v] <= 0.0) {
            remap[v] = out.push_from(mesh, v);
        }

        let mut cuts: HashMap<(u32, u32), u32> = HashMap::new();
        let mut polygon: Vec<u32> = Vec::with_capacity(4);
        for tri in &mesh.indices {
            let kept = tri.iter().filter(|&&v| distance[v as usize] <= 0.0).count();
            match kept {
                0 => continue,
                3 => {
                    out.indices.push(tri.map(|v| remap[v as usize]));
                    continue;
                }
                _ => {}
            }

            polygon.clear();
            for e in 0..3 {
                let (a, b) = (tri[e], tri[(e + 1) % 3]);
                let a_kept = distance[a as usize] <= 0.0;
                let b_kept = distance[b as usize] <= 0.0;
                if a_kept {
                    polygon.push(remap[a as usize]);
                }
                if a_kept != b_kept {
                    let key = (a.min(b), a.max(b));
                    let cut = *cuts
                        .entry(key)
                        .or_insert_with(|| split_edge(&mut out, mesh, &distance, key));
                    polygon.push(cut);
                }
            }

            for i in 1..polygon.len() - 1 {
                out.indices.push([polygon[0], polygon[i], polygon[i + 1]]);
            }
        }

        tracing::debug!(
            vertices = out.vertex_count(),
            triangles = out.triangle_count(),
            "clipped surface"
        );
        out
    }
}

/// Adds the vertex where edge `(a, b)` meets the plane.
fn split_edge(
    out: &mut AttributedMesh,
    mesh: &AttributedMesh,
    distance: &[f64],
    (a, b): (u32, u32),
) -> u32 {
    let (a, b) = (a as usize, b as usize);
    let t = distance[a] / (distance[a] - distance[b]);
    let position = mesh.vertices[a] + (mesh.vertices[b] - mesh.vertices[a]) * t;
    let normal = mesh.normals[a] + (mesh.normals[b] - mesh.normals[a]) * t;
    let normal = if normal.norm() < TOLERANCE {
        Vector3::zeros()
    } else {
        normal.normalize()
    };
    let temperature = mesh.temperature[a] + (mesh.temperature[b] - mesh.temperature[a]) * t;
    let source = if distance[a] <= 0.0 { a } else { b };
    out.push_vertex(
        position,
        normal,
        temperature,
        mesh.material_id[source],
        mesh.zone_id[source],
    )
}
