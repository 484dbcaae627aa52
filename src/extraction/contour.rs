use crate::field::{Grid, ScalarField};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::AttributedMesh;

/// Cube corner offsets in a consistent order.
const CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Cube edges as pairs of corner indices.
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Extracts the level set `field == threshold` of a [`Grid`].
///
/// Scalar Surface Nets: every cell whose corners straddle the threshold
/// gets one vertex at the mean of its interpolated edge crossings, and a quad
/// joins the four cells around each crossing lattice edge. Vertex
/// temperature is interpolated along the same edges; material and zone ids
/// come from the nearest lattice point. Normals point towards increasing
/// field values.
///
/// A threshold outside the sampled range gives an empty mesh.
pub struct ContourGrid<'a> {
    grid: &'a Grid,
    field: ScalarField,
    threshold: f64,
}

impl<'a> ContourGrid<'a> {
    /// Creates a new `ContourGrid` operation.
    #[must_use]
    pub fn new(grid: &'a Grid, field: ScalarField, threshold: f64) -> Self {
        Self {
            grid,
            field,
            threshold,
        }
    }

    /// The domain boundary (`distance == 0`).
    #[must_use]
    pub fn shell(grid: &'a Grid) -> Self {
        Self::new(grid, ScalarField::Distance, 0.0)
    }

    /// The isotherm at `celsius`.
    #[must_use]
    pub fn isotherm(grid: &'a Grid, celsius: f64) -> Self {
        Self::new(grid, ScalarField::Temperature, celsius)
    }

    /// Executes the extraction.
    #[must_use]
    pub fn execute(&self) -> AttributedMesh {
        let grid = self.grid;
        let dims = grid.dimensions();
        let cells = [dims[0] - 1, dims[1] - 1, dims[2] - 1];
        let cell_index = |c: [usize; 3]| c[0] + cells[0] * (c[1] + cells[1] * c[2]);
        let values = grid.scalars(self.field);
        let inside = |idx: usize| values[idx] <= self.threshold;

        let mut mesh = AttributedMesh::default();
        let mut cell_vertex = vec![u32::MAX; cells.iter().product()];

        for k in 0..cells[2] {
            for j in 0..cells[1] {
                for i in 0..cells[0] {
                    if let Some(index) = self.cell_vertex(&mut mesh, [i, j, k]) {
                        cell_vertex[cell_index([i, j, k])] = index;
                    }
                }
            }
        }

        let emit_quad = |quad: [[usize; 3]; 4], mesh: &mut AttributedMesh| {
            let [a, b, c, d] = quad.map(|cell| cell_vertex[cell_index(cell)]);
            if [a, b, c, d].contains(&u32::MAX) {
                return;
            }
            mesh.indices.push([a, b, c]);
            mesh.indices.push([a, c, d]);
        };

        for k in 0..dims[2] {
            for j in 0..dims[1] {
                for i in 0..dims[0] {
                    let p = [i, j, k];
                    for axis in 0..3 {
                        let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
                        if p[axis] + 1 >= dims[axis]
                            || p[u] == 0
                            || p[v] == 0
                            || p[u] + 1 >= dims[u]
                            || p[v] + 1 >= dims[v]
                        {
                            continue;
                        }

                        let mut q = p;
                        q[axis] += 1;
                        let a = inside(grid.index(p[0], p[1], p[2]));
                        let b = inside(grid.index(q[0], q[1], q[2]));
                        if a == b {
                            continue;
                        }

                        // The four cells sharing this lattice edge, ordered
                        // around it in the (u, v) plane.
                        let c11 = p;
                        let mut c00 = p;
                        c00[u] -= 1;
                        c00[v] -= 1;
                        let mut c01 = p;
                        c01[u] -= 1;
                        let mut c10 = p;
                        c10[v] -= 1;

                        if a {
                            emit_quad([c00, c10, c11, c01], &mut mesh);
                        } else {
                            emit_quad([c00, c01, c11, c10], &mut mesh);
                        }
                    }
                }
            }
        }

        mesh.compute_normals();
        // Cells on the lattice border can straddle the threshold without
        // joining any quad.
        let mesh = mesh.retain_triangles(|_, _| true);

        tracing::debug!(
            field = ?self.field,
            threshold = self.threshold,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "contoured grid"
        );
        mesh
    }

    /// Places the vertex of cell `c` if it straddles the threshold.
    fn cell_vertex(&self, mesh: &mut AttributedMesh, c: [usize; 3]) -> Option<u32> {
        let grid = self.grid;
        let values = grid.scalars(self.field);
        let temperatures = grid.temperatures();

        let corner_index =
            CORNERS.map(|[dx, dy, dz]| grid.index(c[0] + dx, c[1] + dy, c[2] + dz));
        let corner_inside = corner_index.map(|idx| values[idx] <= self.threshold);
        if corner_inside.iter().all(|&b| b) || corner_inside.iter().all(|&b| !b) {
            return None;
        }

        let mut position = Vector3::zeros();
        let mut temperature = 0.0;
        let mut crossings = 0.0;
        for (a, b) in EDGES {
            if corner_inside[a] == corner_inside[b] {
                continue;
            }
            let (ia, ib) = (corner_index[a], corner_index[b]);
            let (va, vb) = (values[ia], values[ib]);
            let t = if (vb - va).abs() < TOLERANCE {
                0.5
            } else {
                ((self.threshold - va) / (vb - va)).clamp(0.0, 1.0)
            };

            let pa = corner_point(grid, c, CORNERS[a]);
            let pb = corner_point(grid, c, CORNERS[b]);
            position += pa.coords + (pb - pa) * t;
            temperature += temperatures[ia] + (temperatures[ib] - temperatures[ia]) * t;
            crossings += 1.0;
        }

        let point = Point3::from(position / crossings);
        let nearest = grid.nearest_index(&point);
        Some(mesh.push_vertex(
            point,
            Vector3::zeros(),
            temperature / crossings,
            grid.material_ids()[nearest],
            grid.zone_ids()[nearest],
        ))
    }
}

fn corner_point(grid: &Grid, cell: [usize; 3], offset: [usize; 3]) -> Point3 {
    grid.point(cell[0] + offset[0], cell[1] + offset[1], cell[2] + offset[2])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::field::{Bounds, GridSample};

    fn sphere_grid(n: usize) -> Grid {
        let bounds = Bounds::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        Grid::sample_with([n, n, n], bounds, |p| GridSample {
            distance: p.coords.norm() - 0.5,
            temperature: 500.0 + 100.0 * p.z,
            material_id: if p.x < 0.0 { 1 } else { 4 },
            zone_id: if p.x < 0.0 { 1 } else { 3 },
        })
    }

    #[test]
    fn sphere_vertices_lie_near_radius() {
        let grid = sphere_grid(20);
        let mesh = ContourGrid::shell(&grid).execute();
        assert!(!mesh.is_empty());
        let h = grid.spacing().x;
        for v in &mesh.vertices {
            assert!((v.coords.norm() - 0.5).abs() < h, "vertex {v:?} off the sphere");
        }
    }

    #[test]
    fn sphere_is_closed_and_outward() {
        let grid = sphere_grid(20);
        let mesh = ContourGrid::shell(&grid).execute();

        let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
        for tri in &mesh.indices {
            for e in 0..3 {
                let (a, b) = (tri[e], tri[(e + 1) % 3]);
                *edges.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }
        assert!(edges.values().all(|&count| count == 2));

        for (v, n) in mesh.vertices.iter().zip(&mesh.normals) {
            assert!(n.dot(&v.coords) > 0.0, "normal at {v:?} points inward");
        }
    }

    #[test]
    fn isotherm_of_linear_field_is_flat() {
        let grid = sphere_grid(12);
        let mesh = ContourGrid::isotherm(&grid, 500.0).execute();
        assert!(!mesh.is_empty());
        for (v, t) in mesh.vertices.iter().zip(&mesh.temperature) {
            assert!(v.z.abs() < 1e-9);
            assert!((t - 500.0).abs() < 1e-9);
        }
    }

    #[test]
    fn ids_come_from_nearest_sample() {
        let grid = sphere_grid(20);
        let mesh = ContourGrid::shell(&grid).execute();
        let h = grid.spacing().x;
        for (v, (&m, &z)) in mesh
            .vertices
            .iter()
            .zip(mesh.material_id.iter().zip(&mesh.zone_id))
        {
            if v.x < -h {
                assert_eq!((m, z), (1, 1));
            } else if v.x > h {
                assert_eq!((m, z), (4, 3));
            }
        }
    }

    #[test]
    fn threshold_outside_range_is_empty() {
        let grid = sphere_grid(10);
        let mesh = ContourGrid::isotherm(&grid, 5000.0).execute();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn extraction_is_deterministic() {
        let grid = sphere_grid(14);
        let a = ContourGrid::shell(&grid).execute();
        let b = ContourGrid::shell(&grid).execute();
        assert_eq!(a, b);
    }
}
