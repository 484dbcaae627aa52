use crate::extraction::AttributedMesh;
use crate::math::Point3;

/// Nearest-vertex index over a mesh, stored as an implicit k-d tree.
///
/// `order` holds vertex ids arranged so that the median of every slice is
/// the splitting node of that subtree; the split axis cycles x, y, z with
/// depth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointLocator {
    points: Vec<Point3>,
    order: Vec<u32>,
}

impl PointLocator {
    /// Builds the index over the vertices of `mesh`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn build(mesh: &AttributedMesh) -> Self {
        let points = mesh.vertices.clone();
        let mut order: Vec<u32> = (0..points.len() as u32).collect();
        split(&points, &mut order, 0);
        Self { points, order }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closest vertex to `query` and its distance. Equidistant vertices
    /// resolve to the lowest id. `None` on an empty index.
    #[must_use]
    pub fn nearest(&self, query: &Point3) -> Option<(u32, f64)> {
        let mut best: Option<(u32, f64)> = None;
        self.search(&self.order, 0, query, &mut best);
        best.map(|(id, d2)| (id, d2.sqrt()))
    }

    #[allow(clippy::float_cmp)]
    fn search(&self, slice: &[u32], depth: usize, query: &Point3, best: &mut Option<(u32, f64)>) {
        if slice.is_empty() {
            return;
        }
        let mid = slice.len() / 2;
        let id = slice[mid];
        let point = &self.points[id as usize];

        let d2 = (point - query).norm_squared();
        let better = match *best {
            None => true,
            Some((best_id, best_d2)) => d2 < best_d2 || (d2 == best_d2 && id < best_id),
        };
        if better {
            *best = Some((id, d2));
        }

        let axis = depth % 3;
        let delta = query[axis] - point[axis];
        let (near, far) = if delta < 0.0 {
            (&slice[..mid], &slice[mid + 1..])
        } else {
            (&slice[mid + 1..], &slice[..mid])
        };
        self.search(near, depth + 1, query, best);
        // Equal distances must still be visited for the id tie-break.
        if best.map_or(true, |(_, best_d2)| delta * delta <= best_d2) {
            self.search(far, depth + 1, query, best);
        }
    }
}

fn split(points: &[Point3], slice: &mut [u32], depth: usize) {
    if slice.len() <= 1 {
        return;
    }
    let axis = depth % 3;
    let mid = slice.len() / 2;
    slice.select_nth_unstable_by(mid, |&a, &b| {
        points[a as usize][axis].total_cmp(&points[b as usize][axis])
    });
    let (left, rest) = slice.split_at_mut(mid);
    split(points, left, depth + 1);
    split(points, &mut rest[1..], depth + 1);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cloud(count: usize, seed: u64) -> AttributedMesh {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mesh = AttributedMesh::default();
        for _ in 0..count {
            let p = Point3::new(
                rng.gen_range(-2.0..=2.0),
                rng.gen_range(-2.0..=2.0),
                rng.gen_range(-3.0..=3.0),
            );
            mesh.push_vertex(p, Vector3::z(), 0.0, 1, 1);
        }
        mesh
    }

    fn brute_force(mesh: &AttributedMesh, q: &Point3) -> (u32, f64) {
        let mut best = (0u32, f64::INFINITY);
        for (i, p) in mesh.vertices.iter().enumerate() {
            let d = (p - q).norm();
            if d < best.1 {
                best = (u32::try_from(i).unwrap(), d);
            }
        }
        best
    }

    #[test]
    fn empty_index_finds_nothing() {
        let locator = PointLocator::build(&AttributedMesh::default());
        assert!(locator.is_empty());
        assert!(locator.nearest(&Point3::origin()).is_none());
    }

    #[test]
    fn matches_brute_force() {
        let mesh = cloud(500, 7);
        let locator = PointLocator::build(&mesh);
        assert_eq!(locator.len(), 500);

        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let q = Point3::new(
                rng.gen_range(-3.0..=3.0),
                rng.gen_range(-3.0..=3.0),
                rng.gen_range(-4.0..=4.0),
            );
            let (id, d) = locator.nearest(&q).unwrap();
            let (expected_id, expected_d) = brute_force(&mesh, &q);
            assert_eq!(id, expected_id);
            assert!((d - expected_d).abs() < 1e-12);
        }
    }

    #[test]
    fn exact_vertex_is_found() {
        let mesh = cloud(64, 3);
        let locator = PointLocator::build(&mesh);
        for (i, p) in mesh.vertices.iter().enumerate() {
            let (id, d) = locator.nearest(p).unwrap();
            assert_eq!(id as usize, i);
            assert!(d.abs() < 1e-15);
        }
    }

    #[test]
    fn ties_resolve_to_lowest_id() {
        let mut mesh = AttributedMesh::default();
        for x in [1.0, -1.0, 1.0] {
            mesh.push_vertex(Point3::new(x, 0.0, 0.0), Vector3::z(), 0.0, 1, 1);
        }
        let locator = PointLocator::build(&mesh);
        let (id, d) = locator.nearest(&Point3::origin()).unwrap();
        assert_eq!(id, 0);
        assert!((d - 1.0).abs() < 1e-12);
    }
}
