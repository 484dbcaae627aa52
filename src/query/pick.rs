use serde::Serialize;

use crate::catalog::{MaterialId, ZoneId};
use crate::extraction::AttributedMesh;
use crate::math::{round_point, round_to, Point3};

use super::PointLocator;

/// Field values resolved at a picked location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickResult {
    pub vertex_id: u32,
    /// Temperature of the nearest vertex, rounded to 0.1 deg C.
    pub temperature: f64,
    pub material_id: MaterialId,
    pub zone_id: ZoneId,
    /// Picked world position, rounded to 0.001 per axis.
    pub position: [f64; 3],
}

/// Outcome of a pick query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PickOutcome {
    Hit(PickResult),
    NoHit,
}

impl PickOutcome {
    #[must_use]
    pub fn hit(&self) -> Option<&PickResult> {
        match self {
            Self::Hit(result) => Some(result),
            Self::NoHit => None,
        }
    }

    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// Probe text for display.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Hit(r) => {
                let [x, y, z] = r.position;
                format!(
                    "Node {}: {:.1} deg C (mat {}, zone {}) at ({x:.3}, {y:.3}, {z:.3})",
                    r.vertex_id, r.temperature, r.material_id, r.zone_id
                )
            }
            Self::NoHit => "No hit (try another spot)".to_owned(),
        }
    }
}

/// Resolves `world` to the nearest vertex of `mesh` within `pick_radius`.
///
/// `locator` must have been built from `mesh`.
#[must_use]
pub fn pick(
    locator: &PointLocator,
    mesh: &AttributedMesh,
    world: &Point3,
    pick_radius: f64,
) -> PickOutcome {
    let Some((vertex_id, distance)) = locator.nearest(world) else {
        return PickOutcome::NoHit;
    };
    if distance > pick_radius {
        return PickOutcome::NoHit;
    }
    let v = vertex_id as usize;
    PickOutcome::Hit(PickResult {
        vertex_id,
        temperature: round_to(mesh.temperature[v], 1),
        material_id: mesh.material_id[v],
        zone_id: mesh.zone_id[v],
        position: round_point(world, 3),
    })
}
