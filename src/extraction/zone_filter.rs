use std::collections::BTreeSet;

use crate::catalog::{ZoneCatalog, ZoneId};

use super::AttributedMesh;

/// The set of zone ids currently shown. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneVisibility {
    ids: BTreeSet<ZoneId>,
}

impl ZoneVisibility {
    /// Every zone in `catalog`.
    #[must_use]
    pub fn all(catalog: &ZoneCatalog) -> Self {
        Self {
            ids: catalog.ids().collect(),
        }
    }

    /// Keeps the requested ids that exist in `catalog`. If none survive, every
    /// zone becomes visible.
    #[must_use]
    pub fn from_requested<I>(requested: I, catalog: &ZoneCatalog) -> Self
    where
        I: IntoIterator<Item = ZoneId>,
    {
        let (known, unknown): (BTreeSet<ZoneId>, BTreeSet<ZoneId>) =
            requested.into_iter().partition(|&id| catalog.contains(id));
        if !unknown.is_empty() {
            tracing::warn!(?unknown, "dropping unknown zone ids");
        }
        if known.is_empty() {
            tracing::warn!("empty zone visibility, showing all zones");
            return Self::all(catalog);
        }
        Self { ids: known }
    }

    #[must_use]
    pub fn contains(&self, id: ZoneId) -> bool {
        self.ids.contains(&id)
    }

    /// Visible ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.ids.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `true` when every zone of `catalog` is visible.
    #[must_use]
    pub fn shows_all(&self, catalog: &ZoneCatalog) -> bool {
        catalog.ids().all(|id| self.contains(id))
    }
}

/// Keeps only the triangles whose three vertices all lie in visible zones.
pub struct FilterZones<'a> {
    mesh: &'a AttributedMesh,
    visibility: &'a ZoneVisibility,
}

impl<'a> FilterZones<'a> {
    /// Creates a new `FilterZones` operation.
    #[must_use]
    pub fn new(mesh: &'a AttributedMesh, visibility: &'a ZoneVisibility) -> Self {
        Self { mesh, visibility }
    }

    /// Executes the filter, returning a new mesh.
    #[must_use]
    pub fn execute(&self) -> AttributedMesh {
        let filtered = self.mesh.retain_triangles(|mesh, tri| {
            tri.iter()
                .all(|&v| self.visibility.contains(mesh.zone_id[v as usize]))
        });
        tracing::debug!(
            zones = self.visibility.len(),
            triangles = filtered.triangle_count(),
            "filtered surface by zone"
        );
        filtered
    }
}
