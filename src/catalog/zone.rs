use serde::Serialize;

/// Identifier of a zone in the [`ZoneCatalog`]. Ids start at 1.
pub type ZoneId = u32;

/// Lower edge of the middle bucket along either axis.
const FIRST_SPLIT: f64 = 0.33;
/// Lower edge of the last bucket along either axis.
const SECOND_SPLIT: f64 = 0.66;

/// Vertical band of the furnace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Band {
    Bottom,
    Mid,
    Top,
}

impl Band {
    pub const ALL: [Self; 3] = [Self::Bottom, Self::Mid, Self::Top];

    /// Buckets a vertical fraction in `[0, 1]`.
    #[must_use]
    pub fn from_fraction(vertical_frac: f64) -> Self {
        if vertical_frac < FIRST_SPLIT {
            Self::Bottom
        } else if vertical_frac < SECOND_SPLIT {
            Self::Mid
        } else {
            Self::Top
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bottom => "Bottom",
            Self::Mid => "Mid",
            Self::Top => "Top",
        }
    }

    fn index(self) -> u32 {
        match self {
            Self::Bottom => 0,
            Self::Mid => 1,
            Self::Top => 2,
        }
    }
}

/// Radial lining layer, from the hot face outwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Layer {
    HotFace,
    Safety,
    Shell,
}

impl Layer {
    pub const ALL: [Self; 3] = [Self::HotFace, Self::Safety, Self::Shell];

    /// Buckets a radial fraction in `[0, 1]`.
    #[must_use]
    pub fn from_fraction(radial_frac: f64) -> Self {
        if radial_frac < FIRST_SPLIT {
            Self::HotFace
        } else if radial_frac < SECOND_SPLIT {
            Self::Safety
        } else {
            Self::Shell
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::HotFace => "Hot Face",
            Self::Safety => "Safety",
            Self::Shell => "Shell",
        }
    }

    fn index(self) -> u32 {
        match self {
            Self::HotFace => 0,
            Self::Safety => 1,
            Self::Shell => 2,
        }
    }
}

/// One band x layer partition of the lining.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub id: ZoneId,
    pub band: Band,
    pub layer: Layer,
    pub name: String,
}

/// Stable id of the zone at `band` x `layer`.
#[must_use]
pub fn zone_id(band: Band, layer: Layer) -> ZoneId {
    band.index() * 3 + layer.index() + 1
}

/// Zone id of a point from its normalized radial and vertical fractions.
#[must_use]
pub fn classify_zone(radial_frac: f64, vertical_frac: f64) -> ZoneId {
    zone_id(
        Band::from_fraction(vertical_frac),
        Layer::from_fraction(radial_frac),
    )
}

/// The fixed, ordered list of nine zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCatalog {
    zones: Vec<Zone>,
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        let zones = Band::ALL
            .into_iter()
            .flat_map(|band| {
                Layer::ALL.into_iter().map(move |layer| Zone {
                    id: zone_id(band, layer),
                    band,
                    layer,
                    name: format!("{} - {}", band.name(), layer.name()),
                })
            })
            .collect();
        Self { zones }
    }
}

impl ZoneCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zones in id order.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Looks up a zone by id.
    #[must_use]
    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ZoneId) -> bool {
        self.get(id).is_some()
    }

    /// All zone ids in order.
    pub fn ids(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.zones.iter().map(|zone| zone.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_nine_ordered_zones() {
        let catalog = ZoneCatalog::new();
        assert_eq!(catalog.len(), 9);
        let ids: Vec<_> = catalog.ids().collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
        assert_eq!(catalog.zones()[0].name, "Bottom - Hot Face");
        assert_eq!(catalog.zones()[4].name, "Mid - Safety");
        assert_eq!(catalog.zones()[8].name, "Top - Shell");
    }

    #[test]
    fn ids_match_band_and_layer() {
        let catalog = ZoneCatalog::new();
        for zone in catalog.zones() {
            assert_eq!(zone_id(zone.band, zone.layer), zone.id);
        }
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(classify_zone(0.0, 0.0), 1);
        assert_eq!(classify_zone(0.329, 0.0), 1);
        assert_eq!(classify_zone(0.33, 0.0), 2);
        assert_eq!(classify_zone(0.66, 0.0), 3);
        assert_eq!(classify_zone(0.0, 0.33), 4);
        assert_eq!(classify_zone(0.5, 0.5), 5);
        assert_eq!(classify_zone(1.0, 1.0), 9);
    }

    #[test]
    fn unknown_id_is_absent() {
        let catalog = ZoneCatalog::new();
        assert!(catalog.get(0).is_none());
        assert!(!catalog.contains(10));
        assert_eq!(catalog.get(7).map(|z| z.band), Some(Band::Top));
    }
}
