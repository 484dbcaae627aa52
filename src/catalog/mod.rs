pub mod case;
pub mod material;
pub mod zone;

pub use case::{case_names, CaseParameters, FurnaceCase, HotSpot};
pub use material::{classify_material, material, material_name, Material, MaterialId, MATERIALS};
pub use zone::{classify_zone, zone_id, Band, Layer, Zone, ZoneCatalog, ZoneId};
