use serde::Serialize;

/// Identifier of a lining material. Ids start at 1.
pub type MaterialId = u32;

pub const CARBON_REFRACTORY: MaterialId = 1;
pub const HIGH_ALUMINA_BRICK: MaterialId = 2;
pub const SILICA_BRICK: MaterialId = 3;
pub const STEEL_SHELL: MaterialId = 4;

/// Static reference data for a lining material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: &'static str,
    /// Thermal conductivity in W/(m K).
    pub thermal_conductivity: f64,
    /// Density in kg/m^3.
    pub density: f64,
    pub note: &'static str,
}

/// Reference materials in id order.
pub const MATERIALS: [Material; 4] = [
    Material {
        id: CARBON_REFRACTORY,
        name: "Carbon Refractory",
        thermal_conductivity: 12.0,
        density: 1650.0,
        note: "Hot face",
    },
    Material {
        id: HIGH_ALUMINA_BRICK,
        name: "High-Alumina Brick",
        thermal_conductivity: 4.2,
        density: 2300.0,
        note: "Safety lining",
    },
    Material {
        id: SILICA_BRICK,
        name: "Silica Brick",
        thermal_conductivity: 2.1,
        density: 1900.0,
        note: "Upper stack",
    },
    Material {
        id: STEEL_SHELL,
        name: "Steel Shell",
        thermal_conductivity: 45.0,
        density: 7800.0,
        note: "Shell",
    },
];

/// Looks up a material by id.
#[must_use]
pub fn material(id: MaterialId) -> Option<&'static Material> {
    MATERIALS.iter().find(|m| m.id == id)
}

/// Display name of a material, `"N/A"` for unknown ids.
#[must_use]
pub fn material_name(id: MaterialId) -> &'static str {
    material(id).map_or("N/A", |m| m.name)
}

/// Material of a point from its normalized radial and vertical fractions.
///
/// The safety layer switches to silica brick in the upper stack.
#[must_use]
pub fn classify_material(radial_frac: f64, vertical_frac: f64) -> MaterialId {
    if radial_frac < 0.33 {
        CARBON_REFRACTORY
    } else if radial_frac < 0.66 {
        if vertical_frac < 0.65 {
            HIGH_ALUMINA_BRICK
        } else {
            SILICA_BRICK
        }
    } else {
        STEEL_SHELL
    }
}
