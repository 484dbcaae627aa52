//! Furnace model configuration.
//!
//! Units:
//! - lengths: m
//! - temperatures: deg C

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Parameters that fix the furnace geometry, the sampling lattice and the
/// initial view state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FurnaceConfig {
    // Geometry
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub height: f64,

    // Sampling lattice
    pub dimensions: [usize; 3],

    /// Temperatures are clamped into this range and colored over it.
    pub color_range: (f64, f64),

    // Initial view state
    pub default_case: String,
    pub iso_value: f64,
    pub shell_opacity: f64,
    pub iso_opacity: f64,

    /// Picks farther than this from every visible shell vertex miss.
    pub pick_radius: f64,
    /// Camera pan distance per unit step.
    pub pan_step: f64,

    /// Noise seed. `None` draws fresh entropy on every rebuild.
    pub seed: Option<u64>,
}

impl Default for FurnaceConfig {
    fn default() -> Self {
        let outer_radius = 1.8;
        Self {
            outer_radius,
            inner_radius: 0.7,
            height: 6.0,
            dimensions: [80, 80, 120],
            color_range: (50.0, 1650.0),
            default_case: "Baseline Design".to_owned(),
            iso_value: 800.0,
            shell_opacity: 0.9,
            iso_opacity: 0.45,
            pick_radius: 0.25,
            pan_step: 0.1 * outer_radius,
            seed: None,
        }
    }
}

impl FurnaceConfig {
    /// Parses a JSON document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON for this schema or the
    /// resulting configuration fails [`FurnaceConfig::validate`].
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a buildable model.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive radii or height, an inner radius not
    /// strictly inside the outer one, a grid dimension below 2, an empty
    /// color range, or a non-positive pick radius.
    pub fn validate(&self) -> Result<()> {
        positive("outer_radius", self.outer_radius)?;
        positive("inner_radius", self.inner_radius)?;
        positive("height", self.height)?;
        positive("pick_radius", self.pick_radius)?;

        if self.inner_radius >= self.outer_radius {
            return Err(ConfigError::InvalidGeometry(format!(
                "inner radius {} must be smaller than outer radius {}",
                self.inner_radius, self.outer_radius
            ))
            .into());
        }

        for (axis, &value) in ["x", "y", "z"].into_iter().zip(&self.dimensions) {
            if value < 2 {
                return Err(ConfigError::GridTooSmall { axis, value }.into());
            }
        }

        let (lo, hi) = self.color_range;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(ConfigError::InvalidColorRange { lo, hi }.into());
        }

        Ok(())
    }

    /// Total number of lattice points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.dimensions.iter().product()
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { parameter, value }.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ThermwatchError;

    #[test]
    fn default_is_valid() {
        let config = FurnaceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.point_count(), 80 * 80 * 120);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            FurnaceConfig::from_json_str(r#"{ "dimensions": [10, 10, 20], "seed": 7 }"#).unwrap();
        assert_eq!(config.dimensions, [10, 10, 20]);
        assert_eq!(config.seed, Some(7));
        assert!((config.outer_radius - 1.8).abs() < 1e-12);
        assert_eq!(config.default_case, "Baseline Design");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = FurnaceConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ThermwatchError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_tiny_grid() {
        let config = FurnaceConfig {
            dimensions: [80, 1, 120],
            ..FurnaceConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ThermwatchError::Config(ConfigError::GridTooSmall { axis: "y", value: 1 })
        ));
    }

    #[test]
    fn rejects_inverted_radii() {
        let config = FurnaceConfig {
            inner_radius: 2.0,
            ..FurnaceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_color_range() {
        let config = FurnaceConfig {
            color_range: (900.0, 900.0),
            ..FurnaceConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
