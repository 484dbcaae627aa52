use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{classify_material, classify_zone, CaseParameters, FurnaceCase};
use crate::config::FurnaceConfig;
use crate::error::Result;
use crate::geometry::ShellDomain;
use crate::math::{clamp01, Point3};

use super::{Bounds, Grid, GridSample};

/// Minimum radial span used when normalizing the radial fraction.
const MIN_RADIAL_SPAN: f64 = 1e-3;
/// Width of the Gaussian hot-spot bump, in m^2.
const HOT_SPOT_WIDTH: f64 = 0.15;

/// Normalized position of a point inside the lining.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiningFractions {
    /// Distance from the furnace axis (m).
    pub radius: f64,
    /// `0` at the hot face, `1` at the shell.
    pub radial: f64,
    /// Height fraction, `0` at the bottom and `1` at the top.
    pub vertical: f64,
}

impl LiningFractions {
    #[must_use]
    pub fn at(p: &Point3, inner_radius: f64, outer_radius: f64, height: f64) -> Self {
        let radius = p.x.hypot(p.y);
        let span = (outer_radius - inner_radius).max(MIN_RADIAL_SPAN);
        Self {
            radius,
            radial: clamp01((radius - inner_radius) / span),
            vertical: clamp01((p.z + height * 0.5) / height),
        }
    }
}

/// Samples the furnace domain into a fully attributed [`Grid`] for one case.
pub struct SynthesizeField<'a> {
    config: &'a FurnaceConfig,
    case: FurnaceCase,
}

impl<'a> SynthesizeField<'a> {
    /// Creates a new `SynthesizeField` operation.
    #[must_use]
    pub fn new(config: &'a FurnaceConfig, case: FurnaceCase) -> Self {
        Self { config, case }
    }

    /// Executes the synthesis.
    ///
    /// Noise is drawn independently per point. With `config.seed` set, the
    /// draw is reproducible for a given case.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn execute(&self) -> Result<Grid> {
        self.config.validate()?;

        let config = self.config;
        let domain = ShellDomain::from_config(config);
        let (min, max) = domain.bounds();
        let params = self.case.parameters();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ self.case.seed_salt()),
            None => StdRng::from_entropy(),
        };
        let amplitude = params.noise_amplitude.abs();

        let grid = Grid::sample_with(config.dimensions, Bounds::new(min, max), |p| {
            let fractions =
                LiningFractions::at(p, config.inner_radius, config.outer_radius, config.height);
            let noise = if amplitude > 0.0 {
                rng.gen_range(-amplitude..=amplitude)
            } else {
                0.0
            };
            GridSample {
                distance: domain.evaluate(p),
                temperature: temperature_profile(&fractions, &params, noise, config.color_range),
                material_id: classify_material(fractions.radial, fractions.vertical),
                zone_id: classify_zone(fractions.radial, fractions.vertical),
            }
        });

        tracing::debug!(
            case = self.case.name(),
            points = grid.len(),
            "synthesized temperature field"
        );
        Ok(grid)
    }
}

/// Analytic temperature: a hot core cooling towards the shell and the top,
/// plus noise and a Gaussian hot spot, clamped to the color range.
#[must_use]
pub fn temperature_profile(
    fractions: &LiningFractions,
    params: &CaseParameters,
    noise: f64,
    (lo, hi): (f64, f64),
) -> f64 {
    let base = 1600.0 - 1550.0 * fractions.radial - 80.0 * fractions.vertical + params.offset;
    let hot = params.hot_spot;
    let hot_term = (-(fractions.radius - hot.radius).powi(2) / HOT_SPOT_WIDTH).exp() * hot.delta;
    (base + noise + hot_term).clamp(lo, hi)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{ZoneCatalog, MATERIALS};
    use approx::assert_relative_eq;

    fn small_config(seed: Option<u64>) -> FurnaceConfig {
        FurnaceConfig {
            dimensions: [16, 16, 24],
            seed,
            ..FurnaceConfig::default()
        }
    }

    #[test]
    fn every_point_is_classified_and_in_range() {
        let config = small_config(None);
        let grid = SynthesizeField::new(&config, FurnaceCase::ErodedState2)
            .execute()
            .unwrap();
        let catalog = ZoneCatalog::new();
        let (lo, hi) = config.color_range;

        assert_eq!(grid.len(), 16 * 16 * 24);
        for ((&t, &m), &z) in grid
            .temperatures()
            .iter()
            .zip(grid.material_ids())
            .zip(grid.zone_ids())
        {
            assert!((lo..=hi).contains(&t), "temperature {t} out of range");
            assert!(MATERIALS.iter().any(|mat| mat.id == m));
            assert!(catalog.contains(z));
        }
    }

    #[test]
    fn seeded_synthesis_is_reproducible() {
        let config = small_config(Some(42));
        let a = SynthesizeField::new(&config, FurnaceCase::BaselineDesign)
            .execute()
            .unwrap();
        let b = SynthesizeField::new(&config, FurnaceCase::BaselineDesign)
            .execute()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_cases_draw_different_noise() {
        let config = small_config(Some(42));
        let a = SynthesizeField::new(&config, FurnaceCase::BaselineDesign)
            .execute()
            .unwrap();
        let b = SynthesizeField::new(&config, FurnaceCase::ErodedState1)
            .execute()
            .unwrap();
        assert_ne!(a.temperatures(), b.temperatures());
        assert_eq!(a.zone_ids(), b.zone_ids());
    }

    #[test]
    fn distance_matches_domain() {
        let config = small_config(Some(1));
        let grid = SynthesizeField::new(&config, FurnaceCase::BaselineDesign)
            .execute()
            .unwrap();
        let domain = ShellDomain::from_config(&config);
        let idx = grid.index(3, 8, 12);
        let p = grid.point(3, 8, 12);
        assert_relative_eq!(
            grid.scalars(crate::field::ScalarField::Distance)[idx],
            domain.evaluate(&p)
        );
    }

    #[test]
    fn invalid_config_fails() {
        let config = FurnaceConfig {
            dimensions: [1, 16, 16],
            ..FurnaceConfig::default()
        };
        assert!(SynthesizeField::new(&config, FurnaceCase::BaselineDesign)
            .execute()
            .is_err());
    }

    #[test]
    fn profile_without_noise() {
        let params = FurnaceCase::BaselineDesign.parameters();
        let hot_face = LiningFractions {
            radius: 0.7,
            radial: 0.0,
            vertical: 0.0,
        };
        let expected = 1600.0 + (-(0.3f64).powi(2) / HOT_SPOT_WIDTH).exp() * 30.0;
        assert_relative_eq!(
            temperature_profile(&hot_face, &params, 0.0, (50.0, 1650.0)),
            expected,
            epsilon = 1e-9
        );

        let shell_top = LiningFractions {
            radius: 1.8,
            radial: 1.0,
            vertical: 1.0,
        };
        // 1600 - 1550 - 80 is below the range floor.
        assert_relative_eq!(
            temperature_profile(&shell_top, &params, 0.0, (50.0, 1650.0)),
            50.0
        );
    }

    #[test]
    fn fractions_clamp_outside_lining() {
        let f = LiningFractions::at(&Point3::new(0.0, 0.0, -3.0), 0.7, 1.8, 6.0);
        assert_relative_eq!(f.radial, 0.0);
        assert_relative_eq!(f.vertical, 0.0);
        let f = LiningFractions::at(&Point3::new(1.8, 1.8, 3.0), 0.7, 1.8, 6.0);
        assert_relative_eq!(f.radial, 1.0);
        assert_relative_eq!(f.vertical, 1.0);
    }
}
