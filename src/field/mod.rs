mod synthesize;

pub use synthesize::{temperature_profile, LiningFractions, SynthesizeField};

use crate::catalog::{MaterialId, ZoneId};
use crate::geometry::ClipAxis;
use crate::math::{Point3, Vector3};

/// Selects which precomputed scalar array an extraction pass reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    /// Domain membership predicate; `<= 0` inside the lining.
    Distance,
    /// Clamped temperature in deg C.
    Temperature,
}

/// Axis-aligned bounds of the sampling lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds {
    #[must_use]
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    #[must_use]
    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }

    /// `(min, max)` along one axis.
    #[must_use]
    pub fn axis_range(&self, axis: ClipAxis) -> (f64, f64) {
        let i = axis.index();
        (self.min[i], self.max[i])
    }

    /// Radius of the sphere circumscribing the bounds.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.extent().norm() * 0.5
    }
}

/// Attribute values of one lattice point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSample {
    pub distance: f64,
    pub temperature: f64,
    pub material_id: MaterialId,
    pub zone_id: ZoneId,
}

/// A regular 3D lattice carrying the sampled field.
///
/// Points are stored with x varying fastest, then y, then z.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    dimensions: [usize; 3],
    bounds: Bounds,
    spacing: Vector3,
    distance: Vec<f64>,
    temperature: Vec<f64>,
    material_id: Vec<MaterialId>,
    zone_id: Vec<ZoneId>,
}

impl Grid {
    /// Samples every lattice point of `dimensions` over `bounds` with `sample`.
    ///
    /// Each dimension must be at least 2.
    pub fn sample_with<F>(dimensions: [usize; 3], bounds: Bounds, mut sample: F) -> Self
    where
        F: FnMut(&Point3) -> GridSample,
    {
        let spacing = lattice_spacing(dimensions, &bounds);
        let count = dimensions.iter().product();
        let mut grid = Self {
            dimensions,
            bounds,
            spacing,
            distance: Vec::with_capacity(count),
            temperature: Vec::with_capacity(count),
            material_id: Vec::with_capacity(count),
            zone_id: Vec::with_capacity(count),
        };

        let [nx, ny, nz] = dimensions;
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let s = sample(&grid.point(i, j, k));
                    grid.distance.push(s.distance);
                    grid.temperature.push(s.temperature);
                    grid.material_id.push(s.material_id);
                    grid.zone_id.push(s.zone_id);
                }
            }
        }
        grid
    }

    #[must_use]
    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[must_use]
    pub fn spacing(&self) -> &Vector3 {
        &self.spacing
    }

    /// Number of lattice points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// Linear index of lattice point `(i, j, k)`.
    #[must_use]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        let [nx, ny, _] = self.dimensions;
        i + nx * (j + ny * k)
    }

    /// World position of lattice point `(i, j, k)`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn point(&self, i: usize, j: usize, k: usize) -> Point3 {
        self.bounds.min
            + Vector3::new(
                i as f64 * self.spacing.x,
                j as f64 * self.spacing.y,
                k as f64 * self.spacing.z,
            )
    }

    /// Index of the lattice point closest to `p`, clamped into the lattice.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    #[must_use]
    pub fn nearest_index(&self, p: &Point3) -> usize {
        let mut ijk = [0usize; 3];
        for axis in 0..3 {
            let last = self.dimensions[axis] - 1;
            let t = ((p[axis] - self.bounds.min[axis]) / self.spacing[axis]).round();
            ijk[axis] = t.clamp(0.0, last as f64) as usize;
        }
        self.index(ijk[0], ijk[1], ijk[2])
    }

    /// The scalar array selected by `field`.
    #[must_use]
    pub fn scalars(&self, field: ScalarField) -> &[f64] {
        match field {
            ScalarField::Distance => &self.distance,
            ScalarField::Temperature => &self.temperature,
        }
    }

    #[must_use]
    pub fn temperatures(&self) -> &[f64] {
        &self.temperature
    }

    #[must_use]
    pub fn material_ids(&self) -> &[MaterialId] {
        &self.material_id
    }

    #[must_use]
    pub fn zone_ids(&self) -> &[ZoneId] {
        &self.zone_id
    }

    /// Smallest and largest sampled temperature, `None` when empty.
    #[must_use]
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.temperature.iter().fold(None, |acc, &t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn lattice_spacing(dimensions: [usize; 3], bounds: &Bounds) -> Vector3 {
    let extent = bounds.extent();
    Vector3::new(
        extent.x / (dimensions[0] - 1) as f64,
        extent.y / (dimensions[1] - 1) as f64,
        extent.z / (dimensions[2] - 1) as f64,
    )
}
