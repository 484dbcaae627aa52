use crate::config::FurnaceConfig;
use crate::math::Point3;

use super::Implicit;

/// The hollow-cylinder lining: the annulus between `inner_radius` and
/// `outer_radius`, cut to the box `[-R, R]^2 x [-H/2, H/2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellDomain {
    outer_radius: f64,
    inner_radius: f64,
    height: f64,
    function: Implicit,
}

impl ShellDomain {
    /// Builds the domain from its three dimensions.
    #[must_use]
    pub fn new(outer_radius: f64, inner_radius: f64, height: f64) -> Self {
        let (min, max) = bounding_corners(outer_radius, height);
        let function = Implicit::cylinder(outer_radius)
            .difference(Implicit::cylinder(inner_radius))
            .intersection(Implicit::aabb(min, max));
        Self {
            outer_radius,
            inner_radius,
            height,
            function,
        }
    }

    /// Builds the domain described by `config`.
    #[must_use]
    pub fn from_config(config: &FurnaceConfig) -> Self {
        Self::new(config.outer_radius, config.inner_radius, config.height)
    }

    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Minimum and maximum corners of the bounding box.
    #[must_use]
    pub fn bounds(&self) -> (Point3, Point3) {
        bounding_corners(self.outer_radius, self.height)
    }

    /// Evaluates the domain predicate; `<= 0` inside the lining.
    #[must_use]
    pub fn evaluate(&self, p: &Point3) -> f64 {
        self.function.evaluate(p)
    }

    /// The composed implicit function.
    #[must_use]
    pub fn function(&self) -> &Implicit {
        &self.function
    }
}

fn bounding_corners(outer_radius: f64, height: f64) -> (Point3, Point3) {
    let half = height * 0.5;
    (
        Point3::new(-outer_radius, -outer_radius, -half),
        Point3::new(outer_radius, outer_radius, half),
    )
}
