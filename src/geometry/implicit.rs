use crate::math::{Point3, Vector3};

/// An implicit function `f(p)` that is `<= 0` inside the shape and `> 0`
/// outside.
///
/// The primitive set is fixed, so composition is a plain tagged union
/// evaluated by structural recursion.
#[derive(Debug, Clone, PartialEq)]
pub enum Implicit {
    /// Infinite cylinder around the z axis through the origin.
    Cylinder { radius: f64 },
    /// Axis-aligned box.
    Aabb { min: Point3, max: Point3 },
    /// Points inside `base` but outside `cut`.
    Difference(Box<Implicit>, Box<Implicit>),
    /// Points inside both operands.
    Intersection(Box<Implicit>, Box<Implicit>),
}

impl Implicit {
    /// Infinite z-aligned cylinder.
    #[must_use]
    pub fn cylinder(radius: f64) -> Self {
        Self::Cylinder { radius }
    }

    /// Axis-aligned box spanning `min..max`.
    #[must_use]
    pub fn aabb(min: Point3, max: Point3) -> Self {
        Self::Aabb { min, max }
    }

    /// `self` minus `cut`.
    #[must_use]
    pub fn difference(self, cut: Self) -> Self {
        Self::Difference(Box::new(self), Box::new(cut))
    }

    /// `self` intersected with `other`.
    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        Self::Intersection(Box::new(self), Box::new(other))
    }

    /// Evaluates the function at `p`.
    #[must_use]
    pub fn evaluate(&self, p: &Point3) -> f64 {
        match self {
            Self::Cylinder { radius } => p.x.hypot(p.y) - radius,
            Self::Aabb { min, max } => box_distance(min, max, p),
            Self::Difference(base, cut) => base.evaluate(p).max(-cut.evaluate(p)),
            Self::Intersection(a, b) => a.evaluate(p).max(b.evaluate(p)),
        }
    }

    /// Returns `true` when `p` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        self.evaluate(p) <= 0.0
    }
}

/// Signed distance to an axis-aligned box.
fn box_distance(min: &Point3, max: &Point3, p: &Point3) -> f64 {
    let center = nalgebra::center(min, max);
    let half = (max - min) * 0.5;
    let d = (p - center).abs() - half;
    let outside = Vector3::new(d.x.max(0.0), d.y.max(0.0), d.z.max(0.0)).norm();
    let inside = d.x.max(d.y).max(d.z).min(0.0);
    outside + inside
}
