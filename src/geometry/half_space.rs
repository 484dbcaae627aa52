use serde::Serialize;

use crate::math::{Point3, Vector3};

/// Coordinate axis used as a clip-plane normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ClipAxis {
    X,
    Y,
    #[default]
    Z,
}

impl ClipAxis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Parses an axis letter, case-insensitively. Anything else is `Z`.
    #[must_use]
    pub fn from_letter(letter: &str) -> Self {
        match letter.trim().to_ascii_uppercase().as_str() {
            "X" => Self::X,
            "Y" => Self::Y,
            "Z" => Self::Z,
            other => {
                tracing::warn!(axis = other, "unknown clip axis, using Z");
                Self::Z
            }
        }
    }

    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }

    /// Index of the axis in a `[x, y, z]` triple.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along the axis.
    #[must_use]
    pub fn unit(self) -> Vector3 {
        match self {
            Self::X => Vector3::x(),
            Self::Y => Vector3::y(),
            Self::Z => Vector3::z(),
        }
    }
}

/// The closed half-space `dot(p - origin, normal) <= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSpace {
    origin: Point3,
    normal: Vector3,
}

impl HalfSpace {
    /// Half-space bounded by the plane through `origin` with normal `axis`.
    #[must_use]
    pub fn new(origin: Point3, axis: ClipAxis) -> Self {
        Self {
            origin,
            normal: axis.unit(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from the plane; positive on the discarded side.
    #[must_use]
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        (p - self.origin).dot(&self.normal)
    }

    /// Returns `true` when `p` is on the kept side or on the plane.
    #[must_use]
    pub fn keeps(&self, p: &Point3) -> bool {
        self.signed_distance(p) <= 0.0
    }
}
