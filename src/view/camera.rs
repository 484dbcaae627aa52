use nalgebra::{Rotation3, Unit};

use crate::field::Bounds;
use crate::math::{Point3, Vector3, TOLERANCE};

/// Degrees turned by one orbit button press.
pub const ORBIT_STEP_DEGREES: f64 = 10.0;

/// Vertical view angle used when framing, in degrees.
const VIEW_ANGLE_DEGREES: f64 = 30.0;

/// Named camera directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPreset {
    /// Looking along +y with z up.
    #[default]
    Front,
    /// Looking along -x with z up.
    Side,
    /// Looking down -z with y up.
    Top,
}

impl ViewPreset {
    /// Parses a preset name, case-insensitively. Anything else is `Front`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "front" => Self::Front,
            "side" => Self::Side,
            "top" => Self::Top,
            other => {
                tracing::warn!(preset = other, "unknown view preset, using front");
                Self::Front
            }
        }
    }

    /// Direction of projection and view-up vector.
    fn direction_and_up(self) -> (Vector3, Vector3) {
        match self {
            Self::Front => (Vector3::y(), Vector3::z()),
            Self::Side => (-Vector3::x(), Vector3::z()),
            Self::Top => (-Vector3::z(), Vector3::y()),
        }
    }
}

/// Orbit button directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitDirection {
    Left,
    Right,
    Up,
    Down,
}

impl OrbitDirection {
    /// `(azimuth, elevation)` in degrees for one step.
    #[must_use]
    pub fn step(self) -> (f64, f64) {
        match self {
            Self::Left => (-ORBIT_STEP_DEGREES, 0.0),
            Self::Right => (ORBIT_STEP_DEGREES, 0.0),
            Self::Up => (0.0, ORBIT_STEP_DEGREES),
            Self::Down => (0.0, -ORBIT_STEP_DEGREES),
        }
    }
}

/// A look-at camera orbiting a focal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Point3,
    focal_point: Point3,
    view_up: Vector3,
    pan_step: f64,
}

impl Camera {
    /// Camera framing `bounds` from the front.
    #[must_use]
    pub fn framing(bounds: &Bounds, pan_step: f64) -> Self {
        let mut camera = Self {
            position: Point3::new(0.0, -1.0, 0.0),
            focal_point: Point3::origin(),
            view_up: Vector3::z(),
            pan_step,
        };
        camera.reset(bounds);
        camera
    }

    #[must_use]
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    #[must_use]
    pub fn focal_point(&self) -> &Point3 {
        &self.focal_point
    }

    #[must_use]
    pub fn view_up(&self) -> &Vector3 {
        &self.view_up
    }

    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.position - self.focal_point).norm()
    }

    /// Unit vector from the focal point towards the camera.
    #[must_use]
    pub fn view_plane_normal(&self) -> Vector3 {
        (self.position - self.focal_point).normalize()
    }

    /// Centers the focal point on `bounds` and backs off until the bounding
    /// sphere fits the view angle. The view direction is kept.
    pub fn reset(&mut self, bounds: &Bounds) {
        let normal = self.view_plane_normal();
        let half_angle = (VIEW_ANGLE_DEGREES * 0.5).to_radians();
        let distance = bounds.radius().max(TOLERANCE) / half_angle.sin();
        self.focal_point = bounds.center();
        self.position = self.focal_point + normal * distance;
    }

    /// Rotates about the view-up vector (`azimuth`) and then about the
    /// right vector (`elevation`), both through the focal point. Degrees.
    pub fn orbit(&mut self, azimuth: f64, elevation: f64) {
        if azimuth != 0.0 {
            let axis = Unit::new_normalize(self.view_up);
            self.rotate(&Rotation3::from_axis_angle(&axis, azimuth.to_radians()));
        }
        if elevation != 0.0 {
            let right = self.view_plane_normal().cross(&self.view_up);
            if right.norm() < TOLERANCE {
                return;
            }
            let axis = Unit::new_normalize(right);
            let rotation = Rotation3::from_axis_angle(&axis, elevation.to_radians());
            self.rotate(&rotation);
            self.view_up = (rotation * self.view_up).normalize();
        }
    }

    /// Moves towards the focal point by `factor`; `factor > 1` is closer.
    /// Non-positive factors are ignored.
    pub fn zoom(&mut self, factor: f64) {
        if factor <= 0.0 {
            tracing::warn!(factor, "ignoring non-positive zoom factor");
            return;
        }
        let normal = self.view_plane_normal();
        self.position = self.focal_point + normal * (self.distance() / factor);
    }

    /// Shifts the camera and focal point in the view plane by `pan_step`
    /// units per step.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let right = self.view_plane_normal().cross(&self.view_up);
        let shift = (-right * dx + self.view_up * dy) * self.pan_step;
        self.position += shift;
        self.focal_point += shift;
    }

    /// Looks at the focal point from `preset`, keeping the distance.
    pub fn view_preset(&mut self, preset: ViewPreset) {
        let (direction, up) = preset.direction_and_up();
        self.position = self.focal_point - direction * self.distance();
        self.view_up = up;
    }

    fn rotate(&mut self, rotation: &Rotation3<f64>) {
        let offset = self.position - self.focal_point;
        self.position = self.focal_point + rotation * offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_bounds() -> Bounds {
        Bounds::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn framing_centers_on_bounds() {
        let bounds = Bounds::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 4.0));
        let camera = Camera::framing(&bounds, 0.1);
        assert_relative_eq!(camera.focal_point(), &Point3::new(1.0, 1.0, 2.0));
        let expected = bounds.radius() / (15.0f64).to_radians().sin();
        assert_relative_eq!(camera.distance(), expected, epsilon = 1e-9);
        // Front preset: the camera sits on the -y side.
        assert!(camera.position().y < camera.focal_point().y);
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut camera = Camera::framing(&unit_bounds(), 0.1);
        let d = camera.distance();
        camera.orbit(37.0, 12.0);
        camera.orbit(-80.0, -25.0);
        assert_relative_eq!(camera.distance(), d, epsilon = 1e-9);
        assert_relative_eq!(camera.view_up().norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn full_azimuth_turn_returns() {
        let mut camera = Camera::framing(&unit_bounds(), 0.1);
        let start = *camera.position();
        for _ in 0..36 {
            let (az, el) = OrbitDirection::Right.step();
            camera.orbit(az, el);
        }
        assert_relative_eq!(camera.position(), &start, epsilon = 1e-9);
    }

    #[test]
    fn elevation_raises_camera() {
        let mut camera = Camera::framing(&unit_bounds(), 0.1);
        let (az, el) = OrbitDirection::Up.step();
        camera.orbit(az, el);
        assert!(camera.position().z > 0.0);
    }

    #[test]
    fn zoom_divides_distance() {
        let mut camera = Camera::framing(&unit_bounds(), 0.1);
        let d = camera.distance();
        camera.zoom(2.0);
        assert_relative_eq!(camera.distance(), d / 2.0, epsilon = 1e-9);
        camera.zoom(0.0);
        assert_relative_eq!(camera.distance(), d / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn pan_moves_position_and_focal_point_together() {
        let mut camera = Camera::framing(&unit_bounds(), 0.5);
        let offset = camera.position() - camera.focal_point();
        camera.pan(0.0, 1.0);
        assert_relative_eq!(camera.focal_point(), &Point3::new(0.0, 0.0, 0.5), epsilon = 1e-12);
        assert_relative_eq!(camera.position() - camera.focal_point(), offset, epsilon = 1e-12);
        camera.pan(1.0, 0.0);
        // Front view: screen right is +x.
        assert_relative_eq!(camera.focal_point().x, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn presets_and_fallback() {
        assert_eq!(ViewPreset::from_name("TOP"), ViewPreset::Top);
        assert_eq!(ViewPreset::from_name("side"), ViewPreset::Side);
        assert_eq!(ViewPreset::from_name("isometric"), ViewPreset::Front);

        let mut camera = Camera::framing(&unit_bounds(), 0.1);
        let d = camera.distance();
        camera.view_preset(ViewPreset::Top);
        assert_relative_eq!(camera.view_plane_normal(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(camera.distance(), d, epsilon = 1e-9);
        assert_eq!(camera.view_up(), &Vector3::y());
    }
}
