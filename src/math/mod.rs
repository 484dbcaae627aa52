/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Clamps `value` into `[0, 1]`.
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Rounds `value` to `decimals` places after the decimal point.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Rounds every coordinate of `point` to `decimals` places.
#[must_use]
pub fn round_point(point: &Point3, decimals: i32) -> [f64; 3] {
    [
        round_to(point.x, decimals),
        round_to(point.y, decimals),
        round_to(point.z, decimals),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_saturates() {
        assert!(clamp01(-0.5).abs() < TOLERANCE);
        assert!((clamp01(1.5) - 1.0).abs() < TOLERANCE);
        assert!((clamp01(0.25) - 0.25).abs() < TOLERANCE);
    }

    #[test]
    fn round_to_one_decimal() {
        assert!((round_to(812.34, 1) - 812.3).abs() < 1e-9);
        assert!((round_to(812.36, 1) - 812.4).abs() < 1e-9);
        assert!((round_to(-0.0004, 3)).abs() < 1e-12);
    }

    #[test]
    fn round_point_per_axis() {
        let p = round_point(&Point3::new(1.23456, -0.98765, 3.0), 3);
        assert_eq!(p, [1.235, -0.988, 3.0]);
    }
}
