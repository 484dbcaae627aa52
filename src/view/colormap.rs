/// Number of entries in the color table.
pub const TABLE_SIZE: usize = 256;

/// Number of scalar-bar labels.
pub const TICK_COUNT: usize = 5;

/// Inferno-like control points as `(position, [r, g, b])`.
const CONTROL_POINTS: [(f64, [f64; 3]); 5] = [
    (0.0, [0.0, 0.0, 0.0]),
    (0.25, [0.22, 0.02, 0.40]),
    (0.50, [0.68, 0.16, 0.16]),
    (0.75, [0.98, 0.64, 0.05]),
    (1.0, [0.99, 0.98, 0.65]),
];

/// Piecewise-linear transfer function through [`CONTROL_POINTS`].
fn transfer(x: f64) -> [f64; 3] {
    let x = x.clamp(0.0, 1.0);
    for pair in CONTROL_POINTS.windows(2) {
        let (x0, c0) = pair[0];
        let (x1, c1) = pair[1];
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return [0, 1, 2].map(|i| c0[i] + (c1[i] - c0[i]) * t);
        }
    }
    CONTROL_POINTS[CONTROL_POINTS.len() - 1].1
}

/// Maps temperatures over a scalar range to RGB colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLookup {
    range: (f64, f64),
    table: Vec<[f64; 3]>,
}

impl ColorLookup {
    /// Builds the table over `range`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(range: (f64, f64)) -> Self {
        let last = (TABLE_SIZE - 1) as f64;
        let table = (0..TABLE_SIZE).map(|i| transfer(i as f64 / last)).collect();
        Self { range, table }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn table(&self) -> &[[f64; 3]] {
        &self.table
    }

    /// Table color of `value`; values outside the range saturate.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn color(&self, value: f64) -> [f64; 3] {
        let (lo, hi) = self.range;
        let span = (hi - lo).max(f64::EPSILON);
        let scaled = ((value - lo) / span * TABLE_SIZE as f64).floor();
        let index = scaled.clamp(0.0, (TABLE_SIZE - 1) as f64) as usize;
        self.table[index]
    }

    /// Colors of every value in `values`.
    #[must_use]
    pub fn colors(&self, values: &[f64]) -> Vec<[f64; 3]> {
        values.iter().map(|&v| self.color(v)).collect()
    }

    /// Evenly spaced scalar-bar labels from low to high.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ticks(&self) -> [f64; TICK_COUNT] {
        let (lo, hi) = self.range;
        let step = (hi - lo) / (TICK_COUNT - 1) as f64;
        std::array::from_fn(|i| lo + step * i as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn table_spans_black_to_pale_yellow() {
        let lut = ColorLookup::new((50.0, 1650.0));
        assert_eq!(lut.table().len(), TABLE_SIZE);
        assert_eq!(lut.table()[0], [0.0, 0.0, 0.0]);
        let last = lut.table()[TABLE_SIZE - 1];
        for (got, want) in last.iter().zip([0.99, 0.98, 0.65]) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn transfer_hits_control_points() {
        for (x, c) in CONTROL_POINTS {
            let got = transfer(x);
            for i in 0..3 {
                assert_relative_eq!(got[i], c[i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn out_of_range_values_saturate() {
        let lut = ColorLookup::new((50.0, 1650.0));
        assert_eq!(lut.color(-1000.0), lut.table()[0]);
        assert_eq!(lut.color(1650.0), lut.table()[TABLE_SIZE - 1]);
        assert_eq!(lut.color(9000.0), lut.table()[TABLE_SIZE - 1]);
    }

    #[test]
    fn colors_brighten_with_temperature() {
        let lut = ColorLookup::new((50.0, 1650.0));
        let colors = lut.colors(&[100.0, 800.0, 1600.0]);
        let brightness: Vec<f64> = colors.iter().map(|c| c.iter().sum()).collect();
        assert!(brightness[0] < brightness[1] && brightness[1] < brightness[2]);
    }

    #[test]
    fn ticks_are_even() {
        let lut = ColorLookup::new((50.0, 1650.0));
        let ticks = lut.ticks();
        assert_relative_eq!(ticks[0], 50.0);
        assert_relative_eq!(ticks[2], 850.0);
        assert_relative_eq!(ticks[4], 1650.0);
    }
}
