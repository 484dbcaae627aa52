//! Camera and color helpers for whatever renders the extracted surfaces.

mod camera;
mod colormap;

pub use camera::{Camera, OrbitDirection, ViewPreset, ORBIT_STEP_DEGREES};
pub use colormap::{ColorLookup, TABLE_SIZE, TICK_COUNT};

/// Cosmetic render values passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Shell opacity in `[0.1, 1.0]`.
    pub shell_opacity: f64,
    pub iso_opacity: f64,
}

impl RenderSettings {
    pub const MIN_SHELL_OPACITY: f64 = 0.1;

    #[must_use]
    pub fn new(shell_opacity: f64, iso_opacity: f64) -> Self {
        let mut settings = Self {
            shell_opacity: 1.0,
            iso_opacity: iso_opacity.clamp(0.0, 1.0),
        };
        settings.set_shell_opacity(shell_opacity);
        settings
    }

    pub fn set_shell_opacity(&mut self, opacity: f64) {
        self.shell_opacity = opacity.clamp(Self::MIN_SHELL_OPACITY, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shell_opacity_is_clamped() {
        let mut settings = RenderSettings::new(0.9, 0.45);
        assert_relative_eq!(settings.shell_opacity, 0.9);
        settings.set_shell_opacity(0.0);
        assert_relative_eq!(settings.shell_opacity, 0.1);
        settings.set_shell_opacity(3.0);
        assert_relative_eq!(settings.shell_opacity, 1.0);
        assert_relative_eq!(settings.iso_opacity, 0.45);
    }
}
