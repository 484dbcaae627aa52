use serde::Serialize;

/// A localized temperature bump at a given radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HotSpot {
    /// Radius (m) at which the bump peaks.
    pub radius: f64,
    /// Peak temperature increase (deg C).
    pub delta: f64,
}

/// Knobs that perturb the synthetic field for one case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaseParameters {
    /// Uniform temperature offset (deg C).
    pub offset: f64,
    /// Half-width of the uniform per-point noise (deg C).
    pub noise_amplitude: f64,
    pub hot_spot: HotSpot,
}

/// The named simulation cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum FurnaceCase {
    #[default]
    BaselineDesign,
    ErodedState1,
    ErodedState2,
}

impl FurnaceCase {
    pub const ALL: [Self; 3] = [Self::BaselineDesign, Self::ErodedState1, Self::ErodedState2];

    /// Resolves a case by display name. Unknown names resolve to the baseline.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|case| case.name() == name)
            .unwrap_or_else(|| {
                tracing::warn!(case = name, "unknown case, using baseline design");
                Self::default()
            })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BaselineDesign => "Baseline Design",
            Self::ErodedState1 => "Eroded State 1",
            Self::ErodedState2 => "Eroded State 2",
        }
    }

    #[must_use]
    pub fn parameters(self) -> CaseParameters {
        let (offset, noise_amplitude, radius, delta) = match self {
            Self::BaselineDesign => (0.0, 25.0, 1.0, 30.0),
            Self::ErodedState1 => (-60.0, 35.0, 1.15, 75.0),
            Self::ErodedState2 => (-120.0, 45.0, 1.25, 120.0),
        };
        CaseParameters {
            offset,
            noise_amplitude,
            hot_spot: HotSpot { radius, delta },
        }
    }

    /// Mixed into a configured seed so each case draws its own noise.
    pub(crate) fn seed_salt(self) -> u64 {
        match self {
            Self::BaselineDesign => 0x9e37_79b9,
            Self::ErodedState1 => 0x7f4a_7c15,
            Self::ErodedState2 => 0x94d0_49bb,
        }
    }
}

/// Display names of every case, in selector order.
#[must_use]
pub fn case_names() -> Vec<&'static str> {
    FurnaceCase::ALL.iter().map(|case| case.name()).collect()
}
