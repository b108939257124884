//! Variable metadata and timestamps.

use std::fmt;

/// Where a variable is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableKind {
    /// Sampled on building and sensor faces.
    #[default]
    Patch,
    /// Sampled on the regular 3D air-cell grid.
    Aircell,
}

impl VariableKind {
    /// Parse the manifest's `type` attribute (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "patch" => Some(Self::Patch),
            "aircell" => Some(Self::Aircell),
            _ => None,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Aircell => "aircell",
        }
    }
}

/// Metadata for one simulated scalar field.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Short name; also the prefix of its data files.
    pub name: String,
    /// Human-readable name.
    pub long_name: String,
    /// Unit string.
    pub unit: String,
    /// Minimum over the whole time series.
    pub min: f32,
    /// Maximum over the whole time series.
    pub max: f32,
    /// Patch or air-cell variable.
    pub kind: VariableKind,
}

impl Variable {
    /// Map a raw value so that `min` becomes 0 and `max` becomes 1.
    ///
    /// Values outside the range map outside `[0, 1]`.
    pub fn normalize(&self, value: f32) -> f32 {
        (value - self.min) / (self.max - self.min)
    }

    /// [`normalize`](Self::normalize), clamped to `[0, 1]`.
    pub fn normalize_clamped(&self, value: f32) -> f32 {
        let mapped = self.normalize(value);
        if mapped.is_nan() {
            0.0
        } else {
            mapped.clamp(0.0, 1.0)
        }
    }
}

/// Wall-clock label for a timestep. Purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    /// Year.
    pub year: i32,
    /// Month.
    pub month: i32,
    /// Day of month.
    pub day: i32,
    /// Hour.
    pub hour: i32,
    /// Minute.
    pub minute: i32,
    /// Second.
    pub second: i32,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
