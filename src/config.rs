//! Configuration defaults for qesview.

use crate::data::MANIFEST_NAME;

/// Where datasets keep their manifest.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// File name of the manifest inside a dataset.
    pub manifest_name: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            manifest_name: MANIFEST_NAME.to_string(),
        }
    }
}

/// Configuration for timed playback.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Seconds of wall time per timestep.
    pub seconds_per_frame: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seconds_per_frame: 0.5,
        }
    }
}

/// Configuration for color mapping.
#[derive(Debug, Clone)]
pub struct ColorConfig {
    /// Ramp used when none is requested.
    pub default_ramp: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            default_ramp: "Cool to Warm".to_string(),
        }
    }
}

/// Limits for packing air-cell grids into volume textures.
#[derive(Debug, Clone)]
pub struct VolumeConfig {
    /// Smallest texture edge.
    pub min_texture_dim: usize,
    /// Largest texture edge.
    pub max_texture_dim: usize,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            min_texture_dim: 4,
            max_texture_dim: 4096,
        }
    }
}

/// Combined configuration.
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    /// Dataset layout.
    pub dataset: DatasetConfig,
    /// Playback timing.
    pub playback: PlaybackConfig,
    /// Color mapping.
    pub color: ColorConfig,
    /// Volume packing.
    pub volume: VolumeConfig,
}
