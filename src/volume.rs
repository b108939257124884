//! Packing air-cell grids into power-of-two volume textures.
//!
//! Graphics APIs commonly want texture edges that are powers of two, so the
//! grid is zero-padded up to the next power of two on each axis. The packed
//! texture remembers how much of it holds data and the grid's aspect ratio.

use crate::color::Rgba;
use crate::config::VolumeConfig;
use crate::data::{QesReader, Variable, VariableKind};
use crate::error::{QesError, Result};
use crate::visualization::{current_variable, Visualization};
use glam::Vec3;
use ndarray::{s, Array3};

/// Smallest power of two that is at least `n`, clamped to the configured
/// texture edge limits.
///
/// Grids larger than the maximum edge are cropped when packed.
pub fn texture_dim(n: usize, config: &VolumeConfig) -> usize {
    n.max(1)
        .next_power_of_two()
        .clamp(config.min_texture_dim, config.max_texture_dim)
}

/// A normalized air-cell grid padded to power-of-two edges.
#[derive(Debug, Clone)]
pub struct VolumeTexture {
    texels: Array3<f32>,
    relative_extent: Vec3,
    relative_size: Vec3,
}

impl VolumeTexture {
    /// Pack a `[z, y, x]` grid, normalizing values with `variable`'s range
    /// clamped to `[0, 1]`. Padding texels are 0.
    pub fn pack(grid: &Array3<f32>, variable: &Variable, config: &VolumeConfig) -> Result<Self> {
        let (depth, height, width) = grid.dim();
        if width == 0 || height == 0 || depth == 0 {
            return Err(QesError::format(format!(
                "Cannot pack an empty {}x{}x{} grid",
                width, height, depth
            )));
        }

        let tex_width = texture_dim(width, config);
        let tex_height = texture_dim(height, config);
        let tex_depth = texture_dim(depth, config);

        let mut texels = Array3::zeros((tex_depth, tex_height, tex_width));
        let (cd, ch, cw) = (depth.min(tex_depth), height.min(tex_height), width.min(tex_width));
        texels
            .slice_mut(s![..cd, ..ch, ..cw])
            .assign(
                &grid
                    .slice(s![..cd, ..ch, ..cw])
                    .mapv(|v| variable.normalize_clamped(v)),
            );

        let size = Vec3::new(width as f32, height as f32, depth as f32);
        let tex_size = Vec3::new(tex_width as f32, tex_height as f32, tex_depth as f32);
        let relative_extent = size / tex_size;
        let relative_size = size / size.max_element();

        tracing::debug!(
            width,
            height,
            depth,
            tex_width,
            tex_height,
            tex_depth,
            "Packed volume texture"
        );

        Ok(Self {
            texels,
            relative_extent,
            relative_size,
        })
    }

    /// Texture edges as `(width, height, depth)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        let (d, h, w) = self.texels.dim();
        (w, h, d)
    }

    /// Normalized texels, indexed `[z, y, x]`.
    pub fn texels(&self) -> &Array3<f32> {
        &self.texels
    }

    /// Fraction of each texture axis covered by data.
    pub fn relative_extent(&self) -> Vec3 {
        self.relative_extent
    }

    /// Grid edge lengths divided by the longest edge.
    pub fn relative_size(&self) -> Vec3 {
        self.relative_size
    }

    /// Texels as gray colors with matching alpha, in memory order.
    pub fn to_rgba(&self) -> Vec<Rgba> {
        self.texels.iter().map(|&v| Rgba::splat(v)).collect()
    }
}

/// Air-cell variables packed into volume textures.
#[derive(Debug, Clone, Default)]
pub struct VolumeRendering {
    variable: Option<String>,
    config: VolumeConfig,
}

impl VolumeRendering {
    /// Create a volume rendering with no variable selected.
    pub fn new(config: VolumeConfig) -> Self {
        Self {
            variable: None,
            config,
        }
    }

    /// Texture of the current variable at `timestep`.
    pub fn texture(&self, reader: &QesReader, timestep: usize) -> Result<VolumeTexture> {
        let variable = current_variable(reader, self)?;
        let grid = reader.aircell_data(&variable.name, timestep)?;
        VolumeTexture::pack(&grid, variable, &self.config)
    }
}

impl Visualization for VolumeRendering {
    fn name(&self) -> &str {
        "Volume"
    }

    fn variable_kind(&self) -> VariableKind {
        VariableKind::Aircell
    }

    fn current_variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    fn set_current_variable(&mut self, name: &str) {
        self.variable = Some(name.to_string());
    }
}
