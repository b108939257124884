//! Piecewise-linear color ramps (transfer functions).
//!
//! Ramps are read from a ParaView-style color map document:
//!
//! ```text
//! <ColorMaps>
//!   <ColorMap name="Cool to Warm">
//!     <Point x="0" r="0.23" g="0.30" b="0.75"/>
//!     ...
//!   </ColorMap>
//! </ColorMaps>
//! ```
//!
//! Point positions may use any scale; they are rescaled to `[0, 1]` when the
//! ramp is built.

use super::Rgba;
use crate::data::manifest::{attr, attr_str, elements};
use crate::error::{QesError, Result};
use roxmltree::{Document, Node};
use std::collections::BTreeMap;

/// Color maps shipped with qesview.
pub const BUNDLED_COLOR_MAPS: &str = include_str!("../../assets/ColorMaps.xml");

/// A transfer function from `[0, 1]` to colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    name: String,
    positions: Vec<f32>,
    colors: Vec<Rgba>,
}

impl ColorRamp {
    /// Build a ramp from `(position, color)` control points.
    ///
    /// Positions must be non-decreasing. They are rescaled so the first
    /// becomes 0 and the last becomes 1, and every color is made opaque.
    pub fn new(name: impl Into<String>, points: Vec<(f32, Rgba)>) -> Result<Self> {
        let name = name.into();
        if points.is_empty() {
            return Err(QesError::format(format!(
                "Color ramp {} has no control points",
                name
            )));
        }
        if points.iter().any(|(x, _)| !x.is_finite()) {
            return Err(QesError::format(format!(
                "Color ramp {} has a non-finite control point",
                name
            )));
        }
        if points.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(QesError::format(format!(
                "Color ramp {} has decreasing control points",
                name
            )));
        }

        let min = points[0].0;
        let max = points[points.len() - 1].0;
        let span = max - min;

        let positions = points
            .iter()
            .map(|&(x, _)| if span > 0.0 { (x - min) / span } else { 0.0 })
            .collect();
        let colors = points
            .iter()
            .map(|&(_, c)| Rgba { a: 1.0, ..c })
            .collect();

        Ok(Self {
            name,
            positions,
            colors,
        })
    }

    /// Ramp name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Control point positions, in `[0, 1]`.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Control point colors.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Color at `pos`.
    ///
    /// Below 0 this is the first color, at or above 1 the last. In between,
    /// the two control points around `pos` are blended linearly; a `pos`
    /// sitting exactly on a control point yields that point's color.
    pub fn value(&self, pos: f32) -> Rgba {
        let first = self.colors[0];
        let last = self.colors[self.colors.len() - 1];

        if pos < 0.0 {
            return first;
        }
        if pos >= 1.0 {
            return last;
        }

        match self.positions.iter().position(|&p| pos < p) {
            Some(0) => first,
            Some(i) => {
                let prev_pos = self.positions[i - 1];
                let cur_pos = self.positions[i];
                let blend = (pos - prev_pos) / (cur_pos - prev_pos);
                self.colors[i] * blend + self.colors[i - 1] * (1.0 - blend)
            },
            None => last,
        }
    }

    /// Resample the ramp into `num_samples` evenly spaced colors.
    ///
    /// Sample `i` is `value(i / (num_samples - 1))`. A single sample is
    /// `value(0)`; zero samples give an empty vector.
    pub fn ramp(&self, num_samples: usize) -> Vec<Rgba> {
        match num_samples {
            0 => Vec::new(),
            1 => vec![self.value(0.0)],
            n => {
                let last = (n - 1) as f32;
                (0..n).map(|i| self.value(i as f32 / last)).collect()
            },
        }
    }
}

/// Named color ramps, loaded once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct ColorRampRegistry {
    ramps: BTreeMap<String, ColorRamp>,
}

impl ColorRampRegistry {
    /// Registry of the color maps bundled with qesview.
    pub fn bundled() -> Result<Self> {
        Self::from_xml(BUNDLED_COLOR_MAPS)
    }

    /// Parse a color map document.
    ///
    /// Children of the root other than `ColorMap`, and children of a
    /// `ColorMap` other than `Point`, are ignored.
    pub fn from_xml(text: &str) -> Result<Self> {
        let doc = Document::parse(text)?;
        let mut registry = Self::default();

        for map in elements(doc.root_element()).filter(|n| n.tag_name().name() == "ColorMap") {
            let name = attr_str(map, "name")?;
            let points = elements(map)
                .filter(|n| n.tag_name().name() == "Point")
                .map(read_point)
                .collect::<Result<Vec<_>>>()?;
            registry.insert(ColorRamp::new(name, points)?)?;
        }

        tracing::debug!(ramps = registry.ramps.len(), "Loaded color ramps");
        Ok(registry)
    }

    /// Add a ramp. Names must be unique.
    pub fn insert(&mut self, ramp: ColorRamp) -> Result<()> {
        if self.ramps.contains_key(ramp.name()) {
            return Err(QesError::format(format!(
                "Duplicate color ramp: {}",
                ramp.name()
            )));
        }
        self.ramps.insert(ramp.name().to_string(), ramp);
        Ok(())
    }

    /// Look up a ramp by name.
    pub fn get(&self, name: &str) -> Result<&ColorRamp> {
        self.ramps
            .get(name)
            .ok_or_else(|| QesError::unknown_color_ramp(name))
    }

    /// Names of every ramp, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.ramps.keys().map(String::as_str)
    }

    /// Number of ramps.
    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    /// Whether the registry has no ramps.
    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }
}

fn read_point(node: Node<'_, '_>) -> Result<(f32, Rgba)> {
    let color = Rgba::opaque(attr(node, "r")?, attr(node, "g")?, attr(node, "b")?);
    Ok((attr(node, "x")?, color))
}
