//! Per-face coloring of patch data.

use crate::color::{ColorRamp, Rgba};
use crate::data::{Building, Face, QesReader, Sensor, Variable, VariableKind};
use crate::error::{QesError, Result};
use crate::visualization::{current_variable, Visualization};

/// The slice of `data` holding `face`'s samples.
pub fn face_samples<'a>(face: &Face, data: &'a [f32]) -> Result<&'a [f32]> {
    let range = face.sample_range();
    data.get(range.clone()).ok_or(QesError::SampleOutOfRange {
        start: range.start,
        end: range.end,
        len: data.len(),
    })
}

/// Normalized values of `face`'s samples, row-major over the face grid.
pub fn face_values(face: &Face, data: &[f32], variable: &Variable) -> Result<Vec<f32>> {
    Ok(face_samples(face, data)?
        .iter()
        .map(|&v| variable.normalize(v))
        .collect())
}

/// Colors of `face`'s samples: each value is normalized with the
/// variable's range and looked up in `ramp`.
pub fn face_colors(
    face: &Face,
    data: &[f32],
    variable: &Variable,
    ramp: &ColorRamp,
) -> Result<Vec<Rgba>> {
    Ok(face_samples(face, data)?
        .iter()
        .map(|&v| ramp.value(variable.normalize(v)))
        .collect())
}

/// Building and sensor faces colored by a patch variable.
#[derive(Debug, Clone, Default)]
pub struct SurfaceShading {
    variable: Option<String>,
}

impl SurfaceShading {
    /// Create a shading with no variable selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors of every face at `timestep`: building faces in manifest
    /// order, then one single-sample face per sensor.
    pub fn face_colors(
        &self,
        reader: &QesReader,
        timestep: usize,
        ramp: &ColorRamp,
    ) -> Result<Vec<Vec<Rgba>>> {
        let variable = current_variable(reader, self)?;
        let data = reader.patch_data(&variable.name, timestep)?;

        reader
            .buildings()
            .iter()
            .flat_map(Building::faces)
            .chain(reader.sensors().iter().map(Sensor::face))
            .map(|face| face_colors(face, &data, variable, ramp))
            .collect()
    }
}

impl Visualization for SurfaceShading {
    fn name(&self) -> &str {
        "Surface shading"
    }

    fn variable_kind(&self) -> VariableKind {
        VariableKind::Patch
    }

    fn current_variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    fn set_current_variable(&mut self, name: &str) {
        self.variable = Some(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn variable() -> Variable {
        Variable {
            name: "patch_t".to_string(),
            long_name: String::new(),
            unit: "K".to_string(),
            min: 0.0,
            max: 10.0,
            kind: VariableKind::Patch,
        }
    }

    #[test]
    fn colors_follow_face_offset() {
        let face = Face::new(Vec3::ZERO, Vec3::X, Vec3::Y, 2, 1, 1);
        let ramp = ColorRamp::new("gray", vec![(0.0, Rgba::BLACK), (1.0, Rgba::WHITE)]).unwrap();
        let data = [99.0, 0.0, 10.0];

        let colors = face_colors(&face, &data, &variable(), &ramp).unwrap();
        assert_eq!(colors, vec![Rgba::BLACK, Rgba::WHITE]);
    }

    #[test]
    fn short_data_is_rejected() {
        let face = Face::new(Vec3::ZERO, Vec3::X, Vec3::Y, 4, 4, 0);
        let err = face_values(&face, &[0.0; 8], &variable()).unwrap_err();
        assert!(matches!(err, QesError::SampleOutOfRange { end: 16, len: 8, .. }));
    }
}
