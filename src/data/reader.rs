//! QES dataset reader.
//!
//! A dataset is a directory holding a `structure.xml` manifest plus one
//! binary file per variable and timestep. The manifest looks like:
//!
//! ```text
//! <Settings>
//!   <Scene>
//!     <Building> <Face patchIndex=.. width=.. height=..> <anchor/> <v1/> <v2/> </Face> ... </Building>
//!     <Sensor patchIndex=..> <center/> <normal/> <v1/> <v2/> </Sensor>
//!   </Scene>
//!   <Timestamps> <Timestamp year=.. month=.. day=.. hour=.. minute=.. second=../> ... </Timestamps>
//!   <Variables> <Variable name=.. longname=.. unit=.. min=.. max=.. type=../> ... </Variables>
//!   <Dimensions> <worldDims x=.. y=.. z=../> <patchDims x=.. y=.. z=../> </Dimensions>
//! </Settings>
//! ```

use super::aircell;
use super::manifest::{attr, attr_str, elements, expect_tag, read_vec3, section};
use super::{Building, DataSource, Face, Sensor, Timestamp, Variable, VariableKind};
use crate::error::{QesError, Result};
use glam::Vec3;
use ndarray::Array3;
use roxmltree::{Document, Node};
use std::sync::Arc;

/// Default name of the manifest inside a dataset.
pub const MANIFEST_NAME: &str = "structure.xml";

const SECTIONS: [&str; 4] = ["Scene", "Timestamps", "Variables", "Dimensions"];

/// Parsed QES dataset.
///
/// The scene, timestamps, variables and dimensions are read once at
/// construction; per-timestep data is fetched from the source on demand.
#[derive(Debug, Clone)]
pub struct QesReader {
    source: Arc<dyn DataSource>,
    buildings: Vec<Building>,
    sensors: Vec<Sensor>,
    timestamps: Vec<Timestamp>,
    variables: Vec<Variable>,
    world_dims: Vec3,
    patch_dims: Vec3,
}

impl QesReader {
    /// Read the dataset described by `structure.xml` in `source`.
    pub fn new(source: Arc<dyn DataSource>) -> Result<Self> {
        Self::with_manifest(source, MANIFEST_NAME)
    }

    /// Read the dataset described by the manifest named `manifest`.
    pub fn with_manifest(source: Arc<dyn DataSource>, manifest: &str) -> Result<Self> {
        let text = source.read_text(manifest)?;
        let doc = Document::parse(&text)?;
        let root = doc.root_element();

        if root.tag_name().name() != "Settings" {
            return Err(QesError::format(format!(
                "Unexpected root node: {}",
                root.tag_name().name()
            )));
        }
        for node in elements(root) {
            let name = node.tag_name().name();
            if !SECTIONS.contains(&name) {
                return Err(QesError::format(format!("Unexpected section: {}", name)));
            }
        }

        let (buildings, sensors) = Self::read_scene(section(root, "Scene")?)?;
        let timestamps = Self::read_timestamps(section(root, "Timestamps")?)?;
        let variables = Self::read_variables(section(root, "Variables")?)?;

        let dims = section(root, "Dimensions")?;
        let world_dims = read_vec3(dims, "worldDims")?;
        let patch_dims = read_vec3(dims, "patchDims")?;
        check_grid(world_dims)?;

        tracing::info!(
            buildings = buildings.len(),
            sensors = sensors.len(),
            timesteps = timestamps.len(),
            variables = variables.len(),
            "Parsed QES manifest"
        );

        Ok(Self {
            source,
            buildings,
            sensors,
            timestamps,
            variables,
            world_dims,
            patch_dims,
        })
    }

    fn read_scene(scene: Node<'_, '_>) -> Result<(Vec<Building>, Vec<Sensor>)> {
        let mut buildings = Vec::new();
        let mut sensors = Vec::new();

        for node in elements(scene) {
            match node.tag_name().name() {
                "Building" => {
                    let faces = elements(node)
                        .map(Self::read_face)
                        .collect::<Result<Vec<_>>>()?;
                    buildings.push(Building::new(faces));
                },
                "Sensor" => sensors.push(Self::read_sensor(node)?),
                other => {
                    return Err(QesError::format(format!(
                        "Expected Building or Sensor node, found {} instead",
                        other
                    )));
                },
            }
        }

        Ok((buildings, sensors))
    }

    fn read_face(node: Node<'_, '_>) -> Result<Face> {
        expect_tag(node, "Face")?;
        let face = Face::new(
            read_vec3(node, "anchor")?,
            read_vec3(node, "v1")?,
            read_vec3(node, "v2")?,
            attr(node, "width")?,
            attr(node, "height")?,
            attr(node, "patchIndex")?,
        );
        check_face(&face)?;
        Ok(face)
    }

    fn read_sensor(node: Node<'_, '_>) -> Result<Sensor> {
        let sensor = Sensor::new(
            read_vec3(node, "center")?,
            read_vec3(node, "normal")?,
            read_vec3(node, "v1")?,
            read_vec3(node, "v2")?,
            attr(node, "patchIndex")?,
        );
        check_face(sensor.face())?;
        Ok(sensor)
    }

    fn read_timestamps(node: Node<'_, '_>) -> Result<Vec<Timestamp>> {
        elements(node)
            .map(|ts| -> Result<Timestamp> {
                Ok(Timestamp {
                    year: attr(ts, "year")?,
                    month: attr(ts, "month")?,
                    day: attr(ts, "day")?,
                    hour: attr(ts, "hour")?,
                    minute: attr(ts, "minute")?,
                    second: attr(ts, "second")?,
                })
            })
            .collect()
    }

    fn read_variables(node: Node<'_, '_>) -> Result<Vec<Variable>> {
        elements(node)
            .map(|var| -> Result<Variable> {
                let kind = match var.attribute("type") {
                    Some(raw) => VariableKind::parse(raw).ok_or_else(|| {
                        QesError::format(format!("Unknown variable type: {}", raw))
                    })?,
                    None => VariableKind::Patch,
                };
                Ok(Variable {
                    name: attr_str(var, "name")?.to_string(),
                    long_name: attr_str(var, "longname")?.to_string(),
                    unit: attr_str(var, "unit")?.to_string(),
                    min: attr(var, "min")?,
                    max: attr(var, "max")?,
                    kind,
                })
            })
            .collect()
    }

    /// Source the dataset is read from.
    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    /// Buildings in manifest order.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Sensors in manifest order.
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Timestamps; the index is the timestep number.
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Number of timesteps.
    pub fn timestep_count(&self) -> usize {
        self.timestamps.len()
    }

    /// Variables in manifest order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Look up a variable by its short name.
    pub fn variable(&self, name: &str) -> Result<&Variable> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| QesError::unknown_variable(name))
    }

    /// Variables of one kind, in manifest order.
    pub fn variables_of_kind(&self, kind: VariableKind) -> impl Iterator<Item = &Variable> + '_ {
        self.variables.iter().filter(move |v| v.kind == kind)
    }

    /// Grid extent, in cells.
    pub fn world_dims(&self) -> Vec3 {
        self.world_dims
    }

    /// Physical size of one cell.
    pub fn patch_dims(&self) -> Vec3 {
        self.patch_dims
    }

    /// World dimensions truncated to `(width, height, depth)`.
    ///
    /// The product of the three is checked to fit in `usize` when the
    /// manifest is read.
    pub fn grid_shape(&self) -> (usize, usize, usize) {
        (
            cell_count(self.world_dims.x),
            cell_count(self.world_dims.y),
            cell_count(self.world_dims.z),
        )
    }

    /// Total number of patch samples across building and sensor faces.
    ///
    /// Saturates at `usize::MAX`.
    pub fn patch_sample_count(&self) -> usize {
        self.buildings
            .iter()
            .flat_map(Building::faces)
            .chain(self.sensors.iter().map(Sensor::face))
            .fold(0usize, |total, face| total.saturating_add(face.sample_count()))
    }

    /// Raw samples of `variable` at `timestep`.
    ///
    /// Reads the file `<variable><timestep>` (e.g. `patch_temperature3`) as
    /// little-endian `f32`s. Nothing is cached; every call hits the source.
    pub fn patch_data(&self, variable: &str, timestep: usize) -> Result<Vec<f32>> {
        let name = format!("{}{}", variable, timestep);
        let bytes = self.source.read_bytes(&name)?;
        tracing::debug!(file = %name, bytes = bytes.len(), "Read patch data");
        decode_f32_le(&name, &bytes)
    }

    /// Samples of an air-cell variable as a `[z, y, x]` grid.
    pub fn aircell_data(&self, variable: &str, timestep: usize) -> Result<Array3<f32>> {
        let values = self.patch_data(variable, timestep)?;
        aircell::into_grid(values, self.grid_shape())
    }
}

fn cell_count(dim: f32) -> usize {
    dim.max(0.0) as usize
}

/// Reject faces whose sample range does not fit in `usize`.
fn check_face(face: &Face) -> Result<()> {
    face.width
        .checked_mul(face.height)
        .and_then(|count| face.patch_index.checked_add(count))
        .map(|_| ())
        .ok_or_else(|| {
            QesError::format(format!(
                "Face at patchIndex {} has too many samples ({} x {})",
                face.patch_index, face.width, face.height
            ))
        })
}

/// Reject world dimensions whose cell count does not fit in `usize`.
fn check_grid(world_dims: Vec3) -> Result<()> {
    cell_count(world_dims.x)
        .checked_mul(cell_count(world_dims.y))
        .and_then(|n| n.checked_mul(cell_count(world_dims.z)))
        .map(|_| ())
        .ok_or_else(|| {
            QesError::format(format!(
                "Vector worldDims describes too many cells ({} x {} x {})",
                world_dims.x, world_dims.y, world_dims.z
            ))
        })
}

/// Decode a blob of little-endian `f32`s.
pub fn decode_f32_le(name: &str, bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(QesError::MisalignedData {
            name: name.to_string(),
            len: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
