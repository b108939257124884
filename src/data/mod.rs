//! Dataset reading and representation.
//!
//! This module handles reading QES datasets: the XML manifest describing
//! buildings, sensors, timesteps and variables, and the per-timestep
//! binary data files.

pub mod aircell;
mod geometry;
pub(crate) mod manifest;
mod reader;
mod source;
mod stats;
mod variable;

pub use geometry::{Building, Face, Sensor};
pub use reader::{decode_f32_le, QesReader, MANIFEST_NAME};
pub use source::{DataSource, DirectorySource, MemorySource};
pub use stats::SampleStats;
pub use variable::{Timestamp, Variable, VariableKind};
