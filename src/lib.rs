//! qesview - reader, session state and color ramps for QES datasets.
//!
//! QES (Quick Environmental Simulation) exports building geometry, sensor
//! locations and time-varying scalar fields. This crate provides the data
//! core a visualization front end is built on.
//!
//! # Features
//!
//! - Manifest parsing for buildings, sensors, timestamps and variables
//! - On-demand loading of per-timestep patch and air-cell data
//! - Session state with change notifications and timed playback
//! - Piecewise-linear color ramps in ParaView color map format
//! - Power-of-two packing of air-cell grids for volume textures
//! - Surface and volume visualizations selecting variables by kind
//!
//! # Example
//!
//! ```ignore
//! use qesview::color::ColorRampRegistry;
//! use qesview::session::QesSettings;
//!
//! let ramps = ColorRampRegistry::bundled()?;
//! let mut settings = QesSettings::new();
//! settings.timestep_changed.subscribe(|view| println!("now at {}", view.current_timestep()));
//! settings.load_directory("export-qes")?;
//!
//! let reader = settings.reader().unwrap();
//! let variable = reader.variable("patch_temperature")?;
//! let data = reader.patch_data(&variable.name, 0)?;
//! let color = ramps.get("Cool to Warm")?.value(variable.normalize(data[0]));
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod session;
pub mod shade;
pub mod visualization;
pub mod volume;

pub use error::{ErrorKind, QesError, Result};
