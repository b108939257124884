//! Error types for qesview.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for qesview operations.
pub type Result<T> = std::result::Result<T, QesError>;

/// Broad category of a [`QesError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A directory or file is missing.
    NotFound,
    /// A document or data blob does not match the expected layout.
    Format,
    /// An unknown name or index was requested.
    Lookup,
    /// Any other I/O failure.
    Io,
}

/// Errors that can occur in qesview.
#[derive(Debug, Error)]
pub enum QesError {
    /// A dataset directory or a file inside it does not exist.
    #[error("Not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read a file that exists.
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document did not match the expected schema.
    #[error("Format error: {0}")]
    Format(String),

    /// XML could not be parsed at all.
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Binary data blob length is not a whole number of values.
    #[error("Data file {name} has {len} bytes, which is not a multiple of 4")]
    MisalignedData { name: String, len: usize },

    /// Unknown color ramp name.
    #[error("Unknown color ramp: {name}")]
    UnknownColorRamp { name: String },

    /// Unknown variable name.
    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    /// A visualization was asked to draw before a variable was chosen.
    #[error("No variable selected for {visualization}")]
    NoVariableSelected { visualization: String },

    /// A variable was handed to a visualization of another kind.
    #[error("Variable {name} is not a {expected} variable")]
    WrongVariableKind { name: String, expected: &'static str },

    /// Sample index outside of a data array.
    #[error("Sample range {start}..{end} exceeds data length {len}")]
    SampleOutOfRange { start: usize, end: usize, len: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QesError {
    /// Create a NotFound error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a FileRead error.
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a Format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Create an UnknownColorRamp error.
    pub fn unknown_color_ramp(name: impl Into<String>) -> Self {
        Self::UnknownColorRamp { name: name.into() }
    }

    /// Create an UnknownVariable error.
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Format(_) | Self::Xml(_) | Self::MisalignedData { .. } => ErrorKind::Format,
            Self::UnknownColorRamp { .. }
            | Self::UnknownVariable { .. }
            | Self::NoVariableSelected { .. }
            | Self::WrongVariableKind { .. }
            | Self::SampleOutOfRange { .. } => ErrorKind::Lookup,
            Self::FileRead { .. } | Self::Io(_) => ErrorKind::Io,
        }
    }
}
