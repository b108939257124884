//! Storage backends that a [`QesReader`](super::QesReader) reads from.

use crate::error::{QesError, Result};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read-only access to the files of one dataset.
///
/// This is the only I/O seam of the reader: a directory, an archive or a
/// remote blob store can all sit behind it.
pub trait DataSource: Debug {
    /// Contents of `name` as UTF-8 text.
    fn read_text(&self, name: &str) -> Result<String>;

    /// Raw contents of `name`.
    fn read_bytes(&self, name: &str) -> Result<Vec<u8>>;

    /// Names of every file available for reading.
    fn list_files(&self) -> Result<Vec<String>>;
}

/// Data source backed by a filesystem directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Open a dataset directory. Fails with `NotFound` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(QesError::not_found(dir));
        }
        Ok(Self { dir })
    }

    /// Directory this source reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(QesError::not_found(path));
        }
        Ok(path)
    }
}

fn read_error(path: PathBuf, err: std::io::Error) -> QesError {
    if err.kind() == ErrorKind::NotFound {
        QesError::not_found(path)
    } else {
        QesError::file_read(path, err)
    }
}

impl DataSource for DirectorySource {
    fn read_text(&self, name: &str) -> Result<String> {
        let path = self.resolve(name)?;
        fs::read_to_string(&path).map_err(|e| read_error(path, e))
    }

    fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;
        fs::read(&path).map_err(|e| read_error(path, e))
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Data source holding every file in memory.
///
/// Useful for datasets unpacked from an archive or received over the network.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), contents.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(name, contents);
        self
    }

    fn get(&self, name: &str) -> Result<&[u8]> {
        self.files
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| QesError::not_found(name))
    }
}

impl DataSource for MemorySource {
    fn read_text(&self, name: &str) -> Result<String> {
        let bytes = self.get(name)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| QesError::format(format!("{} is not valid UTF-8: {}", name, e)))
    }

    fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        self.get(name).map(<[u8]>::to_vec)
    }

    fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }
}
