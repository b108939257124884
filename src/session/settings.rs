//! Visualization-wide session state.

use super::Signal;
use crate::data::{DataSource, DirectorySource, QesReader, MANIFEST_NAME};
use crate::error::Result;
use std::path::Path;
use std::sync::Arc;

/// Read-only view of a session, handed to event handlers.
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    source: Option<Arc<dyn DataSource>>,
    reader: Option<QesReader>,
    current_timestep: usize,
    interactive: bool,
}

impl SessionView {
    /// Source of the loaded dataset.
    pub fn source(&self) -> Option<&Arc<dyn DataSource>> {
        self.source.as_ref()
    }

    /// Reader of the loaded dataset.
    pub fn reader(&self) -> Option<&QesReader> {
        self.reader.as_ref()
    }

    /// Whether a dataset is loaded.
    pub fn is_loaded(&self) -> bool {
        self.reader.is_some()
    }

    /// Timestep every consumer should display.
    pub fn current_timestep(&self) -> usize {
        self.current_timestep
    }

    /// Whether the visualization accepts interaction.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Number of timesteps in the loaded dataset, 0 when unloaded.
    pub fn timestep_count(&self) -> usize {
        self.reader.as_ref().map_or(0, QesReader::timestep_count)
    }
}

/// Single source of truth for every component of one visualization.
///
/// Holds at most one loaded dataset, the current timestep and the
/// interactive flag, and notifies subscribers when any of them change.
/// Handlers receive the state as it is after the change.
#[derive(Debug)]
pub struct QesSettings {
    manifest_name: String,
    state: SessionView,
    /// Fired after a new dataset is loaded.
    pub dataset_changed: Signal<SessionView>,
    /// Fired after the current timestep changes.
    pub timestep_changed: Signal<SessionView>,
    /// Fired after the interactive flag changes.
    pub interactive_changed: Signal<SessionView>,
}

impl Default for QesSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl QesSettings {
    /// Create an unloaded, non-interactive session.
    pub fn new() -> Self {
        Self::with_manifest_name(MANIFEST_NAME)
    }

    /// Create a session whose datasets keep their manifest in `name`.
    pub fn with_manifest_name(name: impl Into<String>) -> Self {
        Self {
            manifest_name: name.into(),
            state: SessionView::default(),
            dataset_changed: Signal::new(),
            timestep_changed: Signal::new(),
            interactive_changed: Signal::new(),
        }
    }

    /// Current state.
    pub fn view(&self) -> &SessionView {
        &self.state
    }

    /// Reader of the loaded dataset.
    pub fn reader(&self) -> Option<&QesReader> {
        self.state.reader()
    }

    /// Source of the loaded dataset.
    pub fn source(&self) -> Option<&Arc<dyn DataSource>> {
        self.state.source()
    }

    /// Current timestep.
    pub fn current_timestep(&self) -> usize {
        self.state.current_timestep
    }

    /// Whether the visualization accepts interaction.
    pub fn is_interactive(&self) -> bool {
        self.state.interactive
    }

    /// Load the dataset in directory `path`.
    ///
    /// On success the dataset replaces the current one, the timestep resets
    /// to 0, `dataset_changed` fires and the session becomes interactive.
    /// On failure the session is left unloaded and non-interactive and the
    /// error is returned.
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::info!("Loading QES dataset from {}", path.display());
        let result = DirectorySource::new(path)
            .map(|source| Arc::new(source) as Arc<dyn DataSource>)
            .and_then(|source| self.read(source));
        self.finish_load(result)
    }

    /// Load a dataset from any data source, with the same transitions as
    /// [`load_directory`](Self::load_directory).
    pub fn load_source(&mut self, source: Arc<dyn DataSource>) -> Result<()> {
        let result = self.read(source);
        self.finish_load(result)
    }

    fn read(&self, source: Arc<dyn DataSource>) -> Result<(Arc<dyn DataSource>, QesReader)> {
        let reader = QesReader::with_manifest(Arc::clone(&source), &self.manifest_name)?;
        Ok((source, reader))
    }

    fn finish_load(&mut self, result: Result<(Arc<dyn DataSource>, QesReader)>) -> Result<()> {
        match result {
            Ok((source, reader)) => {
                self.state.source = Some(source);
                self.state.reader = Some(reader);
                self.state.current_timestep = 0;
                self.dataset_changed.emit(&self.state);
                self.set_interactive(true);
                Ok(())
            },
            Err(err) => {
                tracing::error!("Error loading dataset: {}", err);
                self.state.source = None;
                self.state.reader = None;
                self.state.current_timestep = 0;
                self.set_interactive(false);
                Err(err)
            },
        }
    }

    /// Move to `timestep`, firing `timestep_changed` if it differs from the
    /// current one.
    ///
    /// The value is not checked against the dataset; callers wanting a
    /// valid index should use [`seek_clamped`](Self::seek_clamped).
    pub fn seek_to(&mut self, timestep: usize) {
        if self.state.current_timestep == timestep {
            return;
        }
        tracing::debug!(from = self.state.current_timestep, to = timestep, "Seek");
        self.state.current_timestep = timestep;
        self.timestep_changed.emit(&self.state);
    }

    /// [`seek_to`](Self::seek_to) after clamping to the last timestep.
    ///
    /// Does nothing while no dataset with timesteps is loaded.
    pub fn seek_clamped(&mut self, timestep: usize) {
        let count = self.state.timestep_count();
        if count == 0 {
            return;
        }
        self.seek_to(timestep.min(count - 1));
    }

    /// Set the interactive flag, firing `interactive_changed` if it changes.
    pub fn set_interactive(&mut self, interactive: bool) {
        if self.state.interactive == interactive {
            return;
        }
        self.state.interactive = interactive;
        self.interactive_changed.emit(&self.state);
    }
}
