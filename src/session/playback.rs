//! Timed playback through the timesteps of a session.

use super::{QesSettings, SubscriptionId};
use std::cell::Cell;
use std::rc::Rc;

/// Advances a session's timestep at a fixed rate while playing.
#[derive(Debug, Clone)]
pub struct Playback {
    playing: Rc<Cell<bool>>,
    accumulated: f32,
    seconds_per_frame: f32,
}

impl Playback {
    /// Create a paused playback advancing one timestep every
    /// `seconds_per_frame` seconds.
    pub fn new(seconds_per_frame: f32) -> Self {
        Self {
            playing: Rc::new(Cell::new(false)),
            accumulated: 0.0,
            seconds_per_frame,
        }
    }

    /// Stop playback whenever `settings` changes its interactive state.
    pub fn attach(&self, settings: &mut QesSettings) -> SubscriptionId {
        let playing = Rc::clone(&self.playing);
        settings
            .interactive_changed
            .subscribe(move |_| playing.set(false))
    }

    /// Undo [`attach`](Self::attach).
    pub fn detach(&self, settings: &mut QesSettings, id: SubscriptionId) -> bool {
        settings.interactive_changed.unsubscribe(id)
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    /// Seconds between timesteps.
    pub fn seconds_per_frame(&self) -> f32 {
        self.seconds_per_frame
    }

    /// Switch between playing and paused.
    pub fn toggle(&mut self) {
        let playing = !self.playing.get();
        self.playing.set(playing);
        if !playing {
            self.accumulated = 0.0;
        }
    }

    /// Start playing.
    pub fn play(&mut self) {
        self.playing.set(true);
    }

    /// Pause playback.
    pub fn stop(&mut self) {
        self.playing.set(false);
    }

    /// Jump to `timestep` as a user scrub: playback pauses if the timestep changes.
    pub fn scrub(&mut self, timestep: usize, settings: &mut QesSettings) {
        if timestep != settings.current_timestep() {
            self.stop();
            settings.seek_to(timestep);
        }
    }

    /// Account for `dt` seconds of wall time.
    ///
    /// Every full `seconds_per_frame` advances one timestep; the remainder
    /// carries over. Reaching the last timestep stops playback there.
    pub fn tick(&mut self, dt: f32, settings: &mut QesSettings) {
        if !self.playing.get() || self.seconds_per_frame <= 0.0 {
            return;
        }
        let count = settings.view().timestep_count();
        if count == 0 {
            return;
        }

        self.accumulated += dt;
        if self.accumulated < self.seconds_per_frame {
            return;
        }

        let steps = (self.accumulated / self.seconds_per_frame) as usize;
        self.accumulated -= steps as f32 * self.seconds_per_frame;

        let last = count - 1;
        let mut frame = settings.current_timestep().saturating_add(steps);
        if frame >= last {
            self.playing.set(false);
            self.accumulated = 0.0;
            frame = last;
        }
        settings.seek_to(frame);
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(crate::config::PlaybackConfig::default().seconds_per_frame)
    }
}
