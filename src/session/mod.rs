//! Session state shared by every consumer of one visualization.
//!
//! [`QesSettings`] holds the loaded dataset, the current timestep and the
//! interactive flag; [`Playback`] drives the timestep over time.

mod events;
mod playback;
mod settings;

pub use events::{Signal, SubscriptionId};
pub use playback::Playback;
pub use settings::{QesSettings, SessionView};
