//! Colors and color ramps for mapping normalized values to display colors.

mod ramp;
mod rgba;

pub use ramp::{ColorRamp, ColorRampRegistry, BUNDLED_COLOR_MAPS};
pub use rgba::Rgba;
