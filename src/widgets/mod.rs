//! UI widgets - viewport, picking, side panel, camera controls.

pub mod joystick;
pub mod pick;
pub mod side_panel;
pub mod viewport;
pub mod zoom_bar;

pub use pick::{pick_layer, PickRegion};
pub use viewport::Projector;
