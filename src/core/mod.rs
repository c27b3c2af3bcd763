//! Core engine state - store, actions, reducers, debounce.

pub mod actions;
pub mod camera_state;
pub mod debounce;
pub mod selection;
pub mod store;

pub use actions::Action;
pub use camera_state::{CameraState, ZOOM_BASE, ZOOM_MAX, ZOOM_MIN};
pub use debounce::{Debouncer, DEBOUNCE_MS};
pub use selection::{SelectionState, DRAG_COOLDOWN};
pub use store::{AppState, ModelState, Store};
