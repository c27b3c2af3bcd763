//! NETLENS - 3D viewer for neural-network computation graphs
//!
//! Re-exports all modules for use by binary targets.

// Core engine (store, actions, reducers, debounce)
pub mod core;

// App modules
pub mod camera;
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod layout;
pub mod model;
pub mod net;
pub mod widgets;

// Re-export commonly used types
pub use self::core::{Action, AppState, Store};
pub use self::layout::{build_scene, Ratio, Scene};
pub use self::model::{GroupRecord, LayerRecord, ModelGraph};
