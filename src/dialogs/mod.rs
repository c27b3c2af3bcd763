//! Native dialog flows.

pub mod open_model;

pub use open_model::{load_model_file, pick_model_file};
