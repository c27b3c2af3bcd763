//! Camera - the frame-driven pan/zoom/reset rig.

pub mod rig;

pub use rig::{CameraRig, CAMERA_SPEED, FOV_DEG, PAN_SPEED};
