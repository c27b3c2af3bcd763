//! Actions - every mutation of shared state goes through one of these.
//!
//! Dispatched actions are queued and applied one at a time in dispatch
//! order. There is no transactional grouping: two actions dispatched in the
//! same frame are applied back to back with no atomicity across them.

use crate::model::ModelGraph;

#[derive(Debug, Clone)]
pub enum Action {
    /// Click on a layer's hit region. Swallowed while a camera drag is
    /// active (or cooling down).
    Select { group: i32, layer: i32 },
    /// Return to no-selection (-1, -1); closes the side panel.
    ClearSelection,
    /// Camera drag started - suppresses click-to-select.
    DragBegin,
    /// Camera drag ended - selection re-enables after a cooldown.
    DragEnd,

    /// Pan intent, velocity-like (joystick or drag delta), consumed every
    /// rendered frame until zeroed.
    CameraPan { x: f32, y: f32 },
    /// Absolute zoom slider level (0..100, base 50).
    CameraZoom { level: f32 },
    /// Request a camera reset; cleared by `CameraResetDone` the same frame
    /// it is applied.
    CameraReset,
    /// Internal: the rig applied the reset this frame.
    CameraResetDone,

    /// A model upload/parse request went out.
    ModelRequested,
    /// Parsed model arrived (from the server or a local file).
    ModelLoaded(ModelGraph),
    /// Request failed; the message lands in the error slot.
    ModelFailed(String),
}
