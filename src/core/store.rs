//! Application store - single owner of shared mutable state.
//!
//! All mutations flow through dispatched actions, applied one at a time in
//! dispatch order from the frame loop (queue + drain, no pub/sub). Reducer
//! logic lives on the state types themselves and is testable without a
//! rendering environment.

use std::collections::VecDeque;
use std::time::Instant;

use log::info;

use crate::model::{segment, GroupRecord, LayerRecord, ModelGraph};

use super::actions::Action;
use super::camera_state::CameraState;
use super::selection::SelectionState;

/// Model slot: the parsed graph plus its derived segmentation.
///
/// Groups are recomputed when a new graph value arrives, not per frame -
/// the "recompute on change" contract keyed on content, not identity.
#[derive(Debug, Clone, Default)]
pub struct ModelState {
    pub graph: Option<ModelGraph>,
    pub groups: Vec<GroupRecord>,
    pub error: Option<String>,
    pub busy: bool,
    /// Bumped on every model arrival; the scene cache keys on this value
    /// instead of object identity.
    pub revision: u64,
}

impl ModelState {
    /// Fail-safe lookup for the side panel. Out-of-range indices (including
    /// the -1 sentinels) yield None rather than an index fault.
    pub fn layer_at(&self, group_idx: i32, layer_idx: i32) -> Option<&LayerRecord> {
        let g = usize::try_from(group_idx).ok()?;
        let l = usize::try_from(layer_idx).ok()?;
        self.groups.get(g)?.layer(l)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub selection: SelectionState,
    pub camera: CameraState,
    pub model: ModelState,
}

/// Action queue plus state. `dispatch` may be called from anywhere on the
/// UI thread; `drain` is called once per frame before rendering.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    queue: VecDeque<Action>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    /// Apply all queued actions in dispatch order.
    pub fn drain(&mut self) {
        let now = Instant::now();
        while let Some(action) = self.queue.pop_front() {
            self.apply(action, now);
        }
    }

    /// Apply a single action. Split out with an explicit `now` so the
    /// drag-cooldown paths are testable.
    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Select { group, layer } => {
                self.state.selection.select(group, layer, now);
            }
            Action::ClearSelection => self.state.selection.clear(),
            Action::DragBegin => self.state.selection.drag_begin(),
            Action::DragEnd => self.state.selection.drag_end(now),

            Action::CameraPan { x, y } => self.state.camera.set_pan(x, y),
            Action::CameraZoom { level } => self.state.camera.set_zoom_level(level),
            Action::CameraReset => self.state.camera.request_reset(),
            Action::CameraResetDone => self.state.camera.clear_reset(),

            Action::ModelRequested => {
                self.state.model.busy = true;
                self.state.model.error = None;
            }
            Action::ModelLoaded(graph) => {
                let groups = segment(&graph);
                info!(
                    "model loaded: {} operators, {} groups",
                    graph.senario.len(),
                    groups.len()
                );
                self.state.model.graph = Some(graph);
                self.state.model.groups = groups;
                self.state.model.error = None;
                self.state.model.busy = false;
                self.state.model.revision += 1;
                // A new model invalidates the old selection
                self.state.selection.clear();
            }
            Action::ModelFailed(msg) => {
                self.state.model.busy = false;
                self.state.model.error = Some(msg);
            }
        }
    }
}
