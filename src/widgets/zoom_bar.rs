//! Zoom bar - vertical slider driving the camera zoom level, plus reset.

use eframe::egui;

use crate::core::{Action, AppState, ZOOM_MAX, ZOOM_MIN};

pub const ZOOM_STEP: f64 = 0.1;

pub fn show(ui: &mut egui::Ui, state: &AppState, actions: &mut Vec<Action>) {
    ui.vertical(|ui| {
        let mut level = state.camera.zoom_level;
        let slider = egui::Slider::new(&mut level, ZOOM_MIN..=ZOOM_MAX)
            .vertical()
            .step_by(ZOOM_STEP)
            .show_value(false);
        if ui.add(slider).changed() {
            actions.push(Action::CameraZoom { level });
        }
        if ui.button("Reset").clicked() {
            actions.push(Action::CameraReset);
        }
    });
}
