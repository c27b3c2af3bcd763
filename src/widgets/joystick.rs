//! Pan joystick - a small drag pad emitting directional pan intents.
//!
//! While dragged, the offset from the pad center is dispatched as a
//! velocity-like pan intent every frame; release snaps back to zero.

use eframe::egui::{self, Color32, Sense, Stroke, Vec2};

use crate::core::Action;

const PAD_SIZE: f32 = 64.0;
const KNOB_RADIUS: f32 = 8.0;

/// Scales pad offset (pixels) to pan intent units.
const PAN_GAIN: f32 = 1.0;

pub fn show(ui: &mut egui::Ui, actions: &mut Vec<Action>) {
    let (rect, response) =
        ui.allocate_exact_size(Vec2::splat(PAD_SIZE), Sense::click_and_drag());
    let painter = ui.painter().with_clip_rect(rect);
    let center = rect.center();

    let offset = if response.dragged() {
        let pos = response
            .interact_pointer_pos()
            .unwrap_or(center);
        let raw = pos - center;
        raw.clamp(
            Vec2::splat(-PAD_SIZE / 2.0),
            Vec2::splat(PAD_SIZE / 2.0),
        )
    } else {
        Vec2::ZERO
    };

    if response.dragged() {
        actions.push(Action::CameraPan {
            x: offset.x * PAN_GAIN,
            y: -offset.y * PAN_GAIN,
        });
    }
    if response.drag_stopped() {
        actions.push(Action::CameraPan { x: 0.0, y: 0.0 });
    }

    painter.circle(
        center,
        PAD_SIZE / 2.0,
        Color32::from_gray(230),
        Stroke::new(1.0, Color32::from_gray(140)),
    );
    painter.circle(
        center + offset,
        KNOB_RADIUS,
        Color32::from_gray(120),
        Stroke::new(1.0, Color32::from_gray(60)),
    );
}
