//! Detail side panel - profile of the selected layer.
//!
//! Opens on selection, closes on clear. Populated by a fail-safe lookup:
//! an out-of-range selection shows "layer not found" instead of faulting.

use eframe::egui::{self, RichText};

use crate::core::{Action, AppState, ModelState};
use crate::model::{shape_string, LayerRecord};

pub fn show(ctx: &egui::Context, state: &AppState, actions: &mut Vec<Action>) {
    if !state.selection.has_selection() {
        return;
    }

    egui::SidePanel::right("layer_detail")
        .resizable(true)
        .default_width(320.0)
        .show(ctx, |ui| {
            if ui.button("Close").clicked() {
                actions.push(Action::ClearSelection);
            }
            ui.separator();

            match state
                .model
                .layer_at(state.selection.group_idx, state.selection.layer_idx)
            {
                Some(layer) => profile(ui, &state.model, layer),
                None => {
                    ui.label("layer not found");
                }
            }
        });
}

fn profile(ui: &mut egui::Ui, model: &ModelState, layer: &LayerRecord) {
    ui.heading(if layer.symbol.is_empty() {
        layer.op_kind.clone()
    } else {
        layer.symbol.clone()
    });

    ui.add_space(6.0);
    ui.label(RichText::new("Layer Info").strong());

    // Input symbols and shapes resolve through the symbol table; dangling
    // references are skipped.
    let graph = model.graph.as_ref();
    let mut input_symbols = Vec::new();
    let mut input_shapes = Vec::new();
    if let Some(graph) = graph {
        for &i in &layer.inputs {
            if let Some(entry) = graph.entry(i) {
                input_symbols.push(entry.symbol.clone());
                input_shapes.push(shape_string(&entry.output_shape));
            }
        }
    }
    let output_symbol = graph
        .and_then(|g| layer.outputs.first().and_then(|&o| g.entry(o)))
        .map(|e| e.symbol.clone())
        .unwrap_or_default();

    row(ui, "op_name", &layer.op_kind);
    row(ui, "output_shape", &shape_string(&layer.output_shape));
    row(ui, "inputs", &input_symbols.join(", "));
    row(ui, "input_shape", &input_shapes.join(", "));
    row(ui, "output", &output_symbol);

    ui.add_space(6.0);
    ui.label(RichText::new("Forward").strong());
    if layer.forward.is_empty() {
        ui.label("(no expression)");
    } else if layer.symbol.is_empty() {
        ui.monospace(&layer.forward);
    } else {
        ui.monospace(format!("{} = {}", layer.symbol, layer.forward));
    }
}

fn row(ui: &mut egui::Ui, name: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(format!("{}:", name));
        ui.monospace(value);
    });
}
