use netlens::camera::CameraRig;
use netlens::cli::Args;
use netlens::config::ServerConfig;
use netlens::core::{Action, Debouncer, Store};
use netlens::dialogs;
use netlens::layout::{build_scene, Ratio, Scene};
use netlens::net::{ModelClient, UploadRequest};
use netlens::widgets;

use clap::Parser;
use eframe::egui;
use log::{info, warn};
use std::time::Duration;

/// Fixed layout zoom divisor. Scene-space scale; view zoom is the camera's.
const LAYOUT_RATIO: f32 = 10.0;

/// A request slower than this pops the loading indicator.
const LOADING_POPUP_AFTER: Duration = Duration::from_millis(400);

/// Main application state.
struct NetlensApp {
    store: Store,
    rig: CameraRig,
    client: ModelClient,
    uploads: Debouncer<UploadRequest>,
    config: ServerConfig,
    /// Cached scene, rebuilt when the model revision changes
    scene: Scene,
    scene_revision: u64,
}

impl NetlensApp {
    fn new(config: ServerConfig) -> Self {
        let client = ModelClient::new(&config);
        Self {
            store: Store::new(),
            rig: CameraRig::default(),
            client,
            uploads: Debouncer::default(),
            config,
            scene: Scene::default(),
            scene_revision: 0,
        }
    }

    /// Route an incoming file: JSON parses locally, anything else goes to
    /// the parse server.
    fn ingest_file(&mut self, name: String, bytes: Vec<u8>) {
        let is_json = name.to_ascii_lowercase().ends_with(".json");
        if is_json {
            match netlens::ModelGraph::from_json(&bytes) {
                Ok(graph) => self.store.dispatch(Action::ModelLoaded(graph)),
                Err(e) => self
                    .store
                    .dispatch(Action::ModelFailed(format!("parse {}: {}", name, e))),
            }
        } else {
            // Debounced: rapid repeated drops collapse into the last one
            self.uploads.schedule(UploadRequest {
                file_name: name,
                bytes,
                depth: self.config.depth,
            });
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let name = file.name.clone();
            let bytes = match (&file.bytes, &file.path) {
                (Some(bytes), _) => Some(bytes.to_vec()),
                (None, Some(path)) => match std::fs::read(path) {
                    Ok(b) => Some(b),
                    Err(e) => {
                        warn!("cannot read dropped file {}: {}", path.display(), e);
                        None
                    }
                },
                (None, None) => None,
            };
            let name = if name.is_empty() {
                file.path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "model".to_string())
            } else {
                name
            };
            if let Some(bytes) = bytes {
                self.ingest_file(name, bytes);
            }
        }
    }

    /// Fire debounced uploads and collect finished ones.
    fn pump_network(&mut self) {
        if let Some(request) = self.uploads.tick() {
            self.store.dispatch(Action::ModelRequested);
            self.client.upload(request);
        }
        if let Some(outcome) = self.client.poll() {
            match outcome {
                Ok(graph) => self.store.dispatch(Action::ModelLoaded(graph)),
                Err(msg) => self.store.dispatch(Action::ModelFailed(msg)),
            }
        }
    }

    /// Rebuild the scene when the model revision moved; value-keyed, so an
    /// identical re-dispatch still rebuilds only once per arrival.
    fn refresh_scene(&mut self) {
        let revision = self.store.state().model.revision;
        if revision == self.scene_revision {
            return;
        }
        // LAYOUT_RATIO is a compile-time constant > 0
        let ratio = Ratio::new(LAYOUT_RATIO).expect("layout ratio is positive");
        self.scene = build_scene(&self.store.state().model.groups, ratio);
        self.scene_revision = revision;
        self.rig = CameraRig::framing(self.scene.center(), self.scene.total_width);
        info!(
            "scene rebuilt: {} groups, width {:.1}",
            self.scene.groups.len(),
            self.scene.total_width
        );
    }

    fn open_model_dialog(&mut self) {
        if let Some(path) = dialogs::pick_model_file() {
            match dialogs::load_model_file(&path) {
                Ok(graph) => self.store.dispatch(Action::ModelLoaded(graph)),
                Err(e) => self.store.dispatch(Action::ModelFailed(e.to_string())),
            }
        }
    }

    fn loading_overlay(&self, ctx: &egui::Context) {
        let Some(busy_for) = self.client.busy_for() else {
            return;
        };
        if busy_for < LOADING_POPUP_AFTER {
            return;
        }
        egui::Window::new("Parsing model")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("waiting for server ({:.0?})", busy_for));
                });
            });
    }
}

impl eframe::App for NetlensApp {
    /// Main frame update - called every frame by eframe.
    ///
    /// Flow:
    /// 1. File intake (drops) and network pump
    /// 2. Render UI, collecting actions
    /// 3. Dispatch and drain the store (serialized, dispatch order)
    /// 4. Apply camera intents to the rig
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.pump_network();
        self.refresh_scene();

        let mut actions: Vec<Action> = Vec::new();
        let mut open_requested = false;
        let state = self.store.state();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // The native dialog blocks, so it runs after the frame
                if ui.button("Open model…").clicked() {
                    open_requested = true;
                }
                match &state.model.graph {
                    Some(graph) => {
                        ui.label(format!(
                            "{} operators / {} groups",
                            graph.senario.len(),
                            state.model.groups.len()
                        ));
                    }
                    None => {
                        ui.label("drop an ONNX file here, or open a parsed model JSON");
                    }
                }
                if let Some(err) = &state.model.error {
                    ui.colored_label(egui::Color32::RED, err);
                }
            });
        });

        widgets::side_panel::show(ctx, state, &mut actions);

        egui::SidePanel::left("camera_controls")
            .resizable(false)
            .default_width(90.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                widgets::zoom_bar::show(ui, state, &mut actions);
                ui.add_space(12.0);
                widgets::joystick::show(ui, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            widgets::viewport::show(ui, rect, state, &self.rig, &self.scene, &mut actions);
        });

        self.loading_overlay(ctx);

        for action in actions {
            self.store.dispatch(action);
        }
        self.store.drain();

        if open_requested {
            self.open_model_dialog();
            self.store.drain();
        }

        // Camera controller: consume this frame's intents; reset is
        // edge-triggered and cleared the same frame it is applied
        if self.rig.apply(&self.store.state().camera) {
            self.store.dispatch(Action::CameraResetDone);
            self.store.drain();
        }

        // Keep polling while work is in flight or the camera is moving
        if self.client.is_busy() || self.uploads.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else {
            let cam = &self.store.state().camera;
            if cam.pan_x != 0.0 || cam.pan_y != 0.0 {
                ctx.request_repaint();
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| std::path::PathBuf::from("netlens.log"));
        let file = std::fs::File::create(&log_path)?;
        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
        info!("logging to file: {} ({:?})", log_path.display(), log_level);
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(default_level),
        )
        .init();
    }

    let config = ServerConfig::from_env_and_cli(args.server.clone(), args.depth);
    info!("parse server: {}", config.base_url);

    let mut app = NetlensApp::new(config);

    // Optional model JSON from the command line
    if let Some(path) = &args.model {
        match dialogs::load_model_file(path) {
            Ok(graph) => {
                app.store.dispatch(Action::ModelLoaded(graph));
                app.store.drain();
            }
            Err(e) => eprintln!("warning: {}", e),
        }
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("netlens v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([1280.0, 800.0])
            .with_resizable(true)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "netlens",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;

    Ok(())
}
