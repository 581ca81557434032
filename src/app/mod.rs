//! `ExplorerApp` — the top-level egui application state.
//!
//! This module declares the `ExplorerApp` struct and its construction.
//! Rendering and input routing live in the sibling sub-modules:
//!
//! - `scene_view` — recursive scene-tree → egui rendering
//! - `viewer`     — the desktop stand-in for a real glTF viewer

pub mod scene_view;
pub mod viewer;

use eframe::egui;

use model_hotspots::config::{validate, Bootstrap, Params};
use model_hotspots::explorer::{Explorer, NoopEvents};
use model_hotspots::surface::SurfaceKey;
use model_hotspots::viewer::{runtime, ViewerEvent};

// ─── Application state ───────────────────────────────────────────────────────

pub enum AppState {
    /// Configuration did not yield a usable session; show the message.
    Placeholder(String),
    Running(Explorer),
}

pub struct ExplorerApp {
    pub state: AppState,
    /// The desktop viewer has no async load phase, so `Loaded` is emitted
    /// on the first update instead.
    pub load_announced: bool,
}

impl ExplorerApp {
    pub fn new(params: Params) -> Self {
        runtime::ensure_loaded();

        let state = match validate(params) {
            Bootstrap::Placeholder { message } => AppState::Placeholder(message),
            Bootstrap::Ready(config) => AppState::Running(Explorer::new(
                *config,
                Box::new(viewer::DesktopViewer::default()),
                true,
                Box::new(NoopEvents),
            )),
        };

        Self {
            state,
            load_announced: false,
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let AppState::Placeholder(message) = &self.state {
            let message = message.clone();
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| ui.label(message));
            });
            return;
        }
        let AppState::Running(explorer) = &mut self.state else {
            return;
        };

        if !self.load_announced {
            self.load_announced = true;
            explorer.handle_viewer_event(ViewerEvent::Loaded);
        }

        // Every egui repaint is an animation frame for deferred work.
        explorer.on_animation_frame();

        ctx.input(|input| {
            if input.key_pressed(egui::Key::Escape) {
                explorer.handle_key_down(SurfaceKey::Escape);
            }
            if input.key_pressed(egui::Key::Tab) {
                explorer.handle_key_down(SurfaceKey::Tab {
                    shift: input.modifiers.shift,
                });
            }
            if input.key_pressed(egui::Key::Plus) {
                explorer.handle_zoom_key('+');
            }
            if input.key_pressed(egui::Key::Minus) {
                explorer.handle_zoom_key('-');
            }
        });

        explorer.resize(f64::from(ctx.screen_rect().width()));

        self.draw_scene(ctx);
    }
}
