//! Desktop stand-in for a real glTF viewer.
//!
//! The engine only needs the `ModelViewer` contract: source, playback,
//! camera zoom, and model dimensions. This implementation records the
//! requested state and logs the calls; wiring an actual glTF renderer
//! behind the same trait is a host concern.

use model_hotspots::viewer::{Dimensions, ModelViewer};

#[derive(Debug, Default)]
pub struct DesktopViewer {
    source: Option<String>,
    playing: bool,
    current_time: f64,
    zoom_level: i32,
}

impl DesktopViewer {
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
    }
}

impl ModelViewer for DesktopViewer {
    fn set_source(&mut self, src: &str) {
        log::info!("viewer source: {src}");
        self.source = Some(src.to_string());
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn get_dimensions(&self) -> Option<Dimensions> {
        None
    }

    fn zoom(&mut self, step: i32) {
        self.zoom_level += step;
        log::debug!("viewer zoom level: {}", self.zoom_level);
    }

    fn available_animations(&self) -> Vec<String> {
        Vec::new()
    }
}
