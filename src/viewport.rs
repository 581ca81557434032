//! Orchestration of the embedded 3D viewer's lifecycle.
//!
//! Wraps the [`ModelViewer`] the host supplies: keeps the viewport aspect
//! ratio current, tracks a single play-state boolean, forwards zoom keys,
//! and reproduces the viewer's marker-materialization quirk (markers only
//! appear after the animation has briefly played).

use crate::viewer::{is_supported_source, ModelViewer, ViewerEvent};

/// State the controller derives from the viewer, owned here so the rest of
/// the subsystem never queries the viewer directly.
pub struct ViewportController {
    viewer: Box<dyn ModelViewer>,
    /// Explicit ratio supplied by a poster image, if any. Takes precedence
    /// over ratios derived from model dimensions.
    poster_ratio: Option<f64>,
    aspect_ratio: Option<f64>,
    is_playing: bool,
    /// A pause+rewind is scheduled for the next animation frame.
    rewind_pending: bool,
}

impl std::fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("poster_ratio", &self.poster_ratio)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("is_playing", &self.is_playing)
            .field("rewind_pending", &self.rewind_pending)
            .finish()
    }
}

impl ViewportController {
    pub fn new(viewer: Box<dyn ModelViewer>, poster_ratio: Option<f64>) -> Self {
        Self {
            viewer,
            poster_ratio,
            aspect_ratio: None,
            is_playing: false,
            rewind_pending: false,
        }
    }

    /// Set the model source. Sources in unsupported formats are ignored.
    pub fn set_source(&mut self, src: &str) {
        if !is_supported_source(src) {
            log::warn!("ignoring unsupported model source: {src}");
            return;
        }
        self.viewer.set_source(src);
    }

    /// Process a viewer lifecycle event. Returns the new play state when
    /// the event changed it, so the caller can update button state.
    pub fn handle_viewer_event(&mut self, event: ViewerEvent) -> Option<bool> {
        match event {
            ViewerEvent::Loaded => {
                self.update_aspect_ratio(self.poster_ratio);
                if !self.viewer.available_animations().is_empty() {
                    self.ensure_markers_visible();
                }
                None
            }
            ViewerEvent::Play => self.set_play_state(true),
            ViewerEvent::Pause => self.set_play_state(false),
        }
    }

    /// Recompute the aspect ratio. An explicit positive ratio wins;
    /// otherwise the model's own bounding dimensions are consulted, and if
    /// those are not usable either the current ratio stays unchanged.
    pub fn update_aspect_ratio(&mut self, explicit: Option<f64>) {
        let ratio = explicit.filter(|r| *r > 0.0).or_else(|| {
            self.viewer
                .get_dimensions()
                .filter(|d| d.x > 0.0 && d.y > 0.0)
                .map(|d| d.x / d.y)
        });

        if let Some(ratio) = ratio {
            self.aspect_ratio = Some(ratio);
        }
    }

    pub fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }

    /// Height the viewport wants for a given width.
    pub fn preferred_height(&self, width: f64) -> Option<f64> {
        self.aspect_ratio.map(|ratio| width / ratio)
    }

    pub fn has_animations(&self) -> bool {
        !self.viewer.available_animations().is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.viewer.pause();
        } else {
            self.viewer.play();
        }
    }

    /// Workaround for the viewer's lazy marker placement: markers anchored
    /// to the model only materialize once the animation has run. Play and
    /// rewind now, then pause and rewind again on the next animation frame.
    pub fn ensure_markers_visible(&mut self) {
        self.viewer.play();
        self.viewer.set_current_time(0.0);
        self.rewind_pending = true;
    }

    /// Advance deferred work by one animation frame.
    pub fn on_frame(&mut self) {
        if !self.rewind_pending {
            return;
        }
        self.rewind_pending = false;
        self.viewer.pause();
        self.viewer.set_current_time(0.0);
    }

    /// Forward `+` / `-` zoom keys to the viewer while it has focus.
    /// Returns true when the key was consumed.
    pub fn handle_zoom_key(&mut self, key: char) -> bool {
        match key {
            '+' => {
                self.viewer.zoom(1);
                true
            }
            '-' => {
                self.viewer.zoom(-1);
                true
            }
            _ => false,
        }
    }

    fn set_play_state(&mut self, playing: bool) -> Option<bool> {
        if self.is_playing == playing {
            return None;
        }
        self.is_playing = playing;
        Some(playing)
    }
}
