//! Contract for the external 3D viewer component.
//!
//! The subsystem never renders a model itself. It talks to whatever viewer
//! the host embeds through [`ModelViewer`], and the host forwards the
//! viewer's lifecycle events back in as [`ViewerEvent`]s.

/// Bounding dimensions of the loaded model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Lifecycle events emitted by the embedded viewer, forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Model finished loading.
    Loaded,
    Play,
    Pause,
}

/// Operations the embedded 3D viewer must provide.
pub trait ModelViewer {
    /// Set the model source URI; initiates loading.
    fn set_source(&mut self, src: &str);
    fn play(&mut self);
    fn pause(&mut self);
    /// Seek the animation clock, in seconds.
    fn set_current_time(&mut self, seconds: f64);
    /// Bounding dimensions. May be unavailable until the model is ready.
    fn get_dimensions(&self) -> Option<Dimensions>;
    /// Step the camera zoom (`+1` in, `-1` out).
    fn zoom(&mut self, step: i32);
    /// Names of the animations shipped with the loaded model.
    fn available_animations(&self) -> Vec<String>;
}

/// Whether `src` points at a model format the viewer accepts. Anything
/// else is ignored by the source setter rather than failing.
pub fn is_supported_source(src: &str) -> bool {
    src.ends_with(".gltf") || src.ends_with(".glb")
}

pub mod runtime {
    //! Process-wide viewer runtime initialization.
    //!
    //! The viewer implementation may need one-time global setup (loading
    //! the embedding component, registering elements with the host shell).
    //! [`ensure_loaded`] is the single idempotent entry point for that,
    //! called during application bootstrap — there is no global flag to
    //! inspect anywhere else.

    use std::sync::OnceLock;

    static RUNTIME: OnceLock<()> = OnceLock::new();

    /// Run viewer runtime setup exactly once per process. Safe to call any
    /// number of times from any thread.
    pub fn ensure_loaded() {
        RUNTIME.get_or_init(|| {
            log::info!("viewer runtime initialized");
        });
    }

    /// Whether [`ensure_loaded`] has completed.
    pub fn is_loaded() -> bool {
        RUNTIME.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_filter() {
        assert!(is_supported_source("models/engine.glb"));
        assert!(is_supported_source("scene.gltf"));
        assert!(!is_supported_source("scene.obj"));
        assert!(!is_supported_source("scene"));
    }

    #[test]
    fn runtime_init_is_idempotent() {
        runtime::ensure_loaded();
        assert!(runtime::is_loaded());
        runtime::ensure_loaded();
        assert!(runtime::is_loaded());
    }
}
