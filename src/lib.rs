// Core model: abstract renderable-node tree and the subsystems built on it.
pub mod scene;
pub mod focus;

// Input handling & content.
pub mod color;
pub mod config;
pub mod content;
pub mod hotspot;
pub mod i18n;
pub mod text;

// Viewer integration.
pub mod buttons;
pub mod viewer;
pub mod viewport;

// Disclosure surfaces and the orchestrator that ties it all together.
pub mod surface;
pub mod explorer;
