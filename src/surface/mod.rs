//! Disclosure surfaces: where a hotspot's content is revealed.
//!
//! Exactly one surface exists per session, chosen once from configuration:
//! the non-modal [`SidePanelSurface`] that always sits beside the viewport,
//! or the modal [`OverlaySurface`]. The variant is a tagged enum selected
//! at construction — call sites dispatch through [`DisclosureSurface`] and
//! never re-inspect configuration.

pub mod overlay;
pub mod side_panel;

pub use overlay::OverlaySurface;
pub use side_panel::SidePanelSurface;

use crate::scene::{NodeId, SceneTree};

/// Surface lifecycle states. The side panel only ever uses `Closed`
/// ("idle") and `Open` ("showing content"); the overlay walks the full
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Keyboard input routed to the active surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKey {
    Escape,
    Tab { shift: bool },
}

/// The per-session disclosure surface.
#[derive(Debug)]
pub enum DisclosureSurface {
    SidePanel(SidePanelSurface),
    Overlay(OverlaySurface),
}

impl DisclosureSurface {
    /// Bind `content` (and the hotspot's label) to the surface and reveal
    /// it. Activating an already-open surface swaps title and content in
    /// place; no intermediate dismiss is required.
    pub fn activate(&mut self, tree: &mut SceneTree, index: usize, label: &str, content: NodeId) {
        match self {
            Self::SidePanel(panel) => panel.activate(tree, index, label, content),
            Self::Overlay(overlay) => overlay.activate(tree, index, label, content),
        }
    }

    /// Close the surface. Returns true when this call actually dismissed
    /// it (used to fire the dismissal notification exactly once).
    pub fn dismiss(&mut self, tree: &mut SceneTree) -> bool {
        match self {
            Self::SidePanel(panel) => panel.dismiss(tree),
            Self::Overlay(overlay) => overlay.dismiss(tree),
        }
    }

    pub fn is_open(&self) -> bool {
        match self {
            Self::SidePanel(panel) => panel.is_open(),
            Self::Overlay(overlay) => overlay.is_open(),
        }
    }

    /// Index of the hotspot whose content is currently bound. Present
    /// whenever the surface is not closed.
    pub fn active_hotspot(&self) -> Option<usize> {
        match self {
            Self::SidePanel(panel) => panel.active_hotspot(),
            Self::Overlay(overlay) => overlay.active_hotspot(),
        }
    }

    /// Advance deferred work by one animation frame.
    pub fn on_frame(&mut self, tree: &mut SceneTree) {
        if let Self::Overlay(overlay) = self {
            overlay.on_frame(tree);
        }
    }

    /// Route a document-level click. Returns true when the click dismissed
    /// the surface. The non-modal side panel never reacts.
    pub fn handle_document_click(&mut self, tree: &mut SceneTree, target: NodeId) -> bool {
        match self {
            Self::SidePanel(_) => false,
            Self::Overlay(overlay) => overlay.handle_document_click(tree, target),
        }
    }

    /// Route a key press. Returns true when the surface consumed it (and
    /// its default action must be suppressed).
    pub fn handle_key_down(&mut self, tree: &mut SceneTree, key: SurfaceKey) -> bool {
        match self {
            Self::SidePanel(_) => false,
            Self::Overlay(overlay) => overlay.handle_key_down(tree, key),
        }
    }

    /// Root node of the surface subtree.
    pub fn root(&self) -> NodeId {
        match self {
            Self::SidePanel(panel) => panel.root(),
            Self::Overlay(overlay) => overlay.root(),
        }
    }
}
