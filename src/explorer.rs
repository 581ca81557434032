//! Top-level orchestration: markers → content bundles → disclosure surface.
//!
//! `Explorer` owns the scene tree and wires the subsystem together. The
//! host shell feeds it clicks, keys, viewer lifecycle events, and one call
//! per animation frame; everything else — index resolution, lazy content
//! realization, surface state, focus discipline — happens in here.

use crate::buttons::{ButtonId, OverlayButtonParams, OverlayButtons};
use crate::config::{Presentation, SizeConstraints, ValidConfig};
use crate::content::ContentStore;
use crate::hotspot::HotspotRegistry;
use crate::i18n::Dictionary;
use crate::scene::{NodeId, NodeKind, SceneTree};
use crate::surface::{DisclosureSurface, OverlaySurface, SidePanelSurface, SurfaceKey};
use crate::viewer::{ModelViewer, ViewerEvent};
use crate::viewport::ViewportController;

/// Host-side reactions to subsystem events. Every handler has a no-op
/// default, so hosts implement only what they care about and call sites
/// never test for handler presence.
pub trait ExplorerEvents {
    fn on_resize(&mut self) {}
    fn on_fullscreen_clicked(&mut self) {}
    fn on_play_state_changed(&mut self, _is_playing: bool) {}
    fn on_surface_dismissed(&mut self, _hotspot_index: usize) {}
}

/// Default host: reacts to nothing.
#[derive(Debug, Default)]
pub struct NoopEvents;

impl ExplorerEvents for NoopEvents {}

pub struct Explorer {
    tree: SceneTree,
    dictionary: Dictionary,
    registry: HotspotRegistry,
    store: ContentStore,
    surface: DisclosureSurface,
    viewport: ViewportController,
    buttons: Option<OverlayButtons>,
    viewer_node: NodeId,
    model_container: NodeId,
    size: SizeConstraints,
    is_fullscreen_allowed: bool,
    events: Box<dyn ExplorerEvents>,
}

impl Explorer {
    pub fn new(
        config: ValidConfig,
        viewer: Box<dyn ModelViewer>,
        is_fullscreen_allowed: bool,
        events: Box<dyn ExplorerEvents>,
    ) -> Self {
        let mut tree = SceneTree::new();

        let model_container = tree.create(NodeKind::Container);
        tree.node_mut(model_container)
            .classes
            .push("model-container".to_string());
        let root = tree.root();
        tree.append_child(root, model_container);

        let viewer_node = tree.create(NodeKind::Container);
        {
            let node = tree.node_mut(viewer_node);
            node.classes.push("threed-model-view".to_string());
            if !config.model_alt.is_empty() {
                node.aria_label = Some(config.model_alt.clone());
            }
            if let Some(color) = &config.background_color {
                node.attributes
                    .insert("background-color".to_string(), color.clone());
            }
        }
        tree.append_child(model_container, viewer_node);

        let registry = HotspotRegistry::build(
            &mut tree,
            viewer_node,
            config.hotspots,
            config.hotspot_color_default.as_deref(),
        );

        let surface = match config.presentation {
            Presentation::SidePanel => DisclosureSurface::SidePanel(SidePanelSurface::new(
                &mut tree,
                root,
                config.dictionary.get("l10n.clickOnHotspotToSeeDetails"),
            )),
            Presentation::Overlay => DisclosureSurface::Overlay(OverlaySurface::new(
                &mut tree,
                root,
                config.dictionary.clone(),
            )),
        };

        let mut viewport = ViewportController::new(viewer, config.poster_ratio);
        viewport.set_source(&config.model_src);

        Self {
            tree,
            dictionary: config.dictionary,
            registry,
            store: ContentStore::new(config.bundles),
            surface,
            viewport,
            buttons: None,
            viewer_node,
            model_container,
            size: config.size,
            is_fullscreen_allowed,
            events,
        }
    }

    // ─── Accessors for the host shell ────────────────────────────────────────

    pub fn scene(&self) -> &SceneTree {
        &self.tree
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn registry(&self) -> &HotspotRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &DisclosureSurface {
        &self.surface
    }

    pub fn buttons(&self) -> Option<&OverlayButtons> {
        self.buttons.as_ref()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewer_node(&self) -> NodeId {
        self.viewer_node
    }

    // ─── Input routing ───────────────────────────────────────────────────────

    /// Route a document-level click by target node. Marker and button
    /// clicks dispatch to their actions; anything else is offered to the
    /// surface as a potential outside click.
    pub fn handle_click(&mut self, target: NodeId) {
        if let Some(index) = self.registry.activation_for(target) {
            self.activate_hotspot(index);
            return;
        }

        if let Some(buttons) = &self.buttons {
            if buttons.button(ButtonId::Play) == Some(target) {
                self.viewport.toggle_play();
                return;
            }
            if buttons.button(ButtonId::Fullscreen) == Some(target) {
                self.events.on_fullscreen_clicked();
                return;
            }
        }

        if let DisclosureSurface::Overlay(overlay) = &self.surface {
            if overlay.close_button() == target {
                self.dismiss_surface();
                return;
            }
        }

        let active = self.surface.active_hotspot();
        if self.surface.handle_document_click(&mut self.tree, target) {
            self.notify_dismissed(active);
        }
    }

    /// Activate a hotspot by index: resolve its bundle, hand the realized
    /// content to the surface, and ask the host to resize. An index with
    /// no bundle is a no-op.
    pub fn activate_hotspot(&mut self, index: usize) {
        let Some(label) = self.registry.hotspot(index).map(|h| h.label.clone()) else {
            return;
        };
        let Some(content) = self.store.get(&mut self.tree, index) else {
            log::warn!("no content bundle for hotspot {index}");
            return;
        };

        self.surface.activate(&mut self.tree, index, &label, content);
        self.events.on_resize();
    }

    /// Route a key press to the active surface. Returns true when the key
    /// was consumed and its default action must be suppressed.
    pub fn handle_key_down(&mut self, key: SurfaceKey) -> bool {
        let active = self.surface.active_hotspot();
        let consumed = self.surface.handle_key_down(&mut self.tree, key);
        if consumed && key == SurfaceKey::Escape && !self.surface.is_open() {
            self.notify_dismissed(active);
        }
        consumed
    }

    /// Forward `+` / `-` zoom keys while the viewer has focus.
    pub fn handle_zoom_key(&mut self, key: char) -> bool {
        self.viewport.handle_zoom_key(key)
    }

    /// Close the surface programmatically (close button, host request).
    pub fn dismiss_surface(&mut self) {
        let active = self.surface.active_hotspot();
        if self.surface.dismiss(&mut self.tree) {
            self.notify_dismissed(active);
        }
    }

    /// Advance all deferred (next-animation-frame) work.
    pub fn on_animation_frame(&mut self) {
        self.surface.on_frame(&mut self.tree);
        self.viewport.on_frame();
    }

    // ─── Viewer lifecycle ────────────────────────────────────────────────────

    pub fn handle_viewer_event(&mut self, event: ViewerEvent) {
        let play_change = self.viewport.handle_viewer_event(event);

        if event == ViewerEvent::Loaded {
            self.add_overlay_buttons();
            self.events.on_resize();
        }

        if let Some(playing) = play_change {
            self.apply_play_state(playing);
        }
    }

    fn add_overlay_buttons(&mut self) {
        if self.buttons.is_some() {
            return;
        }
        self.buttons = OverlayButtons::build(
            &mut self.tree,
            self.model_container,
            OverlayButtonParams {
                is_playing_enabled: self.viewport.has_animations(),
                is_fullscreen_allowed: self.is_fullscreen_allowed,
            },
            &self.dictionary,
        );
    }

    fn apply_play_state(&mut self, playing: bool) {
        if let Some(buttons) = &self.buttons {
            let label = self
                .dictionary
                .get(if playing { "a11y.buttonPause" } else { "a11y.buttonPlay" })
                .to_string();
            buttons.set_button_aria_label(&mut self.tree, ButtonId::Play, &label);
            buttons.toggle_button_class(&mut self.tree, ButtonId::Play, "playing", playing);
        }
        self.events.on_play_state_changed(playing);
    }

    // ─── Sizing & fullscreen ─────────────────────────────────────────────────

    /// Recompute the side panel's max height from the viewport's preferred
    /// height at the given width. Overlay sessions have nothing to resize.
    pub fn resize(&mut self, viewport_width: f64) {
        if let DisclosureSurface::SidePanel(panel) = &self.surface {
            panel.set_max_height(&mut self.tree, self.viewport.preferred_height(viewport_width));
        }
    }

    /// Apply size constraints to the viewer node; `None` entries clear the
    /// corresponding constraint.
    pub fn set_model_max_size(&mut self, size: SizeConstraints) {
        let node = self.tree.node_mut(self.viewer_node);
        for (key, value) in [
            ("max-width", size.max_width),
            ("max-height", size.max_height),
            ("min-height", size.min_height),
        ] {
            match value {
                Some(px) => {
                    node.attributes.insert(key.to_string(), format!("{px}px"));
                }
                None => {
                    node.attributes.remove(key);
                }
            }
        }
    }

    /// React to the host entering or leaving fullscreen: swap the button's
    /// accessible name and clamp the model size to the window while
    /// fullscreen is active.
    pub fn handle_fullscreen_changed(&mut self, active: bool, window: (f64, f64)) {
        let key = if active { "a11y.buttonFullscreenExit" } else { "a11y.buttonFullscreenEnter" };
        let label = self.dictionary.get(key).to_string();
        if let Some(buttons) = &self.buttons {
            buttons.set_button_aria_label(&mut self.tree, ButtonId::Fullscreen, &label);
        }

        if active {
            let clamp = |configured: Option<f64>, window_px: f64| {
                Some(configured.map_or(window_px, |c| c.min(window_px)))
            };
            self.set_model_max_size(SizeConstraints {
                max_width: clamp(self.size.max_width, window.0),
                max_height: clamp(self.size.max_height, window.1),
                min_height: self.size.min_height,
            });
        } else {
            self.set_model_max_size(self.size);
        }
    }

    fn notify_dismissed(&mut self, active: Option<usize>) {
        if let Some(index) = active {
            self.events.on_surface_dismissed(index);
        }
    }
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("hotspots", &self.registry.len())
            .field("surface_open", &self.surface.is_open())
            .field("viewport", &self.viewport)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{validate, Bootstrap, Params};
    use crate::viewer::Dimensions;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct StubViewer {
        animations: Vec<String>,
    }

    impl ModelViewer for StubViewer {
        fn set_source(&mut self, _src: &str) {}
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn set_current_time(&mut self, _seconds: f64) {}
        fn get_dimensions(&self) -> Option<Dimensions> {
            Some(Dimensions { x: 2.0, y: 1.0, z: 1.0 })
        }
        fn zoom(&mut self, _step: i32) {}
        fn available_animations(&self) -> Vec<String> {
            self.animations.clone()
        }
    }

    #[derive(Default, Clone)]
    struct RecordingEvents(Rc<RefCell<Vec<String>>>);

    impl ExplorerEvents for RecordingEvents {
        fn on_resize(&mut self) {
            self.0.borrow_mut().push("resize".to_string());
        }
        fn on_fullscreen_clicked(&mut self) {
            self.0.borrow_mut().push("fullscreen".to_string());
        }
        fn on_play_state_changed(&mut self, is_playing: bool) {
            self.0.borrow_mut().push(format!("play {is_playing}"));
        }
        fn on_surface_dismissed(&mut self, hotspot_index: usize) {
            self.0.borrow_mut().push(format!("dismissed {hotspot_index}"));
        }
    }

    fn params(presentation: &str) -> Params {
        Params::from_json(&format!(
            r#"{{
                "model": {{ "src": "engine.glb", "alt": "Engine model" }},
                "behaviour": {{ "presentation": "{presentation}" }},
                "hotspots": [
                    {{ "surface": "0.1 0.2 0.3", "label": "Engine",
                       "contents": [{{ "type": "text", "body": "The engine." }}] }},
                    {{ "surface": "0.4 0.5 0.6", "label": "Wheel",
                       "contents": [{{ "type": "text", "body": "A wheel." }}] }}
                ]
            }}"#
        ))
        .unwrap()
    }

    fn explorer(presentation: &str) -> (Explorer, RecordingEvents) {
        let Bootstrap::Ready(config) = validate(params(presentation)) else {
            panic!("expected ready config");
        };
        let events = RecordingEvents::default();
        let explorer = Explorer::new(
            *config,
            Box::<StubViewer>::default(),
            true,
            Box::new(events.clone()),
        );
        (explorer, events)
    }

    #[test]
    fn marker_click_shows_bundle_with_header() {
        let (mut explorer, _events) = explorer("sidePanel");
        assert_eq!(explorer.registry().len(), 2);

        let wheel_marker = explorer.registry().markers()[1];
        explorer.handle_click(wheel_marker);

        assert!(explorer.surface().is_open());
        assert_eq!(explorer.surface().active_hotspot(), Some(1));
        let DisclosureSurface::SidePanel(panel) = explorer.surface() else {
            panic!("expected side panel");
        };
        assert_eq!(explorer.scene().node(panel.header()).text, "Wheel");
        let content = explorer.scene().children(panel.content_region())[0];
        let text = explorer.scene().children(content)[0];
        assert_eq!(explorer.scene().node(text).text, "A wheel.");
    }

    #[test]
    fn escape_on_overlay_notifies_dismissal_once() {
        let (mut explorer, events) = explorer("overlay");
        let marker = explorer.registry().markers()[0];
        explorer.handle_click(marker);
        explorer.on_animation_frame();

        assert!(explorer.handle_key_down(SurfaceKey::Escape));
        assert!(!explorer.handle_key_down(SurfaceKey::Escape));
        let dismissals = events
            .0
            .borrow()
            .iter()
            .filter(|e| e.as_str() == "dismissed 0")
            .count();
        assert_eq!(dismissals, 1);
    }

    #[test]
    fn switching_hotspots_keeps_overlay_open() {
        let (mut explorer, _events) = explorer("overlay");
        let markers = explorer.registry().markers().to_vec();
        explorer.handle_click(markers[0]);
        explorer.on_animation_frame();

        explorer.handle_click(markers[1]);
        assert!(explorer.surface().is_open());
        assert_eq!(explorer.surface().active_hotspot(), Some(1));
    }

    #[test]
    fn load_builds_buttons_and_play_state_tracks_aria() {
        let Bootstrap::Ready(config) = validate(params("sidePanel")) else {
            panic!("expected ready config");
        };
        let events = RecordingEvents::default();
        let viewer = StubViewer { animations: vec!["spin".to_string()] };
        let mut explorer = Explorer::new(*config, Box::new(viewer), true, Box::new(events.clone()));

        explorer.handle_viewer_event(ViewerEvent::Loaded);
        let buttons_play = explorer.buttons().unwrap().button(ButtonId::Play).unwrap();

        explorer.handle_viewer_event(ViewerEvent::Play);
        assert_eq!(
            explorer.scene().node(buttons_play).aria_label.as_deref(),
            Some("Pause animation")
        );
        assert!(events.0.borrow().contains(&"play true".to_string()));

        explorer.handle_viewer_event(ViewerEvent::Pause);
        assert_eq!(
            explorer.scene().node(buttons_play).aria_label.as_deref(),
            Some("Play animation")
        );
    }

    #[test]
    fn fullscreen_clamps_and_restores_model_size() {
        let (mut explorer, _events) = explorer("sidePanel");
        explorer.handle_viewer_event(ViewerEvent::Loaded);

        explorer.handle_fullscreen_changed(true, (1280.0, 720.0));
        let attrs = &explorer.scene().node(explorer.viewer_node()).attributes;
        assert_eq!(attrs.get("max-width").map(String::as_str), Some("1280px"));
        assert_eq!(attrs.get("max-height").map(String::as_str), Some("720px"));

        explorer.handle_fullscreen_changed(false, (1280.0, 720.0));
        let attrs = &explorer.scene().node(explorer.viewer_node()).attributes;
        assert!(!attrs.contains_key("max-width"));
    }

    #[test]
    fn resize_caps_side_panel_height() {
        let (mut explorer, _events) = explorer("sidePanel");
        explorer.handle_viewer_event(ViewerEvent::Loaded);
        explorer.resize(800.0);

        let DisclosureSurface::SidePanel(panel) = explorer.surface() else {
            panic!("expected side panel");
        };
        assert_eq!(
            explorer.scene().node(panel.root()).attributes.get("--max-height-secondary"),
            Some(&"400px".to_string())
        );
    }
}
