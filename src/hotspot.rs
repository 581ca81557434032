//! Hotspot model and marker registry.
//!
//! Hotspots are created once at registry construction, in authoring order,
//! each receiving the dense zero-based index that keys every later lookup
//! (content bundles, the surface's active index). The registry builds one
//! interactive marker node per hotspot and answers "which hotspot does
//! this marker belong to" — it deliberately holds no notion of which
//! hotspot is currently open; that state lives in the disclosure surface.

use serde::{Deserialize, Serialize};

use crate::color::contrast_color_bw;
use crate::scene::{NodeId, NodeKind, SceneTree};

/// Marker appearance variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceKind {
    /// Renders the text label on the marker itself.
    #[default]
    Label,
    /// Renders a symbolic icon; the label becomes the accessible name only.
    #[serde(rename = "icon")]
    IconButton,
}

/// Visual configuration of one marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appearance {
    #[serde(rename = "type", default)]
    pub kind: AppearanceKind,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub color: Option<String>,
}

fn default_icon() -> String {
    "plus".to_string()
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            kind: AppearanceKind::Label,
            icon: default_icon(),
            color: None,
        }
    }
}

/// An indexed, labeled activation point anchored to the model surface.
/// Immutable after registry construction.
#[derive(Debug, Clone)]
pub struct Hotspot {
    /// Position in authoring order; unique and stable for the session.
    pub index: usize,
    /// Identifier of the 3D surface anchor the marker sits on.
    pub surface_anchor: String,
    /// Sanitized plain-text label.
    pub label: String,
    pub appearance: Appearance,
}

/// Builds and owns the marker nodes for all hotspots.
#[derive(Debug)]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
    markers: Vec<NodeId>,
}

impl HotspotRegistry {
    /// Build one marker per hotspot under `viewer_node`, in authoring
    /// order. `default_color` is the theme-level marker background used
    /// when a hotspot has no accent of its own.
    pub fn build(
        tree: &mut SceneTree,
        viewer_node: NodeId,
        hotspots: Vec<Hotspot>,
        default_color: Option<&str>,
    ) -> Self {
        if let Some(default) = default_color {
            apply_marker_colors(tree, viewer_node, default);
        }

        let markers = hotspots
            .iter()
            .map(|hotspot| build_marker(tree, viewer_node, hotspot))
            .collect();

        Self { hotspots, markers }
    }

    /// The hotspot index a marker node dispatches to, if it is one of ours.
    pub fn activation_for(&self, node: NodeId) -> Option<usize> {
        self.markers.iter().position(|marker| *marker == node)
    }

    pub fn hotspot(&self, index: usize) -> Option<&Hotspot> {
        self.hotspots.get(index)
    }

    pub fn markers(&self) -> &[NodeId] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }
}

fn build_marker(tree: &mut SceneTree, viewer_node: NodeId, hotspot: &Hotspot) -> NodeId {
    let marker = tree.create(NodeKind::Button);

    {
        let node = tree.node_mut(marker);
        node.classes.push("hotspot".to_string());
        node.attributes
            .insert("slot".to_string(), format!("hotspot-{}", hotspot.index));
        node.attributes
            .insert("data-surface".to_string(), hotspot.surface_anchor.clone());
        node.aria_label = Some(hotspot.label.clone());

        match hotspot.appearance.kind {
            AppearanceKind::Label => {
                node.text = hotspot.label.clone();
            }
            AppearanceKind::IconButton => {
                node.classes.push("hotspot-button".to_string());
                node.classes.push(hotspot.appearance.icon.clone());
            }
        }
    }

    if let Some(accent) = &hotspot.appearance.color {
        apply_marker_colors(tree, marker, accent);
    }

    tree.append_child(viewer_node, marker);
    marker
}

/// Set the marker background to `accent` and the foreground to its
/// contrast color. An accent outside the recognized color grammars
/// degrades to the theme default: no custom properties are written.
fn apply_marker_colors(tree: &mut SceneTree, node: NodeId, accent: &str) {
    match contrast_color_bw(accent) {
        Ok(foreground) => {
            let n = tree.node_mut(node);
            n.attributes
                .insert("--hotspot-background-color".to_string(), accent.to_string());
            n.attributes
                .insert("--hotspot-color".to_string(), foreground);
        }
        Err(err) => {
            log::warn!("ignoring custom hotspot color: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotspot(index: usize, label: &str) -> Hotspot {
        Hotspot {
            index,
            surface_anchor: format!("0.5 0.5 0.{index}"),
            label: label.to_string(),
            appearance: Appearance::default(),
        }
    }

    #[test]
    fn markers_follow_authoring_order() {
        let mut tree = SceneTree::new();
        let viewer = tree.create(NodeKind::Container);
        tree.append_child(tree.root(), viewer);

        let registry = HotspotRegistry::build(
            &mut tree,
            viewer,
            vec![hotspot(0, "Engine"), hotspot(1, "Wheel")],
            None,
        );

        assert_eq!(registry.len(), 2);
        let markers = registry.markers().to_vec();
        assert_eq!(tree.children(viewer), &markers[..]);
        assert_eq!(registry.activation_for(markers[0]), Some(0));
        assert_eq!(registry.activation_for(markers[1]), Some(1));
        assert_eq!(registry.activation_for(viewer), None);
        assert_eq!(
            tree.node(markers[1]).attributes.get("slot").map(String::as_str),
            Some("hotspot-1")
        );
    }

    #[test]
    fn label_appearance_renders_text() {
        let mut tree = SceneTree::new();
        let viewer = tree.root();
        let registry =
            HotspotRegistry::build(&mut tree, viewer, vec![hotspot(0, "Engine")], None);

        let marker = registry.markers()[0];
        assert_eq!(tree.node(marker).text, "Engine");
        assert_eq!(tree.node(marker).aria_label.as_deref(), Some("Engine"));
    }

    #[test]
    fn icon_appearance_has_accessible_name_but_no_text() {
        let mut tree = SceneTree::new();
        let viewer = tree.root();
        let mut entry = hotspot(0, "Wheel");
        entry.appearance.kind = AppearanceKind::IconButton;
        entry.appearance.icon = "info".to_string();

        let registry = HotspotRegistry::build(&mut tree, viewer, vec![entry], None);
        let node = tree.node(registry.markers()[0]);
        assert!(node.text.is_empty());
        assert_eq!(node.aria_label.as_deref(), Some("Wheel"));
        assert!(node.classes.iter().any(|c| c == "info"));
    }

    #[test]
    fn accent_color_gets_contrast_foreground() {
        let mut tree = SceneTree::new();
        let viewer = tree.root();
        let mut entry = hotspot(0, "Engine");
        entry.appearance.color = Some("#000000".to_string());

        let registry = HotspotRegistry::build(&mut tree, viewer, vec![entry], None);
        let node = tree.node(registry.markers()[0]);
        assert_eq!(
            node.attributes.get("--hotspot-color").map(String::as_str),
            Some("#ffffff")
        );
    }

    #[test]
    fn invalid_accent_degrades_to_theme_default() {
        let mut tree = SceneTree::new();
        let viewer = tree.root();
        let mut entry = hotspot(0, "Engine");
        entry.appearance.color = Some("not-a-color".to_string());

        let registry = HotspotRegistry::build(&mut tree, viewer, vec![entry], None);
        let node = tree.node(registry.markers()[0]);
        assert!(!node.attributes.contains_key("--hotspot-color"));
        assert!(!node.attributes.contains_key("--hotspot-background-color"));
    }
}
