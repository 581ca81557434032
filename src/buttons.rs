//! Play / fullscreen button strip overlaid on the model viewport.
//!
//! Built only after the model has loaded, and only with the buttons that
//! apply: the play button requires the model to ship at least one
//! animation, the fullscreen button requires the host to allow fullscreen.

use crate::i18n::Dictionary;
use crate::scene::{NodeId, NodeKind, SceneTree};

/// The buttons the strip can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Play,
    Fullscreen,
}

/// Which buttons to build.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayButtonParams {
    pub is_playing_enabled: bool,
    pub is_fullscreen_allowed: bool,
}

/// The overlay button strip. `None` from [`OverlayButtons::build`] means
/// no button applied and nothing was added to the tree.
#[derive(Debug)]
pub struct OverlayButtons {
    root: NodeId,
    play: Option<NodeId>,
    fullscreen: Option<NodeId>,
}

impl OverlayButtons {
    pub fn build(
        tree: &mut SceneTree,
        parent: NodeId,
        params: OverlayButtonParams,
        dictionary: &Dictionary,
    ) -> Option<Self> {
        if !params.is_playing_enabled && !params.is_fullscreen_allowed {
            return None;
        }

        let root = tree.create(NodeKind::Container);
        tree.node_mut(root).classes.push("overlay-buttons".to_string());
        tree.append_child(parent, root);

        let mut buttons = Self { root, play: None, fullscreen: None };

        if params.is_playing_enabled {
            buttons.play = Some(add_button(
                tree,
                root,
                "button-play",
                dictionary.get("a11y.buttonPlay"),
            ));
        }
        if params.is_fullscreen_allowed {
            buttons.fullscreen = Some(add_button(
                tree,
                root,
                "button-fullscreen",
                dictionary.get("a11y.buttonFullscreenEnter"),
            ));
        }

        Some(buttons)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node of a button, if it was built.
    pub fn button(&self, id: ButtonId) -> Option<NodeId> {
        match id {
            ButtonId::Play => self.play,
            ButtonId::Fullscreen => self.fullscreen,
        }
    }

    /// Toggle a class on a button. Missing buttons are a no-op.
    pub fn toggle_button_class(
        &self,
        tree: &mut SceneTree,
        id: ButtonId,
        class: &str,
        state: bool,
    ) {
        let Some(node) = self.button(id) else { return };
        let classes = &mut tree.node_mut(node).classes;
        if state {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        } else {
            classes.retain(|c| c != class);
        }
    }

    /// Replace a button's accessible name. Missing buttons are a no-op.
    pub fn set_button_aria_label(&self, tree: &mut SceneTree, id: ButtonId, label: &str) {
        let Some(node) = self.button(id) else { return };
        tree.node_mut(node).aria_label = Some(label.to_string());
    }
}

fn add_button(tree: &mut SceneTree, parent: NodeId, class: &str, aria_label: &str) -> NodeId {
    let button = tree.create(NodeKind::Button);
    {
        let node = tree.node_mut(button);
        node.classes.push("overlay-button".to_string());
        node.classes.push(class.to_string());
        node.aria_label = Some(aria_label.to_string());
    }
    tree.append_child(parent, button);
    button
}
