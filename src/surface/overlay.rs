//! Modal overlay dialog: the modal disclosure surface.
//!
//! Hidden by default; activation walks `Closed → Opening → Open` and
//! dismissal `Open → Closing → Closed`. The outside-click and key-down
//! listeners and the focus trap are not engaged until one animation frame
//! after opening — the click that opened the dialog is still propagating
//! and must not be misread as an outside click that closes it again.

use crate::focus::FocusTrap;
use crate::i18n::Dictionary;
use crate::scene::{NodeId, NodeKind, SceneTree};
use crate::surface::{SurfaceKey, Visibility};
use crate::text::purify_html;

#[derive(Debug)]
pub struct OverlaySurface {
    root: NodeId,
    /// The interactive wrapper; clicks inside it never dismiss.
    outer_wrapper: NodeId,
    headline_text: NodeId,
    close_button: NodeId,
    content_region: NodeId,
    trap: FocusTrap,
    dictionary: Dictionary,
    visibility: Visibility,
    active_hotspot: Option<usize>,
    /// Whether the document-level listeners are attached.
    listeners_armed: bool,
    /// Arming was scheduled for the next animation frame.
    arm_pending: bool,
}

impl OverlaySurface {
    pub fn new(tree: &mut SceneTree, parent: NodeId, dictionary: Dictionary) -> Self {
        let root = tree.create(NodeKind::Container);
        {
            let node = tree.node_mut(root);
            node.classes.push("overlay-dialog".to_string());
            node.attributes.insert("role".to_string(), "dialog".to_string());
            node.attributes.insert("aria-modal".to_string(), "true".to_string());
            node.display_none = true;
        }
        tree.append_child(parent, root);

        let outer_wrapper = tree.create(NodeKind::Container);
        tree.node_mut(outer_wrapper)
            .classes
            .push("overlay-dialog-outer-wrapper".to_string());
        tree.append_child(root, outer_wrapper);

        let headline = tree.create(NodeKind::Container);
        tree.node_mut(headline)
            .classes
            .push("overlay-dialog-headline".to_string());
        tree.append_child(outer_wrapper, headline);

        let headline_text = tree.create(NodeKind::Heading);
        tree.node_mut(headline_text)
            .classes
            .push("overlay-dialog-headline-text".to_string());
        tree.append_child(headline, headline_text);

        let close_button = tree.create(NodeKind::Button);
        {
            let node = tree.node_mut(close_button);
            node.classes.push("overlay-dialog-button-close".to_string());
            node.aria_label = Some(dictionary.get("a11y.close").to_string());
        }
        tree.append_child(outer_wrapper, close_button);

        let content_region = tree.create(NodeKind::Container);
        tree.node_mut(content_region)
            .classes
            .push("overlay-dialog-content".to_string());
        tree.append_child(outer_wrapper, content_region);

        let trap = FocusTrap::new(root, close_button, content_region);

        Self {
            root,
            outer_wrapper,
            headline_text,
            close_button,
            content_region,
            trap,
            dictionary,
            visibility: Visibility::Closed,
            active_hotspot: None,
            listeners_armed: false,
            arm_pending: false,
        }
    }

    /// Bind title and content and open the dialog. When already open only
    /// title and content are swapped; the trap and listeners stay engaged.
    pub fn activate(&mut self, tree: &mut SceneTree, index: usize, label: &str, content: NodeId) {
        self.set_title(tree, label);
        tree.replace_children(self.content_region, content);
        self.active_hotspot = Some(index);

        if self.visibility == Visibility::Closed {
            self.visibility = Visibility::Opening;
            tree.node_mut(self.root).display_none = false;
            // Listener attachment and focus trapping wait one frame so the
            // opening click cannot dismiss the dialog it just opened.
            self.arm_pending = true;
            log::debug!("overlay opening for hotspot {index}");
        }
    }

    /// Finish deferred opening work. A dismiss that raced ahead of the
    /// frame leaves the surface closed; the deferral then does nothing.
    pub fn on_frame(&mut self, tree: &mut SceneTree) {
        if !self.arm_pending {
            return;
        }
        self.arm_pending = false;

        if self.visibility != Visibility::Opening {
            return;
        }
        self.listeners_armed = true;
        self.trap.activate(tree);
        self.visibility = Visibility::Open;
    }

    /// Close the dialog, release the trap, and restore focus to the node
    /// that held it before activation — unless it has been detached, in
    /// which case focus is left untouched.
    pub fn dismiss(&mut self, tree: &mut SceneTree) -> bool {
        if !matches!(self.visibility, Visibility::Opening | Visibility::Open) {
            return false;
        }
        self.visibility = Visibility::Closing;
        self.listeners_armed = false;
        tree.node_mut(self.root).display_none = true;

        if let Some(previous) = self.trap.deactivate(tree) {
            tree.focus(previous);
        }

        self.active_hotspot = None;
        self.visibility = Visibility::Closed;
        log::debug!("overlay dismissed");
        true
    }

    /// A document click outside the interactive wrapper dismisses the
    /// dialog. Targets already detached from the document (removed by
    /// concurrent content mutation) are ignored rather than treated as
    /// outside.
    pub fn handle_document_click(&mut self, tree: &mut SceneTree, target: NodeId) -> bool {
        if !self.listeners_armed {
            return false;
        }
        if !tree.is_attached(target) || tree.contains(self.outer_wrapper, target) {
            return false;
        }
        self.dismiss(tree)
    }

    /// Escape dismisses (and suppresses the key's default action); Tab and
    /// Shift+Tab cycle inside the focus trap.
    pub fn handle_key_down(&mut self, tree: &mut SceneTree, key: SurfaceKey) -> bool {
        if !self.listeners_armed {
            return false;
        }
        match key {
            SurfaceKey::Escape => self.dismiss(tree),
            SurfaceKey::Tab { shift } => self.trap.handle_tab(tree, shift),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.visibility, Visibility::Opening | Visibility::Open)
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn active_hotspot(&self) -> Option<usize> {
        self.active_hotspot
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn close_button(&self) -> NodeId {
        self.close_button
    }

    /// Sanitize the title, render it, and compose the dialog's accessible
    /// name from the localized popup-label template.
    fn set_title(&self, tree: &mut SceneTree, label: &str) {
        let title = purify_html(label);
        tree.node_mut(self.headline_text).text = title.clone();
        tree.node_mut(self.root).aria_label =
            Some(self.dictionary.get_replaced("a11y.popupLabel", "@label", &title));
    }
}
