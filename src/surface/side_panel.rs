//! Inline side panel: the non-modal disclosure surface.
//!
//! The panel is always present next to the viewport; activation only swaps
//! its header and content region. No focus trap is engaged — background
//! content stays reachable — but focus still moves into the new content so
//! keyboard users land on what they just revealed.

use crate::scene::{NodeId, NodeKind, SceneTree};

/// Panel state. The panel itself never hides, so there are no opening or
/// closing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelState {
    Idle,
    ShowingContent,
}

#[derive(Debug)]
pub struct SidePanelSurface {
    root: NodeId,
    header: NodeId,
    content_region: NodeId,
    placeholder: NodeId,
    state: PanelState,
    active_hotspot: Option<usize>,
}

impl SidePanelSurface {
    /// Build the panel under `parent` with a placeholder prompt shown
    /// until the first activation.
    pub fn new(tree: &mut SceneTree, parent: NodeId, placeholder_text: &str) -> Self {
        let root = tree.create(NodeKind::Container);
        tree.node_mut(root).classes.push("sidepanel".to_string());
        tree.append_child(parent, root);

        let header = tree.create(NodeKind::Heading);
        {
            let node = tree.node_mut(header);
            node.classes.push("sidepanel-header".to_string());
            node.display_none = true;
        }
        tree.append_child(root, header);

        let content_region = tree.create(NodeKind::Container);
        tree.node_mut(content_region)
            .classes
            .push("sidepanel-content".to_string());
        tree.append_child(root, content_region);

        let placeholder = tree.create(NodeKind::Paragraph);
        {
            let node = tree.node_mut(placeholder);
            node.classes.push("sidepanel-placeholder".to_string());
            node.text = placeholder_text.to_string();
        }
        tree.append_child(content_region, placeholder);

        Self {
            root,
            header,
            content_region,
            placeholder,
            state: PanelState::Idle,
            active_hotspot: None,
        }
    }

    /// Swap header and content atomically, then move focus into the new
    /// content: first focusable descendant, else the first text-bearing
    /// element inside the content wrapper made transiently focusable, else
    /// no focus change at all.
    pub fn activate(&mut self, tree: &mut SceneTree, index: usize, label: &str, content: NodeId) {
        self.set_header(tree, label);
        tree.replace_children(self.content_region, content);
        self.state = PanelState::ShowingContent;
        self.active_hotspot = Some(index);

        self.focus_content(tree, content);
    }

    /// Reset the panel to its idle placeholder. Returns true when content
    /// was actually showing.
    pub fn dismiss(&mut self, tree: &mut SceneTree) -> bool {
        if self.state == PanelState::Idle {
            return false;
        }
        self.set_header(tree, "");
        tree.replace_children(self.content_region, self.placeholder);
        self.state = PanelState::Idle;
        self.active_hotspot = None;
        true
    }

    pub fn is_open(&self) -> bool {
        self.state == PanelState::ShowingContent
    }

    pub fn active_hotspot(&self) -> Option<usize> {
        self.active_hotspot
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn header(&self) -> NodeId {
        self.header
    }

    pub fn content_region(&self) -> NodeId {
        self.content_region
    }

    /// Cap the panel height at the viewport's preferred height, or lift
    /// the cap when `None`.
    pub fn set_max_height(&self, tree: &mut SceneTree, max_height: Option<f64>) {
        let node = tree.node_mut(self.root);
        match max_height {
            Some(px) => {
                node.attributes
                    .insert("--max-height-secondary".to_string(), format!("{px}px"));
            }
            None => {
                node.attributes.remove("--max-height-secondary");
            }
        }
    }

    /// An all-whitespace header hides the header block entirely.
    fn set_header(&self, tree: &mut SceneTree, label: &str) {
        let trimmed = label.trim();
        let node = tree.node_mut(self.header);
        node.display_none = trimmed.is_empty();
        node.text = trimmed.to_string();
    }

    fn focus_content(&self, tree: &mut SceneTree, content: NodeId) {
        let focusables = tree.focusable_descendants(self.content_region);
        if let Some(first) = focusables.first() {
            tree.focus(*first);
            return;
        }

        // Pattern borrowed from modal dialogs: focus a static element via
        // a transient negative tab stop. If the content has no text-bearing
        // element either, activation does not move focus.
        if let Some(texty) = tree.first_element_with_text(content) {
            tree.focus_transiently(texty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> (SceneTree, SidePanelSurface) {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let panel = SidePanelSurface::new(&mut tree, root, "Click on a hotspot to see details.");
        (tree, panel)
    }

    fn content_with(tree: &mut SceneTree, children: &[NodeKind]) -> NodeId {
        let wrapper = tree.create(NodeKind::Landmark);
        for kind in children {
            let child = tree.create(*kind);
            tree.append_child(wrapper, child);
        }
        wrapper
    }

    #[test]
    fn starts_idle_with_placeholder() {
        let (tree, panel) = panel();
        assert!(!panel.is_open());
        assert_eq!(panel.active_hotspot(), None);
        assert!(tree.node(panel.header).display_none);
        assert_eq!(tree.children(panel.content_region()), &[panel.placeholder]);
    }

    #[test]
    fn activate_swaps_header_and_content() {
        let (mut tree, mut panel) = panel();
        let content = content_with(&mut tree, &[NodeKind::Paragraph]);

        panel.activate(&mut tree, 1, "Wheel", content);
        assert!(panel.is_open());
        assert_eq!(panel.active_hotspot(), Some(1));
        assert_eq!(tree.node(panel.header).text, "Wheel");
        assert!(!tree.node(panel.header).display_none);
        assert_eq!(tree.children(panel.content_region()), &[content]);
        assert!(!tree.is_attached(panel.placeholder));
    }

    #[test]
    fn whitespace_header_is_hidden() {
        let (mut tree, mut panel) = panel();
        let content = content_with(&mut tree, &[]);
        panel.activate(&mut tree, 0, "   ", content);
        assert!(tree.node(panel.header).display_none);
        assert_eq!(tree.node(panel.header).text, "");
    }

    #[test]
    fn focus_moves_to_first_focusable() {
        let (mut tree, mut panel) = panel();
        let content = content_with(&mut tree, &[NodeKind::Paragraph, NodeKind::Button]);
        let button = tree.children(content)[1];

        panel.activate(&mut tree, 0, "Engine", content);
        assert_eq!(tree.focused(), Some(button));
    }

    #[test]
    fn focus_falls_back_to_text_element() {
        let (mut tree, mut panel) = panel();
        let content = content_with(&mut tree, &[NodeKind::Paragraph]);
        let paragraph = tree.children(content)[0];
        tree.node_mut(paragraph).text = "Engine details".to_string();

        panel.activate(&mut tree, 0, "Engine", content);
        assert_eq!(tree.focused(), Some(paragraph));
        assert_eq!(tree.node(paragraph).tab_index, Some(-1));
    }

    #[test]
    fn no_focus_change_without_focusable_or_text() {
        let (mut tree, mut panel) = panel();
        let before = tree.create(NodeKind::Button);
        tree.append_child(tree.root(), before);
        tree.focus(before);

        let content = content_with(&mut tree, &[NodeKind::Image]);
        panel.activate(&mut tree, 0, "Engine", content);
        // Content is shown, but focus stays put.
        assert!(panel.is_open());
        assert_eq!(tree.focused(), Some(before));
    }

    #[test]
    fn dismiss_restores_placeholder() {
        let (mut tree, mut panel) = panel();
        let content = content_with(&mut tree, &[NodeKind::Paragraph]);
        panel.activate(&mut tree, 0, "Engine", content);

        assert!(panel.dismiss(&mut tree));
        assert!(!panel.is_open());
        assert_eq!(panel.active_hotspot(), None);
        assert_eq!(tree.children(panel.content_region()), &[panel.placeholder]);
        // Dismissing an idle panel reports nothing to notify.
        assert!(!panel.dismiss(&mut tree));
    }
}
