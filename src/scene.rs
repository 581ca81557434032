//! Renderable-node tree the interaction subsystem operates on.
//!
//! The subsystem never touches a real DOM. It mutates this arena-backed
//! tree and a host shell renders it however it likes (the demo binary maps
//! it to egui widgets). Each node carries the properties the interaction
//! logic needs: kind, own text, visibility flags, tab stops, disabled
//! state. The tree also owns the single document focus slot, so focus
//! movement and restoration stay observable and testable.

use std::collections::HashMap;

/// Stable handle to a node. Ids are never reused within a session, so a
/// stored id acts as a weak reference: it may refer to a node that has
/// since been detached from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Node classification. Determines native focusability and how a host
/// shell renders the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Generic block container.
    Container,
    /// Static landmark used as a focus fallback target.
    Landmark,
    Heading,
    Paragraph,
    Button,
    Link,
    Input,
    Select,
    TextArea,
    Video,
    Audio,
    Image,
}

impl NodeKind {
    /// Whether this kind is focusable without an explicit tab stop.
    /// Mirrors the selector list used for focusable-element queries:
    /// links, buttons, form controls, video and audio.
    pub fn natively_focusable(self) -> bool {
        matches!(
            self,
            Self::Button | Self::Link | Self::Input | Self::Select
                | Self::TextArea | Self::Video | Self::Audio
        )
    }
}

/// A single renderable node.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Text owned directly by this node (not aggregated from children).
    pub text: String,
    pub aria_label: Option<String>,
    /// Free-form attributes (anchor ids, slot names, CSS custom properties).
    pub attributes: HashMap<String, String>,
    /// Class toggles consumed by the host shell.
    pub classes: Vec<String>,
    pub tab_index: Option<i32>,
    pub disabled: bool,
    /// Layout-hidden (`display: none` analogue). Hides the whole subtree.
    pub display_none: bool,
    /// Paint-hidden (`visibility: hidden` analogue).
    pub visibility_hidden: bool,
    /// A negative tab stop assigned temporarily so a static element can
    /// take programmatic focus; removed on first blur.
    transient_tab_stop: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            text: String::new(),
            aria_label: None,
            attributes: HashMap::new(),
            classes: Vec::new(),
            tab_index: None,
            disabled: false,
            display_none: false,
            visibility_hidden: false,
            transient_tab_stop: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Whether the node has any own text once trimmed.
    pub fn has_own_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Arena of nodes plus the document focus slot.
#[derive(Debug)]
pub struct SceneTree {
    nodes: Vec<Node>,
    root: NodeId,
    focused: Option<NodeId>,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            focused: None,
        };
        tree.root = tree.create(NodeKind::Container);
        tree
    }

    /// Root node; every attached node is reachable from here.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a new detached node. Attach it with [`Self::append_child`].
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    // ─── Structure ───────────────────────────────────────────────────────────

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Unlink `id` from its parent. The subtree below it stays intact but
    /// is no longer attached to the document.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    /// Drop all children of `parent`, then append `child` — the atomic
    /// content swap used by the disclosure surfaces.
    pub fn replace_children(&mut self, parent: NodeId, child: NodeId) {
        let old: Vec<NodeId> = self.nodes[parent.0].children.clone();
        for c in old {
            self.remove(c);
        }
        self.append_child(parent, child);
    }

    /// Whether `id` is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Whether `ancestor` is `id` itself or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    // ─── Visibility & focusability ───────────────────────────────────────────

    /// Visibility check, applied transitively up the ancestor chain: a node
    /// is visible only if neither it nor any ancestor is layout- or
    /// paint-hidden.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            let n = &self.nodes[node.0];
            if n.display_none || n.visibility_hidden {
                return false;
            }
            current = n.parent;
        }
        true
    }

    /// Whether `id` can take keyboard focus: natively focusable by kind or
    /// carrying an explicit zero tab stop, not disabled, not opted out via
    /// a negative tab stop, and visible.
    pub fn is_focusable(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        let reachable = node.kind.natively_focusable() || node.tab_index == Some(0);

        reachable
            && !node.disabled
            && node.tab_index != Some(-1)
            && self.is_visible(id)
    }

    /// All focusable descendants of `container` in document order. The
    /// container itself is not included.
    pub fn focusable_descendants(&self, container: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_focusable(container, &mut found);
        found
    }

    fn collect_focusable(&self, id: NodeId, found: &mut Vec<NodeId>) {
        for child in &self.nodes[id.0].children {
            if self.is_focusable(*child) {
                found.push(*child);
            }
            self.collect_focusable(*child, found);
        }
    }

    /// First node in the subtree rooted at `id` (including `id`) that has
    /// own text, in document order.
    pub fn first_element_with_text(&self, id: NodeId) -> Option<NodeId> {
        if self.nodes[id.0].has_own_text() {
            return Some(id);
        }
        for child in self.children(id) {
            if let Some(found) = self.first_element_with_text(*child) {
                return Some(found);
            }
        }
        None
    }

    // ─── Focus slot ──────────────────────────────────────────────────────────

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move document focus to `id`. Blurring a node that held a transient
    /// tab stop removes the stop; that removal happens exactly once.
    pub fn focus(&mut self, id: NodeId) {
        if self.focused == Some(id) {
            return;
        }
        self.blur();
        self.focused = Some(id);
    }

    /// Clear document focus, running blur handling for the node losing it.
    pub fn blur(&mut self) {
        if let Some(previous) = self.focused.take() {
            let node = &mut self.nodes[previous.0];
            if node.transient_tab_stop {
                node.transient_tab_stop = false;
                node.tab_index = None;
            }
        }
    }

    /// Give `id` a temporary negative tab stop so it can take programmatic
    /// focus, and focus it. The stop is removed on the node's first blur.
    pub fn focus_transiently(&mut self, id: NodeId) {
        {
            let node = &mut self.nodes[id.0];
            node.tab_index = Some(-1);
            node.transient_tab_stop = true;
        }
        self.focus(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(kinds: &[NodeKind]) -> (SceneTree, Vec<NodeId>) {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let ids = kinds
            .iter()
            .map(|kind| {
                let id = tree.create(*kind);
                tree.append_child(root, id);
                id
            })
            .collect();
        (tree, ids)
    }

    #[test]
    fn visibility_is_transitive() {
        let mut tree = SceneTree::new();
        let outer = tree.create(NodeKind::Container);
        let inner = tree.create(NodeKind::Button);
        tree.append_child(tree.root(), outer);
        tree.append_child(outer, inner);

        assert!(tree.is_visible(inner));
        tree.node_mut(outer).display_none = true;
        assert!(!tree.is_visible(inner));
        tree.node_mut(outer).display_none = false;
        tree.node_mut(outer).visibility_hidden = true;
        assert!(!tree.is_visible(inner));
    }

    #[test]
    fn focusable_filtering() {
        let (mut tree, ids) = tree_with(&[
            NodeKind::Button,
            NodeKind::Paragraph,
            NodeKind::Input,
            NodeKind::Link,
        ]);
        tree.node_mut(ids[2]).disabled = true;
        tree.node_mut(ids[3]).tab_index = Some(-1);

        assert_eq!(tree.focusable_descendants(tree.root()), vec![ids[0]]);

        // An explicit zero tab stop makes a static node reachable.
        tree.node_mut(ids[1]).tab_index = Some(0);
        assert_eq!(tree.focusable_descendants(tree.root()), vec![ids[0], ids[1]]);
    }

    #[test]
    fn focusable_descendants_in_document_order() {
        let (tree, ids) =
            tree_with(&[NodeKind::Link, NodeKind::Button, NodeKind::Video]);
        assert_eq!(tree.focusable_descendants(tree.root()), ids);
    }

    #[test]
    fn first_element_with_text_walks_depth_first() {
        let mut tree = SceneTree::new();
        let wrapper = tree.create(NodeKind::Container);
        let empty = tree.create(NodeKind::Paragraph);
        let nested = tree.create(NodeKind::Container);
        let texty = tree.create(NodeKind::Paragraph);
        tree.node_mut(texty).text = "hello".to_string();
        tree.append_child(tree.root(), wrapper);
        tree.append_child(wrapper, empty);
        tree.append_child(wrapper, nested);
        tree.append_child(nested, texty);

        assert_eq!(tree.first_element_with_text(wrapper), Some(texty));
        assert_eq!(tree.first_element_with_text(empty), None);
    }

    #[test]
    fn detach_breaks_attachment_but_keeps_subtree() {
        let mut tree = SceneTree::new();
        let wrapper = tree.create(NodeKind::Container);
        let child = tree.create(NodeKind::Button);
        tree.append_child(tree.root(), wrapper);
        tree.append_child(wrapper, child);

        assert!(tree.is_attached(child));
        tree.remove(wrapper);
        assert!(!tree.is_attached(wrapper));
        assert!(!tree.is_attached(child));
        assert_eq!(tree.children(wrapper), &[child]);
    }

    #[test]
    fn replace_children_swaps_atomically() {
        let mut tree = SceneTree::new();
        let region = tree.create(NodeKind::Container);
        let first = tree.create(NodeKind::Paragraph);
        let second = tree.create(NodeKind::Paragraph);
        tree.append_child(tree.root(), region);
        tree.append_child(region, first);

        tree.replace_children(region, second);
        assert_eq!(tree.children(region), &[second]);
        assert!(!tree.is_attached(first));
    }

    #[test]
    fn transient_tab_stop_removed_once_on_blur() {
        let mut tree = SceneTree::new();
        let landmark = tree.create(NodeKind::Landmark);
        let button = tree.create(NodeKind::Button);
        tree.append_child(tree.root(), landmark);
        tree.append_child(tree.root(), button);

        tree.focus_transiently(landmark);
        assert_eq!(tree.focused(), Some(landmark));
        assert_eq!(tree.node(landmark).tab_index, Some(-1));

        // First blur removes the stop.
        tree.focus(button);
        assert_eq!(tree.node(landmark).tab_index, None);

        // Re-assigning a real stop later is not clobbered by further blurs.
        tree.node_mut(landmark).tab_index = Some(0);
        tree.focus(landmark);
        tree.blur();
        assert_eq!(tree.node(landmark).tab_index, Some(0));
    }
}
