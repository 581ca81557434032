//! Per-hotspot content bundles.
//!
//! Each hotspot owns an ordered sequence of content descriptors. A bundle
//! is realized into a scene subtree on first access and the resulting
//! handle is cached for the session; re-activating a hotspot re-attaches
//! the same subtree instead of rebuilding it. There is no eviction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scene::{NodeId, NodeKind, SceneTree};

/// One renderable content item. The subsystem does not render these
/// itself; it realizes them into typed scene nodes and leaves presentation
/// to the host shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentDescriptor {
    Text { body: String },
    Image { uri: String, alt: String },
    Video { uri: String },
    Exercise { title: String },
}

impl ContentDescriptor {
    /// Resolve a raw content item into a descriptor. Items whose type
    /// reference is missing or unknown resolve to `None` and are filtered
    /// out during configuration.
    pub fn resolve(raw: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(raw.clone()).ok()
    }
}

/// The content owned by one hotspot, keyed by its dense index.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub hotspot_index: usize,
    pub contents: Vec<ContentDescriptor>,
}

/// Maps hotspot indices to realized content handles.
#[derive(Debug, Default)]
pub struct ContentStore {
    bundles: Vec<ContentBundle>,
    realized: HashMap<usize, NodeId>,
    realizations: usize,
}

impl ContentStore {
    pub fn new(bundles: Vec<ContentBundle>) -> Self {
        Self {
            bundles,
            realized: HashMap::new(),
            realizations: 0,
        }
    }

    /// Realized handle for `index`, building and caching it on first call.
    ///
    /// An index with no registered bundle should not occur (registry and
    /// store draw from the same dense index space) but returns `None`
    /// rather than failing.
    pub fn get(&mut self, tree: &mut SceneTree, index: usize) -> Option<NodeId> {
        if let Some(handle) = self.realized.get(&index) {
            log::debug!("content cache HIT: hotspot {index}");
            return Some(*handle);
        }

        let bundle = self
            .bundles
            .iter()
            .find(|bundle| bundle.hotspot_index == index)?;
        log::debug!("content cache MISS: hotspot {index}");

        let handle = realize(tree, bundle);
        self.realized.insert(index, handle);
        self.realizations += 1;
        Some(handle)
    }

    /// How many bundles have been realized so far.
    pub fn realization_count(&self) -> usize {
        self.realizations
    }
}

/// Bind a bundle's descriptors into a presentable subtree. The wrapper is
/// the designated focus-fallback landmark for the disclosure surfaces.
fn realize(tree: &mut SceneTree, bundle: &ContentBundle) -> NodeId {
    let wrapper = tree.create(NodeKind::Landmark);
    tree.node_mut(wrapper)
        .classes
        .push("content-wrapper".to_string());

    for descriptor in &bundle.contents {
        let child = match descriptor {
            ContentDescriptor::Text { body } => {
                let node = tree.create(NodeKind::Paragraph);
                tree.node_mut(node).text = body.clone();
                node
            }
            ContentDescriptor::Image { uri, alt } => {
                let node = tree.create(NodeKind::Image);
                let n = tree.node_mut(node);
                n.aria_label = Some(alt.clone());
                n.attributes.insert("src".to_string(), uri.clone());
                node
            }
            ContentDescriptor::Video { uri } => {
                let node = tree.create(NodeKind::Video);
                tree.node_mut(node)
                    .attributes
                    .insert("src".to_string(), uri.clone());
                node
            }
            ContentDescriptor::Exercise { title } => {
                let node = tree.create(NodeKind::Button);
                tree.node_mut(node).text = title.clone();
                node
            }
        };
        tree.append_child(wrapper, child);
    }

    wrapper
}
