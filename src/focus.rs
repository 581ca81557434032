//! Keyboard focus containment for modal surfaces.
//!
//! While a [`FocusTrap`] is active, Tab and Shift+Tab cycle through the
//! focusable descendants of the trap's container and never leave it. On
//! activation the previously focused node is recorded; deactivation hands
//! it back so the caller can restore focus — unless that node has since
//! been detached, in which case the caller gets `None` and must not try.
//!
//! Follows the W3C modal-dialog pattern: a container with no focusable
//! descendants gets a designated fallback element made transiently
//! focusable via a negative tab stop that the scene tree removes on the
//! element's first blur.

use crate::scene::{NodeId, SceneTree};

/// Focus containment state for one modal surface. Created alongside the
/// surface and activated/deactivated in lockstep with it.
#[derive(Debug)]
pub struct FocusTrap {
    /// Root of the contained region.
    container: NodeId,
    /// The element that closes the surface; guaranteed focusable, used as
    /// the containment anchor of last resort.
    dismiss_trigger: NodeId,
    /// Where to look for a text element to focus when the container has no
    /// focusable descendants.
    fallback_container: NodeId,
    previously_focused: Option<NodeId>,
    active: bool,
}

impl FocusTrap {
    pub fn new(container: NodeId, dismiss_trigger: NodeId, fallback_container: NodeId) -> Self {
        Self {
            container,
            dismiss_trigger,
            fallback_container,
            previously_focused: None,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Engage containment: record the currently focused node and move focus
    /// into the container.
    pub fn activate(&mut self, tree: &mut SceneTree) {
        self.previously_focused = tree.focused();
        self.active = true;

        let focusables = tree.focusable_descendants(self.container);
        if let Some(first) = focusables.first() {
            tree.focus(*first);
            return;
        }

        // No interactive descendants: fall back to the first text-bearing
        // element, or the fallback container itself, made transiently
        // focusable.
        let target = tree
            .first_element_with_text(self.fallback_container)
            .unwrap_or(self.fallback_container);
        tree.focus_transiently(target);
    }

    /// Release containment. Returns the node that held focus before
    /// activation, or `None` if there was none or it has been detached.
    pub fn deactivate(&mut self, tree: &SceneTree) -> Option<NodeId> {
        self.active = false;
        self.previously_focused
            .take()
            .filter(|id| tree.is_attached(*id))
    }

    /// Redirect a Tab / Shift+Tab so focus stays inside the container.
    /// Returns true when the trap consumed the key.
    pub fn handle_tab(&self, tree: &mut SceneTree, shift: bool) -> bool {
        if !self.active {
            return false;
        }

        let focusables = tree.focusable_descendants(self.container);
        if focusables.is_empty() {
            // Nothing to cycle through; keep focus pinned on the trigger.
            tree.focus(self.dismiss_trigger);
            return true;
        }

        let position = tree.focused().and_then(|focused| {
            focusables.iter().position(|id| *id == focused)
        });

        let next = match position {
            // Focus is outside the ring (e.g. on a transient fallback):
            // enter at the boundary matching the tab direction.
            None => {
                if shift {
                    focusables.len() - 1
                } else {
                    0
                }
            }
            Some(at) if shift => {
                if at == 0 {
                    focusables.len() - 1
                } else {
                    at - 1
                }
            }
            Some(at) => (at + 1) % focusables.len(),
        };

        tree.focus(focusables[next]);
        true
    }
}
