//! Scene-tree rendering for `ExplorerApp`.
//!
//! Walks the engine's node tree and paints each node with the nearest
//! egui widget. Clicks are collected during the walk and dispatched to
//! the explorer afterwards, once the tree borrow has been released.

use eframe::egui;

use model_hotspots::scene::{NodeId, NodeKind, SceneTree};

use super::{AppState, ExplorerApp};

impl ExplorerApp {
    pub fn draw_scene(&mut self, ctx: &egui::Context) {
        let AppState::Running(explorer) = &mut self.state else {
            return;
        };

        let mut clicked: Vec<NodeId> = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            let tree = explorer.scene();
            for child in tree.children(tree.root()) {
                draw_node(ui, tree, *child, &mut clicked);
            }
        });

        for target in clicked {
            explorer.handle_click(target);
        }
    }
}

fn draw_node(ui: &mut egui::Ui, tree: &SceneTree, id: NodeId, clicked: &mut Vec<NodeId>) {
    let node = tree.node(id);
    if node.display_none {
        return;
    }
    if node.visibility_hidden {
        // Paint-hidden still reserves space; an empty line is close enough.
        ui.label("");
        return;
    }

    match node.kind {
        NodeKind::Container | NodeKind::Landmark => {
            ui.vertical(|ui| {
                for child in tree.children(id) {
                    draw_node(ui, tree, *child, clicked);
                }
            });
        }
        NodeKind::Heading => {
            ui.heading(&node.text);
        }
        NodeKind::Button => {
            let caption = if node.text.is_empty() {
                node.aria_label.as_deref().unwrap_or("\u{2022}")
            } else {
                node.text.as_str()
            };
            let mut button = egui::Button::new(caption);
            if tree.focused() == Some(id) {
                button = button.stroke(egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE));
            }
            if ui.add_enabled(!node.disabled, button).clicked() {
                clicked.push(id);
            }
        }
        NodeKind::Link => {
            if ui.link(&node.text).clicked() {
                clicked.push(id);
            }
        }
        NodeKind::Image => {
            let alt = node.aria_label.as_deref().unwrap_or("image");
            ui.label(format!("[{alt}]"));
        }
        NodeKind::Video => {
            ui.label(format!("[video: {}]", node.text));
        }
        NodeKind::Audio => {
            ui.label(format!("[audio: {}]", node.text));
        }
        NodeKind::Paragraph | NodeKind::Input | NodeKind::Select | NodeKind::TextArea => {
            ui.label(&node.text);
        }
    }
}
