/*
Rendering of a selection session as a terminal tree.

Every node is shown with its tri-state checkbox. Groups carry an expansion
arrow; children of collapsed groups are hidden unless `expand_all` is set.
A forest is hung below a synthetic root that shows the selection summary.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::application::services::SelectionSession;
use crate::domain::{TreeModel, TreeSelectionEngine};

/// Display switches for [`TreeRender`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Ignore the expansion set and show every node
    pub expand_all: bool,
    /// Append node ids to labels
    pub show_ids: bool,
}

pub trait TreeRender {
    fn to_tree_string(&self, options: &RenderOptions) -> Tree<String>;
}

impl TreeRender for SelectionSession {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, options: &RenderOptions) -> Tree<String> {
        let summary = self.summary();
        let mut tree = Tree::new(format!(
            "fields ({}/{} selected)",
            summary.selected_fields, summary.total_fields
        ));

        fn build_tree(
            session: &SelectionSession,
            engine: &TreeSelectionEngine<'_>,
            options: &RenderOptions,
            node_idx: Index,
        ) -> Option<Tree<String>> {
            let model: &TreeModel = session.model();
            let node = model.get_node(node_idx)?;
            let state = engine.state(node_idx, session.selection());

            let expanded = options.expand_all || session.expansion().is_expanded(node.id());
            let arrow = match (node.is_leaf(), expanded) {
                (true, _) => "",
                (false, true) => "▾ ",
                (false, false) => "▸ ",
            };
            let mut label = format!("{} {}{}", state.marker(), arrow, node.label());
            if options.show_ids {
                label.push_str(&format!(" <{}>", node.id()));
            }

            let mut subtree = Tree::new(label);
            if expanded {
                for &child_idx in &node.children {
                    if let Some(child_tree) = build_tree(session, engine, options, child_idx) {
                        subtree.push(child_tree);
                    }
                }
            }
            Some(subtree)
        }

        let engine = self.engine();
        for &root in self.model().roots() {
            if let Some(root_tree) = build_tree(self, &engine, options, root) {
                tree.push(root_tree);
            }
        }
        tree
    }
}
