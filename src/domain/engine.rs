//! Tri-state tree selection engine.
//!
//! Pure transitions from (model, selection, target) to a new selection.
//! Direct membership in the [`SelectionSet`] is authoritative; the
//! "all descendants selected" rule is a display derivation recomputed on
//! every query.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::TreeModel;
use crate::domain::entities::{CheckState, FieldDetail};
use crate::domain::selection::{ExpansionSet, SelectionSet};

/// Selection engine over a borrowed, immutable [`TreeModel`].
///
/// All operations are total. A stale or foreign index behaves like a node
/// with an empty closure: queries report `Unchecked` and toggles are no-ops.
#[derive(Debug, Clone, Copy)]
pub struct TreeSelectionEngine<'a> {
    model: &'a TreeModel,
}

impl<'a> TreeSelectionEngine<'a> {
    pub fn new(model: &'a TreeModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'a TreeModel {
        self.model
    }

    /// Ids of the node and all its descendants.
    pub fn closure(&self, node: Index) -> &'a [String] {
        self.model
            .get_node(node)
            .map(|n| n.closure())
            .unwrap_or(&[])
    }

    /// Every id in the node's subtree is selected.
    fn fully_selected(&self, node: Index, selection: &SelectionSet) -> bool {
        selection.contains_all(self.closure(node))
    }

    /// The node has children and each child's closure is fully selected.
    ///
    /// Always false for leaves.
    pub fn all_descendants_selected(&self, node: Index, selection: &SelectionSet) -> bool {
        match self.model.get_node(node) {
            Some(n) if !n.is_leaf() => n
                .children
                .iter()
                .all(|&child| self.fully_selected(child, selection)),
            _ => false,
        }
    }

    /// At least one strict descendant (group or leaf) is selected.
    pub fn some_descendant_selected(&self, node: Index, selection: &SelectionSet) -> bool {
        let closure = self.closure(node);
        closure.len() > 1 && selection.contains_any(&closure[1..])
    }

    /// Displayed checkbox state of a node.
    pub fn state(&self, node: Index, selection: &SelectionSet) -> CheckState {
        let Some(n) = self.model.get_node(node) else {
            return CheckState::Unchecked;
        };
        if selection.contains(n.id()) || self.all_descendants_selected(node, selection) {
            CheckState::Checked
        } else if self.some_descendant_selected(node, selection) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// Flip the displayed state of `node` and its whole subtree, then
    /// reconcile every group's own membership with its children.
    #[instrument(level = "debug", skip(self, selection), fields(selected = selection.len()))]
    pub fn toggle(&self, node: Index, selection: &SelectionSet) -> SelectionSet {
        let Some(n) = self.model.get_node(node) else {
            debug!("toggle: unknown node index, selection unchanged");
            return selection.clone();
        };
        let closure = n.closure();
        let currently_on =
            selection.contains(n.id()) || self.all_descendants_selected(node, selection);

        let next = if currently_on {
            selection.without_all(closure)
        } else {
            selection.with_all(closure)
        };
        debug!(
            "toggle {}: {} -> {} ({} ids in subtree)",
            n.id(),
            if currently_on { "on" } else { "off" },
            if currently_on { "off" } else { "on" },
            closure.len()
        );

        self.reconcile(next)
    }

    /// Post-order pass over the whole model: a group is selected iff all of
    /// its children are fully selected. Children are settled before their
    /// parent, so one pass is enough.
    ///
    /// Leaf membership is never changed.
    #[instrument(level = "debug", skip_all, fields(selected = selection.len()))]
    pub fn reconcile(&self, mut selection: SelectionSet) -> SelectionSet {
        for (idx, node) in self.model.iter_postorder() {
            if node.is_leaf() {
                continue;
            }
            let all_children = self.all_descendants_selected(idx, &selection);
            let present = selection.contains(node.id());
            if all_children && !present {
                trace!("reconcile: add {}", node.id());
                selection.insert(node.id());
            } else if !all_children && present {
                trace!("reconcile: remove {}", node.id());
                selection.remove(node.id());
            }
        }
        selection
    }

    /// Select every node, or clear the selection if everything already is.
    ///
    /// On an empty model this returns the input unchanged.
    #[instrument(level = "debug", skip(self, selection))]
    pub fn select_all(&self, selection: &SelectionSet) -> SelectionSet {
        let all_ids = self.model.all_ids();
        if all_ids.is_empty() {
            return selection.clone();
        }
        if selection.contains_all(&all_ids) {
            debug!("select_all: everything selected, clearing");
            SelectionSet::new()
        } else {
            debug!("select_all: selecting {} ids", all_ids.len());
            all_ids.into_iter().collect()
        }
    }

    /// Flip the expansion of one node. Independent of selection.
    pub fn toggle_expanded(&self, node_id: &str, expansion: &ExpansionSet) -> ExpansionSet {
        expansion.toggled(node_id)
    }

    /// Selected nodes that carry a payload, in tree (pre-order) order.
    ///
    /// Group nodes are walked through but never emitted.
    #[instrument(level = "debug", skip(self, selection))]
    pub fn selected_leaf_details(&self, selection: &SelectionSet) -> Vec<FieldDetail> {
        self.model
            .iter()
            .filter(|(_, node)| selection.contains(node.id()))
            .filter_map(|(_, node)| {
                node.data.payload.as_ref().map(|payload| FieldDetail {
                    id: node.data.id.clone(),
                    label: node.data.label.clone(),
                    payload: payload.clone(),
                })
            })
            .collect()
    }
}
