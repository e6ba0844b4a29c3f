//! Field selection session
//!
//! Models the lifecycle of a selection surface (e.g. a field picker modal):
//! the selection starts empty on open, every change goes through the engine,
//! and everything is discarded on close.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    CheckState, ExpansionSet, FieldDetail, SelectionSet, TreeModel, TreeSelectionEngine,
};

/// Persistable part of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub selected: SelectionSet,
    pub expanded: ExpansionSet,
}

/// Counts shown alongside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Selected nodes carrying a payload
    pub selected_fields: usize,
    /// All nodes carrying a payload
    pub total_fields: usize,
    /// Selected ids including groups
    pub selected_ids: usize,
}

/// Selection state bound to one tree model.
#[derive(Debug)]
pub struct SelectionSession {
    model: TreeModel,
    selection: SelectionSet,
    expansion: ExpansionSet,
    open: bool,
}

impl SelectionSession {
    /// New, closed session over `model`.
    pub fn new(model: TreeModel) -> Self {
        Self {
            model,
            selection: SelectionSet::new(),
            expansion: ExpansionSet::new(),
            open: false,
        }
    }

    /// Reopen a session from persisted state.
    ///
    /// Ids no longer present in the model are dropped and group membership
    /// is re-derived, since the tree may have changed since the state was
    /// saved.
    #[instrument(level = "debug", skip_all)]
    pub fn restore(model: TreeModel, state: SessionState) -> Self {
        let unknown: Vec<&str> = state
            .selected
            .iter()
            .chain(state.expanded.iter())
            .filter(|id| !model.contains_id(id))
            .unique()
            .collect();
        if !unknown.is_empty() {
            warn!(
                "dropping {} unknown ids from session state: {}",
                unknown.len(),
                unknown.iter().join(", ")
            );
        }

        let selection = TreeSelectionEngine::new(&model)
            .reconcile(state.selected.filtered(|id| model.contains_id(id)));
        let expansion = state.expanded.filtered(|id| model.contains_id(id));
        Self {
            model,
            selection,
            expansion,
            open: true,
        }
    }

    /// Open the session with an empty selection.
    pub fn open(&mut self) {
        debug!("session open");
        self.selection = SelectionSet::new();
        self.expansion = ExpansionSet::new();
        self.open = true;
    }

    /// Close the session, discarding selection and expansion.
    pub fn close(&mut self) {
        debug!("session close: discarding {} selected ids", self.selection.len());
        self.selection = SelectionSet::new();
        self.expansion = ExpansionSet::new();
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn model(&self) -> &TreeModel {
        &self.model
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    pub fn engine(&self) -> TreeSelectionEngine<'_> {
        TreeSelectionEngine::new(&self.model)
    }

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            selected: self.selection.clone(),
            expanded: self.expansion.clone(),
        }
    }

    fn ensure_open(&self) -> ApplicationResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(ApplicationError::SessionClosed)
        }
    }

    fn resolve(&self, id: &str) -> ApplicationResult<generational_arena::Index> {
        self.model
            .find(id)
            .ok_or_else(|| ApplicationError::UnknownNode(id.to_string()))
    }

    /// Toggle one node and store the resulting selection.
    pub fn toggle(&mut self, id: &str) -> ApplicationResult<&SelectionSet> {
        self.ensure_open()?;
        let idx = self.resolve(id)?;
        self.selection = self.engine().toggle(idx, &self.selection);
        Ok(&self.selection)
    }

    /// Toggle several nodes in order.
    ///
    /// All ids are resolved first; on an unknown id nothing is applied.
    pub fn toggle_many<S: AsRef<str>>(&mut self, ids: &[S]) -> ApplicationResult<&SelectionSet> {
        self.ensure_open()?;
        let indices = ids
            .iter()
            .map(|id| self.resolve(id.as_ref()))
            .collect::<ApplicationResult<Vec<_>>>()?;
        let engine = TreeSelectionEngine::new(&self.model);
        self.selection = indices
            .into_iter()
            .fold(self.selection.clone(), |sel, idx| engine.toggle(idx, &sel));
        Ok(&self.selection)
    }

    pub fn select_all(&mut self) -> ApplicationResult<&SelectionSet> {
        self.ensure_open()?;
        self.selection = self.engine().select_all(&self.selection);
        Ok(&self.selection)
    }

    pub fn toggle_expanded(&mut self, id: &str) -> ApplicationResult<&ExpansionSet> {
        self.ensure_open()?;
        self.resolve(id)?;
        self.expansion = self.engine().toggle_expanded(id, &self.expansion);
        Ok(&self.expansion)
    }

    /// Expand every group node.
    pub fn expand_all(&mut self) -> ApplicationResult<&ExpansionSet> {
        self.ensure_open()?;
        self.expansion = self.model.group_ids().into_iter().collect();
        Ok(&self.expansion)
    }

    pub fn collapse_all(&mut self) -> ApplicationResult<&ExpansionSet> {
        self.ensure_open()?;
        self.expansion = ExpansionSet::new();
        Ok(&self.expansion)
    }

    /// Displayed checkbox state of one node.
    pub fn state(&self, id: &str) -> ApplicationResult<CheckState> {
        let idx = self.resolve(id)?;
        Ok(self.engine().state(idx, &self.selection))
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            selected_fields: self.engine().selected_leaf_details(&self.selection).len(),
            total_fields: self.model.field_count(),
            selected_ids: self.selection.len(),
        }
    }

    /// Materialize the selected fields in tree order.
    #[instrument(level = "debug", skip(self))]
    pub fn confirm(&self) -> ApplicationResult<Vec<FieldDetail>> {
        self.ensure_open()?;
        let fields = self.engine().selected_leaf_details(&self.selection);
        debug!("confirm: {} fields", fields.len());
        Ok(fields)
    }
}
