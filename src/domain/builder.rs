//! Tree builder turning caller-supplied definitions into a [`TreeModel`].

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeModel;
use crate::domain::entities::{NodeDef, TreeDefinition};
use crate::domain::error::DomainError;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Constructs arena-backed tree models from node definitions.
///
/// Enforces the id contract the selection engine relies on: ids are
/// non-empty and unique across the whole tree, not just among siblings.
pub struct TreeBuilder {
    seen_ids: HashSet<String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            seen_ids: HashSet::new(),
        }
    }

    /// Build a model from a parsed definition document.
    pub fn build_from_definition(&mut self, definition: &TreeDefinition) -> TreeResult<TreeModel> {
        self.build(&definition.nodes)
    }

    /// Parse TOML and build a model from it.
    pub fn build_from_toml(&mut self, content: &str) -> TreeResult<TreeModel> {
        let definition =
            TreeDefinition::from_toml(content).map_err(|e| DomainError::InvalidDefinition {
                message: e.to_string(),
            })?;
        self.build_from_definition(&definition)
    }

    /// Build a model from root definitions, preserving definition order.
    #[instrument(level = "debug", skip(self, roots), fields(roots = roots.len()))]
    pub fn build(&mut self, roots: &[NodeDef]) -> TreeResult<TreeModel> {
        // Reset state for a fresh build
        self.seen_ids.clear();

        let mut model = TreeModel::new();
        let mut stack: Vec<(&NodeDef, Option<Index>)> =
            roots.iter().rev().map(|def| (def, None)).collect();

        while let Some((def, parent_idx)) = stack.pop() {
            self.validate(def)?;
            let current_idx = model.insert_node(def.to_data(), parent_idx);

            // Reverse push so siblings pop in definition order
            for child in def.children.iter().rev() {
                stack.push((child, Some(current_idx)));
            }
        }

        model.compute_closures();
        debug!(
            "built tree: {} nodes, {} fields, depth {}",
            model.len(),
            model.field_count(),
            model.depth()
        );
        Ok(model)
    }

    fn validate(&mut self, def: &NodeDef) -> TreeResult<()> {
        if def.id.trim().is_empty() {
            return Err(DomainError::InvalidNode {
                id: def.id.clone(),
                message: format!("empty id (label {:?})", def.label),
            });
        }
        if let Some(key) = &def.key {
            if key.trim().is_empty() {
                return Err(DomainError::InvalidNode {
                    id: def.id.clone(),
                    message: "empty field key".to_string(),
                });
            }
        }
        if !self.seen_ids.insert(def.id.clone()) {
            return Err(DomainError::DuplicateId(def.id.clone()));
        }
        Ok(())
    }
}
