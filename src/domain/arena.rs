use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::NodeData;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Id, label and payload of this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in definition order
    pub children: Vec<Index>,
    /// Ids of this node and all its descendants, pre-order, own id first
    closure: Vec<String>,
}

impl TreeNode {
    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The node's own id followed by every descendant id.
    pub fn closure(&self) -> &[String] {
        &self.closure
    }
}

/// Arena-based, read-only tree model.
///
/// Holds a forest: any number of root nodes, each with an ordered list of
/// children. Ids are indexed for O(1) lookup and every node's closure is
/// computed once when the model is built, since the model never changes
/// afterwards.
#[derive(Debug)]
pub struct TreeModel {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Root nodes in definition order
    roots: Vec<Index>,
    /// Id to arena index
    ids: HashMap<String, Index>,
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeModel {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            ids: HashMap::new(),
        }
    }

    /// Insert a node below `parent` (or as a new root).
    ///
    /// Id uniqueness is checked by `TreeBuilder`, not here.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let id = data.id.clone();
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
            closure: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }
        self.ids.insert(id, node_idx);

        node_idx
    }

    /// Fill in every node's closure, children before parents.
    #[instrument(level = "debug", skip(self))]
    pub(crate) fn compute_closures(&mut self) {
        let order: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        for idx in order {
            let Some(node) = self.arena.get(idx) else {
                continue;
            };
            let mut closure = vec![node.data.id.clone()];
            for &child in &node.children {
                if let Some(child_node) = self.arena.get(child) {
                    closure.extend(child_node.closure.iter().cloned());
                }
            }
            if let Some(node) = self.arena.get_mut(idx) {
                node.closure = closure;
            }
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Look up a node index by id.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, id: &str) -> Option<Index> {
        self.ids.get(id).copied()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&TreeNode> {
        self.find(id).and_then(|idx| self.get_node(idx))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal over all roots.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.roots.clone())
    }

    /// Post-order traversal over all roots: every node after its children.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Every id in the model, pre-order.
    pub fn all_ids(&self) -> Vec<String> {
        self.roots
            .iter()
            .filter_map(|&root| self.get_node(root))
            .flat_map(|node| node.closure().iter().cloned())
            .collect()
    }

    /// Number of nodes carrying a payload.
    pub fn field_count(&self) -> usize {
        self.iter()
            .filter(|(_, node)| node.data.payload.is_some())
            .count()
    }

    /// Ids of nodes that have children, pre-order.
    pub fn group_ids(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| !node.is_leaf())
            .map(|(_, node)| node.data.id.clone())
            .collect()
    }

    /// Length of the longest root-to-leaf path; 0 for an empty model.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.roots.iter().map(|&r| (r, 1)).collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(idx) {
                for &child in &node.children {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }
}

pub struct TreeIterator<'a> {
    model: &'a TreeModel,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(model: &'a TreeModel, mut starts: Vec<Index>) -> Self {
        starts.reverse();
        Self {
            model,
            stack: starts,
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.model.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    model: &'a TreeModel,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(model: &'a TreeModel) -> Self {
        let stack = model.roots.iter().rev().map(|&r| (r, false)).collect();
        Self { model, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.model.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
