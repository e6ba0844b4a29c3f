//! Selection and expansion sets.
//!
//! Both are plain value types: every operation that changes membership
//! returns a new set and leaves the receiver untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Set of selected node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<String>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// True if every id in `ids` is selected (vacuously true for no ids).
    pub fn contains_all(&self, ids: &[String]) -> bool {
        ids.iter().all(|id| self.0.contains(id))
    }

    pub fn contains_any(&self, ids: &[String]) -> bool {
        ids.iter().any(|id| self.0.contains(id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// New set with `ids` added.
    pub fn with_all(&self, ids: &[String]) -> Self {
        let mut next = self.0.clone();
        next.extend(ids.iter().cloned());
        Self(next)
    }

    /// New set with `ids` removed.
    pub fn without_all(&self, ids: &[String]) -> Self {
        let mut next = self.0.clone();
        for id in ids {
            next.remove(id);
        }
        Self(next)
    }

    /// New set keeping only ids accepted by `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self(self.0.iter().filter(|id| keep(id)).cloned().collect())
    }

    pub(crate) fn insert(&mut self, id: &str) -> bool {
        self.0.insert(id.to_string())
    }

    pub(crate) fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Set of node ids whose children are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionSet(BTreeSet<String>);

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// New set with the membership of `id` flipped. Never cascades.
    pub fn toggled(&self, id: &str) -> Self {
        let mut next = self.0.clone();
        if !next.remove(id) {
            next.insert(id.to_string());
        }
        Self(next)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self(self.0.iter().filter(|id| keep(id)).cloned().collect())
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_selection_when_adding_ids_then_original_is_unchanged() {
        let original: SelectionSet = ["a"].into_iter().collect();
        let next = original.with_all(&ids(&["b", "c"]));

        assert_eq!(original.len(), 1);
        assert_eq!(next.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn given_selection_when_removing_ids_then_missing_ids_are_ignored() {
        let original: SelectionSet = ["a", "b"].into_iter().collect();
        let next = original.without_all(&ids(&["b", "zz"]));
        assert_eq!(next.iter().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn given_no_ids_when_checking_contains_all_then_true() {
        assert!(SelectionSet::new().contains_all(&[]));
        assert!(!SelectionSet::new().contains_any(&[]));
    }

    #[test]
    fn given_expansion_when_toggled_twice_then_restored() {
        let exp = ExpansionSet::new();
        let once = exp.toggled("g");
        assert!(once.is_expanded("g"));
        assert!(!exp.is_expanded("g"));
        assert_eq!(once.toggled("g"), exp);
    }
}
