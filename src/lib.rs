//! Hierarchical tri-state selection over field trees.
//!
//! The core is [`domain::TreeSelectionEngine`]: pure transitions from a
//! read-only [`domain::TreeModel`] and a [`domain::SelectionSet`] to a new
//! selection, with checked/indeterminate/unchecked derivation and group
//! reconciliation. The application layer wraps it in a session with
//! persistence, terminal rendering and CSV template export.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
