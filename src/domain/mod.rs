//! Domain layer: tree model and selection engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod engine;
pub mod entities;
pub mod error;
pub mod selection;

pub use arena::{TreeModel, TreeNode};
pub use builder::{TreeBuilder, TreeResult};
pub use engine::TreeSelectionEngine;
pub use entities::*;
pub use error::DomainError;
pub use selection::{ExpansionSet, SelectionSet};
