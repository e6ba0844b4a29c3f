//! Tree loading service
//!
//! Reads tree definition files and builds validated models.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{TreeBuilder, TreeModel};
use crate::infrastructure::traits::FileSystem;

/// Service for loading tree definitions from disk.
pub struct TreeService {
    fs: Arc<dyn FileSystem>,
}

impl TreeService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and validate a TOML tree definition.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<TreeModel> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::TreeFileNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read tree file", path)?;
        let model = TreeBuilder::new().build_from_toml(&content)?;
        debug!("loaded {} nodes from {}", model.len(), path.display());
        Ok(model)
    }
}
