//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{SessionStore, TemplateService, TreeService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub trees: TreeService,
    pub store: SessionStore,
    pub templates: TemplateService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        debug!("service container: state_file={}", settings.state_file.display());

        Self {
            trees: TreeService::new(fs.clone()),
            store: SessionStore::new(fs.clone(), settings.state_file.clone()),
            templates: TemplateService::new(fs.clone()),
            settings,
            fs,
        }
    }

    /// Tree file from settings, required by every session command.
    pub fn tree_file(&self) -> ApplicationResult<PathBuf> {
        self.settings
            .tree_file
            .clone()
            .ok_or(ApplicationError::NoTreeFile)
    }
}
