//! Session persistence between CLI invocations
//!
//! A missing state file means the session is freshly opened; `clear`
//! closes it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::session::SessionState;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Reads and writes [`SessionState`] as TOML.
pub struct SessionStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl SessionStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state, `None` if no session is open.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> ApplicationResult<Option<SessionState>> {
        if !self.fs.exists(&self.path) {
            debug!("no session state");
            return Ok(None);
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read session state", &self.path)?;
        let state: SessionState =
            toml::from_str(&content).map_err(|e| ApplicationError::InvalidState {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        debug!(
            "loaded session: {} selected, {} expanded",
            state.selected.len(),
            state.expanded.len()
        );
        Ok(Some(state))
    }

    #[instrument(level = "debug", skip(self, state), fields(path = %self.path.display()))]
    pub fn save(&self, state: &SessionState) -> ApplicationResult<()> {
        let content = toml::to_string_pretty(state).map_err(|e| ApplicationError::InvalidState {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        self.fs
            .write_atomic(&self.path, &content)
            .with_path_context("write session state", &self.path)
    }

    /// Remove the stored state. Returns whether a session existed.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn clear(&self) -> ApplicationResult<bool> {
        if !self.fs.exists(&self.path) {
            return Ok(false);
        }
        self.fs
            .remove_file(&self.path)
            .with_path_context("remove session state", &self.path)?;
        Ok(true)
    }
}
