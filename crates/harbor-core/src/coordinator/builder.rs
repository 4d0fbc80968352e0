//! Builder for creating and configuring Coordinator instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Coordinator;
use crate::checklist;
use crate::db::Database;
use crate::error::{CoordinatorError, Result};

/// Builder for creating and configuring Coordinator instances.
#[derive(Debug, Clone)]
pub struct CoordinatorBuilder {
    database_path: Option<PathBuf>,
}

impl CoordinatorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/harbor/harbor.db` or `~/.local/share/harbor/harbor.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured coordinator instance.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatorError::FileSystem` if the database path is invalid
    /// Returns `CoordinatorError::Database` if database initialization fails
    /// Returns `CoordinatorError::Configuration` if the checklist definition
    /// does not form a valid chain
    pub async fn build(self) -> Result<Coordinator> {
        // Defensive invariant check: the step table must form a single
        // acyclic chain before anything is allowed to evaluate it.
        checklist::validate_chain()?;

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoordinatorError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), CoordinatorError>(())
        })
        .await
        .map_err(|e| CoordinatorError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Coordinator::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("harbor")
            .place_data_file("harbor.db")
            .map_err(|e| CoordinatorError::XdgDirectory(e.to_string()))
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
