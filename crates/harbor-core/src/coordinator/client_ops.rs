//! Low-level client plan operations for the Coordinator.
//!
//! Each operation opens the database on the tokio blocking pool, exactly
//! like the store-facing layer of any other surface. Load-modify-save
//! cycles run inside a single blocking task so one UI intent maps to one
//! store round trip.

use tokio::task;

use super::Coordinator;
use crate::db::Database;
use crate::error::{CoordinatorError, Result};
use crate::models::{ClientPlan, PlanStatus};
use crate::params::{CreateClient, Id, ListClients};

impl Coordinator {
    /// Admits a new client, creating an empty discharge plan.
    pub async fn create_client(&self, params: &CreateClient) -> Result<ClientPlan> {
        let (admission_date, estimated_discharge_date) = params.validate()?;
        let db_path = self.db_path.clone();
        let name = params.name.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_client(&name, admission_date, estimated_discharge_date)
        })
        .await
        .map_err(|e| CoordinatorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a single client plan by its ID.
    pub async fn get_client(&self, params: &Id) -> Result<Option<ClientPlan>> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_client(id)
        })
        .await
        .map_err(|e| CoordinatorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists client plans, active by default.
    pub async fn list_clients(&self, params: &ListClients) -> Result<Vec<ClientPlan>> {
        let db_path = self.db_path.clone();
        let status = if params.discharged {
            PlanStatus::Discharged
        } else {
            PlanStatus::Active
        };

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_clients(status)
        })
        .await
        .map_err(|e| CoordinatorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Marks a client discharged. Returns None if the client doesn't exist.
    pub async fn discharge_client(&self, params: &Id) -> Result<Option<ClientPlan>> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.discharge_client(id)
        })
        .await
        .map_err(|e| CoordinatorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Restores a discharged client to active. Returns None if the client
    /// doesn't exist.
    pub async fn reopen_client(&self, params: &Id) -> Result<Option<ClientPlan>> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.reopen_client(id)
        })
        .await
        .map_err(|e| CoordinatorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Runs a load-modify-save cycle against one client plan.
    ///
    /// Loads the plan (failing with
    /// [`CoordinatorError::ClientNotFound`] if absent), applies `mutate`,
    /// and saves the resulting document under the revision guard. The whole
    /// cycle runs in one blocking task.
    pub(crate) async fn update_client<F>(&self, id: u64, mutate: F) -> Result<ClientPlan>
    where
        F: FnOnce(ClientPlan) -> Result<ClientPlan> + Send + 'static,
    {
        self.update_client_with(id, |plan| mutate(plan).map(|updated| (updated, ())))
            .await
            .map(|(plan, ())| plan)
    }

    /// Like [`Self::update_client`], but the mutation closure also returns a
    /// value that is handed back alongside the saved plan (e.g. how many
    /// shortlist entries an add actually appended).
    pub(crate) async fn update_client_with<T, F>(&self, id: u64, mutate: F) -> Result<(ClientPlan, T)>
    where
        T: Send + 'static,
        F: FnOnce(ClientPlan) -> Result<(ClientPlan, T)> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let plan = db
                .get_client(id)?
                .ok_or(CoordinatorError::ClientNotFound { id })?;
            let (updated, value) = mutate(plan)?;
            let saved = db.save_client(&updated)?;
            Ok((saved, value))
        })
        .await
        .map_err(|e| CoordinatorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
