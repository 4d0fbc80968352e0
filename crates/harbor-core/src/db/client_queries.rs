//! Client plan CRUD operations and queries.

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::error::{CoordinatorError, DatabaseResultExt, Result};
use crate::models::{ClientPlan, PlanStatus};

const CLIENT_COLUMNS: &str = "id, name, status, admission_date, estimated_discharge_date, \
     planning_progress, shortlist, tasks, weekly_updates, referent, revision, created_at, \
     last_updated";

const INSERT_CLIENT_SQL: &str = "INSERT INTO clients (name, status, admission_date, \
     estimated_discharge_date, planning_progress, shortlist, tasks, weekly_updates, referent, \
     revision, created_at, last_updated) \
     VALUES (?1, ?2, ?3, ?4, '{}', '[]', '[]', '{}', '{}', 0, ?5, ?6)";
const CHECK_CLIENT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM clients WHERE id = ?1)";
const SAVE_CLIENT_SQL: &str = "UPDATE clients SET name = ?1, status = ?2, admission_date = ?3, \
     estimated_discharge_date = ?4, planning_progress = ?5, shortlist = ?6, tasks = ?7, \
     weekly_updates = ?8, referent = ?9, revision = ?10, last_updated = ?11 \
     WHERE id = ?12 AND revision = ?13";
const UPDATE_CLIENT_STATUS_SQL: &str = "UPDATE clients SET status = ?1, revision = revision + 1, \
     last_updated = ?2 WHERE id = ?3 AND status = ?4";

impl super::Database {
    /// Creates a new client plan at admission: every checklist step
    /// incomplete, empty shortlist, no tasks, no weekly updates, empty
    /// referent record.
    pub fn create_client(
        &mut self,
        name: &str,
        admission_date: Date,
        estimated_discharge_date: Option<Date>,
    ) -> Result<ClientPlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_CLIENT_SQL,
            params![
                name,
                PlanStatus::Active.as_str(),
                admission_date.to_string(),
                estimated_discharge_date.map(|d| d.to_string()),
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| CoordinatorError::database_error("Failed to insert client", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(ClientPlan {
            id,
            name: name.into(),
            status: PlanStatus::Active,
            admission_date,
            estimated_discharge_date,
            planning_progress: Default::default(),
            shortlist: Vec::new(),
            tasks: Vec::new(),
            weekly_updates: Default::default(),
            referent: Default::default(),
            revision: 0,
            created_at: now,
            last_updated: now,
        })
    }

    /// Retrieves a client plan by its ID.
    pub fn get_client(&self, id: u64) -> Result<Option<ClientPlan>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .map_err(|e| CoordinatorError::database_error("Failed to prepare query", e))?;

        stmt.query_row(params![id as i64], Self::build_client_from_row)
            .optional()
            .map_err(|e| CoordinatorError::database_error("Failed to query client", e))
    }

    /// Lists client plans with the given status, newest admission first.
    pub fn list_clients(&self, status: PlanStatus) -> Result<Vec<ClientPlan>> {
        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE status = ?1 \
             ORDER BY admission_date DESC, id DESC"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .map_err(|e| CoordinatorError::database_error("Failed to prepare query", e))?;

        let clients = stmt
            .query_map(params![status.as_str()], Self::build_client_from_row)
            .map_err(|e| CoordinatorError::database_error("Failed to query clients", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| CoordinatorError::database_error("Failed to fetch clients", e))?;

        Ok(clients)
    }

    /// Saves a full client plan document (overwrite semantics).
    ///
    /// The write only succeeds when the stored revision still matches the
    /// plan's revision; the saved document carries `revision + 1`. A stale
    /// revision yields [`CoordinatorError::StaleWrite`] so the caller can
    /// reload and retry instead of silently clobbering a concurrent edit.
    pub fn save_client(&mut self, plan: &ClientPlan) -> Result<ClientPlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let next_revision = plan.revision + 1;
        let rows_affected = tx
            .execute(
                SAVE_CLIENT_SQL,
                params![
                    plan.name,
                    plan.status.as_str(),
                    plan.admission_date.to_string(),
                    plan.estimated_discharge_date.map(|d| d.to_string()),
                    serde_json::to_string(&plan.planning_progress)?,
                    serde_json::to_string(&plan.shortlist)?,
                    serde_json::to_string(&plan.tasks)?,
                    serde_json::to_string(&plan.weekly_updates)?,
                    serde_json::to_string(&plan.referent)?,
                    next_revision as i64,
                    plan.last_updated.to_string(),
                    plan.id as i64,
                    plan.revision as i64
                ],
            )
            .map_err(|e| CoordinatorError::database_error("Failed to save client", e))?;

        if rows_affected == 0 {
            let exists: bool = tx
                .query_row(CHECK_CLIENT_EXISTS_SQL, params![plan.id as i64], |row| {
                    row.get(0)
                })
                .map_err(|e| {
                    CoordinatorError::database_error("Failed to check client existence", e)
                })?;

            return if exists {
                Err(CoordinatorError::StaleWrite {
                    id: plan.id,
                    revision: plan.revision,
                })
            } else {
                Err(CoordinatorError::ClientNotFound { id: plan.id })
            };
        }

        tx.commit().db_context("Failed to commit transaction")?;

        let mut saved = plan.clone();
        saved.revision = next_revision;
        Ok(saved)
    }

    /// Marks a client plan discharged (status transition, not deletion).
    /// Returns the updated plan, or None if the client doesn't exist.
    pub fn discharge_client(&mut self, id: u64) -> Result<Option<ClientPlan>> {
        self.transition_status(id, PlanStatus::Active, PlanStatus::Discharged)
    }

    /// Restores a discharged client plan to active.
    /// Returns the updated plan, or None if the client doesn't exist.
    pub fn reopen_client(&mut self, id: u64) -> Result<Option<ClientPlan>> {
        self.transition_status(id, PlanStatus::Discharged, PlanStatus::Active)
    }

    fn transition_status(
        &mut self,
        id: u64,
        from: PlanStatus,
        to: PlanStatus,
    ) -> Result<Option<ClientPlan>> {
        let now = Timestamp::now().to_string();
        let rows_affected = self
            .connection
            .execute(
                UPDATE_CLIENT_STATUS_SQL,
                params![to.as_str(), &now, id as i64, from.as_str()],
            )
            .map_err(|e| CoordinatorError::database_error("Failed to update client status", e))?;

        if rows_affected == 0 {
            let exists: bool = self
                .connection
                .query_row(CHECK_CLIENT_EXISTS_SQL, params![id as i64], |row| row.get(0))
                .map_err(|e| {
                    CoordinatorError::database_error("Failed to check client existence", e)
                })?;

            if !exists {
                return Ok(None);
            }
            // Already in the target status; fall through and return details.
        }

        self.get_client(id)
    }

    /// Helper to construct a ClientPlan from a database row.
    fn build_client_from_row(row: &rusqlite::Row) -> rusqlite::Result<ClientPlan> {
        fn json_column<T: serde::de::DeserializeOwned>(
            row: &rusqlite::Row,
            idx: usize,
        ) -> rusqlite::Result<T> {
            let raw: String = row.get(idx)?;
            serde_json::from_str(&raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        }

        fn date_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Date> {
            row.get::<_, String>(idx)?.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        }

        fn timestamp_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
            row.get::<_, String>(idx)?
                .parse::<Timestamp>()
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
                })
        }

        let status_str: String = row.get(2)?;
        let status = status_str.parse::<PlanStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                Type::Text,
                format!("Invalid plan status: {status_str}").into(),
            )
        })?;

        let estimated_discharge_date = row
            .get::<_, Option<String>>(4)?
            .map(|raw| {
                raw.parse::<Date>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
                })
            })
            .transpose()?;

        Ok(ClientPlan {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            status,
            admission_date: date_column(row, 3)?,
            estimated_discharge_date,
            planning_progress: json_column(row, 5)?,
            shortlist: json_column(row, 6)?,
            tasks: json_column(row, 7)?,
            weekly_updates: json_column(row, 8)?,
            referent: json_column(row, 9)?,
            revision: row.get::<_, i64>(10)? as u64,
            created_at: timestamp_column(row, 11)?,
            last_updated: timestamp_column(row, 12)?,
        })
    }
}
