//! Core library for the Harbor aftercare coordination application.
//!
//! This crate provides the business logic for tracking a client's discharge
//! plan: the dependency-gated planning checklist, the shortlist of candidate
//! aftercare programs, follow-up tasks, the referent contact record, and
//! weekly case-review updates — together with the SQLite-backed document
//! store and the async [`Coordinator`] façade that composes them.
//!
//! # Architecture
//!
//! - **Pure engines** ([`checklist`], [`shortlist`], [`weekly`]): clock-free
//!   functions over plain data; every date they reason about is injected.
//! - **Aggregate** ([`models::ClientPlan`]): one document per client;
//!   mutation always flows through [`models::ClientPlan::apply`], which
//!   stamps `last_updated`.
//! - **Store** ([`db`]): full-document overwrite with an optimistic
//!   `revision` guard — concurrent edits surface as
//!   [`CoordinatorError::StaleWrite`] instead of lost updates.
//! - **Display** ([`display`]): markdown formatting for every surface.
//!
//! # Quick Start
//!
//! ```rust
//! use harbor_core::{params::CreateClient, CoordinatorBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = CoordinatorBuilder::new()
//!     .with_database_path(Some("harbor.db"))
//!     .build()
//!     .await?;
//!
//! let params = CreateClient {
//!     name: "Jordan P.".to_string(),
//!     admission_date: "2025-03-01".to_string(),
//!     estimated_discharge_date: None,
//! };
//! let plan = coordinator.create_client_result(&params).await?;
//! println!("Created plan: {}", plan);
//! # Ok(())
//! # }
//! ```

pub mod checklist;
pub mod coordinator;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod shortlist;
pub mod weekly;

// Re-export commonly used types
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use db::Database;
pub use display::{
    ClientSummaries, CreateResult, OperationStatus, ReviewReport, ShortlistAddResult,
    ShortlistEntries, StepStates, StepToggleResult, UpdateResult, Workspace,
};
pub use error::{CoordinatorError, Result};
pub use models::{
    checklist_steps, ClientPlan, ClientSummary, FieldKey, PlacementStatus, PlanPatch, PlanStatus,
    ProgramRef, Referent, ReferentRole, ReferentType, ShortlistEntry, StepDefinition, StepKey,
    StepState, Task, TaskPriority, WeeklyUpdate, WeeklyUpdates,
};
