//! High-level coordinator API for managing client discharge plans.
//!
//! The [`Coordinator`] is the central entry point between the interface
//! layers (CLI, MCP) and the store. It composes the pure engines
//! ([`crate::checklist`], [`crate::shortlist`], [`crate::weekly`]) with the
//! SQLite-backed document store, so every mutation follows the same path:
//! load the full plan, run the relevant engine over it, shallow-merge the
//! result through [`crate::models::ClientPlan::apply`], and save the whole
//! document under the optimistic revision guard.
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │     Handlers     │    │   Pure engines   │    │    Database     │
//! │ (client_handlers,│───▶│ (checklist,      │───▶│    (via db/)    │
//! │  planning_,      │    │  shortlist,      │    │                 │
//! │  shortlist_)     │    │  weekly)         │    │                 │
//! └──────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! All operations are async; blocking SQLite work runs on the tokio
//! blocking pool. Each load-modify-save cycle executes inside one blocking
//! task, and the revision guard turns any interleaving that slips through
//! into a recoverable [`StaleWrite`](crate::CoordinatorError::StaleWrite)
//! instead of a lost update.

use std::path::PathBuf;

pub mod builder;
pub mod client_handlers;
pub mod client_ops;
pub mod planning_handlers;
pub mod shortlist_handlers;

#[cfg(test)]
mod tests;

pub use builder::CoordinatorBuilder;

/// Main coordinator interface for managing client discharge plans.
pub struct Coordinator {
    pub(crate) db_path: PathBuf,
}

impl Coordinator {
    /// Creates a new coordinator with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
