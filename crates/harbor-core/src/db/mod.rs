//! Database operations and SQLite management for client plans.
//!
//! This module provides the low-level store for Harbor. Each client plan is
//! persisted as one row holding the full document (scalar columns plus JSON
//! text for the nested sub-structures); saves overwrite the whole document
//! under an optimistic revision guard.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod client_queries;
pub mod migrations;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
