// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the charity task system.
//!
//! Built on Diesel with the `SQLite` backend. `Persistence` is the durable
//! [`TaskStore`] the lifecycle engine runs against, and also owns profile
//! registration, identity lookup and audit history.
//!
//! ## Atomicity
//!
//! Every task mutation and its audit event commit in one transaction.
//! Lifecycle transitions use a conditional `UPDATE ... WHERE state = ?`, so
//! of two writers that validated against the same state only the first
//! changes the row.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives each caller a fresh, isolated
//! in-memory database with all migrations applied.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use charity_tasks::{Caller, StoreError, TaskQuery, TaskStore, TaskUpdate, UpdateOutcome};
use charity_tasks_audit::AuditEvent;
use charity_tasks_domain::{
    Benefactor, BenefactorId, BenefactorProfile, Charity, CharityId, CharityProfile, Task,
    TaskDetails, TaskId,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::PersistenceBackend;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for tasks, profiles and audit events.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so tests are isolated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:charity_tasks_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Profiles & identity
    // ========================================================================

    /// Registers a charity owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user already owns a charity or the insert fails.
    pub fn register_charity(
        &mut self,
        user_id: &str,
        profile: &CharityProfile,
    ) -> Result<Charity, PersistenceError> {
        mutations::insert_charity(&mut self.conn, user_id, profile)
    }

    /// Registers a benefactor profile for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user already has a benefactor profile or the
    /// insert fails.
    pub fn register_benefactor(
        &mut self,
        user_id: &str,
        profile: BenefactorProfile,
    ) -> Result<Benefactor, PersistenceError> {
        mutations::insert_benefactor(&mut self.conn, user_id, profile)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_charity_by_user(
        &mut self,
        user_id: &str,
    ) -> Result<Option<Charity>, PersistenceError> {
        queries::find_charity_by_user(&mut self.conn, user_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_benefactor_by_user(
        &mut self,
        user_id: &str,
    ) -> Result<Option<Benefactor>, PersistenceError> {
        queries::find_benefactor_by_user(&mut self.conn, user_id)
    }

    /// Resolves a user identity to a caller carrying every profile the user
    /// has registered.
    ///
    /// # Errors
    ///
    /// Returns an error if either lookup fails.
    pub fn resolve_caller(&mut self, user_id: &str) -> Result<Caller, PersistenceError> {
        let charity_id: Option<CharityId> = self.find_charity_by_user(user_id)?.map(|c| c.id);
        let benefactor_id: Option<BenefactorId> =
            self.find_benefactor_by_user(user_id)?.map(|b| b.id);
        Ok(Caller::authenticated(
            user_id.to_string(),
            charity_id,
            benefactor_id,
        ))
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Lists the audit events recorded for a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be deserialized.
    pub fn list_task_events(
        &mut self,
        task_id: TaskId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::list_task_events(&mut self.conn, task_id.value())
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }
}

impl TaskStore for Persistence {
    fn get_task(&mut self, task_id: TaskId) -> Result<Task, StoreError> {
        Ok(queries::get_task(&mut self.conn, task_id.value())?)
    }

    fn insert_task(
        &mut self,
        charity_id: CharityId,
        details: &TaskDetails,
        audit_event: &AuditEvent,
    ) -> Result<Task, StoreError> {
        Ok(mutations::insert_task(
            &mut self.conn,
            charity_id,
            details,
            audit_event,
        )?)
    }

    fn conditional_update(
        &mut self,
        task_id: TaskId,
        expected: &TaskUpdate,
        update: &TaskUpdate,
        audit_event: &AuditEvent,
    ) -> Result<UpdateOutcome, StoreError> {
        Ok(mutations::conditional_update(
            &mut self.conn,
            task_id,
            expected,
            update,
            audit_event,
        )?)
    }

    fn query_tasks(&mut self, query: &TaskQuery) -> Result<Vec<Task>, StoreError> {
        Ok(queries::query_tasks(&mut self.conn, query)?)
    }
}
