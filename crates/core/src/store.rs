// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::filter::TaskQuery;
use charity_tasks_audit::AuditEvent;
use charity_tasks_domain::{BenefactorId, CharityId, Task, TaskDetails, TaskId, TaskState};

/// Failures reported by a task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(TaskId),
    /// The underlying storage failed.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(task_id) => write!(f, "Task {task_id} not found"),
            Self::Backend(msg) => write!(f, "Store backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The lifecycle fields of a task: what a transition expects to find and
/// what it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskUpdate {
    pub state: TaskState,
    pub assigned_benefactor_id: Option<BenefactorId>,
}

impl TaskUpdate {
    #[must_use]
    pub const fn from_task(task: &Task) -> Self {
        Self {
            state: task.state(),
            assigned_benefactor_id: task.assigned_benefactor_id(),
        }
    }
}

/// The outcome of a conditional update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row matched the expected state and was updated. Carries the
    /// persisted audit event.
    Applied(AuditEvent),
    /// The row was no longer in the expected state. Nothing was written.
    PreconditionFailed,
}

/// Durable task storage consumed by the lifecycle engine.
///
/// Implementations must make `conditional_update` atomic: the state check,
/// the write and the audit insert commit together or not at all.
pub trait TaskStore {
    /// Loads a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such task exists.
    fn get_task(&mut self, task_id: TaskId) -> Result<Task, StoreError>;

    /// Inserts a new Pending task and its creation event.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_task(
        &mut self,
        charity_id: CharityId,
        details: &TaskDetails,
        audit_event: &AuditEvent,
    ) -> Result<Task, StoreError>;

    /// Writes `update` only if the task still has the state and the
    /// assignee in `expected`. Matching on state alone would let a stale
    /// accept land after a reject and a new request.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the task does not exist.
    fn conditional_update(
        &mut self,
        task_id: TaskId,
        expected: &TaskUpdate,
        update: &TaskUpdate,
        audit_event: &AuditEvent,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Returns the tasks matching a query, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn query_tasks(&mut self, query: &TaskQuery) -> Result<Vec<Task>, StoreError>;
}
