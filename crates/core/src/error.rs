// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::capability::TaskAction;
use crate::store::StoreError;
use charity_tasks_domain::{DomainError, TaskId, TaskState};

/// Errors that can occur while applying an operation to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The caller has no identity.
    Unauthenticated,
    /// The caller's role or ownership does not permit the action.
    Forbidden { action: TaskAction, reason: String },
    /// No task with this id exists, or it is not visible to the caller.
    TaskNotFound(TaskId),
    /// The action is not valid from the task's current state.
    InvalidState {
        task_id: TaskId,
        current: TaskState,
        reason: String,
    },
    /// The store failed.
    Store(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Unauthenticated => write!(f, "Authentication required"),
            Self::Forbidden { reason, .. } => write!(f, "Forbidden: {reason}"),
            Self::TaskNotFound(task_id) => write!(f, "Task {task_id} not found"),
            Self::InvalidState { reason, .. } => write!(f, "{reason}"),
            Self::Store(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(task_id) => Self::TaskNotFound(task_id),
            StoreError::Backend(msg) => Self::Store(msg),
        }
    }
}
