// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

use charity_tasks_domain::{Task, TaskId};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// The identity that initiated a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user identifier supplied by the identity layer.
    pub id: String,
    /// The role the actor acted in (`charity`, `benefactor`).
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Why a change was initiated, usually the inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// Correlation identifier, e.g. an HTTP request id.
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The operation that was performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`RequestTask`", "`AcceptRequest`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The lifecycle-relevant part of a task at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Captures the state and assignee of a task.
    ///
    /// Format: `state=<code>,assignee=<benefactor id or ->`.
    #[must_use]
    pub fn of_task(task: &Task) -> Self {
        let assignee: String = task
            .assigned_benefactor_id()
            .map_or_else(|| String::from("-"), |id| id.value().to_string());
        Self {
            data: format!("state={},assignee={assignee}", task.state().code()),
        }
    }

    /// Snapshot used as the "before" side of a creation.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            data: String::from("none"),
        }
    }
}

/// An immutable record of a single change to a task.
///
/// Every successful transition and every task creation produces exactly
/// one event. Rejected operations produce none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Assigned by the store once persisted.
    pub event_id: Option<i64>,
    /// The task this event belongs to. Unset for a creation until the
    /// store has allocated the task id.
    pub task_id: Option<TaskId>,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new, not yet persisted `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            task_id: None,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Binds this event to a task.
    #[must_use]
    pub fn for_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Marks this event as persisted under the given id.
    #[must_use]
    pub fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}
