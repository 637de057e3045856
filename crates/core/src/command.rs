// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::capability::TaskAction;
use charity_tasks_domain::{Decision, TaskId, TaskState};

/// A lifecycle command represents caller intent as data only.
///
/// Commands are the only way to request a state change on an existing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A benefactor asks to perform a pending task.
    RequestTask { task_id: TaskId },
    /// The owning charity answers a pending request.
    RespondToTask { task_id: TaskId, decision: Decision },
    /// The owning charity marks assigned work as finished.
    CompleteTask { task_id: TaskId },
}

impl Command {
    #[must_use]
    pub const fn task_id(self) -> TaskId {
        match self {
            Self::RequestTask { task_id }
            | Self::RespondToTask { task_id, .. }
            | Self::CompleteTask { task_id } => task_id,
        }
    }

    /// The authorization table entry this command is checked against.
    #[must_use]
    pub const fn action(self) -> TaskAction {
        match self {
            Self::RequestTask { .. } => TaskAction::RequestTask,
            Self::RespondToTask { .. } => TaskAction::RespondToTask,
            Self::CompleteTask { .. } => TaskAction::CompleteTask,
        }
    }

    /// The single source state this command is valid from.
    #[must_use]
    pub const fn required_state(self) -> TaskState {
        match self {
            Self::RequestTask { .. } => TaskState::Pending,
            Self::RespondToTask { .. } => TaskState::Waiting,
            Self::CompleteTask { .. } => TaskState::Assigned,
        }
    }

    /// The reason reported when the task is not in [`Self::required_state`].
    #[must_use]
    pub const fn precondition_reason(self) -> &'static str {
        match self {
            Self::RequestTask { .. } => "task is not pending",
            Self::RespondToTask { .. } => "task is not waiting",
            Self::CompleteTask { .. } => "task is not assigned yet",
        }
    }

    /// The name recorded in the audit trail.
    #[must_use]
    pub const fn audit_name(self) -> &'static str {
        match self {
            Self::RequestTask { .. } => "RequestTask",
            Self::RespondToTask {
                decision: Decision::Accept,
                ..
            } => "AcceptRequest",
            Self::RespondToTask {
                decision: Decision::Reject,
                ..
            } => "RejectRequest",
            Self::CompleteTask { .. } => "CompleteTask",
        }
    }
}
