// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what a caller could do with a task without leaking
//! domain internals. They are advisory only and do not replace the engine's
//! checks; a concurrent writer can still win the race.

use charity_tasks::{Caller, TaskAction, authorize};
use charity_tasks_domain::{Task, TaskState};

use crate::request_response::{Capability, TaskCapabilities};

/// Computes task-specific capabilities for `caller`.
///
/// An action is allowed when the caller passes the role gate, the task is
/// in the state the action requires, and, for charity actions, the caller
/// owns the task.
#[must_use]
pub fn compute_task_capabilities(caller: &Caller, task: &Task) -> TaskCapabilities {
    let owns_task: bool = caller.charity_id() == Some(task.charity_id());

    let can_request: bool = authorize(caller, TaskAction::RequestTask).is_ok()
        && task.state() == TaskState::Pending
        && !owns_task;
    let can_respond: bool = authorize(caller, TaskAction::RespondToTask).is_ok()
        && task.state() == TaskState::Waiting
        && owns_task;
    let can_complete: bool = authorize(caller, TaskAction::CompleteTask).is_ok()
        && task.state() == TaskState::Assigned
        && owns_task;

    TaskCapabilities {
        can_request: Capability::from_bool(can_request),
        can_respond: Capability::from_bool(can_respond),
        can_complete: Capability::from_bool(can_complete),
    }
}
