// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use charity_tasks_audit::AuditEvent;
use charity_tasks_domain::{CharityId, Task, TaskDetails};

use crate::store::TaskUpdate;

/// The result of a successful lifecycle transition.
///
/// Nothing has been written yet: the store applies `new_task` only if the
/// task still has both the state and the assignee in `expected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The lifecycle fields the task was validated against.
    pub expected: TaskUpdate,
    /// The task after the transition.
    pub new_task: Task,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of validating a task creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    pub charity_id: CharityId,
    /// Normalized details (trimmed title).
    pub details: TaskDetails,
    /// Not yet bound to a task id.
    pub audit_event: AuditEvent,
}
