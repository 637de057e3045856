// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::caller::Caller;
use crate::capability::TaskAction;
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{CreateResult, TransitionResult};
use crate::store::TaskUpdate;
use charity_tasks_audit::{Action, AuditEvent, Cause, StateSnapshot};
use charity_tasks_domain::{
    BenefactorId, CharityId, Decision, Task, TaskDetails, TaskState, validate_task_details,
};

/// Applies a lifecycle command to a loaded task, producing the new task and
/// its audit event.
///
/// This is the dual gate: the state precondition is checked first, then the
/// caller's ownership. Nothing is written here; the caller must hand the
/// result to a store's conditional update.
///
/// # Errors
///
/// Returns an error if:
/// - The task is not in the command's required state
/// - The caller does not own the task (respond, complete)
/// - The caller has no benefactor profile or owns the task (request)
pub fn apply(
    task: &Task,
    caller: &Caller,
    command: Command,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if task.id() != command.task_id() {
        return Err(CoreError::TaskNotFound(command.task_id()));
    }

    let expected_state: TaskState = command.required_state();
    if task.state() != expected_state {
        return Err(CoreError::InvalidState {
            task_id: task.id(),
            current: task.state(),
            reason: command.precondition_reason().to_string(),
        });
    }

    let (new_state, assignee, role, details): (TaskState, Option<BenefactorId>, &str, String) =
        match command {
            Command::RequestTask { .. } => {
                let benefactor_id: BenefactorId =
                    caller.benefactor_id().ok_or_else(|| CoreError::Forbidden {
                        action: TaskAction::RequestTask,
                        reason: String::from("only benefactors can request tasks"),
                    })?;
                if caller.charity_id() == Some(task.charity_id()) {
                    return Err(CoreError::Forbidden {
                        action: TaskAction::RequestTask,
                        reason: String::from("a charity cannot request its own task"),
                    });
                }
                (
                    TaskState::Waiting,
                    Some(benefactor_id),
                    "benefactor",
                    format!("Benefactor {benefactor_id} requested task {}", task.id()),
                )
            }
            Command::RespondToTask { decision, .. } => {
                require_owner(task, caller, TaskAction::RespondToTask)?;
                match decision {
                    Decision::Accept => (
                        TaskState::Assigned,
                        task.assigned_benefactor_id(),
                        "charity",
                        format!("Accepted request on task {}", task.id()),
                    ),
                    Decision::Reject => (
                        TaskState::Pending,
                        None,
                        "charity",
                        format!("Rejected request on task {}", task.id()),
                    ),
                }
            }
            Command::CompleteTask { .. } => {
                require_owner(task, caller, TaskAction::CompleteTask)?;
                (
                    TaskState::Done,
                    None,
                    "charity",
                    format!("Completed task {}", task.id()),
                )
            }
        };

    if !task.state().can_transition_to(new_state) {
        return Err(CoreError::InvalidState {
            task_id: task.id(),
            current: task.state(),
            reason: command.precondition_reason().to_string(),
        });
    }

    let new_task: Task = task.with_state(new_state, assignee)?;

    let audit_event: AuditEvent = AuditEvent::new(
        caller.actor(role),
        cause,
        Action::new(command.audit_name().to_string(), Some(details)),
        StateSnapshot::of_task(task),
        StateSnapshot::of_task(&new_task),
    )
    .for_task(task.id());

    Ok(TransitionResult {
        expected: TaskUpdate::from_task(task),
        new_task,
        audit_event,
    })
}

fn require_owner(task: &Task, caller: &Caller, action: TaskAction) -> Result<(), CoreError> {
    if caller.charity_id() == Some(task.charity_id()) {
        Ok(())
    } else {
        Err(CoreError::Forbidden {
            action,
            reason: String::from("only the owning charity can do this"),
        })
    }
}

/// Validates a new task for the caller's charity and builds its creation event.
///
/// The title is trimmed. The task always starts Pending and unassigned.
///
/// # Errors
///
/// Returns an error if the caller has no charity or the details are invalid.
pub fn apply_create(
    caller: &Caller,
    details: TaskDetails,
    cause: Cause,
) -> Result<CreateResult, CoreError> {
    let charity_id: CharityId = caller.charity_id().ok_or_else(|| CoreError::Forbidden {
        action: TaskAction::CreateTask,
        reason: String::from("only charities can create tasks"),
    })?;

    let details: TaskDetails = TaskDetails {
        title: details.title.trim().to_string(),
        ..details
    };
    validate_task_details(&details)?;

    let audit_event: AuditEvent = AuditEvent::new(
        caller.actor("charity"),
        cause,
        Action::new(
            String::from("CreateTask"),
            Some(format!("Created task '{}'", details.title)),
        ),
        StateSnapshot::absent(),
        StateSnapshot::new(format!("state={},assignee=-", TaskState::Pending.code())),
    );

    Ok(CreateResult {
        charity_id,
        details,
        audit_event,
    })
}
