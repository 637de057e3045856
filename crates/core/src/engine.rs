// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The task lifecycle engine.
//!
//! Every operation takes the store and the caller explicitly and holds no
//! state between calls. Concurrency safety comes entirely from the store's
//! conditional update.

use crate::apply::{apply, apply_create};
use crate::caller::Caller;
use crate::capability::{TaskAction, authorize};
use crate::command::Command;
use crate::error::CoreError;
use crate::filter::{TaskQuery, VisibilityScope};
use crate::state::{CreateResult, TransitionResult};
use crate::store::{TaskStore, TaskUpdate, UpdateOutcome};
use charity_tasks_audit::Cause;
use charity_tasks_domain::{Decision, Task, TaskDetails, TaskId, TaskState};
use tracing::{debug, info, warn};

/// Runs a lifecycle command as one atomic read-modify-write.
///
/// Order of checks: role capability, existence, state precondition,
/// ownership. The write is conditional on the state and assignee that were
/// validated, so a concurrent writer that got there first turns this call into
/// [`CoreError::InvalidState`] with nothing written.
///
/// # Errors
///
/// Returns an error if any check fails or the store fails.
pub fn execute<S: TaskStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    command: Command,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let task_id: TaskId = command.task_id();

    if let Err(err) = authorize(caller, command.action()) {
        warn!(task_id = %task_id, action = %command.action(), error = %err, "Transition rejected");
        return Err(err);
    }

    let task: Task = store.get_task(task_id)?;
    debug!(task_id = %task_id, state = %task.state(), "Loaded task");

    let result: TransitionResult = match apply(&task, caller, command, cause) {
        Ok(result) => result,
        Err(err) => {
            warn!(task_id = %task_id, action = %command.action(), error = %err, "Transition rejected");
            return Err(err);
        }
    };

    let update: TaskUpdate = TaskUpdate::from_task(&result.new_task);
    let outcome: UpdateOutcome = store.conditional_update(
        task_id,
        &result.expected,
        &update,
        &result.audit_event,
    )?;
    match outcome {
        UpdateOutcome::Applied(audit_event) => {
            info!(
                task_id = %task_id,
                action = command.audit_name(),
                from = %result.expected.state,
                to = %update.state,
                "Transition applied"
            );
            Ok(TransitionResult {
                audit_event,
                ..result
            })
        }
        UpdateOutcome::PreconditionFailed => {
            let current: TaskState = store.get_task(task_id)?.state();
            warn!(
                task_id = %task_id,
                expected = %result.expected.state,
                current = %current,
                "Transition lost a concurrent update"
            );
            Err(CoreError::InvalidState {
                task_id,
                current,
                reason: command.precondition_reason().to_string(),
            })
        }
    }
}

/// A benefactor claims a Pending task. The task moves to Waiting.
///
/// # Errors
///
/// See [`execute`].
pub fn request_task<S: TaskStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    task_id: TaskId,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    execute(store, caller, Command::RequestTask { task_id }, cause)
}

/// The owning charity accepts or rejects a Waiting task's request.
///
/// # Errors
///
/// See [`execute`].
pub fn respond_to_task<S: TaskStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    task_id: TaskId,
    decision: Decision,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    execute(
        store,
        caller,
        Command::RespondToTask { task_id, decision },
        cause,
    )
}

/// The owning charity marks an Assigned task as Done.
///
/// # Errors
///
/// See [`execute`].
pub fn complete_task<S: TaskStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    task_id: TaskId,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    execute(store, caller, Command::CompleteTask { task_id }, cause)
}

/// Creates a Pending task owned by the caller's charity.
///
/// # Errors
///
/// Returns an error if the caller is not a charity owner, the details are
/// invalid, or the insert fails.
pub fn create_task<S: TaskStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    details: TaskDetails,
    cause: Cause,
) -> Result<Task, CoreError> {
    authorize(caller, TaskAction::CreateTask)?;
    let result: CreateResult = apply_create(caller, details, cause)?;
    let task: Task =
        store.insert_task(result.charity_id, &result.details, &result.audit_event)?;
    info!(task_id = %task.id(), charity_id = %task.charity_id(), "Task created");
    Ok(task)
}

/// Lists the tasks visible to the caller that match the raw query parameters.
///
/// # Errors
///
/// Returns an error if the caller is unauthenticated or the query fails.
pub fn list_tasks<'a, S, I>(
    store: &mut S,
    caller: &Caller,
    params: I,
) -> Result<Vec<Task>, CoreError>
where
    S: TaskStore + ?Sized,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    authorize(caller, TaskAction::ListTasks)?;
    let query: TaskQuery = TaskQuery::from_params(caller, params);
    debug!(
        filters = query.filters.len(),
        excludes = query.excludes.len(),
        "Querying tasks"
    );
    Ok(store.query_tasks(&query)?)
}

/// Loads a single task if it is within the caller's visibility scope.
///
/// # Errors
///
/// Returns [`CoreError::TaskNotFound`] if the task does not exist or is not
/// visible to the caller.
pub fn get_visible_task<S: TaskStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    task_id: TaskId,
) -> Result<Task, CoreError> {
    authorize(caller, TaskAction::ViewTask)?;
    let task: Task = store.get_task(task_id)?;
    if VisibilityScope::for_caller(caller).admits(&task) {
        Ok(task)
    } else {
        Err(CoreError::TaskNotFound(task_id))
    }
}

/// Loads a task for an owner-only action such as reading its history.
///
/// # Errors
///
/// Returns an error if the caller has no charity, the task does not exist,
/// or the caller's charity does not own it.
pub fn get_owned_task<S: TaskStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    task_id: TaskId,
    action: TaskAction,
) -> Result<Task, CoreError> {
    authorize(caller, action)?;
    let task: Task = store.get_task(task_id)?;
    if caller.charity_id() == Some(task.charity_id()) {
        Ok(task)
    } else {
        Err(CoreError::Forbidden {
            action,
            reason: String::from("only the owning charity can do this"),
        })
    }
}
