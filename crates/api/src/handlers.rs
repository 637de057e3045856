// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler checks the capability table first, translates the request
//! into domain types, runs the core operation against the persistence store
//! and translates any error into an [`ApiError`].

use charity_tasks::{Caller, TaskAction, TransitionResult};
use charity_tasks_audit::{AuditEvent, Cause};
use charity_tasks_domain::{
    Benefactor, BenefactorId, BenefactorProfile, Charity, CharityProfile, Decision, DomainError,
    Experience, GenderLimit, Task, TaskDetails, TaskId, parse_task_date,
    validate_benefactor_profile, validate_charity_profile,
};
use charity_tasks_persistence::Persistence;
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::auth::AuthorizationService;
use crate::capabilities::compute_task_capabilities;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AuditEventResponse, BenefactorResponse, CharityResponse, CreateTaskRequest, DetailResponse,
    RegisterBenefactorRequest, RegisterCharityRequest, RespondToTaskRequest, TaskEventsResponse,
    TaskResponse,
};

/// Confirmation returned after a successful request.
pub const REQUEST_SENT: &str = "Request sent.";
/// Confirmation returned after a successful accept or reject.
pub const RESPONSE_SENT: &str = "Response sent.";
/// Confirmation returned after a task is completed.
pub const TASK_DONE: &str = "Task has been done successfully.";

/// Builds a cause with a fresh, unique id for one inbound request.
#[must_use]
pub fn new_cause(description: &str) -> Cause {
    let timestamp: i64 = OffsetDateTime::now_utc().unix_timestamp();
    Cause::new(
        format!("req_{timestamp}_{}", rand::random::<u64>()),
        description.to_string(),
    )
}

fn authenticated_user(caller: &Caller) -> Result<&str, ApiError> {
    caller.user_id().ok_or_else(|| ApiError::AuthenticationFailed {
        reason: String::from("Authentication credentials were not provided."),
    })
}

/// Converts a task into the JSON shape seen by `caller`.
#[must_use]
pub fn task_to_response(caller: &Caller, task: &Task) -> TaskResponse {
    let details: &TaskDetails = task.details();
    TaskResponse {
        id: task.id().value(),
        title: details.title.clone(),
        description: details.description.clone(),
        date: details.date.as_ref().map(ToString::to_string),
        age_limit_from: details.age_limit_from,
        age_limit_to: details.age_limit_to,
        gender_limit: details.gender_limit.map(|g| g.code().to_string()),
        state: task.state().code().to_string(),
        charity_id: task.charity_id().value(),
        assigned_benefactor_id: task.assigned_benefactor_id().map(BenefactorId::value),
        capabilities: compute_task_capabilities(caller, task),
    }
}

/// Converts an `AuditEvent` to an `AuditEventResponse`.
#[must_use]
pub fn audit_event_to_response(event: &AuditEvent) -> AuditEventResponse {
    AuditEventResponse {
        event_id: event.event_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Registers a charity owned by the calling user.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is unauthenticated
/// - The name or registration number is invalid
/// - The user already owns a charity
pub fn register_charity(
    persistence: &mut Persistence,
    caller: &Caller,
    request: RegisterCharityRequest,
) -> Result<CharityResponse, ApiError> {
    AuthorizationService::authorize(caller, TaskAction::RegisterCharity)?;
    let user_id: &str = authenticated_user(caller)?;

    let profile: CharityProfile = CharityProfile {
        name: request.name,
        reg_number: request.reg_number,
    };
    validate_charity_profile(&profile).map_err(translate_domain_error)?;

    let charity: Charity = persistence
        .register_charity(user_id, &profile)
        .map_err(translate_persistence_error)?;
    info!(user_id, charity_id = %charity.id, "Charity registered");

    Ok(CharityResponse {
        id: charity.id.value(),
        user_id: charity.user_id,
        name: charity.profile.name,
        reg_number: charity.profile.reg_number,
    })
}

/// Registers a benefactor profile for the calling user.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is unauthenticated
/// - The experience level or weekly free time is out of range
/// - The user already has a benefactor profile
pub fn register_benefactor(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &RegisterBenefactorRequest,
) -> Result<BenefactorResponse, ApiError> {
    AuthorizationService::authorize(caller, TaskAction::RegisterBenefactor)?;
    let user_id: &str = authenticated_user(caller)?;

    let experience: Experience =
        Experience::try_from(request.experience).map_err(translate_domain_error)?;
    let free_time_per_week: u16 = u16::try_from(request.free_time_per_week)
        .map_err(|_| ApiError::InvalidInput {
            field: String::from("free_time_per_week"),
            message: format!(
                "Invalid free time per week: {}. Must be between 0 and 168 hours",
                request.free_time_per_week
            ),
        })?;
    let profile: BenefactorProfile = BenefactorProfile {
        experience,
        free_time_per_week,
    };
    validate_benefactor_profile(&profile).map_err(translate_domain_error)?;

    let benefactor: Benefactor = persistence
        .register_benefactor(user_id, profile)
        .map_err(translate_persistence_error)?;
    info!(user_id, benefactor_id = %benefactor.id, "Benefactor registered");

    Ok(BenefactorResponse {
        id: benefactor.id.value(),
        user_id: benefactor.user_id,
        experience: benefactor.profile.experience.level(),
        free_time_per_week: benefactor.profile.free_time_per_week,
    })
}

// ============================================================================
// Tasks
// ============================================================================

fn details_from_request(request: CreateTaskRequest) -> Result<TaskDetails, DomainError> {
    let date: Option<Date> = request.date.as_deref().map(parse_task_date).transpose()?;
    let gender_limit: Option<GenderLimit> = request
        .gender_limit
        .as_deref()
        .map(GenderLimit::from_str)
        .transpose()?;

    Ok(TaskDetails {
        title: request.title,
        description: request.description,
        date,
        age_limit_from: request.age_limit_from,
        age_limit_to: request.age_limit_to,
        gender_limit,
    })
}

/// Creates a Pending task owned by the caller's charity.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is unauthenticated or has no charity
/// - Any task field is invalid
pub fn create_task(
    persistence: &mut Persistence,
    caller: &Caller,
    request: CreateTaskRequest,
    cause: Cause,
) -> Result<TaskResponse, ApiError> {
    AuthorizationService::authorize(caller, TaskAction::CreateTask)?;

    let details: TaskDetails = details_from_request(request).map_err(translate_domain_error)?;
    let task: Task = charity_tasks::create_task(persistence, caller, details, cause)
        .map_err(translate_core_error)?;

    Ok(task_to_response(caller, &task))
}

/// Lists the tasks visible to the caller, narrowed by query parameters.
///
/// Unknown parameters and malformed values are ignored.
///
/// # Errors
///
/// Returns an error if the caller is unauthenticated or the query fails.
pub fn list_tasks(
    persistence: &mut Persistence,
    caller: &Caller,
    params: &[(String, String)],
) -> Result<Vec<TaskResponse>, ApiError> {
    AuthorizationService::authorize(caller, TaskAction::ListTasks)?;

    let tasks: Vec<Task> = charity_tasks::list_tasks(
        persistence,
        caller,
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    )
    .map_err(translate_core_error)?;

    Ok(tasks
        .iter()
        .map(|task| task_to_response(caller, task))
        .collect())
}

/// Retrieves a single task if it is visible to the caller.
///
/// # Errors
///
/// Returns an error if the caller is unauthenticated or the task does not
/// exist or is outside the caller's visibility scope.
pub fn get_task(
    persistence: &mut Persistence,
    caller: &Caller,
    task_id: i64,
) -> Result<TaskResponse, ApiError> {
    AuthorizationService::authorize(caller, TaskAction::ViewTask)?;

    let task: Task = charity_tasks::get_visible_task(persistence, caller, TaskId::new(task_id))
        .map_err(translate_core_error)?;
    Ok(task_to_response(caller, &task))
}

/// A benefactor asks to take on a Pending task.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is unauthenticated or has no benefactor profile
/// - The task does not exist
/// - The task is not Pending
/// - The caller's charity owns the task
pub fn request_task(
    persistence: &mut Persistence,
    caller: &Caller,
    task_id: i64,
    cause: Cause,
) -> Result<DetailResponse, ApiError> {
    AuthorizationService::authorize(caller, TaskAction::RequestTask)?;

    let result: TransitionResult =
        charity_tasks::request_task(persistence, caller, TaskId::new(task_id), cause)
            .map_err(translate_core_error)?;
    info!(
        task_id,
        event_id = ?result.audit_event.event_id,
        "Task requested"
    );
    Ok(DetailResponse::new(REQUEST_SENT))
}

/// The owning charity accepts or rejects a Waiting task's request.
///
/// The role gate runs before the response value is examined, so a caller
/// without a charity is refused regardless of the body.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is unauthenticated or has no charity
/// - The response is missing or not `"A"`/`"R"`
/// - The task does not exist
/// - The task is not Waiting
/// - The caller does not own the task
pub fn respond_to_task(
    persistence: &mut Persistence,
    caller: &Caller,
    task_id: i64,
    request: &RespondToTaskRequest,
    cause: Cause,
) -> Result<DetailResponse, ApiError> {
    AuthorizationService::authorize(caller, TaskAction::RespondToTask)?;

    let decision: Decision = request
        .response
        .as_deref()
        .map_or_else(
            || Err(DomainError::InvalidDecision(String::new())),
            Decision::from_str,
        )
        .map_err(translate_domain_error)?;

    let result: TransitionResult = charity_tasks::respond_to_task(
        persistence,
        caller,
        TaskId::new(task_id),
        decision,
        cause,
    )
    .map_err(translate_core_error)?;
    info!(
        task_id,
        decision = decision.code(),
        event_id = ?result.audit_event.event_id,
        "Task request answered"
    );
    Ok(DetailResponse::new(RESPONSE_SENT))
}

/// The owning charity marks an Assigned task as Done.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is unauthenticated or has no charity
/// - The task does not exist
/// - The task is not Assigned
/// - The caller does not own the task
pub fn complete_task(
    persistence: &mut Persistence,
    caller: &Caller,
    task_id: i64,
    cause: Cause,
) -> Result<DetailResponse, ApiError> {
    AuthorizationService::authorize(caller, TaskAction::CompleteTask)?;

    let result: TransitionResult =
        charity_tasks::complete_task(persistence, caller, TaskId::new(task_id), cause)
            .map_err(translate_core_error)?;
    info!(
        task_id,
        event_id = ?result.audit_event.event_id,
        "Task completed"
    );
    Ok(DetailResponse::new(TASK_DONE))
}

/// Lists a task's audit history, oldest first. Owning charity only.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is unauthenticated or has no charity
/// - The task does not exist
/// - The caller does not own the task
pub fn list_task_events(
    persistence: &mut Persistence,
    caller: &Caller,
    task_id: i64,
) -> Result<TaskEventsResponse, ApiError> {
    AuthorizationService::authorize(caller, TaskAction::ViewHistory)?;

    let task: Task = charity_tasks::get_owned_task(
        persistence,
        caller,
        TaskId::new(task_id),
        TaskAction::ViewHistory,
    )
    .map_err(translate_core_error)?;

    let events: Vec<AuditEvent> = persistence
        .list_task_events(task.id())
        .map_err(translate_persistence_error)?;

    Ok(TaskEventsResponse {
        task_id: task.id().value(),
        events: events.iter().map(audit_event_to_response).collect(),
    })
}
