// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the charity task system.
//!
//! Transport-agnostic: handlers take the persistence store and a resolved
//! [`charity_tasks::Caller`], and return DTOs or an [`ApiError`]. The HTTP
//! server maps these onto routes and status codes.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, AuthorizationService};
pub use capabilities::compute_task_capabilities;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    REQUEST_SENT, RESPONSE_SENT, TASK_DONE, audit_event_to_response, complete_task, create_task,
    get_task, list_task_events, list_tasks, new_cause, register_benefactor, register_charity,
    request_task, respond_to_task, task_to_response,
};
pub use request_response::{
    AuditEventResponse, BenefactorResponse, Capability, CharityResponse, CreateTaskRequest,
    DetailResponse, RegisterBenefactorRequest, RegisterCharityRequest, RespondToTaskRequest,
    TaskCapabilities, TaskEventsResponse, TaskResponse,
};
