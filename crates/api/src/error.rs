// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use charity_tasks::CoreError;
use charity_tasks_domain::DomainError;
use charity_tasks_persistence::PersistenceError;
use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No usable identity was supplied.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller lacks the role the action requires.
    #[error("Unauthorized: '{action}' requires the {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// The `Display` text of each variant is the human-readable detail returned
/// to clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    #[error("{reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller's role or ownership does not permit the action.
    #[error("{reason}")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
    /// Invalid input was provided.
    #[error("{message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The task is not in the state the action requires.
    #[error("{reason}")]
    InvalidState {
        /// The precondition that failed.
        reason: String,
    },
    /// An internal error occurred.
    #[error("{message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Machine-checkable category for this error.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "authentication_failed",
            Self::Unauthorized { .. } => "forbidden",
            Self::InvalidInput { .. } => "invalid_input",
            Self::ResourceNotFound { .. } => "not_found",
            Self::InvalidState { .. } => "invalid_state",
            Self::Internal { .. } => "internal",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                reason: format!("{action} requires the {required_role} role"),
                action,
            },
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidTitle(_) => invalid_input("title", &err),
        DomainError::InvalidDescription(_) => invalid_input("description", &err),
        DomainError::InvalidAgeLimits { .. } => invalid_input("age_limit_to", &err),
        DomainError::InvalidGenderLimit(_) => invalid_input("gender_limit", &err),
        DomainError::InvalidDate { .. } => invalid_input("date", &err),
        DomainError::InvalidTaskState(_) => invalid_input("state", &err),
        DomainError::InvalidDecision(_) => invalid_input("response", &err),
        DomainError::InvalidCharityName(_) => invalid_input("name", &err),
        DomainError::InvalidRegNumber(_) => invalid_input("reg_number", &err),
        DomainError::InvalidExperience(_) => invalid_input("experience", &err),
        DomainError::InvalidFreeTime(_) => invalid_input("free_time_per_week", &err),
        DomainError::InvalidUserId(_) => ApiError::AuthenticationFailed {
            reason: err.to_string(),
        },
        DomainError::CharityAlreadyRegistered { .. }
        | DomainError::BenefactorAlreadyRegistered { .. } => invalid_input("user", &err),
        DomainError::AssigneeInvariantViolated { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Unauthenticated => ApiError::AuthenticationFailed {
            reason: String::from("Authentication credentials were not provided."),
        },
        CoreError::Forbidden { action, reason } => ApiError::Unauthorized {
            action: action.to_string(),
            reason,
        },
        CoreError::TaskNotFound(task_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Task"),
            message: format!("Task {task_id} not found"),
        },
        CoreError::InvalidState { reason, .. } => ApiError::InvalidState { reason },
        CoreError::Store(msg) => ApiError::Internal {
            message: format!("Store error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::AlreadyRegistered { profile, user_id } => {
            let domain_err: DomainError = if profile == "charity" {
                DomainError::CharityAlreadyRegistered { user_id }
            } else {
                DomainError::BenefactorAlreadyRegistered { user_id }
            };
            translate_domain_error(domain_err)
        }
        PersistenceError::TaskNotFound(task_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Task"),
            message: format!("Task {task_id} not found"),
        },
        other => ApiError::Internal {
            message: format!("Persistence error: {other}"),
        },
    }
}
