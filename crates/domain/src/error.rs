// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::TaskState;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Task title is empty or too long.
    InvalidTitle(String),
    /// Task description is too long.
    InvalidDescription(String),
    /// Age limits are inverted.
    InvalidAgeLimits {
        /// The lower bound supplied.
        from: u16,
        /// The upper bound supplied.
        to: u16,
    },
    /// Gender limit code is not recognized.
    InvalidGenderLimit(String),
    /// Failed to parse a date.
    InvalidDate {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Task state code is not recognized.
    InvalidTaskState(String),
    /// Response code is neither accept nor reject.
    InvalidDecision(String),
    /// Charity name is empty or too long.
    InvalidCharityName(String),
    /// Charity registration number is empty or too long.
    InvalidRegNumber(String),
    /// Experience level is outside 0..=2.
    InvalidExperience(i32),
    /// Weekly free time exceeds the hours in a week.
    InvalidFreeTime(u16),
    /// User identifier supplied by the identity layer is unusable.
    InvalidUserId(String),
    /// A task's assignee does not agree with its state.
    AssigneeInvariantViolated {
        /// The offending task.
        task_id: i64,
        /// The state the task was in.
        state: TaskState,
    },
    /// The user already owns a charity.
    CharityAlreadyRegistered {
        /// The user identifier.
        user_id: String,
    },
    /// The user already owns a benefactor profile.
    BenefactorAlreadyRegistered {
        /// The user identifier.
        user_id: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidAgeLimits { from, to } => {
                write!(
                    f,
                    "Invalid age limits: lower bound {from} exceeds upper bound {to}"
                )
            }
            Self::InvalidGenderLimit(code) => {
                write!(f, "Invalid gender limit '{code}'. Must be 'M' or 'F'")
            }
            Self::InvalidDate { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidTaskState(code) => write!(f, "Invalid task state '{code}'"),
            Self::InvalidDecision(_) => {
                write!(f, "Required field (\"A\" for accepted / \"R\" for rejected)")
            }
            Self::InvalidCharityName(msg) => write!(f, "Invalid charity name: {msg}"),
            Self::InvalidRegNumber(msg) => write!(f, "Invalid registration number: {msg}"),
            Self::InvalidExperience(level) => {
                write!(f, "Invalid experience level: {level}. Must be 0, 1 or 2")
            }
            Self::InvalidFreeTime(hours) => {
                write!(
                    f,
                    "Invalid free time per week: {hours}. Must be at most 168 hours"
                )
            }
            Self::InvalidUserId(msg) => write!(f, "Invalid user id: {msg}"),
            Self::AssigneeInvariantViolated { task_id, state } => {
                write!(
                    f,
                    "Task {task_id} in state {state} has an assignee that does not match its state"
                )
            }
            Self::CharityAlreadyRegistered { user_id } => {
                write!(f, "User '{user_id}' has already registered a charity")
            }
            Self::BenefactorAlreadyRegistered { user_id } => {
                write!(f, "User '{user_id}' has already registered as a benefactor")
            }
        }
    }
}

impl std::error::Error for DomainError {}
