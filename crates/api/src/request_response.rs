// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};

/// API request to register a charity for the calling user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCharityRequest {
    /// The charity's display name.
    pub name: String,
    /// The charity's registration number.
    pub reg_number: String,
}

/// API response for a registered charity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharityResponse {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub reg_number: String,
}

/// API request to register a benefactor profile for the calling user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterBenefactorRequest {
    /// 0 beginner, 1 intermediate, 2 expert.
    #[serde(default)]
    pub experience: i32,
    /// Hours available per week.
    #[serde(default)]
    pub free_time_per_week: i64,
}

/// API response for a registered benefactor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefactorResponse {
    pub id: i64,
    pub user_id: String,
    pub experience: i32,
    pub free_time_per_week: u16,
}

/// API request to create a task.
///
/// Ownership, state and assignee are never taken from the client; unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date in `YYYY-MM-DD` form.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub age_limit_from: Option<u16>,
    #[serde(default)]
    pub age_limit_to: Option<u16>,
    /// `"M"` or `"F"`.
    #[serde(default)]
    pub gender_limit: Option<String>,
}

/// API request carrying a charity's answer to a pending request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondToTaskRequest {
    /// `"A"` to accept or `"R"` to reject.
    #[serde(default)]
    pub response: Option<String>,
}

/// A plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    #[must_use]
    pub fn new(detail: &str) -> Self {
        Self {
            detail: detail.to_string(),
        }
    }
}

/// Capability flag for UI gating.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false for API compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let allowed: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(allowed))
    }
}

/// What the caller could do with a task right now.
///
/// Advisory only. The lifecycle engine re-checks every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCapabilities {
    pub can_request: Capability,
    pub can_respond: Capability,
    pub can_complete: Capability,
}

/// A task as seen by one caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub age_limit_from: Option<u16>,
    pub age_limit_to: Option<u16>,
    pub gender_limit: Option<String>,
    /// Wire code: `P`, `W`, `A` or `D`.
    pub state: String,
    pub charity_id: i64,
    pub assigned_benefactor_id: Option<i64>,
    pub capabilities: TaskCapabilities,
}

/// Serializable representation of an `AuditEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventResponse {
    pub event_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_snapshot: String,
    pub after_snapshot: String,
}

/// API response listing a task's history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEventsResponse {
    pub task_id: i64,
    pub events: Vec<AuditEventResponse>,
}
