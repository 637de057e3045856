// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Canonical identifier of a task, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw task identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a registered charity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharityId(i64);

impl CharityId {
    /// Wraps a raw charity identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CharityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a registered benefactor.
///
/// This is the benefactor profile id, never the underlying user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenefactorId(i64);

impl BenefactorId {
    /// Wraps a raw benefactor identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BenefactorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a task.
///
/// Valid transitions are:
/// - Pending → Waiting (a benefactor requests the task)
/// - Waiting → Assigned (the owning charity accepts)
/// - Waiting → Pending (the owning charity rejects)
/// - Assigned → Done (the owning charity completes the task)
///
/// Done is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskState {
    /// Open for requests. No assignee.
    #[default]
    #[serde(rename = "P")]
    Pending,
    /// A benefactor has requested the task and awaits the charity's response.
    #[serde(rename = "W")]
    Waiting,
    /// The charity accepted the request.
    #[serde(rename = "A")]
    Assigned,
    /// The work is finished. No assignee is retained.
    #[serde(rename = "D")]
    Done,
}

impl TaskState {
    /// Returns the single-letter storage and wire code for this state.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "P",
            Self::Waiting => "W",
            Self::Assigned => "A",
            Self::Done => "D",
        }
    }

    /// Returns the human-readable name of this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Waiting => "Waiting",
            Self::Assigned => "Assigned",
            Self::Done => "Done",
        }
    }

    /// Checks if a transition from this state to another is valid.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Waiting)
                | (Self::Waiting, Self::Assigned | Self::Pending)
                | (Self::Assigned, Self::Done)
        )
    }

    /// Returns whether a task in this state must carry an assignee.
    #[must_use]
    pub const fn requires_assignee(self) -> bool {
        matches!(self, Self::Waiting | Self::Assigned)
    }

    /// Returns whether no transition leaves this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl FromStr for TaskState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(Self::Pending),
            "W" => Ok(Self::Waiting),
            "A" => Ok(Self::Assigned),
            "D" => Ok(Self::Done),
            _ => Err(DomainError::InvalidTaskState(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A charity's answer to a benefactor's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Assign the task to the requesting benefactor.
    #[serde(rename = "A")]
    Accept,
    /// Return the task to the pending pool.
    #[serde(rename = "R")]
    Reject,
}

impl Decision {
    /// Returns the single-letter wire code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Accept => "A",
            Self::Reject => "R",
        }
    }
}

impl FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::Accept),
            "R" => Ok(Self::Reject),
            _ => Err(DomainError::InvalidDecision(s.to_string())),
        }
    }
}

/// Gender restriction on who may perform a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderLimit {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl GenderLimit {
    /// Returns the single-letter storage and wire code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl FromStr for GenderLimit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            _ => Err(DomainError::InvalidGenderLimit(s.to_string())),
        }
    }
}

/// Self-declared experience level of a benefactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Experience {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Experience {
    /// Returns the numeric level (0, 1 or 2).
    #[must_use]
    pub const fn level(self) -> i32 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Expert => 2,
        }
    }
}

impl TryFrom<i32> for Experience {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Beginner),
            1 => Ok(Self::Intermediate),
            2 => Ok(Self::Expert),
            _ => Err(DomainError::InvalidExperience(value)),
        }
    }
}

impl From<Experience> for i32 {
    fn from(value: Experience) -> Self {
        value.level()
    }
}

/// Descriptive attributes of a task, owned and edited by its charity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDetails {
    /// Short title shown in task lists.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// The day the work is scheduled for.
    pub date: Option<Date>,
    /// Minimum benefactor age, inclusive.
    pub age_limit_from: Option<u16>,
    /// Maximum benefactor age, inclusive.
    pub age_limit_to: Option<u16>,
    /// Restricts who may perform the task.
    pub gender_limit: Option<GenderLimit>,
}

impl TaskDetails {
    /// Creates details with only a title set.
    #[must_use]
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

/// A charitable task.
///
/// The assignee is present exactly when the state is Waiting or Assigned.
/// Every constructor enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    state: TaskState,
    charity_id: CharityId,
    assigned_benefactor_id: Option<BenefactorId>,
    details: TaskDetails,
}

impl Task {
    /// Reconstructs a task from stored parts.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AssigneeInvariantViolated`] when the assignee
    /// does not agree with the state.
    pub fn from_parts(
        id: TaskId,
        state: TaskState,
        charity_id: CharityId,
        assigned_benefactor_id: Option<BenefactorId>,
        details: TaskDetails,
    ) -> Result<Self, DomainError> {
        if state.requires_assignee() != assigned_benefactor_id.is_some() {
            return Err(DomainError::AssigneeInvariantViolated {
                task_id: id.value(),
                state,
            });
        }
        Ok(Self {
            id,
            state,
            charity_id,
            assigned_benefactor_id,
            details,
        })
    }

    /// Returns a copy of this task moved to `state` with the given assignee.
    ///
    /// Identity, ownership and descriptive fields are carried over.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AssigneeInvariantViolated`] when the assignee
    /// does not agree with the target state.
    pub fn with_state(
        &self,
        state: TaskState,
        assigned_benefactor_id: Option<BenefactorId>,
    ) -> Result<Self, DomainError> {
        Self::from_parts(
            self.id,
            state,
            self.charity_id,
            assigned_benefactor_id,
            self.details.clone(),
        )
    }

    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    #[must_use]
    pub const fn charity_id(&self) -> CharityId {
        self.charity_id
    }

    #[must_use]
    pub const fn assigned_benefactor_id(&self) -> Option<BenefactorId> {
        self.assigned_benefactor_id
    }

    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns whether the given charity owns this task.
    #[must_use]
    pub fn is_owned_by(&self, charity_id: CharityId) -> bool {
        self.charity_id == charity_id
    }
}

/// Registration data for a charity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharityProfile {
    /// Display name of the charity.
    pub name: String,
    /// Official registration number.
    pub reg_number: String,
}

/// A registered charity, bound 1:1 to a user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charity {
    pub id: CharityId,
    pub user_id: String,
    pub profile: CharityProfile,
}

/// Registration data for a benefactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BenefactorProfile {
    pub experience: Experience,
    /// Hours per week the benefactor can volunteer.
    pub free_time_per_week: u16,
}

/// A registered benefactor, bound 1:1 to a user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benefactor {
    pub id: BenefactorId,
    pub user_id: String,
    pub profile: BenefactorProfile,
}
