// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::caller::Caller;
use crate::error::CoreError;

/// A permission a caller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Any identified user.
    Authenticated,
    /// The caller has a registered charity.
    CharityOwner,
    /// The caller has a registered benefactor profile.
    Benefactor,
}

impl Capability {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authenticated => "authenticated",
            Self::CharityOwner => "charity",
            Self::Benefactor => "benefactor",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every operation exposed on tasks and profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    RegisterCharity,
    RegisterBenefactor,
    ListTasks,
    ViewTask,
    CreateTask,
    RequestTask,
    RespondToTask,
    CompleteTask,
    ViewHistory,
}

impl TaskAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegisterCharity => "RegisterCharity",
            Self::RegisterBenefactor => "RegisterBenefactor",
            Self::ListTasks => "ListTasks",
            Self::ViewTask => "ViewTask",
            Self::CreateTask => "CreateTask",
            Self::RequestTask => "RequestTask",
            Self::RespondToTask => "RespondToTask",
            Self::CompleteTask => "CompleteTask",
            Self::ViewHistory => "ViewHistory",
        }
    }
}

impl std::fmt::Display for TaskAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authorization table: the capability each action requires.
#[must_use]
pub const fn required_capability(action: TaskAction) -> Capability {
    match action {
        TaskAction::RegisterCharity
        | TaskAction::RegisterBenefactor
        | TaskAction::ListTasks
        | TaskAction::ViewTask => Capability::Authenticated,
        TaskAction::CreateTask
        | TaskAction::RespondToTask
        | TaskAction::CompleteTask
        | TaskAction::ViewHistory => Capability::CharityOwner,
        TaskAction::RequestTask => Capability::Benefactor,
    }
}

/// Checks the caller against the authorization table.
///
/// # Errors
///
/// Returns [`CoreError::Unauthenticated`] when the caller has no identity and
/// [`CoreError::Forbidden`] when the caller lacks the required capability.
pub fn authorize(caller: &Caller, action: TaskAction) -> Result<(), CoreError> {
    if !caller.is_authenticated() {
        return Err(CoreError::Unauthenticated);
    }
    let required: Capability = required_capability(action);
    if !caller.holds(required) {
        return Err(CoreError::Forbidden {
            action,
            reason: format!("{action} requires the {required} role"),
        });
    }
    Ok(())
}
