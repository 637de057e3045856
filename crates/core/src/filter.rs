// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::caller::Caller;
use charity_tasks_domain::{BenefactorId, CharityId, GenderLimit, Task, TaskState};
use std::str::FromStr;

/// A task column that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    State,
    CharityId,
    GenderLimit,
    Title,
    AssignedBenefactorId,
}

/// Equality filters: field and the query parameter that feeds it.
pub const FILTERING_LOOKUPS: &[(TaskField, &str)] = &[
    (TaskField::State, "state"),
    (TaskField::CharityId, "charity"),
    (TaskField::GenderLimit, "gender"),
    (TaskField::Title, "title"),
    (TaskField::AssignedBenefactorId, "benefactor"),
];

/// Negated equality filters: field and the query parameter that feeds it.
pub const EXCLUDING_LOOKUPS: &[(TaskField, &str)] = &[
    (TaskField::State, "exclude_state"),
    (TaskField::CharityId, "exclude_charity"),
    (TaskField::GenderLimit, "exclude_gender"),
    (TaskField::AssignedBenefactorId, "exclude_benefactor"),
];

impl TaskField {
    /// Parses a raw parameter value for this field.
    ///
    /// Returns `None` for empty or malformed values, which callers ignore.
    #[must_use]
    pub fn parse(self, raw: &str) -> Option<FieldFilter> {
        if raw.is_empty() {
            return None;
        }
        match self {
            Self::State => TaskState::from_str(raw).ok().map(FieldFilter::State),
            Self::CharityId => raw
                .parse::<i64>()
                .ok()
                .map(|id| FieldFilter::Charity(CharityId::new(id))),
            Self::GenderLimit => GenderLimit::from_str(raw).ok().map(FieldFilter::Gender),
            Self::Title => Some(FieldFilter::Title(raw.to_string())),
            Self::AssignedBenefactorId => raw
                .parse::<i64>()
                .ok()
                .map(|id| FieldFilter::Benefactor(BenefactorId::new(id))),
        }
    }
}

/// A parsed equality predicate on one task field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFilter {
    State(TaskState),
    Charity(CharityId),
    Gender(GenderLimit),
    Title(String),
    Benefactor(BenefactorId),
}

impl FieldFilter {
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::State(_) => TaskField::State,
            Self::Charity(_) => TaskField::CharityId,
            Self::Gender(_) => TaskField::GenderLimit,
            Self::Title(_) => TaskField::Title,
            Self::Benefactor(_) => TaskField::AssignedBenefactorId,
        }
    }

    /// Whether the task's column equals this filter's value.
    ///
    /// A NULL column never matches, so an inclusion drops the row and an
    /// exclusion keeps it.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::State(state) => task.state() == *state,
            Self::Charity(charity_id) => task.charity_id() == *charity_id,
            Self::Gender(gender) => task.details().gender_limit == Some(*gender),
            Self::Title(title) => task.details().title == *title,
            Self::Benefactor(benefactor_id) => {
                task.assigned_benefactor_id() == Some(*benefactor_id)
            }
        }
    }
}

/// The default set of tasks a caller may see.
///
/// The union of: Pending tasks, tasks owned by `charity_id`, tasks assigned
/// to `benefactor_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityScope {
    pub charity_id: Option<CharityId>,
    pub benefactor_id: Option<BenefactorId>,
}

impl VisibilityScope {
    #[must_use]
    pub const fn for_caller(caller: &Caller) -> Self {
        Self {
            charity_id: caller.charity_id(),
            benefactor_id: caller.benefactor_id(),
        }
    }

    #[must_use]
    pub fn admits(&self, task: &Task) -> bool {
        task.state() == TaskState::Pending
            || self.charity_id == Some(task.charity_id())
            || (self.benefactor_id.is_some()
                && self.benefactor_id == task.assigned_benefactor_id())
    }
}

/// A visibility scope plus AND-composed inclusion and exclusion filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskQuery {
    pub scope: VisibilityScope,
    pub filters: Vec<FieldFilter>,
    pub excludes: Vec<FieldFilter>,
}

impl TaskQuery {
    #[must_use]
    pub const fn new(scope: VisibilityScope) -> Self {
        Self {
            scope,
            filters: Vec::new(),
            excludes: Vec::new(),
        }
    }

    /// Builds a query for `caller` from raw query-string pairs.
    ///
    /// Keys not declared in [`FILTERING_LOOKUPS`] or [`EXCLUDING_LOOKUPS`]
    /// are ignored. A repeated key counts only by its last value, and empty
    /// or malformed values impose nothing.
    #[must_use]
    pub fn from_params<'a, I>(caller: &Caller, params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let params: Vec<(&str, &str)> = params.into_iter().collect();
        Self {
            scope: VisibilityScope::for_caller(caller),
            filters: resolve(FILTERING_LOOKUPS, &params),
            excludes: resolve(EXCLUDING_LOOKUPS, &params),
        }
    }

    /// Evaluates the query against a single task.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.scope.admits(task)
            && self.filters.iter().all(|f| f.matches(task))
            && !self.excludes.iter().any(|e| e.matches(task))
    }
}

fn resolve(table: &[(TaskField, &str)], params: &[(&str, &str)]) -> Vec<FieldFilter> {
    table
        .iter()
        .filter_map(|(field, key)| {
            params
                .iter()
                .rev()
                .find(|(param, _)| param == key)
                .and_then(|(_, value)| field.parse(value))
        })
        .collect()
}
