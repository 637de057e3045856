// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use charity_tasks_domain::{
    Benefactor, BenefactorId, BenefactorProfile, Charity, CharityId, CharityProfile, Experience,
    GenderLimit, Task, TaskDetails, TaskId, TaskState, parse_task_date,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

use crate::diesel_schema::{benefactors, charities, tasks};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// A row of the `tasks` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    pub task_id: i64,
    pub charity_id: i64,
    pub assigned_benefactor_id: Option<i64>,
    pub state: String,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub age_limit_from: Option<i32>,
    pub age_limit_to: Option<i32>,
    pub gender_limit: Option<String>,
}

impl TaskRow {
    /// Rebuilds the domain task, re-checking the assignee invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored code or number is out of range.
    pub fn into_task(self) -> Result<Task, PersistenceError> {
        let state: TaskState = TaskState::from_str(&self.state).map_err(reconstruction)?;
        let gender_limit: Option<GenderLimit> = self
            .gender_limit
            .as_deref()
            .map(GenderLimit::from_str)
            .transpose()
            .map_err(reconstruction)?;
        let date: Option<Date> = self
            .date
            .as_deref()
            .map(parse_task_date)
            .transpose()
            .map_err(reconstruction)?;

        let details: TaskDetails = TaskDetails {
            title: self.title,
            description: self.description,
            date,
            age_limit_from: self.age_limit_from.map(age_from_db).transpose()?,
            age_limit_to: self.age_limit_to.map(age_from_db).transpose()?,
            gender_limit,
        };

        Task::from_parts(
            TaskId::new(self.task_id),
            state,
            CharityId::new(self.charity_id),
            self.assigned_benefactor_id.map(BenefactorId::new),
            details,
        )
        .map_err(reconstruction)
    }
}

/// A row of the `charities` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = charities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CharityRow {
    pub charity_id: i64,
    pub user_id: String,
    pub name: String,
    pub reg_number: String,
}

impl From<CharityRow> for Charity {
    fn from(row: CharityRow) -> Self {
        Self {
            id: CharityId::new(row.charity_id),
            user_id: row.user_id,
            profile: CharityProfile {
                name: row.name,
                reg_number: row.reg_number,
            },
        }
    }
}

/// A row of the `benefactors` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = benefactors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BenefactorRow {
    pub benefactor_id: i64,
    pub user_id: String,
    pub experience: i32,
    pub free_time_per_week: i32,
}

impl BenefactorRow {
    /// # Errors
    ///
    /// Returns an error if a stored number is out of range.
    pub fn into_benefactor(self) -> Result<Benefactor, PersistenceError> {
        let experience: Experience =
            Experience::try_from(self.experience).map_err(reconstruction)?;
        let free_time_per_week: u16 = u16::try_from(self.free_time_per_week).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "free_time_per_week out of range: {}",
                self.free_time_per_week
            ))
        })?;
        Ok(Benefactor {
            id: BenefactorId::new(self.benefactor_id),
            user_id: self.user_id,
            profile: BenefactorProfile {
                experience,
                free_time_per_week,
            },
        })
    }
}

/// Formats a task date for storage.
#[must_use]
pub fn date_to_db(date: Date) -> String {
    date.to_string()
}

fn age_from_db(value: i32) -> Result<u16, PersistenceError> {
    u16::try_from(value)
        .map_err(|_| PersistenceError::ReconstructionError(format!("age out of range: {value}")))
}

fn reconstruction(err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}
