// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task queries.
//!
//! The visibility scope and the field filters of a [`TaskQuery`] are
//! translated to SQL here; their in-memory counterpart is
//! [`TaskQuery::matches`].

use charity_tasks::{FieldFilter, TaskQuery, VisibilityScope};
use charity_tasks_domain::{Task, TaskState};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;

use crate::data_models::TaskRow;
use crate::diesel_schema::tasks;
use crate::error::PersistenceError;

type BoxedTaskQuery<'a> = tasks::BoxedQuery<'a, Sqlite, tasks::SqlType>;

/// Loads one task.
///
/// # Errors
///
/// Returns [`PersistenceError::TaskNotFound`] if no such task exists.
pub fn get_task(conn: &mut SqliteConnection, task_id: i64) -> Result<Task, PersistenceError> {
    let row: Option<TaskRow> = tasks::table
        .filter(tasks::task_id.eq(task_id))
        .select(TaskRow::as_select())
        .first::<TaskRow>(conn)
        .optional()?;

    row.ok_or(PersistenceError::TaskNotFound(task_id))?
        .into_task()
}

/// Returns whether a task row exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn task_exists(conn: &mut SqliteConnection, task_id: i64) -> Result<bool, PersistenceError> {
    Ok(
        diesel::select(diesel::dsl::exists(
            tasks::table.filter(tasks::task_id.eq(task_id)),
        ))
        .get_result::<bool>(conn)?,
    )
}

/// Lists tasks matching the query's scope, filters and exclusions, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn query_tasks(
    conn: &mut SqliteConnection,
    query: &TaskQuery,
) -> Result<Vec<Task>, PersistenceError> {
    let mut statement: BoxedTaskQuery<'_> = apply_scope(tasks::table.into_boxed(), query.scope);

    for filter in &query.filters {
        statement = apply_filter(statement, filter);
    }
    for exclude in &query.excludes {
        statement = apply_exclude(statement, exclude);
    }

    let rows: Vec<TaskRow> = statement
        .order(tasks::task_id.asc())
        .select(TaskRow::as_select())
        .load::<TaskRow>(conn)?;

    debug!(count = rows.len(), "Loaded tasks");
    rows.into_iter().map(TaskRow::into_task).collect()
}

fn apply_scope(statement: BoxedTaskQuery<'_>, scope: VisibilityScope) -> BoxedTaskQuery<'_> {
    let pending = tasks::state.eq(TaskState::Pending.code());
    match (scope.charity_id, scope.benefactor_id) {
        (Some(charity_id), Some(benefactor_id)) => statement.filter(
            pending
                .or(tasks::charity_id.eq(charity_id.value()))
                .or(tasks::assigned_benefactor_id
                    .assume_not_null()
                    .eq(benefactor_id.value())),
        ),
        (Some(charity_id), None) => {
            statement.filter(pending.or(tasks::charity_id.eq(charity_id.value())))
        }
        (None, Some(benefactor_id)) => statement.filter(
            pending.or(tasks::assigned_benefactor_id
                .assume_not_null()
                .eq(benefactor_id.value())),
        ),
        (None, None) => statement.filter(pending),
    }
}

fn apply_filter<'a>(statement: BoxedTaskQuery<'a>, filter: &FieldFilter) -> BoxedTaskQuery<'a> {
    match filter {
        FieldFilter::State(state) => statement.filter(tasks::state.eq(state.code())),
        FieldFilter::Charity(charity_id) => {
            statement.filter(tasks::charity_id.eq(charity_id.value()))
        }
        FieldFilter::Gender(gender) => {
            statement.filter(tasks::gender_limit.assume_not_null().eq(gender.code()))
        }
        FieldFilter::Title(title) => statement.filter(tasks::title.eq(title.clone())),
        FieldFilter::Benefactor(benefactor_id) => statement.filter(
            tasks::assigned_benefactor_id
                .assume_not_null()
                .eq(benefactor_id.value()),
        ),
    }
}

/// Exclusions keep rows whose column is NULL.
fn apply_exclude<'a>(statement: BoxedTaskQuery<'a>, exclude: &FieldFilter) -> BoxedTaskQuery<'a> {
    match exclude {
        FieldFilter::State(state) => statement.filter(tasks::state.ne(state.code())),
        FieldFilter::Charity(charity_id) => {
            statement.filter(tasks::charity_id.ne(charity_id.value()))
        }
        FieldFilter::Gender(gender) => statement.filter(
            tasks::gender_limit
                .is_null()
                .or(tasks::gender_limit.assume_not_null().ne(gender.code())),
        ),
        FieldFilter::Title(title) => statement.filter(tasks::title.ne(title.clone())),
        FieldFilter::Benefactor(benefactor_id) => statement.filter(
            tasks::assigned_benefactor_id.is_null().or(tasks::assigned_benefactor_id
                .assume_not_null()
                .ne(benefactor_id.value())),
        ),
    }
}
