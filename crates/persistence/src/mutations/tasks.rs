// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use charity_tasks::{TaskUpdate, UpdateOutcome};
use charity_tasks_audit::AuditEvent;
use charity_tasks_domain::{
    BenefactorId, CharityId, GenderLimit, Task, TaskDetails, TaskId, TaskState,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::date_to_db;
use crate::diesel_schema::tasks;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::tasks::{get_task, task_exists};

/// Inserts a Pending task and its creation event in one transaction.
///
/// # Errors
///
/// Returns an error if either insert fails.
pub fn insert_task(
    conn: &mut SqliteConnection,
    charity_id: CharityId,
    details: &TaskDetails,
    audit_event: &AuditEvent,
) -> Result<Task, PersistenceError> {
    conn.transaction::<Task, PersistenceError, _>(|conn| {
        diesel::insert_into(tasks::table)
            .values((
                tasks::charity_id.eq(charity_id.value()),
                tasks::assigned_benefactor_id.eq(None::<i64>),
                tasks::state.eq(TaskState::Pending.code()),
                tasks::title.eq(details.title.as_str()),
                tasks::description.eq(details.description.as_deref()),
                tasks::date.eq(details.date.map(date_to_db)),
                tasks::age_limit_from.eq(details.age_limit_from.map(i32::from)),
                tasks::age_limit_to.eq(details.age_limit_to.map(i32::from)),
                tasks::gender_limit.eq(details.gender_limit.map(GenderLimit::code)),
            ))
            .execute(conn)?;

        let task_id: i64 = conn.get_last_insert_rowid()?;
        persist_audit_event(conn, task_id, audit_event)?;
        debug!(task_id, "Inserted task");
        get_task(conn, task_id)
    })
}

/// Writes `update` only if the task still has the expected state and
/// assignee, and records the audit event in the same transaction.
///
/// Both predicates are part of the UPDATE statement itself, so a concurrent
/// writer that committed first leaves zero affected rows and this call
/// reports [`UpdateOutcome::PreconditionFailed`] without writing. The
/// assignee predicate uses `IS` so an expected NULL matches.
///
/// # Errors
///
/// Returns [`PersistenceError::TaskNotFound`] if the task does not exist.
pub fn conditional_update(
    conn: &mut SqliteConnection,
    task_id: TaskId,
    expected: &TaskUpdate,
    update: &TaskUpdate,
    audit_event: &AuditEvent,
) -> Result<UpdateOutcome, PersistenceError> {
    conn.immediate_transaction::<UpdateOutcome, PersistenceError, _>(|conn| {
        let affected: usize = diesel::update(
            tasks::table
                .filter(tasks::task_id.eq(task_id.value()))
                .filter(tasks::state.eq(expected.state.code()))
                .filter(
                    tasks::assigned_benefactor_id
                        .is(expected.assigned_benefactor_id.map(BenefactorId::value)),
                ),
        )
        .set((
            tasks::state.eq(update.state.code()),
            tasks::assigned_benefactor_id
                .eq(update.assigned_benefactor_id.map(BenefactorId::value)),
        ))
        .execute(conn)?;

        if affected == 0 {
            if task_exists(conn, task_id.value())? {
                debug!(
                    task_id = %task_id,
                    expected_state = %expected.state,
                    expected_assignee = ?expected.assigned_benefactor_id,
                    "Conditional update matched no row"
                );
                return Ok(UpdateOutcome::PreconditionFailed);
            }
            return Err(PersistenceError::TaskNotFound(task_id.value()));
        }

        let event_id: i64 = persist_audit_event(conn, task_id.value(), audit_event)?;
        Ok(UpdateOutcome::Applied(
            audit_event.clone().for_task(task_id).with_event_id(event_id),
        ))
    })
}
