// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Caller, StoreError, TaskQuery, TaskStore, TaskUpdate, UpdateOutcome};
use charity_tasks_audit::{AuditEvent, Cause};
use charity_tasks_domain::{BenefactorId, CharityId, Task, TaskDetails, TaskId, TaskState};

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub fn charity_caller(id: i64) -> Caller {
    Caller::authenticated(format!("charity-user-{id}"), Some(CharityId::new(id)), None)
}

pub fn benefactor_caller(id: i64) -> Caller {
    Caller::authenticated(
        format!("benefactor-user-{id}"),
        None,
        Some(BenefactorId::new(id)),
    )
}

pub fn member_caller() -> Caller {
    Caller::authenticated(String::from("member"), None, None)
}

/// Simple in-memory store. Operations are atomic because they take `&mut self`.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: Vec<Task>,
    pub events: Vec<AuditEvent>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a task directly in the given state, bypassing the engine.
    pub fn seed(&mut self, state: TaskState, charity_id: i64, assignee: Option<i64>) -> TaskId {
        let task_id: TaskId = TaskId::new(i64::try_from(self.tasks.len()).unwrap() + 1);
        let task: Task = Task::from_parts(
            task_id,
            state,
            CharityId::new(charity_id),
            assignee.map(BenefactorId::new),
            TaskDetails::titled(&format!("Task {task_id}")),
        )
        .unwrap();
        self.tasks.push(task);
        task_id
    }

    /// Replaces a stored task wholesale, bypassing the engine.
    pub fn put(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id() == task.id()) {
            *slot = task;
        } else {
            self.tasks.push(task);
        }
    }

    pub fn task(&self, task_id: TaskId) -> Task {
        self.tasks
            .iter()
            .find(|t| t.id() == task_id)
            .cloned()
            .unwrap()
    }

    pub fn events_for(&self, task_id: TaskId) -> Vec<&AuditEvent> {
        self.events
            .iter()
            .filter(|e| e.task_id == Some(task_id))
            .collect()
    }

    fn record(&mut self, event: &AuditEvent, task_id: TaskId) -> AuditEvent {
        let event_id: i64 = i64::try_from(self.events.len()).unwrap() + 1;
        let stored: AuditEvent = event.clone().for_task(task_id).with_event_id(event_id);
        self.events.push(stored.clone());
        stored
    }
}

impl TaskStore for MemoryTaskStore {
    fn get_task(&mut self, task_id: TaskId) -> Result<Task, StoreError> {
        self.tasks
            .iter()
            .find(|t| t.id() == task_id)
            .cloned()
            .ok_or(StoreError::NotFound(task_id))
    }

    fn insert_task(
        &mut self,
        charity_id: CharityId,
        details: &TaskDetails,
        audit_event: &AuditEvent,
    ) -> Result<Task, StoreError> {
        let task_id: TaskId = TaskId::new(i64::try_from(self.tasks.len()).unwrap() + 1);
        let task: Task = Task::from_parts(
            task_id,
            TaskState::Pending,
            charity_id,
            None,
            details.clone(),
        )
        .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.tasks.push(task.clone());
        self.record(audit_event, task_id);
        Ok(task)
    }

    fn conditional_update(
        &mut self,
        task_id: TaskId,
        expected: &TaskUpdate,
        update: &TaskUpdate,
        audit_event: &AuditEvent,
    ) -> Result<UpdateOutcome, StoreError> {
        let current: Task = self.get_task(task_id)?;
        if TaskUpdate::from_task(&current) != *expected {
            return Ok(UpdateOutcome::PreconditionFailed);
        }
        let updated: Task = current
            .with_state(update.state, update.assigned_benefactor_id)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.put(updated);
        Ok(UpdateOutcome::Applied(self.record(audit_event, task_id)))
    }

    fn query_tasks(&mut self, query: &TaskQuery) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect())
    }
}

/// Serves one stale read before delegating, simulating a writer that
/// committed between this caller's load and its conditional update.
pub struct StaleReadStore<'a> {
    pub inner: &'a mut MemoryTaskStore,
    pub stale: Option<Task>,
}

impl TaskStore for StaleReadStore<'_> {
    fn get_task(&mut self, task_id: TaskId) -> Result<Task, StoreError> {
        match self.stale.take() {
            Some(task) if task.id() == task_id => Ok(task),
            _ => self.inner.get_task(task_id),
        }
    }

    fn insert_task(
        &mut self,
        charity_id: CharityId,
        details: &TaskDetails,
        audit_event: &AuditEvent,
    ) -> Result<Task, StoreError> {
        self.inner.insert_task(charity_id, details, audit_event)
    }

    fn conditional_update(
        &mut self,
        task_id: TaskId,
        expected: &TaskUpdate,
        update: &TaskUpdate,
        audit_event: &AuditEvent,
    ) -> Result<UpdateOutcome, StoreError> {
        self.inner
            .conditional_update(task_id, expected, update, audit_event)
    }

    fn query_tasks(&mut self, query: &TaskQuery) -> Result<Vec<Task>, StoreError> {
        self.inner.query_tasks(query)
    }
}
