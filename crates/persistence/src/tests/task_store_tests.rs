// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use charity_tasks::{StoreError, TaskStore, TaskUpdate, UpdateOutcome};
use charity_tasks_domain::{
    BenefactorId, CharityId, GenderLimit, Task, TaskDetails, TaskId, TaskState, parse_task_date,
};

use super::{create_test_event, register_benefactor, register_charity};

fn setup() -> (Persistence, CharityId, BenefactorId) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let charity_id: CharityId = register_charity(&mut persistence, "alice")
        .charity_id()
        .unwrap();
    let benefactor_id: BenefactorId = register_benefactor(&mut persistence, "bob")
        .benefactor_id()
        .unwrap();
    (persistence, charity_id, benefactor_id)
}

const fn unassigned(state: TaskState) -> TaskUpdate {
    TaskUpdate {
        state,
        assigned_benefactor_id: None,
    }
}

#[test]
fn test_insert_task_round_trips_all_fields() {
    let (mut persistence, charity_id, _) = setup();
    let details: TaskDetails = TaskDetails {
        title: String::from("Paint the shelter"),
        description: Some(String::from("Two coats")),
        date: Some(parse_task_date("2026-05-01").unwrap()),
        age_limit_from: Some(18),
        age_limit_to: Some(65),
        gender_limit: Some(GenderLimit::Female),
    };

    let inserted: Task = persistence
        .insert_task(charity_id, &details, &create_test_event("CreateTask"))
        .unwrap();
    assert_eq!(inserted.state(), TaskState::Pending);
    assert_eq!(inserted.assigned_benefactor_id(), None);

    let loaded: Task = persistence.get_task(inserted.id()).unwrap();
    assert_eq!(loaded, inserted);
    assert_eq!(loaded.details(), &details);
}

#[test]
fn test_insert_task_records_creation_event() {
    let (mut persistence, charity_id, _) = setup();
    let task: Task = persistence
        .insert_task(
            charity_id,
            &TaskDetails::titled("Sort donations"),
            &create_test_event("CreateTask"),
        )
        .unwrap();

    let events = persistence.list_task_events(task.id()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action.name, "CreateTask");
    assert_eq!(events[0].task_id, Some(task.id()));
    assert!(events[0].event_id.is_some());
}

#[test]
fn test_get_missing_task_is_not_found() {
    let (mut persistence, _, _) = setup();
    let result = persistence.get_task(TaskId::new(999));
    assert_eq!(result, Err(StoreError::NotFound(TaskId::new(999))));
}

#[test]
fn test_insert_task_for_unknown_charity_fails() {
    let (mut persistence, _, _) = setup();
    let result = persistence.insert_task(
        CharityId::new(999),
        &TaskDetails::titled("Orphan"),
        &create_test_event("CreateTask"),
    );
    assert!(matches!(result, Err(StoreError::Backend(_))));
}

#[test]
fn test_conditional_update_applies_and_records_event() {
    let (mut persistence, charity_id, benefactor_id) = setup();
    let task: Task = persistence
        .insert_task(
            charity_id,
            &TaskDetails::titled("Sort donations"),
            &create_test_event("CreateTask"),
        )
        .unwrap();

    let update: TaskUpdate = TaskUpdate {
        state: TaskState::Waiting,
        assigned_benefactor_id: Some(benefactor_id),
    };
    let outcome: UpdateOutcome = persistence
        .conditional_update(
            task.id(),
            &unassigned(TaskState::Pending),
            &update,
            &create_test_event("RequestTask"),
        )
        .unwrap();

    let UpdateOutcome::Applied(event) = outcome else {
        panic!("expected the update to apply");
    };
    assert_eq!(event.task_id, Some(task.id()));
    assert!(event.event_id.is_some());

    let loaded: Task = persistence.get_task(task.id()).unwrap();
    assert_eq!(loaded.state(), TaskState::Waiting);
    assert_eq!(loaded.assigned_benefactor_id(), Some(benefactor_id));

    let stored = persistence
        .get_audit_event(event.event_id.unwrap())
        .unwrap();
    assert_eq!(stored.action.name, "RequestTask");
}

#[test]
fn test_conditional_update_with_stale_state_writes_nothing() {
    let (mut persistence, charity_id, benefactor_id) = setup();
    let task: Task = persistence
        .insert_task(
            charity_id,
            &TaskDetails::titled("Sort donations"),
            &create_test_event("CreateTask"),
        )
        .unwrap();
    let update: TaskUpdate = TaskUpdate {
        state: TaskState::Waiting,
        assigned_benefactor_id: Some(benefactor_id),
    };

    let first: UpdateOutcome = persistence
        .conditional_update(
            task.id(),
            &unassigned(TaskState::Pending),
            &update,
            &create_test_event("RequestTask"),
        )
        .unwrap();
    assert!(matches!(first, UpdateOutcome::Applied(_)));

    let second: UpdateOutcome = persistence
        .conditional_update(
            task.id(),
            &unassigned(TaskState::Pending),
            &update,
            &create_test_event("RequestTask"),
        )
        .unwrap();
    assert_eq!(second, UpdateOutcome::PreconditionFailed);

    // CreateTask plus one RequestTask.
    assert_eq!(persistence.list_task_events(task.id()).unwrap().len(), 2);
}

#[test]
fn test_conditional_update_on_missing_task_is_not_found() {
    let (mut persistence, _, _) = setup();
    let result = persistence.conditional_update(
        TaskId::new(404),
        &unassigned(TaskState::Pending),
        &TaskUpdate {
            state: TaskState::Waiting,
            assigned_benefactor_id: None,
        },
        &create_test_event("RequestTask"),
    );
    assert_eq!(result, Err(StoreError::NotFound(TaskId::new(404))));
}

#[test]
fn test_schema_rejects_waiting_task_without_assignee() {
    let (mut persistence, charity_id, _) = setup();
    let task: Task = persistence
        .insert_task(
            charity_id,
            &TaskDetails::titled("Sort donations"),
            &create_test_event("CreateTask"),
        )
        .unwrap();

    let result = persistence.conditional_update(
        task.id(),
        &unassigned(TaskState::Pending),
        &TaskUpdate {
            state: TaskState::Waiting,
            assigned_benefactor_id: None,
        },
        &create_test_event("RequestTask"),
    );
    assert!(matches!(result, Err(StoreError::Backend(_))));

    let loaded: Task = persistence.get_task(task.id()).unwrap();
    assert_eq!(loaded.state(), TaskState::Pending);
    assert_eq!(persistence.list_task_events(task.id()).unwrap().len(), 1);
}

#[test]
fn test_conditional_update_requires_expected_assignee() {
    let (mut persistence, charity_id, bob) = setup();
    let carol: BenefactorId = register_benefactor(&mut persistence, "carol")
        .benefactor_id()
        .unwrap();
    let task: Task = persistence
        .insert_task(
            charity_id,
            &TaskDetails::titled("Sort donations"),
            &create_test_event("CreateTask"),
        )
        .unwrap();
    let waiting_for = |benefactor_id: BenefactorId| TaskUpdate {
        state: TaskState::Waiting,
        assigned_benefactor_id: Some(benefactor_id),
    };
    let assigned_to = |benefactor_id: BenefactorId| TaskUpdate {
        state: TaskState::Assigned,
        assigned_benefactor_id: Some(benefactor_id),
    };

    let claimed: UpdateOutcome = persistence
        .conditional_update(
            task.id(),
            &unassigned(TaskState::Pending),
            &waiting_for(carol),
            &create_test_event("RequestTask"),
        )
        .unwrap();
    assert!(matches!(claimed, UpdateOutcome::Applied(_)));

    // Same state, different assignee.
    let stale: UpdateOutcome = persistence
        .conditional_update(
            task.id(),
            &waiting_for(bob),
            &assigned_to(bob),
            &create_test_event("AcceptRequest"),
        )
        .unwrap();
    assert_eq!(stale, UpdateOutcome::PreconditionFailed);

    let loaded: Task = persistence.get_task(task.id()).unwrap();
    assert_eq!(loaded.state(), TaskState::Waiting);
    assert_eq!(loaded.assigned_benefactor_id(), Some(carol));
    assert_eq!(persistence.list_task_events(task.id()).unwrap().len(), 2);
}
