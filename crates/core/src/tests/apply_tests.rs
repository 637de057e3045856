// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Caller, Command, CoreError, CreateResult, TaskAction, TransitionResult, apply, apply_create,
};
use charity_tasks_domain::{
    BenefactorId, CharityId, Decision, DomainError, Task, TaskDetails, TaskId, TaskState,
};

use super::helpers::{benefactor_caller, charity_caller, create_test_cause};

fn create_task(state: TaskState, assignee: Option<i64>) -> Task {
    Task::from_parts(
        TaskId::new(1),
        state,
        CharityId::new(10),
        assignee.map(BenefactorId::new),
        TaskDetails::titled("Cook meals"),
    )
    .unwrap()
}

const TASK: TaskId = TaskId::new(1);

#[test]
fn test_request_moves_pending_to_waiting_with_requester() {
    let task: Task = create_task(TaskState::Pending, None);
    let result: TransitionResult = apply(
        &task,
        &benefactor_caller(5),
        Command::RequestTask { task_id: TASK },
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.expected.state, TaskState::Pending);
    assert_eq!(result.expected.assigned_benefactor_id, None);
    assert_eq!(result.new_task.state(), TaskState::Waiting);
    assert_eq!(
        result.new_task.assigned_benefactor_id(),
        Some(BenefactorId::new(5))
    );
    assert_eq!(result.audit_event.action.name, "RequestTask");
    assert_eq!(result.audit_event.actor.actor_type, "benefactor");
    assert_eq!(result.audit_event.task_id, Some(TASK));
    assert_eq!(result.audit_event.before.data, "state=P,assignee=-");
    assert_eq!(result.audit_event.after.data, "state=W,assignee=5");
}

#[test]
fn test_accept_preserves_assignee() {
    let task: Task = create_task(TaskState::Waiting, Some(5));
    let result: TransitionResult = apply(
        &task,
        &charity_caller(10),
        Command::RespondToTask {
            task_id: TASK,
            decision: Decision::Accept,
        },
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_task.state(), TaskState::Assigned);
    assert_eq!(
        result.new_task.assigned_benefactor_id(),
        Some(BenefactorId::new(5))
    );
    assert_eq!(result.audit_event.action.name, "AcceptRequest");
}

#[test]
fn test_reject_clears_assignee() {
    let task: Task = create_task(TaskState::Waiting, Some(5));
    let result: TransitionResult = apply(
        &task,
        &charity_caller(10),
        Command::RespondToTask {
            task_id: TASK,
            decision: Decision::Reject,
        },
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_task.state(), TaskState::Pending);
    assert_eq!(result.new_task.assigned_benefactor_id(), None);
    assert_eq!(result.audit_event.action.name, "RejectRequest");
}

#[test]
fn test_complete_moves_assigned_to_done() {
    let task: Task = create_task(TaskState::Assigned, Some(5));
    let result: TransitionResult = apply(
        &task,
        &charity_caller(10),
        Command::CompleteTask { task_id: TASK },
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_task.state(), TaskState::Done);
    assert_eq!(result.new_task.assigned_benefactor_id(), None);
}

#[test]
fn test_state_is_checked_before_ownership() {
    // Wrong state and wrong owner: the state error wins.
    let task: Task = create_task(TaskState::Pending, None);
    let result = apply(
        &task,
        &charity_caller(99),
        Command::RespondToTask {
            task_id: TASK,
            decision: Decision::Accept,
        },
        create_test_cause(),
    );

    match result {
        Err(CoreError::InvalidState {
            current, reason, ..
        }) => {
            assert_eq!(current, TaskState::Pending);
            assert_eq!(reason, "task is not waiting");
        }
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn test_non_owner_charity_is_forbidden_in_correct_state() {
    let task: Task = create_task(TaskState::Assigned, Some(5));
    let result = apply(
        &task,
        &charity_caller(99),
        Command::CompleteTask { task_id: TASK },
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::Forbidden {
            action: TaskAction::CompleteTask,
            ..
        })
    ));
}

#[test]
fn test_precondition_reasons() {
    let done: Task = create_task(TaskState::Done, None);
    let owner: Caller = charity_caller(10);

    let cases = [
        (
            Command::RequestTask { task_id: TASK },
            benefactor_caller(5),
            "task is not pending",
        ),
        (
            Command::RespondToTask {
                task_id: TASK,
                decision: Decision::Reject,
            },
            owner.clone(),
            "task is not waiting",
        ),
        (
            Command::CompleteTask { task_id: TASK },
            owner,
            "task is not assigned yet",
        ),
    ];

    for (command, caller, expected) in cases {
        let err: CoreError = apply(&done, &caller, command, create_test_cause()).unwrap_err();
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn test_charity_cannot_request_own_task() {
    let task: Task = create_task(TaskState::Pending, None);
    let both: Caller = Caller::authenticated(
        String::from("dual"),
        Some(CharityId::new(10)),
        Some(BenefactorId::new(5)),
    );

    let result = apply(
        &task,
        &both,
        Command::RequestTask { task_id: TASK },
        create_test_cause(),
    );
    assert!(matches!(result, Err(CoreError::Forbidden { .. })));
}

#[test]
fn test_apply_create_trims_title_and_builds_event() {
    let details: TaskDetails = TaskDetails::titled("  Plant trees  ");
    let result: CreateResult =
        apply_create(&charity_caller(10), details, create_test_cause()).unwrap();

    assert_eq!(result.charity_id, CharityId::new(10));
    assert_eq!(result.details.title, "Plant trees");
    assert_eq!(result.audit_event.action.name, "CreateTask");
    assert_eq!(result.audit_event.before.data, "none");
    assert_eq!(result.audit_event.after.data, "state=P,assignee=-");
}

#[test]
fn test_apply_create_rejects_invalid_details() {
    let result = apply_create(
        &charity_caller(10),
        TaskDetails::titled(""),
        create_test_cause(),
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidTitle(_)))
    ));
}

#[test]
fn test_apply_create_requires_charity() {
    let result = apply_create(
        &benefactor_caller(5),
        TaskDetails::titled("Plant trees"),
        create_test_cause(),
    );
    assert!(matches!(result, Err(CoreError::Forbidden { .. })));
}
