// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use charity_tasks::{CoreError, TaskAction};
use charity_tasks_domain::{DomainError, TaskId, TaskState};
use charity_tasks_persistence::PersistenceError;

use crate::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};

#[test]
fn test_core_error_categories() {
    let cases: [(CoreError, &str); 6] = [
        (CoreError::Unauthenticated, "authentication_failed"),
        (
            CoreError::Forbidden {
                action: TaskAction::CompleteTask,
                reason: String::from("only the owning charity can do this"),
            },
            "forbidden",
        ),
        (CoreError::TaskNotFound(TaskId::new(3)), "not_found"),
        (
            CoreError::InvalidState {
                task_id: TaskId::new(3),
                current: TaskState::Done,
                reason: String::from("task is not assigned yet"),
            },
            "invalid_state",
        ),
        (
            CoreError::DomainViolation(DomainError::InvalidTitle(String::from("empty"))),
            "invalid_input",
        ),
        (CoreError::Store(String::from("disk full")), "internal"),
    ];

    for (err, category) in cases {
        assert_eq!(translate_core_error(err).category(), category);
    }
}

#[test]
fn test_invalid_state_detail_is_the_reason() {
    let err: ApiError = translate_core_error(CoreError::InvalidState {
        task_id: TaskId::new(3),
        current: TaskState::Assigned,
        reason: String::from("task is not pending"),
    });
    assert_eq!(err.to_string(), "task is not pending");
}

#[test]
fn test_domain_errors_name_the_offending_field() {
    let err: ApiError = translate_domain_error(DomainError::InvalidFreeTime(200));
    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "free_time_per_week"
    ));

    let err: ApiError = translate_domain_error(DomainError::InvalidUserId(String::from("blank")));
    assert_eq!(err.category(), "authentication_failed");
}

#[test]
fn test_persistence_errors() {
    let err: ApiError = translate_persistence_error(PersistenceError::AlreadyRegistered {
        profile: "benefactor",
        user_id: String::from("bob"),
    });
    assert_eq!(err.category(), "invalid_input");
    assert!(err.to_string().contains("bob"));

    let err: ApiError = translate_persistence_error(PersistenceError::TaskNotFound(9));
    assert_eq!(err.category(), "not_found");

    let err: ApiError =
        translate_persistence_error(PersistenceError::QueryFailed(String::from("boom")));
    assert_eq!(err.category(), "internal");
}
