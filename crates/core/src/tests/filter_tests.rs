// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Caller, CoreError, FieldFilter, TaskField, TaskQuery, VisibilityScope, list_tasks};
use charity_tasks_domain::{
    BenefactorId, CharityId, GenderLimit, Task, TaskDetails, TaskId, TaskState,
};

use super::helpers::{MemoryTaskStore, benefactor_caller, charity_caller, member_caller};

const NO_PARAMS: [(&str, &str); 0] = [];

fn seeded_store() -> MemoryTaskStore {
    let mut store: MemoryTaskStore = MemoryTaskStore::new();
    store.seed(TaskState::Pending, 1, None); // 1
    store.seed(TaskState::Waiting, 1, Some(7)); // 2
    store.seed(TaskState::Assigned, 2, Some(8)); // 3
    store.seed(TaskState::Done, 2, None); // 4
    store.seed(TaskState::Pending, 2, None); // 5
    store
}

fn ids(tasks: &[Task]) -> Vec<i64> {
    tasks.iter().map(|t| t.id().value()).collect()
}

#[test]
fn test_member_sees_only_pending() {
    let mut store: MemoryTaskStore = seeded_store();
    let tasks: Vec<Task> = list_tasks(&mut store, &member_caller(), NO_PARAMS).unwrap();
    assert_eq!(ids(&tasks), vec![1, 5]);
}

#[test]
fn test_charity_sees_own_tasks_and_pending() {
    let mut store: MemoryTaskStore = seeded_store();
    let tasks: Vec<Task> = list_tasks(&mut store, &charity_caller(2), NO_PARAMS).unwrap();
    assert_eq!(ids(&tasks), vec![1, 3, 4, 5]);
}

#[test]
fn test_benefactor_sees_assigned_to_them_and_pending() {
    let mut store: MemoryTaskStore = seeded_store();
    let tasks: Vec<Task> = list_tasks(&mut store, &benefactor_caller(7), NO_PARAMS).unwrap();
    assert_eq!(ids(&tasks), vec![1, 2, 5]);
}

#[test]
fn test_unauthenticated_cannot_list() {
    let mut store: MemoryTaskStore = seeded_store();
    let result = list_tasks(&mut store, &Caller::unauthenticated(), NO_PARAMS);
    assert_eq!(result.unwrap_err(), CoreError::Unauthenticated);
}

#[test]
fn test_unauthenticated_scope_is_pending_only() {
    let scope: VisibilityScope = VisibilityScope::for_caller(&Caller::unauthenticated());
    let store: MemoryTaskStore = seeded_store();
    assert!(scope.admits(&store.task(TaskId::new(1))));
    assert!(!scope.admits(&store.task(TaskId::new(2))));
    assert!(!scope.admits(&store.task(TaskId::new(4))));
}

#[test]
fn test_filters_and_excludes_compose_with_and() {
    let mut store: MemoryTaskStore = seeded_store();
    let tasks: Vec<Task> = list_tasks(
        &mut store,
        &charity_caller(2),
        [("charity", "2"), ("exclude_state", "D")],
    )
    .unwrap();
    assert_eq!(ids(&tasks), vec![3, 5]);
}

#[test]
fn test_unknown_and_malformed_params_are_ignored() {
    let mut store: MemoryTaskStore = seeded_store();
    let tasks: Vec<Task> = list_tasks(
        &mut store,
        &charity_caller(2),
        [
            ("state", "Z"),
            ("charity", "two"),
            ("colour", "blue"),
            ("benefactor", ""),
        ],
    )
    .unwrap();
    assert_eq!(ids(&tasks), vec![1, 3, 4, 5]);
}

#[test]
fn test_exclusion_keeps_null_columns() {
    let mut store: MemoryTaskStore = seeded_store();
    let tasks: Vec<Task> = list_tasks(
        &mut store,
        &charity_caller(2),
        [("exclude_benefactor", "8")],
    )
    .unwrap();
    // Task 3 is assigned to 8; unassigned tasks stay.
    assert_eq!(ids(&tasks), vec![1, 4, 5]);
}

#[test]
fn test_inclusion_on_nullable_column_drops_nulls() {
    let mut store: MemoryTaskStore = seeded_store();
    let tasks: Vec<Task> =
        list_tasks(&mut store, &charity_caller(2), [("benefactor", "8")]).unwrap();
    assert_eq!(ids(&tasks), vec![3]);
}

#[test]
fn test_gender_and_title_filters() {
    let female: Task = Task::from_parts(
        TaskId::new(1),
        TaskState::Pending,
        CharityId::new(1),
        None,
        TaskDetails {
            gender_limit: Some(GenderLimit::Female),
            ..TaskDetails::titled("Knit scarves")
        },
    )
    .unwrap();
    let open: Task = Task::from_parts(
        TaskId::new(2),
        TaskState::Pending,
        CharityId::new(1),
        None,
        TaskDetails::titled("Bake bread"),
    )
    .unwrap();

    let caller: Caller = member_caller();
    let by_gender: TaskQuery = TaskQuery::from_params(&caller, [("gender", "F")]);
    assert!(by_gender.matches(&female));
    assert!(!by_gender.matches(&open));

    let not_female: TaskQuery = TaskQuery::from_params(&caller, [("exclude_gender", "F")]);
    assert!(!not_female.matches(&female));
    assert!(not_female.matches(&open));

    let by_title: TaskQuery = TaskQuery::from_params(&caller, [("title", "Bake bread")]);
    assert!(by_title.matches(&open));
    assert!(!by_title.matches(&female));
}

#[test]
fn test_field_parsing() {
    assert_eq!(
        TaskField::State.parse("W"),
        Some(FieldFilter::State(TaskState::Waiting))
    );
    assert_eq!(
        TaskField::AssignedBenefactorId.parse("9"),
        Some(FieldFilter::Benefactor(BenefactorId::new(9)))
    );
    assert_eq!(TaskField::CharityId.parse("x"), None);
    assert_eq!(TaskField::Title.parse(""), None);
}

#[test]
fn test_title_is_filterable_but_not_excludable() {
    let query: TaskQuery = TaskQuery::from_params(&member_caller(), [("exclude_title", "x")]);
    assert!(query.excludes.is_empty());
    assert!(query.filters.is_empty());
}

#[test]
fn test_repeated_parameter_uses_last_value() {
    let query: TaskQuery =
        TaskQuery::from_params(&member_caller(), [("state", "P"), ("state", "W")]);
    assert_eq!(query.filters, vec![FieldFilter::State(TaskState::Waiting)]);

    let mut store: MemoryTaskStore = seeded_store();
    let tasks: Vec<Task> = list_tasks(
        &mut store,
        &charity_caller(1),
        [("state", "P"), ("state", "W")],
    )
    .unwrap();
    assert_eq!(ids(&tasks), vec![2]);
}

#[test]
fn test_empty_last_value_clears_repeated_parameter() {
    let query: TaskQuery = TaskQuery::from_params(
        &member_caller(),
        [("exclude_state", "P"), ("exclude_state", "")],
    );
    assert!(query.excludes.is_empty());

    let malformed_last: TaskQuery =
        TaskQuery::from_params(&member_caller(), [("charity", "1"), ("charity", "one")]);
    assert!(malformed_last.filters.is_empty());
}

#[test]
fn test_null_column_never_matches_a_filter() {
    let unassigned: Task = Task::from_parts(
        TaskId::new(1),
        TaskState::Pending,
        CharityId::new(1),
        None,
        TaskDetails::titled("Bake bread"),
    )
    .unwrap();
    assert!(!FieldFilter::Benefactor(BenefactorId::new(3)).matches(&unassigned));
    assert!(!FieldFilter::Gender(GenderLimit::Male).matches(&unassigned));
    assert!(FieldFilter::State(TaskState::Pending).matches(&unassigned));
}
