// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use charity_tasks::Caller;
use charity_tasks_audit::Cause;
use charity_tasks_persistence::Persistence;

use crate::{
    AuthenticationService, CreateTaskRequest, RegisterBenefactorRequest, RegisterCharityRequest,
    TaskResponse, create_task, register_benefactor, register_charity,
};

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn resolve(persistence: &mut Persistence, user_id: &str) -> Caller {
    AuthenticationService::resolve(persistence, Some(user_id)).unwrap()
}

/// Registers a charity for `user_id` and returns the refreshed caller.
pub fn create_charity_caller(persistence: &mut Persistence, user_id: &str) -> Caller {
    let member: Caller = resolve(persistence, user_id);
    register_charity(
        persistence,
        &member,
        RegisterCharityRequest {
            name: format!("{user_id} trust"),
            reg_number: String::from("C-100"),
        },
    )
    .unwrap();
    resolve(persistence, user_id)
}

/// Registers a benefactor for `user_id` and returns the refreshed caller.
pub fn create_benefactor_caller(persistence: &mut Persistence, user_id: &str) -> Caller {
    let member: Caller = resolve(persistence, user_id);
    register_benefactor(
        persistence,
        &member,
        &RegisterBenefactorRequest {
            experience: 1,
            free_time_per_week: 12,
        },
    )
    .unwrap();
    resolve(persistence, user_id)
}

pub fn create_valid_task_request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        ..CreateTaskRequest::default()
    }
}

pub fn create_test_task(persistence: &mut Persistence, charity: &Caller) -> TaskResponse {
    create_task(
        persistence,
        charity,
        create_valid_task_request("Deliver groceries"),
        create_test_cause(),
    )
    .unwrap()
}
