// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod task_store_tests;

use crate::Persistence;
use charity_tasks::Caller;
use charity_tasks_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use charity_tasks_domain::{BenefactorProfile, CharityProfile, Experience};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_event(name: &str) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("test-actor"), String::from("charity")),
        create_test_cause(),
        Action::new(name.to_string(), None),
        StateSnapshot::new(String::from("before")),
        StateSnapshot::new(String::from("after")),
    )
}

/// Registers a charity for `user_id` and returns the resolved caller.
pub fn register_charity(persistence: &mut Persistence, user_id: &str) -> Caller {
    persistence
        .register_charity(
            user_id,
            &CharityProfile {
                name: format!("{user_id} foundation"),
                reg_number: String::from("REG-1"),
            },
        )
        .unwrap();
    persistence.resolve_caller(user_id).unwrap()
}

/// Registers a benefactor for `user_id` and returns the resolved caller.
pub fn register_benefactor(persistence: &mut Persistence, user_id: &str) -> Caller {
    persistence
        .register_benefactor(
            user_id,
            BenefactorProfile {
                experience: Experience::Intermediate,
                free_time_per_week: 10,
            },
        )
        .unwrap();
    persistence.resolve_caller(user_id).unwrap()
}

/// A unique database file path under the system temp directory.
pub fn temp_database_path() -> PathBuf {
    let n: u64 = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "charity_tasks_test_{}_{n}.db",
        std::process::id()
    ))
}

pub fn remove_database_files(path: &PathBuf) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
