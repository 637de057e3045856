// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod caller;
mod capability;
mod command;
mod engine;
mod error;
mod filter;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_create};
pub use caller::{Caller, Role};
pub use capability::{Capability, TaskAction, authorize, required_capability};
pub use command::Command;
pub use engine::{
    complete_task, create_task, execute, get_owned_task, get_visible_task, list_tasks,
    request_task, respond_to_task,
};
pub use error::CoreError;
pub use filter::{
    EXCLUDING_LOOKUPS, FILTERING_LOOKUPS, FieldFilter, TaskField, TaskQuery, VisibilityScope,
};
pub use state::{CreateResult, TransitionResult};
pub use store::{StoreError, TaskStore, TaskUpdate, UpdateOutcome};
