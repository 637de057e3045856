// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `tasks`: task lookup and filtered listing
//! - `profiles`: charity and benefactor lookup by user
//! - `audit`: per-task audit history

pub mod audit;
pub mod profiles;
pub mod tasks;

pub use audit::{get_audit_event, list_task_events};
pub use profiles::{find_benefactor_by_user, find_charity_by_user};
pub use tasks::{get_task, query_tasks, task_exists};
