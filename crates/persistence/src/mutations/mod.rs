// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `audit`: audit event persistence
//! - `profiles`: charity and benefactor registration
//! - `tasks`: task creation and the conditional lifecycle update
//!
//! Every task mutation writes its audit event inside the same transaction.

pub mod audit;
pub mod profiles;
pub mod tasks;

pub use audit::persist_audit_event;
pub use profiles::{insert_benefactor, insert_charity};
pub use tasks::{conditional_update, insert_task};
