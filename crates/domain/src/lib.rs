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

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{
    Benefactor, BenefactorId, BenefactorProfile, Charity, CharityId, CharityProfile, Decision,
    Experience, GenderLimit, Task, TaskDetails, TaskId, TaskState,
};
pub use validation::{
    MAX_CHARITY_NAME_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_FREE_TIME_PER_WEEK,
    MAX_REG_NUMBER_LENGTH, MAX_TITLE_LENGTH, MAX_USER_ID_LENGTH, parse_task_date,
    validate_benefactor_profile, validate_charity_profile, validate_task_details,
    validate_user_id,
};
