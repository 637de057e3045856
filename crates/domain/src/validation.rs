// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{BenefactorProfile, CharityProfile, TaskDetails};
use time::Date;
use time::macros::format_description;

/// Maximum number of characters in a task title.
pub const MAX_TITLE_LENGTH: usize = 60;
/// Maximum number of characters in a task description.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
/// Maximum number of characters in a charity name.
pub const MAX_CHARITY_NAME_LENGTH: usize = 50;
/// Maximum number of characters in a charity registration number.
pub const MAX_REG_NUMBER_LENGTH: usize = 10;
/// Maximum number of characters in a user identifier.
pub const MAX_USER_ID_LENGTH: usize = 150;
/// Hours in a week.
pub const MAX_FREE_TIME_PER_WEEK: u16 = 168;

/// Validates the descriptive fields of a task.
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty after trimming or longer than 60 characters
/// - The description is longer than 1000 characters
/// - Both age limits are set and the lower bound exceeds the upper bound
pub fn validate_task_details(details: &TaskDetails) -> Result<(), DomainError> {
    let title: &str = details.title.trim();
    if title.is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(DomainError::InvalidTitle(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }

    let description_length: usize = details
        .description
        .as_deref()
        .map_or(0, |d| d.chars().count());
    if description_length > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::InvalidDescription(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }

    match (details.age_limit_from, details.age_limit_to) {
        (Some(from), Some(to)) if from > to => Err(DomainError::InvalidAgeLimits { from, to }),
        _ => Ok(()),
    }
}

/// Validates a charity registration.
///
/// # Errors
///
/// Returns an error if the name or registration number is empty after
/// trimming or exceeds its length limit.
pub fn validate_charity_profile(profile: &CharityProfile) -> Result<(), DomainError> {
    let name: &str = profile.name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidCharityName(String::from(
            "Name cannot be empty",
        )));
    }
    if name.chars().count() > MAX_CHARITY_NAME_LENGTH {
        return Err(DomainError::InvalidCharityName(format!(
            "Name must be at most {MAX_CHARITY_NAME_LENGTH} characters"
        )));
    }

    let reg_number: &str = profile.reg_number.trim();
    if reg_number.is_empty() {
        return Err(DomainError::InvalidRegNumber(String::from(
            "Registration number cannot be empty",
        )));
    }
    if reg_number.chars().count() > MAX_REG_NUMBER_LENGTH {
        return Err(DomainError::InvalidRegNumber(format!(
            "Registration number must be at most {MAX_REG_NUMBER_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validates a benefactor registration.
///
/// Experience is range-checked when it is parsed into
/// [`crate::Experience`], so only weekly free time is checked here.
///
/// # Errors
///
/// Returns an error if the free time exceeds 168 hours.
pub const fn validate_benefactor_profile(profile: &BenefactorProfile) -> Result<(), DomainError> {
    if profile.free_time_per_week > MAX_FREE_TIME_PER_WEEK {
        return Err(DomainError::InvalidFreeTime(profile.free_time_per_week));
    }
    Ok(())
}

/// Validates a user identifier supplied by the identity layer.
///
/// # Errors
///
/// Returns an error if the identifier is blank or longer than 150 characters.
pub fn validate_user_id(user_id: &str) -> Result<(), DomainError> {
    if user_id.trim().is_empty() {
        return Err(DomainError::InvalidUserId(String::from(
            "User id cannot be empty",
        )));
    }
    if user_id.chars().count() > MAX_USER_ID_LENGTH {
        return Err(DomainError::InvalidUserId(format!(
            "User id must be at most {MAX_USER_ID_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDate`] if the string is not a valid date.
pub fn parse_task_date(date_string: &str) -> Result<Date, DomainError> {
    Date::parse(date_string, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::InvalidDate {
            date_string: date_string.to_string(),
            error: e.to_string(),
        }
    })
}
