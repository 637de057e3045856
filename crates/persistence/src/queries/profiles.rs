// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use charity_tasks_domain::{Benefactor, Charity};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{BenefactorRow, CharityRow};
use crate::diesel_schema::{benefactors, charities};
use crate::error::PersistenceError;

/// Looks up the charity owned by a user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_charity_by_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<Charity>, PersistenceError> {
    let row: Option<CharityRow> = charities::table
        .filter(charities::user_id.eq(user_id))
        .select(CharityRow::as_select())
        .first::<CharityRow>(conn)
        .optional()?;
    Ok(row.map(Charity::from))
}

/// Looks up the benefactor profile of a user.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is out of range.
pub fn find_benefactor_by_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<Benefactor>, PersistenceError> {
    let row: Option<BenefactorRow> = benefactors::table
        .filter(benefactors::user_id.eq(user_id))
        .select(BenefactorRow::as_select())
        .first::<BenefactorRow>(conn)
        .optional()?;
    row.map(BenefactorRow::into_benefactor).transpose()
}
