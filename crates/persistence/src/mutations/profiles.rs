// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use charity_tasks_domain::{
    Benefactor, BenefactorId, BenefactorProfile, Charity, CharityId, CharityProfile,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{benefactors, charities};
use crate::error::PersistenceError;
use crate::queries::profiles::{find_benefactor_by_user, find_charity_by_user};

/// Registers a charity for a user.
///
/// # Errors
///
/// Returns [`PersistenceError::AlreadyRegistered`] if the user already owns
/// a charity.
pub fn insert_charity(
    conn: &mut SqliteConnection,
    user_id: &str,
    profile: &CharityProfile,
) -> Result<Charity, PersistenceError> {
    conn.immediate_transaction::<Charity, PersistenceError, _>(|conn| {
        if find_charity_by_user(conn, user_id)?.is_some() {
            return Err(PersistenceError::AlreadyRegistered {
                profile: "charity",
                user_id: user_id.to_string(),
            });
        }

        diesel::insert_into(charities::table)
            .values((
                charities::user_id.eq(user_id),
                charities::name.eq(profile.name.trim()),
                charities::reg_number.eq(profile.reg_number.trim()),
            ))
            .execute(conn)?;

        let charity_id: i64 = conn.get_last_insert_rowid()?;
        info!(charity_id, user_id, "Registered charity");

        Ok(Charity {
            id: CharityId::new(charity_id),
            user_id: user_id.to_string(),
            profile: CharityProfile {
                name: profile.name.trim().to_string(),
                reg_number: profile.reg_number.trim().to_string(),
            },
        })
    })
}

/// Registers a benefactor profile for a user.
///
/// # Errors
///
/// Returns [`PersistenceError::AlreadyRegistered`] if the user already has
/// a benefactor profile.
pub fn insert_benefactor(
    conn: &mut SqliteConnection,
    user_id: &str,
    profile: BenefactorProfile,
) -> Result<Benefactor, PersistenceError> {
    conn.immediate_transaction::<Benefactor, PersistenceError, _>(|conn| {
        if find_benefactor_by_user(conn, user_id)?.is_some() {
            return Err(PersistenceError::AlreadyRegistered {
                profile: "benefactor",
                user_id: user_id.to_string(),
            });
        }

        diesel::insert_into(benefactors::table)
            .values((
                benefactors::user_id.eq(user_id),
                benefactors::experience.eq(profile.experience.level()),
                benefactors::free_time_per_week.eq(i32::from(profile.free_time_per_week)),
            ))
            .execute(conn)?;

        let benefactor_id: i64 = conn.get_last_insert_rowid()?;
        info!(benefactor_id, user_id, "Registered benefactor");

        Ok(Benefactor {
            id: BenefactorId::new(benefactor_id),
            user_id: user_id.to_string(),
            profile,
        })
    })
}
