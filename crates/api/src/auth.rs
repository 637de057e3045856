// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity resolution and authorization services.
//!
//! Credential handling lives upstream. This layer receives the user id the
//! upstream authenticator vouched for and resolves it to a [`Caller`].

use charity_tasks::{Caller, TaskAction, required_capability};
use charity_tasks_domain::validate_user_id;
use charity_tasks_persistence::Persistence;
use tracing::debug;

use crate::error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};

/// Resolves user identities to callers.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Resolves the caller for a request.
    ///
    /// A missing or blank user id yields an unauthenticated caller; the
    /// authorization check of whatever operation follows rejects it.
    ///
    /// # Errors
    ///
    /// Returns an error if the user id is malformed or the profile lookup
    /// fails.
    pub fn resolve(
        persistence: &mut Persistence,
        user_id: Option<&str>,
    ) -> Result<Caller, ApiError> {
        let Some(user_id) = user_id.map(str::trim).filter(|id| !id.is_empty()) else {
            debug!("No user identity supplied");
            return Ok(Caller::unauthenticated());
        };

        validate_user_id(user_id).map_err(translate_domain_error)?;

        let caller: Caller = persistence
            .resolve_caller(user_id)
            .map_err(translate_persistence_error)?;
        debug!(
            user_id,
            role = ?caller.current_role(),
            "Resolved caller"
        );
        Ok(caller)
    }
}

/// Authorization service for the capability table.
///
/// Every API handler checks here before touching the engine, and the engine
/// checks the same table again. The server adds one earlier check only on
/// routes that read a body, so a missing role is reported before a bad body.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks whether `caller` may perform `action`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AuthenticationFailed`] for an unauthenticated
    /// caller and [`AuthError::Unauthorized`] when the caller lacks the
    /// capability the action requires.
    pub fn authorize(caller: &Caller, action: TaskAction) -> Result<(), AuthError> {
        if !caller.is_authenticated() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Authentication credentials were not provided."),
            });
        }

        let required: charity_tasks::Capability = required_capability(action);
        if caller.holds(required) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: required.to_string(),
            })
        }
    }
}
