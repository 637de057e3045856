// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller extraction for the server.
//!
//! The upstream authentication layer vouches for the user and forwards the
//! user id in the `X-User-Id` header. A missing header yields an
//! unauthenticated caller, which every route then rejects with 401.

use axum::{extract::FromRequestParts, http::request::Parts};
use charity_tasks::Caller;
use charity_tasks_api::{ApiError, AuthenticationService};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor resolving the request's caller.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(Identity(caller): Identity) -> Result<Json<Response>, HttpError> {
///     // caller: charity_tasks::Caller
/// }
/// ```
pub struct Identity(pub Caller);

impl FromRequestParts<AppState> for Identity {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id: Option<&str> = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| {
                warn!("Invalid {USER_ID_HEADER} header encoding");
                HttpError::from(ApiError::AuthenticationFailed {
                    reason: format!("Invalid {USER_ID_HEADER} header"),
                })
            })?),
            None => {
                debug!("No {USER_ID_HEADER} header");
                None
            }
        };

        let caller: Caller =
            AuthenticationService::resolve(&mut *state.persistence.lock().await, user_id)?;
        Ok(Self(caller))
    }
}
