// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::capability::Capability;
use charity_tasks_audit::Actor;
use charity_tasks_domain::{BenefactorId, CharityId};

/// The role a caller acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The caller owns the given charity.
    CharityOwner(CharityId),
    /// The caller is registered as the given benefactor.
    Benefactor(BenefactorId),
    /// Authenticated, but with no registered profile.
    Member,
    Unauthenticated,
}

/// The resolved identity of whoever issued an operation.
///
/// A user may hold a charity profile and a benefactor profile at the same
/// time; both are carried so authorization can use the union of roles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caller {
    user_id: Option<String>,
    charity_id: Option<CharityId>,
    benefactor_id: Option<BenefactorId>,
}

impl Caller {
    /// A caller with no identity.
    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self {
            user_id: None,
            charity_id: None,
            benefactor_id: None,
        }
    }

    /// An authenticated caller with whatever profiles they have registered.
    #[must_use]
    pub const fn authenticated(
        user_id: String,
        charity_id: Option<CharityId>,
        benefactor_id: Option<BenefactorId>,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            charity_id,
            benefactor_id,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    #[must_use]
    pub const fn charity_id(&self) -> Option<CharityId> {
        self.charity_id
    }

    #[must_use]
    pub const fn benefactor_id(&self) -> Option<BenefactorId> {
        self.benefactor_id
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Returns the primary role of this caller.
    ///
    /// A charity profile takes precedence over a benefactor profile.
    #[must_use]
    pub const fn current_role(&self) -> Role {
        if self.user_id.is_none() {
            return Role::Unauthenticated;
        }
        match (self.charity_id, self.benefactor_id) {
            (Some(charity_id), _) => Role::CharityOwner(charity_id),
            (None, Some(benefactor_id)) => Role::Benefactor(benefactor_id),
            (None, None) => Role::Member,
        }
    }

    /// Returns whether this caller holds the given capability.
    #[must_use]
    pub const fn holds(&self, capability: Capability) -> bool {
        if self.user_id.is_none() {
            return false;
        }
        match capability {
            Capability::Authenticated => true,
            Capability::CharityOwner => self.charity_id.is_some(),
            Capability::Benefactor => self.benefactor_id.is_some(),
        }
    }

    /// Returns every capability this caller holds.
    #[must_use]
    pub fn capabilities(&self) -> Vec<Capability> {
        [
            Capability::Authenticated,
            Capability::CharityOwner,
            Capability::Benefactor,
        ]
        .into_iter()
        .filter(|c| self.holds(*c))
        .collect()
    }

    /// Builds the audit actor for an operation performed in `role_name`.
    #[must_use]
    pub fn actor(&self, role_name: &str) -> Actor {
        Actor::new(
            self.user_id
                .clone()
                .unwrap_or_else(|| String::from("anonymous")),
            role_name.to_string(),
        )
    }
}
