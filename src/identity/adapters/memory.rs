//! In-memory identity provider for tests.

use std::sync::RwLock;

use crate::identity::domain::UserIdentity;
use crate::identity::ports::IdentityProvider;

/// Identity provider backed by an in-process slot.
///
/// Starts signed out; tests sign an identity in and out explicitly.
/// Thread-safe via an internal [`RwLock`]. Not suitable for production
/// use.
#[derive(Debug, Default)]
pub struct FixedIdentityProvider {
    identity: RwLock<Option<UserIdentity>>,
}

impl FixedIdentityProvider {
    /// Creates a provider with no signed-in identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider with `identity` already signed in.
    #[must_use]
    pub fn signed_in(identity: UserIdentity) -> Self {
        Self {
            identity: RwLock::new(Some(identity)),
        }
    }

    /// Signs `identity` in, replacing any previous identity.
    pub fn sign_in(&self, identity: UserIdentity) {
        if let Ok(mut slot) = self.identity.write() {
            *slot = Some(identity);
        }
    }

    /// Signs the current identity out.
    pub fn sign_out(&self) {
        if let Ok(mut slot) = self.identity.write() {
            *slot = None;
        }
    }
}

impl IdentityProvider for FixedIdentityProvider {
    fn current_identity(&self) -> Option<UserIdentity> {
        self.identity.read().ok().and_then(|slot| slot.clone())
    }
}
