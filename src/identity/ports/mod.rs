//! Port contracts for the authentication collaborator.

use crate::identity::domain::UserIdentity;

/// Source of the currently signed-in identity.
///
/// Implementations wrap whatever authentication service backs the
/// deployment. Lookups are synchronous: providers answer from locally
/// cached session state, so no async boundary is involved.
pub trait IdentityProvider: Send + Sync {
    /// Returns the currently signed-in identity, or `None` when no user
    /// is signed in.
    fn current_identity(&self) -> Option<UserIdentity>;
}
