//! Explicit session context threaded through the application.
//!
//! Screen-spanning state lives here instead of in process-wide mutable
//! globals: the context is constructed once at startup and handed to
//! whatever needs it through constructors, so every reader of session
//! state is visible in a signature.

use crate::adoption::domain::{Pet, PetId};
use crate::identity::domain::UserIdentity;
use crate::identity::ports::IdentityProvider;
use std::sync::Arc;

/// Per-process session state.
///
/// Owns the identity port handle and the adoption shortlist the user
/// builds while browsing. Constructed once at process start; screens
/// receive it by reference or clone of the inner handles, never through
/// ambient globals.
pub struct SessionContext<I>
where
    I: IdentityProvider,
{
    identity: Arc<I>,
    shortlist: Shortlist,
}

impl<I> SessionContext<I>
where
    I: IdentityProvider,
{
    /// Creates a session context around an identity provider.
    #[must_use]
    pub const fn new(identity: Arc<I>) -> Self {
        Self {
            identity,
            shortlist: Shortlist::new(),
        }
    }

    /// Returns the identity provider handle.
    #[must_use]
    pub const fn identity(&self) -> &Arc<I> {
        &self.identity
    }

    /// Returns the currently signed-in identity, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserIdentity> {
        self.identity.current_identity()
    }

    /// Returns the adoption shortlist.
    #[must_use]
    pub const fn shortlist(&self) -> &Shortlist {
        &self.shortlist
    }

    /// Returns the adoption shortlist for mutation.
    pub const fn shortlist_mut(&mut self) -> &mut Shortlist {
        &mut self.shortlist
    }
}

/// Pets the user has shortlisted for adoption.
///
/// Deduplicated by pet id; order of insertion is preserved.
#[derive(Debug, Clone, Default)]
pub struct Shortlist {
    pets: Vec<Pet>,
}

impl Shortlist {
    /// Creates an empty shortlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { pets: Vec::new() }
    }

    /// Adds a pet unless it is already shortlisted.
    ///
    /// Returns whether the pet was added.
    pub fn add(&mut self, pet: Pet) -> bool {
        if self.pets.iter().any(|existing| existing.id() == pet.id()) {
            return false;
        }
        self.pets.push(pet);
        true
    }

    /// Removes a pet by identifier.
    ///
    /// Returns whether a pet was removed.
    pub fn remove(&mut self, id: &PetId) -> bool {
        let before = self.pets.len();
        self.pets.retain(|pet| pet.id() != id);
        self.pets.len() < before
    }

    /// Returns the shortlisted pets in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Pet] {
        &self.pets
    }

    /// Removes every pet.
    pub fn clear(&mut self) {
        self.pets.clear();
    }

    /// Returns the number of shortlisted pets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pets.len()
    }

    /// Returns `true` when nothing is shortlisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Total of the listed adoption fees, in cents.
    ///
    /// Pets without a fee contribute nothing.
    #[must_use]
    pub fn total_fee_cents(&self) -> u64 {
        self.pets
            .iter()
            .filter_map(Pet::adoption_fee_cents)
            .sum()
    }
}
