//! Repository ports for application and pet persistence.
//!
//! The application and pet collections are separate documents with no
//! transactional bracket across them; every method here is a single
//! independently-failing store operation, and the service layer owns the
//! consequences of a write landing while its companion write does not.

use crate::adoption::domain::{AdoptionApplication, ApplicationId, ListingStatus, Pet, PetId};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for adoption store operations.
pub type AdoptionStoreResult<T> = Result<T, AdoptionStoreError>;

/// Adoption application persistence contract.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Stores a new application.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionStoreError::DuplicateApplication`] when the
    /// identifier is already present.
    async fn put(&self, application: &AdoptionApplication) -> AdoptionStoreResult<()>;

    /// Persists changes to an existing application (status, notes,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionStoreError::ApplicationNotFound`] when the
    /// application does not exist.
    async fn update(&self, application: &AdoptionApplication) -> AdoptionStoreResult<()>;

    /// Finds an application by identifier.
    ///
    /// Returns `None` when the application does not exist.
    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> AdoptionStoreResult<Option<AdoptionApplication>>;

    /// All applications for a pet, newest first.
    async fn find_by_pet(&self, pet_id: &PetId) -> AdoptionStoreResult<Vec<AdoptionApplication>>;

    /// All applications submitted by a user, newest first.
    async fn find_by_applicant(
        &self,
        applicant: &UserId,
    ) -> AdoptionStoreResult<Vec<AdoptionApplication>>;

    /// Every application in the store, newest first.
    async fn list_all(&self) -> AdoptionStoreResult<Vec<AdoptionApplication>>;
}

/// Pet listing persistence contract.
///
/// Only the slice of the listing the adoption workflow touches is
/// exposed here; full listing management belongs to the marketplace
/// surface.
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Stores a listing, replacing any previous document with the same
    /// identifier.
    async fn put(&self, pet: &Pet) -> AdoptionStoreResult<()>;

    /// Finds a listing by identifier.
    ///
    /// Returns `None` when the listing does not exist.
    async fn find_by_id(&self, id: &PetId) -> AdoptionStoreResult<Option<Pet>>;

    /// Applies a listing-status cascade as a partial update to the
    /// `application_status`/`is_adopted` field pair, leaving every other
    /// field untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionStoreError::PetNotFound`] when the listing does
    /// not exist.
    async fn update_listing_status(
        &self,
        id: &PetId,
        status: ListingStatus,
    ) -> AdoptionStoreResult<()>;
}

/// Errors returned by adoption store implementations.
#[derive(Debug, Clone, Error)]
pub enum AdoptionStoreError {
    /// The application was not found.
    #[error("application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    /// An application with the same identifier already exists.
    #[error("duplicate application: {0}")]
    DuplicateApplication(ApplicationId),

    /// The pet listing was not found.
    #[error("pet not found: {0}")]
    PetNotFound(PetId),

    /// The store could not serve the operation.
    #[error("adoption store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl AdoptionStoreError {
    /// Wraps a store-layer failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
