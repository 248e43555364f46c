//! Service layer for submitting and reviewing adoption applications.

use crate::adoption::{
    domain::{
        AdoptionApplication, AdoptionDomainError, ApplicantDetails, ApplicationId,
        ApplicationStatus, ListingStatus, PetId, Questionnaire,
    },
    ports::{AdoptionStoreError, ApplicationRepository, PetRepository},
};
use crate::identity::ports::IdentityProvider;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for submitting an adoption application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitApplicationRequest {
    pet_id: PetId,
    pet_name: String,
    questionnaire: Questionnaire,
}

impl SubmitApplicationRequest {
    /// Creates a request for the given pet.
    #[must_use]
    pub fn new(pet_id: PetId, pet_name: impl Into<String>) -> Self {
        Self {
            pet_id,
            pet_name: pet_name.into(),
            questionnaire: Questionnaire::new(),
        }
    }

    /// Attaches the filled questionnaire.
    #[must_use]
    pub fn with_questionnaire(mut self, questionnaire: Questionnaire) -> Self {
        self.questionnaire = questionnaire;
        self
    }
}

/// Request payload for moving an application through its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    application_id: ApplicationId,
    target: ApplicationStatus,
    notes: Option<String>,
}

impl UpdateStatusRequest {
    /// Creates a request moving the application to `target`.
    #[must_use]
    pub const fn new(application_id: ApplicationId, target: ApplicationStatus) -> Self {
        Self {
            application_id,
            target,
            notes: None,
        }
    }

    /// Attaches reviewer notes; required when rejecting.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Service-level errors for adoption lifecycle operations.
#[derive(Debug, Error)]
pub enum AdoptionError {
    /// The operation requires a signed-in identity.
    #[error("operation requires a signed-in user")]
    NotAuthenticated,

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AdoptionDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] AdoptionStoreError),

    /// The application write committed but the dependent pet update did
    /// not, leaving the two documents inconsistent until reconciled.
    #[error("application {application_id} committed but pet {pet_id} cascade failed: {source}")]
    CascadeFailed {
        /// The application whose write committed.
        application_id: ApplicationId,
        /// The pet whose update failed.
        pet_id: PetId,
        /// The store failure that interrupted the cascade.
        source: AdoptionStoreError,
    },
}

/// Result type for adoption lifecycle service operations.
pub type AdoptionResult<T> = Result<T, AdoptionError>;

/// Adoption lifecycle orchestration service.
///
/// Status changes and their pet cascades are two independent
/// single-document writes; there is no transaction across them. A
/// cascade failure after the application write committed surfaces as
/// [`AdoptionError::CascadeFailed`] so callers can distinguish it from a
/// clean failure, and [`AdoptionLifecycleService::reconcile`] repairs
/// any such gap after the fact.
#[derive(Clone)]
pub struct AdoptionLifecycleService<A, P, I, C>
where
    A: ApplicationRepository,
    P: PetRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    applications: Arc<A>,
    pets: Arc<P>,
    identity: Arc<I>,
    clock: Arc<C>,
}

impl<A, P, I, C> AdoptionLifecycleService<A, P, I, C>
where
    A: ApplicationRepository,
    P: PetRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a new adoption lifecycle service.
    #[must_use]
    pub const fn new(applications: Arc<A>, pets: Arc<P>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            applications,
            pets,
            identity,
            clock,
        }
    }

    /// Submits a new application for the signed-in user.
    ///
    /// Assigns an identifier, stamps the applicant's details and both
    /// timestamps, persists the application, then marks the pet's
    /// listing `Pending`. Repeat applications for the same pet are
    /// accepted; whether a pending listing should block further
    /// applicants is a product decision this layer does not take.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::NotAuthenticated`] when no user is
    /// signed in, [`AdoptionError::Store`] when the application write
    /// fails, or [`AdoptionError::CascadeFailed`] when the application
    /// committed but the pet update did not.
    pub async fn submit(
        &self,
        request: SubmitApplicationRequest,
    ) -> AdoptionResult<AdoptionApplication> {
        let identity = self
            .identity
            .current_identity()
            .ok_or(AdoptionError::NotAuthenticated)?;
        let applicant = ApplicantDetails::from_identity(&identity);
        let application = AdoptionApplication::new(
            request.pet_id,
            request.pet_name,
            applicant,
            request.questionnaire,
            &*self.clock,
        );

        self.applications.put(&application).await?;
        self.cascade(&application, ListingStatus::Pending).await?;
        Ok(application)
    }

    /// Moves an application to a new status.
    ///
    /// Validates the transition against the lifecycle, requires a
    /// non-empty reason when rejecting, persists the updated
    /// application, and cascades `Adopted` onto the linked pet as a
    /// second, independent write. Only approvals cascade.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::Domain`] for lifecycle violations,
    /// [`AdoptionError::Store`] when lookup or persistence fails, or
    /// [`AdoptionError::CascadeFailed`] when the status committed but
    /// the pet cascade did not.
    pub async fn update_status(
        &self,
        request: UpdateStatusRequest,
    ) -> AdoptionResult<AdoptionApplication> {
        let mut application = self
            .applications
            .find_by_id(request.application_id)
            .await?
            .ok_or(AdoptionStoreError::ApplicationNotFound(
                request.application_id,
            ))?;

        application.transition_to(request.target, request.notes.as_deref(), &*self.clock)?;
        self.applications.update(&application).await?;

        if request.target == ApplicationStatus::Approved {
            self.cascade(&application, ListingStatus::Adopted).await?;
        }
        Ok(application)
    }

    /// All applications for a pet, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::Store`] when the query fails.
    pub async fn applications_for_pet(
        &self,
        pet_id: &PetId,
    ) -> AdoptionResult<Vec<AdoptionApplication>> {
        Ok(self.applications.find_by_pet(pet_id).await?)
    }

    /// The signed-in user's applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::NotAuthenticated`] when no user is
    /// signed in, or [`AdoptionError::Store`] when the query fails.
    pub async fn applications_for_applicant(&self) -> AdoptionResult<Vec<AdoptionApplication>> {
        let identity = self
            .identity
            .current_identity()
            .ok_or(AdoptionError::NotAuthenticated)?;
        Ok(self.applications.find_by_applicant(identity.id()).await?)
    }

    /// Every application in the store, newest first: the reviewer's
    /// work queue.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::Store`] when the query fails.
    pub async fn all_applications(&self) -> AdoptionResult<Vec<AdoptionApplication>> {
        Ok(self.applications.list_all().await?)
    }

    /// Repairs approved applications whose pet cascade was lost.
    ///
    /// Scans every approved application and re-applies the `Adopted`
    /// cascade wherever the linked pet is not yet marked adopted.
    /// Returns the number of listings repaired.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionError::Store`] when the scan or a repair write
    /// fails; the job is idempotent and safe to re-run after a failure.
    pub async fn reconcile(&self) -> AdoptionResult<usize> {
        let mut repaired = 0;
        for application in self
            .applications
            .list_all()
            .await?
            .iter()
            .filter(|application| application.status() == ApplicationStatus::Approved)
        {
            let Some(pet) = self.pets.find_by_id(application.pet_id()).await? else {
                warn!(
                    application_id = %application.id(),
                    pet_id = %application.pet_id(),
                    "approved application references a missing pet"
                );
                continue;
            };
            if !pet.is_adopted() {
                self.pets
                    .update_listing_status(pet.id(), ListingStatus::Adopted)
                    .await?;
                repaired += 1;
            }
        }
        if repaired > 0 {
            info!(repaired, "reconciled adopted listings");
        }
        Ok(repaired)
    }

    /// Applies a listing-status cascade, mapping failure to
    /// [`AdoptionError::CascadeFailed`]; the application write has
    /// already committed by the time this runs.
    async fn cascade(
        &self,
        application: &AdoptionApplication,
        status: ListingStatus,
    ) -> AdoptionResult<()> {
        self.pets
            .update_listing_status(application.pet_id(), status)
            .await
            .map_err(|source| AdoptionError::CascadeFailed {
                application_id: application.id(),
                pet_id: application.pet_id().clone(),
                source,
            })
    }
}
