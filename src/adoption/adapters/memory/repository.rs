//! In-memory repositories for adoption lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::adoption::{
    domain::{AdoptionApplication, ApplicationId, ListingStatus, Pet, PetId},
    ports::{AdoptionStoreError, AdoptionStoreResult, ApplicationRepository, PetRepository},
};
use crate::identity::domain::UserId;

fn lock_poisoned<E: std::fmt::Display>(err: E) -> AdoptionStoreError {
    AdoptionStoreError::unavailable(std::io::Error::other(err.to_string()))
}

/// Newest first: descending by submission timestamp with the application
/// id breaking exact ties.
fn sort_newest_first(applications: &mut [AdoptionApplication]) {
    applications.sort_by(|a, b| {
        (b.submitted_at(), b.id().into_inner()).cmp(&(a.submitted_at(), a.id().into_inner()))
    });
}

/// Thread-safe in-memory application repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApplicationRepository {
    state: Arc<RwLock<HashMap<ApplicationId, AdoptionApplication>>>,
}

impl InMemoryApplicationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn put(&self, application: &AdoptionApplication) -> AdoptionStoreResult<()> {
        let mut guard = self.state.write().map_err(lock_poisoned)?;
        if guard.contains_key(&application.id()) {
            return Err(AdoptionStoreError::DuplicateApplication(application.id()));
        }
        guard.insert(application.id(), application.clone());
        Ok(())
    }

    async fn update(&self, application: &AdoptionApplication) -> AdoptionStoreResult<()> {
        let mut guard = self.state.write().map_err(lock_poisoned)?;
        if !guard.contains_key(&application.id()) {
            return Err(AdoptionStoreError::ApplicationNotFound(application.id()));
        }
        guard.insert(application.id(), application.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> AdoptionStoreResult<Option<AdoptionApplication>> {
        let guard = self.state.read().map_err(lock_poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    async fn find_by_pet(&self, pet_id: &PetId) -> AdoptionStoreResult<Vec<AdoptionApplication>> {
        let guard = self.state.read().map_err(lock_poisoned)?;
        let mut applications: Vec<AdoptionApplication> = guard
            .values()
            .filter(|application| application.pet_id() == pet_id)
            .cloned()
            .collect();
        drop(guard);
        sort_newest_first(&mut applications);
        Ok(applications)
    }

    async fn find_by_applicant(
        &self,
        applicant: &UserId,
    ) -> AdoptionStoreResult<Vec<AdoptionApplication>> {
        let guard = self.state.read().map_err(lock_poisoned)?;
        let mut applications: Vec<AdoptionApplication> = guard
            .values()
            .filter(|application| application.applicant().id() == applicant)
            .cloned()
            .collect();
        drop(guard);
        sort_newest_first(&mut applications);
        Ok(applications)
    }

    async fn list_all(&self) -> AdoptionStoreResult<Vec<AdoptionApplication>> {
        let guard = self.state.read().map_err(lock_poisoned)?;
        let mut applications: Vec<AdoptionApplication> = guard.values().cloned().collect();
        drop(guard);
        sort_newest_first(&mut applications);
        Ok(applications)
    }
}

/// Thread-safe in-memory pet repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPetRepository {
    state: Arc<RwLock<HashMap<PetId, Pet>>>,
}

impl InMemoryPetRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn put(&self, pet: &Pet) -> AdoptionStoreResult<()> {
        let mut guard = self.state.write().map_err(lock_poisoned)?;
        guard.insert(pet.id().clone(), pet.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PetId) -> AdoptionStoreResult<Option<Pet>> {
        let guard = self.state.read().map_err(lock_poisoned)?;
        Ok(guard.get(id).cloned())
    }

    async fn update_listing_status(
        &self,
        id: &PetId,
        status: ListingStatus,
    ) -> AdoptionStoreResult<()> {
        let mut guard = self.state.write().map_err(lock_poisoned)?;
        let pet = guard
            .get_mut(id)
            .ok_or_else(|| AdoptionStoreError::PetNotFound(id.clone()))?;
        pet.apply_listing_status(status);
        Ok(())
    }
}
