//! Port contracts for the adoption workflow.
//!
//! Ports define store-agnostic interfaces used by the adoption services.

pub mod repository;

pub use repository::{
    AdoptionStoreError, AdoptionStoreResult, ApplicationRepository, PetRepository,
};
