//! In-memory adoption adapters for tests.

mod repository;

pub use repository::{InMemoryApplicationRepository, InMemoryPetRepository};
