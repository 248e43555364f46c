//! Adoption application workflow for Homeward.
//!
//! This module drives an adoption application through its review
//! lifecycle (submission, optional review, approval or rejection) and
//! cascades the outcome onto the pet listing the application refers to.
//! The application and pet records live in separate documents with no
//! cross-document transaction, so the cascade is two independent writes
//! and a reconciliation job covers the gap. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
