//! Two-party messaging for Homeward.
//!
//! This module implements the messaging slice of the marketplace: storing
//! and retrieving messages through a document-store port that only answers
//! single-direction queries, aggregating those queries into per-partner
//! conversations with unread counts, and multiplexing change notifications
//! into live chat feeds. The module follows hexagonal architecture:
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
