//! Homeward: pet adoption marketplace core.
//!
//! This crate provides the backend-agnostic core of a pet adoption
//! marketplace: aggregating two-party conversations out of a document
//! store, feeding live chat updates to subscribers, and driving adoption
//! applications through their review lifecycle.
//!
//! # Architecture
//!
//! Homeward follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory for tests)
//!
//! The document store, authentication service, and blob storage backing a
//! deployment are external collaborators reached only through ports.
//!
//! # Modules
//!
//! - [`adoption`]: Adoption application lifecycle and pet listing cascade
//! - [`identity`]: Opaque user identifiers and the signed-in identity port
//! - [`messaging`]: Message store access, conversation aggregation, live feeds
//! - [`session`]: Explicit per-process session context and shortlist

pub mod adoption;
pub mod identity;
pub mod messaging;
pub mod session;
