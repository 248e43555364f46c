//! User identity for Homeward.
//!
//! The authentication service backing a deployment is an external
//! collaborator; this module owns only the opaque user identifier, the
//! signed-in identity value it exposes, and the port through which the
//! rest of the crate asks "who is signed in right now". The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
