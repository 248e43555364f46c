//! Error types for adoption domain validation and parsing.

use super::{ApplicationId, ApplicationStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning adoption domain
/// values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdoptionDomainError {
    /// The pet identifier is empty.
    #[error("invalid pet identifier '{0}', expected a non-empty value")]
    InvalidPetId(String),

    /// The requested status change is not allowed by the lifecycle.
    #[error("invalid status transition for application {application_id}: {from} -> {to}")]
    InvalidTransition {
        /// The application being transitioned.
        application_id: ApplicationId,
        /// The current status.
        from: ApplicationStatus,
        /// The requested status.
        to: ApplicationStatus,
    },

    /// Rejection was requested without a reason.
    #[error("rejecting an application requires a non-empty reason")]
    MissingRejectionReason,
}

/// Error returned while parsing application statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown application status: {0}")]
pub struct ParseApplicationStatusError(pub String);
