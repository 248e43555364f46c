//! Error types for messaging domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing messaging domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagingDomainError {
    /// The text content is empty after trimming.
    #[error("message content must not be empty")]
    EmptyContent,

    /// An image message was built without an image location.
    #[error("image message requires an image url")]
    MissingImageUrl,
}

/// Error returned while parsing message statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown message status: {0}")]
pub struct ParseMessageStatusError(pub String);
