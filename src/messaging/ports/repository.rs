//! Repository port for message persistence and directed queries.
//!
//! The backing document store answers equality filters on single fields
//! but cannot OR across two fields in one query, so a two-party
//! conversation is always the union of two directed queries, one per
//! `(sender, receiver)` orientation. Callers that need both directions
//! issue both queries and decide how to combine them; this port never
//! merges on their behalf.

use crate::identity::domain::UserId;
use crate::messaging::domain::{Message, MessageId, MessageStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for message store operations.
pub type MessageStoreResult<T> = Result<T, MessageStoreError>;

/// Message persistence contract.
///
/// No retry is performed by implementations; a failed operation surfaces
/// [`MessageStoreError::Unavailable`] and retries are the caller's
/// responsibility.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Stores a new message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Duplicate`] when the identifier is
    /// already present, or [`MessageStoreError::Unavailable`] when the
    /// write fails.
    async fn put(&self, message: &Message) -> MessageStoreResult<()>;

    /// Finds a message by identifier.
    ///
    /// Returns `None` when the message does not exist.
    async fn find_by_id(&self, id: MessageId) -> MessageStoreResult<Option<Message>>;

    /// Messages sent by `sender` to `receiver`, one directed query
    /// shape. Ordering is unspecified; callers sort.
    async fn find_directed(
        &self,
        sender: &UserId,
        receiver: &UserId,
    ) -> MessageStoreResult<Vec<Message>>;

    /// All messages sent by `sender`, newest first.
    async fn find_by_sender(&self, sender: &UserId) -> MessageStoreResult<Vec<Message>>;

    /// All messages received by `receiver`, newest first.
    async fn find_by_receiver(&self, receiver: &UserId) -> MessageStoreResult<Vec<Message>>;

    /// Advances a message's delivery status towards `target`.
    ///
    /// The advance is guarded: implementations read the current status
    /// and write only when the move is strictly forward in the lifecycle
    /// order, making concurrent writers unable to regress a status.
    /// Returns whether a write happened; backward or equal requests are
    /// no-ops returning `false`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::NotFound`] when the message does not
    /// exist.
    async fn advance_status(
        &self,
        id: MessageId,
        target: MessageStatus,
    ) -> MessageStoreResult<bool>;

    /// Deletes a message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::NotFound`] when the message does not
    /// exist.
    async fn delete(&self, id: MessageId) -> MessageStoreResult<()>;
}

/// Errors returned by message store implementations.
#[derive(Debug, Clone, Error)]
pub enum MessageStoreError {
    /// The message was not found.
    #[error("message not found: {0}")]
    NotFound(MessageId),

    /// A message with the same identifier already exists.
    #[error("duplicate message: {0}")]
    Duplicate(MessageId),

    /// The store could not serve the operation.
    #[error("message store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageStoreError {
    /// Wraps a store-layer failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
