//! Change-notification port for live message updates.
//!
//! The store publishes a change event for every effective write to the
//! messages collection. A [`ChangeFeed`] narrows that stream to one
//! directed query shape; subscribers re-fetch on every event rather than
//! consuming deltas, so a lagged feed is treated the same as a changed
//! one.

use crate::identity::domain::UserId;
use crate::messaging::ports::repository::MessageStoreResult;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

/// A change event for the messages collection.
///
/// Carries only the directed query shape the write belongs to; consumers
/// re-fetch state through the repository rather than reading the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChange {
    /// Sender of the written message.
    pub sender_id: UserId,
    /// Receiver of the written message.
    pub receiver_id: UserId,
}

/// Subscription source for message change notifications.
#[async_trait]
pub trait MessageChanges: Send + Sync {
    /// Subscribes to change events for one directed query shape.
    ///
    /// # Errors
    ///
    /// Returns [`super::MessageStoreError::Unavailable`] when the
    /// subscription cannot be registered.
    async fn watch_directed(
        &self,
        sender: &UserId,
        receiver: &UserId,
    ) -> MessageStoreResult<ChangeFeed>;
}

/// Error returned when a change feed's underlying channel has closed.
///
/// A closed feed never recovers; subscribers wanting further updates must
/// register a fresh subscription.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("change feed closed")]
pub struct FeedClosed;

/// Change notifications filtered to one directed query shape.
#[derive(Debug)]
pub struct ChangeFeed {
    receiver: broadcast::Receiver<MessageChange>,
    sender_id: UserId,
    receiver_id: UserId,
}

impl ChangeFeed {
    /// Wraps a broadcast subscription, keeping only events matching the
    /// `(sender, receiver)` orientation.
    #[must_use]
    pub const fn new(
        receiver: broadcast::Receiver<MessageChange>,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Self {
        Self {
            receiver,
            sender_id,
            receiver_id,
        }
    }

    /// Waits for the next matching change event.
    ///
    /// A lagged subscription counts as changed: skipped events carry no
    /// payload worth recovering because consumers re-fetch everything
    /// anyway.
    ///
    /// # Errors
    ///
    /// Returns [`FeedClosed`] when the underlying channel has closed.
    pub async fn changed(&mut self) -> Result<(), FeedClosed> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => {
                    if change.sender_id == self.sender_id
                        && change.receiver_id == self.receiver_id
                    {
                        return Ok(());
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => return Ok(()),
                Err(broadcast::error::RecvError::Closed) => return Err(FeedClosed),
            }
        }
    }
}
