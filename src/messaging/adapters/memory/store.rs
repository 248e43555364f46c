//! In-memory message store with change notifications.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use crate::identity::domain::UserId;
use crate::messaging::{
    domain::{Message, MessageId, MessageStatus},
    ports::{ChangeFeed, MessageChange, MessageChanges, MessageRepository, MessageStoreError,
        MessageStoreResult},
};

/// Buffered change events per subscriber; a lagged subscriber re-fetches
/// anyway, so the capacity only needs to ride out bursts.
const CHANGE_CAPACITY: usize = 64;

/// Thread-safe in-memory message store.
///
/// Implements both the repository and the change-notification ports so
/// the live feed can be exercised without a real backend. Change events
/// are published only for effective writes: a guarded status advance
/// that no-ops publishes nothing, which is what lets the notify→refetch
/// cycle converge. Suitable for tests only.
#[derive(Debug, Clone)]
pub struct InMemoryMessageStore {
    state: Arc<RwLock<HashMap<MessageId, Message>>>,
    changes: broadcast::Sender<MessageChange>,
}

impl InMemoryMessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            changes,
        }
    }

    /// Returns the number of stored messages.
    ///
    /// Returns `0` when the internal lock is poisoned, matching the
    /// fallback behaviour of an empty store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` when no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn notify(&self, sender_id: &UserId, receiver_id: &UserId) {
        // No subscribers is fine; notification is best effort.
        drop(self.changes.send(MessageChange {
            sender_id: sender_id.clone(),
            receiver_id: receiver_id.clone(),
        }));
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_poisoned<E: std::fmt::Display>(err: E) -> MessageStoreError {
    MessageStoreError::unavailable(std::io::Error::other(err.to_string()))
}

/// Newest first: descending by timestamp with the message id breaking
/// exact ties.
fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| {
        (b.sent_at(), b.id().into_inner()).cmp(&(a.sent_at(), a.id().into_inner()))
    });
}

#[async_trait]
impl MessageRepository for InMemoryMessageStore {
    async fn put(&self, message: &Message) -> MessageStoreResult<()> {
        {
            let mut guard = self.state.write().map_err(lock_poisoned)?;
            if guard.contains_key(&message.id()) {
                return Err(MessageStoreError::Duplicate(message.id()));
            }
            guard.insert(message.id(), message.clone());
        }
        self.notify(message.sender_id(), message.receiver_id());
        Ok(())
    }

    async fn find_by_id(&self, id: MessageId) -> MessageStoreResult<Option<Message>> {
        let guard = self.state.read().map_err(lock_poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    async fn find_directed(
        &self,
        sender: &UserId,
        receiver: &UserId,
    ) -> MessageStoreResult<Vec<Message>> {
        let guard = self.state.read().map_err(lock_poisoned)?;
        let mut messages: Vec<Message> = guard
            .values()
            .filter(|message| message.sender_id() == sender && message.receiver_id() == receiver)
            .cloned()
            .collect();
        messages.sort_by_key(|message| (message.sent_at(), message.id().into_inner()));
        Ok(messages)
    }

    async fn find_by_sender(&self, sender: &UserId) -> MessageStoreResult<Vec<Message>> {
        let guard = self.state.read().map_err(lock_poisoned)?;
        let mut messages: Vec<Message> = guard
            .values()
            .filter(|message| message.sender_id() == sender)
            .cloned()
            .collect();
        drop(guard);
        sort_newest_first(&mut messages);
        Ok(messages)
    }

    async fn find_by_receiver(&self, receiver: &UserId) -> MessageStoreResult<Vec<Message>> {
        let guard = self.state.read().map_err(lock_poisoned)?;
        let mut messages: Vec<Message> = guard
            .values()
            .filter(|message| message.receiver_id() == receiver)
            .cloned()
            .collect();
        drop(guard);
        sort_newest_first(&mut messages);
        Ok(messages)
    }

    async fn advance_status(
        &self,
        id: MessageId,
        target: MessageStatus,
    ) -> MessageStoreResult<bool> {
        let advanced_route = {
            let mut guard = self.state.write().map_err(lock_poisoned)?;
            let message = guard.get_mut(&id).ok_or(MessageStoreError::NotFound(id))?;
            if message.advance_status(target) {
                Some((message.sender_id().clone(), message.receiver_id().clone()))
            } else {
                None
            }
        };

        advanced_route.map_or(Ok(false), |(sender_id, receiver_id)| {
            self.notify(&sender_id, &receiver_id);
            Ok(true)
        })
    }

    async fn delete(&self, id: MessageId) -> MessageStoreResult<()> {
        let removed = {
            let mut guard = self.state.write().map_err(lock_poisoned)?;
            guard.remove(&id).ok_or(MessageStoreError::NotFound(id))?
        };
        self.notify(removed.sender_id(), removed.receiver_id());
        Ok(())
    }
}

#[async_trait]
impl MessageChanges for InMemoryMessageStore {
    async fn watch_directed(
        &self,
        sender: &UserId,
        receiver: &UserId,
    ) -> MessageStoreResult<ChangeFeed> {
        Ok(ChangeFeed::new(
            self.changes.subscribe(),
            sender.clone(),
            receiver.clone(),
        ))
    }
}
