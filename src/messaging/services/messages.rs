//! Service layer for sending, fetching, and acknowledging messages.

use crate::adoption::domain::PetId;
use crate::identity::domain::UserId;
use crate::identity::ports::IdentityProvider;
use crate::messaging::{
    domain::{Message, MessageId, MessageStatus, MessagingDomainError},
    ports::{BlobStore, BlobStoreError, MessageRepository, MessageStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Placeholder content carried by image messages, mirroring what chat
/// clients render while the image itself loads.
const IMAGE_PLACEHOLDER: &str = "Image";

/// Service-level errors for messaging operations.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The operation requires a signed-in identity.
    #[error("operation requires a signed-in user")]
    NotAuthenticated,

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MessagingDomainError),

    /// Message store operation failed.
    #[error(transparent)]
    Store(#[from] MessageStoreError),

    /// Blob store operation failed.
    #[error(transparent)]
    Blob(#[from] BlobStoreError),
}

/// Result type for messaging service operations.
pub type MessagingResult<T> = Result<T, MessagingError>;

/// Message orchestration service.
///
/// Sends run in two steps against the store: the message is persisted
/// with status `Sending`, then advanced to `Sent` once the write is
/// confirmed. Fetches always issue both directed queries and require
/// both to succeed; a failing sub-query fails the whole operation
/// rather than producing a partial conversation.
#[derive(Clone)]
pub struct MessageService<R, B, I, C>
where
    R: MessageRepository,
    B: BlobStore,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    blobs: Arc<B>,
    identity: Arc<I>,
    clock: Arc<C>,
}

impl<R, B, I, C> MessageService<R, B, I, C>
where
    R: MessageRepository,
    B: BlobStore,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a new message service.
    #[must_use]
    pub const fn new(repository: Arc<R>, blobs: Arc<B>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            repository,
            blobs,
            identity,
            clock,
        }
    }

    /// Sends a text message from the signed-in user to `receiver`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::NotAuthenticated`] when no user is
    /// signed in, [`MessagingError::Domain`] when the content is empty,
    /// or [`MessagingError::Store`] when persistence fails.
    pub async fn send_text(
        &self,
        receiver: UserId,
        content: impl Into<String> + Send,
        pet_id: Option<PetId>,
    ) -> MessagingResult<Message> {
        let sender = self.signed_in_user()?;
        let message = Message::text(sender, receiver, content, pet_id, &*self.clock)?;
        self.confirm_send(message).await
    }

    /// Uploads `bytes` through the blob store and sends the resulting
    /// image message from the signed-in user to `receiver`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::NotAuthenticated`] when no user is
    /// signed in, [`MessagingError::Blob`] when the upload fails, or
    /// [`MessagingError::Store`] when persistence fails.
    pub async fn send_image(
        &self,
        receiver: UserId,
        bytes: &[u8],
        pet_id: Option<PetId>,
    ) -> MessagingResult<Message> {
        let sender = self.signed_in_user()?;
        let id = MessageId::new();
        let path = format!("chat_images/{id}");
        let object = self.blobs.upload(&path, bytes).await?;
        let image_url = self.blobs.download_url(&object).await?;
        let message = Message::image_with_id(
            id,
            sender,
            receiver,
            IMAGE_PLACEHOLDER,
            image_url,
            pet_id,
            &*self.clock,
        )?;
        self.confirm_send(message).await
    }

    /// Fetches the full conversation between `a` and `b`, oldest first.
    ///
    /// Issues both directed queries and merges them sorted by
    /// `(timestamp, message id)`. Both queries must succeed.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Store`] when either directed query
    /// fails; no partial list is ever returned.
    pub async fn fetch_conversation(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> MessagingResult<Vec<Message>> {
        let mut messages = self.repository.find_directed(a, b).await?;
        messages.extend(self.repository.find_directed(b, a).await?);
        messages.sort_by_key(|message| (message.sent_at(), message.id().into_inner()));
        Ok(messages)
    }

    /// Marks every message `viewer` received from `partner` as read.
    ///
    /// Returns how many messages were actually advanced; messages
    /// already read are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Store`] when the fetch or any status
    /// write fails.
    pub async fn mark_conversation_read(
        &self,
        viewer: &UserId,
        partner: &UserId,
    ) -> MessagingResult<usize> {
        let received = self.repository.find_directed(partner, viewer).await?;
        let mut advanced = 0;
        for message in received
            .iter()
            .filter(|message| message.status() != MessageStatus::Read)
        {
            if self
                .repository
                .advance_status(message.id(), MessageStatus::Read)
                .await?
            {
                advanced += 1;
            }
        }
        Ok(advanced)
    }

    /// Retrieves a message by identifier.
    ///
    /// Returns `Ok(None)` when the message does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Store`] when the lookup fails.
    pub async fn message(&self, id: MessageId) -> MessagingResult<Option<Message>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Deletes a message.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Store`] when the message does not exist
    /// or the delete fails.
    pub async fn delete(&self, id: MessageId) -> MessagingResult<()> {
        Ok(self.repository.delete(id).await?)
    }

    /// Persists a freshly built message and advances it to `Sent` once
    /// the store confirms the write.
    async fn confirm_send(&self, mut message: Message) -> MessagingResult<Message> {
        self.repository.put(&message).await?;
        self.repository
            .advance_status(message.id(), MessageStatus::Sent)
            .await?;
        message.advance_status(MessageStatus::Sent);
        Ok(message)
    }

    fn signed_in_user(&self) -> MessagingResult<UserId> {
        self.identity
            .current_identity()
            .map(|identity| identity.id().clone())
            .ok_or(MessagingError::NotAuthenticated)
    }
}
