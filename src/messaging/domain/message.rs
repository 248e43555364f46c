//! Message aggregate root and its delivery-status lifecycle.

use super::{MessageId, MessagingDomainError, ParseMessageStatusError};
use crate::adoption::domain::PetId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery status of a message.
///
/// The lifecycle is strictly monotonic: `Sending → Sent → Delivered →
/// Read`. Skipping forward is allowed (a receiver opening a conversation
/// moves `Sent` straight to `Read`); moving backward never is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Created client-side, write not yet confirmed by the store.
    Sending,
    /// The store has confirmed the write.
    Sent,
    /// A receiver-side listener has observed the message.
    Delivered,
    /// The receiver has opened the conversation.
    Read,
}

impl MessageStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
        }
    }

    /// Position of the status in the lifecycle order.
    const fn rank(self) -> u8 {
        match self {
            Self::Sending => 0,
            Self::Sent => 1,
            Self::Delivered => 2,
            Self::Read => 3,
        }
    }

    /// Returns whether advancing to `target` moves strictly forward.
    #[must_use]
    pub const fn can_advance_to(self, target: Self) -> bool {
        self.rank() < target.rank()
    }

    /// Returns whether this status comes strictly before `other`.
    #[must_use]
    pub const fn precedes(self, other: Self) -> bool {
        self.rank() < other.rank()
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MessageStatus {
    type Error = ParseMessageStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "sending" => Ok(Self::Sending),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            "read" => Ok(Self::Read),
            _ => Err(ParseMessageStatusError(value.to_owned())),
        }
    }
}

/// Payload kind of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Plain text content.
    Text,
    /// An uploaded image; `image_url` carries the download location.
    Image,
}

/// A message between two users.
///
/// Messages are persisted once at send time and mutated only through
/// monotonic status advances; deletion is a separate explicit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender_id: UserId,
    receiver_id: UserId,
    content: String,
    sent_at: DateTime<Utc>,
    status: MessageStatus,
    kind: MessageKind,
    image_url: Option<String>,
    pet_id: Option<PetId>,
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Persisted sender.
    pub sender_id: UserId,
    /// Persisted receiver.
    pub receiver_id: UserId,
    /// Persisted content.
    pub content: String,
    /// Persisted send timestamp.
    pub sent_at: DateTime<Utc>,
    /// Persisted delivery status.
    pub status: MessageStatus,
    /// Persisted payload kind.
    pub kind: MessageKind,
    /// Persisted image location, if any.
    pub image_url: Option<String>,
    /// Persisted pet listing link, if any.
    pub pet_id: Option<PetId>,
}

impl Message {
    /// Creates a new text message with status [`MessageStatus::Sending`].
    ///
    /// # Errors
    ///
    /// Returns [`MessagingDomainError::EmptyContent`] when the content is
    /// empty after trimming.
    pub fn text(
        sender_id: UserId,
        receiver_id: UserId,
        content: impl Into<String>,
        pet_id: Option<PetId>,
        clock: &impl Clock,
    ) -> Result<Self, MessagingDomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(MessagingDomainError::EmptyContent);
        }
        Ok(Self {
            id: MessageId::new(),
            sender_id,
            receiver_id,
            content,
            sent_at: clock.utc(),
            status: MessageStatus::Sending,
            kind: MessageKind::Text,
            image_url: None,
            pet_id,
        })
    }

    /// Creates a new image message with a pre-assigned identifier.
    ///
    /// The identifier is assigned before construction so the upload path
    /// of the image can be derived from it. Content is a caller-supplied
    /// placeholder and may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingDomainError::MissingImageUrl`] when the image
    /// location is empty after trimming.
    pub fn image_with_id(
        id: MessageId,
        sender_id: UserId,
        receiver_id: UserId,
        content: impl Into<String>,
        image_url: impl Into<String>,
        pet_id: Option<PetId>,
        clock: &impl Clock,
    ) -> Result<Self, MessagingDomainError> {
        let image_url = image_url.into();
        if image_url.trim().is_empty() {
            return Err(MessagingDomainError::MissingImageUrl);
        }
        Ok(Self {
            id,
            sender_id,
            receiver_id,
            content: content.into(),
            sent_at: clock.utc(),
            status: MessageStatus::Sending,
            kind: MessageKind::Image,
            image_url: Some(image_url),
            pet_id,
        })
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            sender_id: data.sender_id,
            receiver_id: data.receiver_id,
            content: data.content,
            sent_at: data.sent_at,
            status: data.status,
            kind: data.kind,
            image_url: data.image_url,
            pet_id: data.pet_id,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sender.
    #[must_use]
    pub const fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    /// Returns the receiver.
    #[must_use]
    pub const fn receiver_id(&self) -> &UserId {
        &self.receiver_id
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the send timestamp.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns the delivery status.
    #[must_use]
    pub const fn status(&self) -> MessageStatus {
        self.status
    }

    /// Returns the payload kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns the image location for image messages.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the linked pet listing, if any.
    #[must_use]
    pub const fn pet_id(&self) -> Option<&PetId> {
        self.pet_id.as_ref()
    }

    /// Returns the conversation partner from `viewer`'s perspective.
    #[must_use]
    pub fn partner_of(&self, viewer: &UserId) -> &UserId {
        if &self.sender_id == viewer {
            &self.receiver_id
        } else {
            &self.sender_id
        }
    }

    /// Returns whether `viewer` received this message and has not read it.
    #[must_use]
    pub fn is_unread_for(&self, viewer: &UserId) -> bool {
        &self.receiver_id == viewer && self.status != MessageStatus::Read
    }

    /// Advances the delivery status towards `target`.
    ///
    /// Returns `true` when the status moved forward; backward or equal
    /// requests are no-ops returning `false`, keeping the observed status
    /// sequence non-decreasing regardless of caller interleaving.
    pub fn advance_status(&mut self, target: MessageStatus) -> bool {
        if self.status.can_advance_to(target) {
            self.status = target;
            return true;
        }
        false
    }
}
