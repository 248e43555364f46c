//! Derived conversation views.
//!
//! A conversation has no persisted record of its own: it is recomputed
//! from the message set on every query, so it can never drift out of
//! sync with the messages it summarises.

use super::Message;
use crate::adoption::domain::PetId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Direction-free identifier for a two-party conversation.
///
/// The key is the lexicographically ordered join of the two participant
/// ids, so both participants derive the same key regardless of who is
/// viewing.
///
/// # Examples
///
/// ```
/// use homeward::identity::domain::UserId;
/// use homeward::messaging::domain::ConversationKey;
///
/// let a = UserId::new("alice").expect("valid user id");
/// let b = UserId::new("bob").expect("valid user id");
/// assert_eq!(
///     ConversationKey::for_pair(&a, &b),
///     ConversationKey::for_pair(&b, &a),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationKey(String);

impl ConversationKey {
    /// Derives the key for a participant pair.
    #[must_use]
    pub fn for_pair(a: &UserId, b: &UserId) -> Self {
        let (first, second) = if a.as_str() <= b.as_str() {
            (a, b)
        } else {
            (b, a)
        };
        Self(format!("{first}-{second}"))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary of one conversation from a viewer's perspective.
///
/// Derived wholesale from a partner's message group; carries no state of
/// its own, so recomputing it over the same messages always yields the
/// same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    key: ConversationKey,
    viewer: UserId,
    partner: UserId,
    last_message: String,
    last_message_at: DateTime<Utc>,
    unread_count: usize,
    pet_id: Option<PetId>,
}

impl ConversationSummary {
    /// Summarises one partner's message group for `viewer`.
    ///
    /// The last message is the one with the greatest timestamp, with the
    /// message id breaking exact ties. The unread count is the exact
    /// number of messages the viewer received and has not read. The pet
    /// link is taken from the first message in the group that carries
    /// one. Returns `None` for an empty group.
    #[must_use]
    pub fn from_group(viewer: &UserId, partner: &UserId, messages: &[Message]) -> Option<Self> {
        let last = messages
            .iter()
            .max_by_key(|message| (message.sent_at(), message.id().into_inner()))?;
        let unread_count = messages
            .iter()
            .filter(|message| message.is_unread_for(viewer))
            .count();
        let pet_id = messages
            .iter()
            .find_map(|message| message.pet_id().cloned());

        Some(Self {
            key: ConversationKey::for_pair(viewer, partner),
            viewer: viewer.clone(),
            partner: partner.clone(),
            last_message: last.content().to_owned(),
            last_message_at: last.sent_at(),
            unread_count,
            pet_id,
        })
    }

    /// Returns the direction-free conversation key.
    #[must_use]
    pub const fn key(&self) -> &ConversationKey {
        &self.key
    }

    /// Returns the viewer the summary was computed for.
    #[must_use]
    pub const fn viewer(&self) -> &UserId {
        &self.viewer
    }

    /// Returns the conversation partner.
    #[must_use]
    pub const fn partner(&self) -> &UserId {
        &self.partner
    }

    /// Returns the content of the most recent message.
    #[must_use]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Returns the timestamp of the most recent message.
    #[must_use]
    pub const fn last_message_at(&self) -> DateTime<Utc> {
        self.last_message_at
    }

    /// Returns the number of messages the viewer has not read.
    #[must_use]
    pub const fn unread_count(&self) -> usize {
        self.unread_count
    }

    /// Returns the pet listing the conversation is about, if any.
    #[must_use]
    pub const fn pet_id(&self) -> Option<&PetId> {
        self.pet_id.as_ref()
    }
}

/// Groups messages by the participant that is not `viewer`.
///
/// Group contents keep the input order; nothing is sorted here, sorting
/// happens at summary time.
#[must_use]
pub fn group_by_partner(viewer: &UserId, messages: Vec<Message>) -> HashMap<UserId, Vec<Message>> {
    let mut groups: HashMap<UserId, Vec<Message>> = HashMap::new();
    for message in messages {
        let partner = message.partner_of(viewer).clone();
        groups.entry(partner).or_default().push(message);
    }
    groups
}
