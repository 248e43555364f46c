//! Conversation aggregation over the directed message queries.

use crate::identity::domain::UserId;
use crate::messaging::{
    domain::{ConversationSummary, Message, group_by_partner},
    ports::{MessageRepository, MessageStoreResult},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Aggregates per-partner conversations for a viewer.
///
/// The store only answers single-direction queries, so a viewer's
/// conversation list is always assembled from two fetches, everything
/// they sent and everything they received, joined in memory. Both
/// fetches must succeed; a failing sub-query fails the aggregation
/// rather than producing a partial view.
#[derive(Clone)]
pub struct ConversationService<R>
where
    R: MessageRepository,
{
    repository: Arc<R>,
}

impl<R> ConversationService<R>
where
    R: MessageRepository,
{
    /// Creates a new conversation service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the viewer's messages grouped by conversation partner.
    ///
    /// Group contents are unsorted at this stage; ordering is applied
    /// when summarising.
    ///
    /// # Errors
    ///
    /// Returns the store error when either directional fetch fails.
    pub async fn list_conversations(
        &self,
        viewer: &UserId,
    ) -> MessageStoreResult<HashMap<UserId, Vec<Message>>> {
        let mut messages = self.repository.find_by_sender(viewer).await?;
        messages.extend(self.repository.find_by_receiver(viewer).await?);
        Ok(group_by_partner(viewer, messages))
    }

    /// Summarises grouped messages into a conversation list.
    ///
    /// Pure over its input: summarising the same groups twice yields the
    /// same output. The list is ordered by last-message timestamp
    /// descending; exact timestamp ties are broken by conversation key
    /// ascending so the ordering never depends on store iteration order.
    #[must_use]
    pub fn summarize(
        &self,
        viewer: &UserId,
        groups: &HashMap<UserId, Vec<Message>>,
    ) -> Vec<ConversationSummary> {
        let mut summaries: Vec<ConversationSummary> = groups
            .iter()
            .filter_map(|(partner, messages)| {
                ConversationSummary::from_group(viewer, partner, messages)
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.last_message_at()
                .cmp(&a.last_message_at())
                .then_with(|| a.key().cmp(b.key()))
        });
        summaries
    }

    /// Returns the viewer's conversation list, most recent first.
    ///
    /// # Errors
    ///
    /// Returns the store error when either directional fetch fails.
    pub async fn summaries(&self, viewer: &UserId) -> MessageStoreResult<Vec<ConversationSummary>> {
        let groups = self.list_conversations(viewer).await?;
        Ok(self.summarize(viewer, &groups))
    }
}
