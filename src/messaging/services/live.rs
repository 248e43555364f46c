//! Live update multiplexer for open chat screens.
//!
//! The store exposes change notifications per directed query shape, so a
//! live conversation needs two subscriptions. Rather than merging deltas,
//! every notification triggers a full two-query re-fetch: the store's
//! feeds carry no ordering guarantee across the two shapes, and the
//! conversation volumes involved make the re-fetch the cheaper design to
//! keep correct.

use crate::identity::domain::UserId;
use crate::messaging::{
    domain::{ConversationKey, Message, MessageStatus},
    ports::{MessageChanges, MessageRepository, MessageStoreResult},
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Multiplexes store change notifications into per-conversation feeds.
pub struct LiveMessageFeed<R>
where
    R: MessageRepository + MessageChanges + 'static,
{
    store: Arc<R>,
}

impl<R> LiveMessageFeed<R>
where
    R: MessageRepository + MessageChanges + 'static,
{
    /// Creates a new live feed multiplexer.
    #[must_use]
    pub const fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Opens a live feed over the conversation between `viewer` and
    /// `partner`.
    ///
    /// `on_update` receives the full merged conversation, oldest first,
    /// once immediately and then after every change to either directed
    /// query. As a side effect of each refresh, messages the viewer has
    /// received that have not yet reached `Delivered` are advanced to
    /// `Delivered`, a passive read-receipt whose failures are logged
    /// and never surfaced.
    ///
    /// The returned handle must be treated as a scoped resource: the
    /// feed stays registered until [`FeedSubscription::close`] is called
    /// or the handle is dropped. A feed whose underlying change channel
    /// closes terminates on its own and is not reconnected.
    ///
    /// # Errors
    ///
    /// Returns the store error when either change subscription cannot be
    /// registered.
    pub async fn subscribe<F>(
        &self,
        viewer: UserId,
        partner: UserId,
        on_update: F,
    ) -> MessageStoreResult<FeedSubscription>
    where
        F: Fn(Vec<Message>) + Send + Sync + 'static,
    {
        let mut outbound = self.store.watch_directed(&viewer, &partner).await?;
        let mut inbound = self.store.watch_directed(&partner, &viewer).await?;
        let key = ConversationKey::for_pair(&viewer, &partner);
        let store = Arc::clone(&self.store);

        let handle = tokio::spawn(async move {
            loop {
                refresh(&store, &viewer, &partner, &on_update).await;
                tokio::select! {
                    changed = outbound.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = inbound.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Ok(FeedSubscription { key, handle })
    }
}

/// Re-runs the two-query fetch and pushes the merged result to the
/// subscriber. Skipped entirely when either sub-query fails; the
/// subscriber never sees a partial conversation.
async fn refresh<R, F>(store: &Arc<R>, viewer: &UserId, partner: &UserId, on_update: &F)
where
    R: MessageRepository,
    F: Fn(Vec<Message>) + Send + Sync,
{
    let outbound = match store.find_directed(viewer, partner).await {
        Ok(messages) => messages,
        Err(err) => {
            warn!(error = %err, "live refresh failed, keeping previous view");
            return;
        }
    };
    let inbound = match store.find_directed(partner, viewer).await {
        Ok(messages) => messages,
        Err(err) => {
            warn!(error = %err, "live refresh failed, keeping previous view");
            return;
        }
    };

    let mut messages = outbound;
    messages.extend(inbound);
    messages.sort_by_key(|message| (message.sent_at(), message.id().into_inner()));

    // Passive delivery receipts, best effort. The advance is guarded, so
    // repeats are no-ops and publish no further change events.
    for message in messages.iter().filter(|message| {
        message.receiver_id() == viewer && message.status().precedes(MessageStatus::Delivered)
    }) {
        if let Err(err) = store
            .advance_status(message.id(), MessageStatus::Delivered)
            .await
        {
            warn!(message_id = %message.id(), error = %err, "delivery receipt failed");
        }
    }

    on_update(messages);
}

/// Handle to an open live feed.
///
/// Dropping the handle cancels both underlying change listeners, so the
/// registration cannot outlive the owning scope even on early-exit
/// paths.
#[must_use = "dropping the subscription closes the live feed"]
#[derive(Debug)]
pub struct FeedSubscription {
    key: ConversationKey,
    handle: JoinHandle<()>,
}

impl FeedSubscription {
    /// Returns the conversation this feed covers.
    #[must_use]
    pub const fn conversation(&self) -> &ConversationKey {
        &self.key
    }

    /// Returns whether the feed task is still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Closes the feed, cancelling both underlying listeners.
    pub fn close(self) {
        // Drop performs the abort.
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
