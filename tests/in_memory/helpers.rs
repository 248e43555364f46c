//! Shared fixtures for the in-memory integration tests.

use homeward::identity::adapters::FixedIdentityProvider;
use homeward::identity::domain::{UserId, UserIdentity};
use homeward::messaging::adapters::memory::{InMemoryBlobStore, InMemoryMessageStore};
use homeward::messaging::services::{ConversationService, LiveMessageFeed, MessageService};
use mockable::DefaultClock;
use std::sync::Arc;

/// Message service wired to the shared in-memory adapters.
pub type TestMessageService =
    MessageService<InMemoryMessageStore, InMemoryBlobStore, FixedIdentityProvider, DefaultClock>;

/// Everything a messaging flow test needs, sharing one store.
pub struct MessagingHarness {
    /// Message orchestration service.
    pub messages: TestMessageService,
    /// Conversation aggregation service.
    pub conversations: ConversationService<InMemoryMessageStore>,
    /// Live feed multiplexer.
    pub live: LiveMessageFeed<InMemoryMessageStore>,
    /// The shared store, for direct inspection.
    pub store: Arc<InMemoryMessageStore>,
    /// The identity provider, for signing users in and out.
    pub identity: Arc<FixedIdentityProvider>,
}

/// Builds a messaging harness with nobody signed in.
#[must_use]
pub fn messaging_harness() -> MessagingHarness {
    let store = Arc::new(InMemoryMessageStore::new());
    let identity = Arc::new(FixedIdentityProvider::new());
    let messages = MessageService::new(
        Arc::clone(&store),
        Arc::new(InMemoryBlobStore::new()),
        Arc::clone(&identity),
        Arc::new(DefaultClock),
    );
    let conversations = ConversationService::new(Arc::clone(&store));
    let live = LiveMessageFeed::new(Arc::clone(&store));
    MessagingHarness {
        messages,
        conversations,
        live,
        store,
        identity,
    }
}

/// Creates a user id, panicking on invalid input.
///
/// # Panics
///
/// Panics when `value` is empty; test inputs are literals.
#[must_use]
pub fn user(value: &str) -> UserId {
    UserId::new(value).expect("valid user id")
}

/// Signs `value` in as the current user.
pub fn sign_in(identity: &FixedIdentityProvider, value: &str) {
    identity.sign_in(UserIdentity::new(user(value)));
}
