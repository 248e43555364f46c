//! End-to-end conversation aggregation over the in-memory store.

use super::helpers::{MessagingHarness, messaging_harness, sign_in, user};
use homeward::messaging::domain::{ConversationKey, MessageStatus};
use rstest::{fixture, rstest};

#[fixture]
fn harness() -> MessagingHarness {
    messaging_harness()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn two_party_exchange_summarises_for_each_viewer(harness: MessagingHarness) {
    let alice = user("alice");
    let bob = user("bob");

    sign_in(&harness.identity, "alice");
    harness
        .messages
        .send_text(bob.clone(), "Hi", None)
        .await
        .expect("first send should succeed");
    sign_in(&harness.identity, "bob");
    harness
        .messages
        .send_text(alice.clone(), "Hello back", None)
        .await
        .expect("second send should succeed");

    let summaries = harness
        .conversations
        .summaries(&alice)
        .await
        .expect("aggregation should succeed");
    assert_eq!(summaries.len(), 1);
    let summary = summaries.first().expect("one conversation expected");
    assert_eq!(summary.last_message(), "Hello back");
    assert_eq!(summary.unread_count(), 1);
    assert_eq!(summary.partner(), &bob);
    assert_eq!(
        summary.key(),
        &ConversationKey::for_pair(&alice, &bob)
    );

    // Bob sees the same conversation; Alice's message is unread for him.
    let bob_view = harness
        .conversations
        .summaries(&bob)
        .await
        .expect("aggregation should succeed");
    let bob_summary = bob_view.first().expect("one conversation expected");
    assert_eq!(bob_summary.key(), summary.key());
    assert_eq!(bob_summary.unread_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn marking_read_clears_the_unread_count(harness: MessagingHarness) {
    let alice = user("alice");
    let bob = user("bob");

    sign_in(&harness.identity, "bob");
    harness
        .messages
        .send_text(alice.clone(), "one", None)
        .await
        .expect("send should succeed");
    harness
        .messages
        .send_text(alice.clone(), "two", None)
        .await
        .expect("send should succeed");

    let advanced = harness
        .messages
        .mark_conversation_read(&alice, &bob)
        .await
        .expect("mark read should succeed");
    assert_eq!(advanced, 2);

    let summaries = harness
        .conversations
        .summaries(&alice)
        .await
        .expect("aggregation should succeed");
    let summary = summaries.first().expect("one conversation expected");
    assert_eq!(summary.unread_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conversations_span_multiple_partners_most_recent_first(harness: MessagingHarness) {
    let alice = user("alice");

    sign_in(&harness.identity, "bob");
    harness
        .messages
        .send_text(alice.clone(), "from bob", None)
        .await
        .expect("send should succeed");
    sign_in(&harness.identity, "carl");
    harness
        .messages
        .send_text(alice.clone(), "from carl", None)
        .await
        .expect("send should succeed");
    sign_in(&harness.identity, "alice");
    harness
        .messages
        .send_text(user("bob"), "to bob", None)
        .await
        .expect("send should succeed");

    let groups = harness
        .conversations
        .list_conversations(&alice)
        .await
        .expect("aggregation should succeed");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups.get(&user("bob")).map(Vec::len), Some(2));
    assert_eq!(groups.get(&user("carl")).map(Vec::len), Some(1));

    let summaries = harness
        .conversations
        .summaries(&alice)
        .await
        .expect("aggregation should succeed");
    assert_eq!(summaries.len(), 2);
    // The reply to bob is the most recent message overall.
    assert_eq!(
        summaries.first().expect("two summaries").partner(),
        &user("bob")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chat_fetch_returns_messages_oldest_first(harness: MessagingHarness) {
    let alice = user("alice");
    let bob = user("bob");

    sign_in(&harness.identity, "alice");
    harness
        .messages
        .send_text(bob.clone(), "first", None)
        .await
        .expect("send should succeed");
    sign_in(&harness.identity, "bob");
    harness
        .messages
        .send_text(alice.clone(), "second", None)
        .await
        .expect("send should succeed");
    sign_in(&harness.identity, "alice");
    harness
        .messages
        .send_text(bob.clone(), "third", None)
        .await
        .expect("send should succeed");

    let conversation = harness
        .messages
        .fetch_conversation(&alice, &bob)
        .await
        .expect("fetch should succeed");
    let contents: Vec<&str> = conversation.iter().map(|m| m.content()).collect();
    assert_eq!(contents, ["first", "second", "third"]);
    assert!(
        conversation
            .iter()
            .all(|m| m.status() == MessageStatus::Sent)
    );
}
