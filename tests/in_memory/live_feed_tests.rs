//! Live feed lifecycle over the in-memory store.

use super::helpers::{MessagingHarness, messaging_harness, sign_in, user};
use homeward::messaging::domain::{Message, MessageStatus};
use homeward::messaging::ports::MessageRepository;
use rstest::{fixture, rstest};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

#[fixture]
fn harness() -> MessagingHarness {
    messaging_harness()
}

/// Receives updates until `predicate` matches one, within five seconds.
async fn wait_for_update(
    updates: &mut mpsc::UnboundedReceiver<Vec<Message>>,
    predicate: impl Fn(&[Message]) -> bool,
) -> Vec<Message> {
    timeout(Duration::from_secs(5), async {
        loop {
            let update = updates.recv().await.expect("feed should stay open");
            if predicate(&update) {
                return update;
            }
        }
    })
    .await
    .expect("expected update within the timeout")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_delivers_initial_snapshot_and_live_updates(harness: MessagingHarness) {
    let alice = user("alice");
    let bob = user("bob");

    let (tx, mut updates) = mpsc::unbounded_channel();
    let subscription = harness
        .live
        .subscribe(alice.clone(), bob.clone(), move |messages| {
            // A closed receiver only means the test is done looking.
            drop(tx.send(messages));
        })
        .await
        .expect("subscription should succeed");

    // Initial snapshot of an empty conversation.
    let initial = wait_for_update(&mut updates, |update| update.is_empty()).await;
    assert!(initial.is_empty());

    sign_in(&harness.identity, "bob");
    harness
        .messages
        .send_text(alice.clone(), "Hi Alice", None)
        .await
        .expect("send should succeed");

    let update = wait_for_update(&mut updates, |update| update.len() == 1).await;
    let message = update.first().expect("one message expected");
    assert_eq!(message.content(), "Hi Alice");

    subscription.close();
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_advances_received_messages_to_delivered(harness: MessagingHarness) {
    let alice = user("alice");
    let bob = user("bob");

    sign_in(&harness.identity, "bob");
    let sent = harness
        .messages
        .send_text(alice.clone(), "Hi Alice", None)
        .await
        .expect("send should succeed");
    assert_eq!(sent.status(), MessageStatus::Sent);

    let (tx, mut updates) = mpsc::unbounded_channel();
    let subscription = harness
        .live
        .subscribe(alice.clone(), bob.clone(), move |messages| {
            drop(tx.send(messages));
        })
        .await
        .expect("subscription should succeed");

    // The passive receipt advances the message, and the resulting change
    // event feeds a refreshed view back through the same subscription.
    let update = wait_for_update(&mut updates, |update| {
        update
            .iter()
            .any(|message| message.status() == MessageStatus::Delivered)
    })
    .await;
    assert_eq!(update.len(), 1);

    let stored = harness
        .store
        .find_by_id(sent.id())
        .await
        .expect("lookup should succeed")
        .expect("message should be stored");
    assert_eq!(stored.status(), MessageStatus::Delivered);

    subscription.close();
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_subscription_receives_nothing_further(harness: MessagingHarness) {
    let alice = user("alice");
    let bob = user("bob");

    let (tx, mut updates) = mpsc::unbounded_channel();
    let subscription = harness
        .live
        .subscribe(alice.clone(), bob.clone(), move |messages| {
            drop(tx.send(messages));
        })
        .await
        .expect("subscription should succeed");

    let initial = wait_for_update(&mut updates, |update| update.is_empty()).await;
    assert!(initial.is_empty());

    subscription.close();
    // Cancellation is an abort; give the runtime a moment to finish it.
    tokio::time::sleep(Duration::from_millis(50)).await;

    sign_in(&harness.identity, "bob");
    harness
        .messages
        .send_text(alice.clone(), "anyone there?", None)
        .await
        .expect("send should succeed");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(
        updates.try_recv().is_err(),
        "no updates should arrive after close"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscription_reports_its_conversation(harness: MessagingHarness) {
    let alice = user("alice");
    let bob = user("bob");

    let subscription = harness
        .live
        .subscribe(alice.clone(), bob.clone(), |_| {})
        .await
        .expect("subscription should succeed");

    assert_eq!(
        subscription.conversation().as_str(),
        "alice-bob"
    );
    assert!(subscription.is_active());
    drop(subscription);
}
