//! Unit tests for the message delivery-status lifecycle.

use crate::identity::domain::UserId;
use crate::messaging::domain::{Message, MessageStatus};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;

const ALL_STATUSES: [MessageStatus; 4] = [
    MessageStatus::Sending,
    MessageStatus::Sent,
    MessageStatus::Delivered,
    MessageStatus::Read,
];

#[rstest]
#[case(MessageStatus::Sending, MessageStatus::Sending, false)]
#[case(MessageStatus::Sending, MessageStatus::Sent, true)]
#[case(MessageStatus::Sending, MessageStatus::Delivered, true)]
#[case(MessageStatus::Sending, MessageStatus::Read, true)]
#[case(MessageStatus::Sent, MessageStatus::Sending, false)]
#[case(MessageStatus::Sent, MessageStatus::Sent, false)]
#[case(MessageStatus::Sent, MessageStatus::Delivered, true)]
#[case(MessageStatus::Sent, MessageStatus::Read, true)]
#[case(MessageStatus::Delivered, MessageStatus::Sending, false)]
#[case(MessageStatus::Delivered, MessageStatus::Sent, false)]
#[case(MessageStatus::Delivered, MessageStatus::Delivered, false)]
#[case(MessageStatus::Delivered, MessageStatus::Read, true)]
#[case(MessageStatus::Read, MessageStatus::Sending, false)]
#[case(MessageStatus::Read, MessageStatus::Sent, false)]
#[case(MessageStatus::Read, MessageStatus::Delivered, false)]
#[case(MessageStatus::Read, MessageStatus::Read, false)]
fn can_advance_to_allows_only_forward_moves(
    #[case] from: MessageStatus,
    #[case] to: MessageStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_advance_to(to), expected);
}

#[rstest]
fn advance_never_moves_backward() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut message = Message::text(
        UserId::new("alice")?,
        UserId::new("bob")?,
        "Hi",
        None,
        &clock,
    )?;

    // Walk the lifecycle forward, attempting every regression on the way.
    let mut observed = vec![message.status()];
    for target in [
        MessageStatus::Sent,
        MessageStatus::Delivered,
        MessageStatus::Read,
    ] {
        ensure!(message.advance_status(target));
        observed.push(message.status());

        for regression in ALL_STATUSES {
            if regression.precedes(message.status()) || regression == message.status() {
                ensure!(!message.advance_status(regression));
                ensure!(message.status() == target);
            }
        }
    }

    // The observed sequence is non-decreasing.
    ensure!(
        observed
            .windows(2)
            .all(|pair| match pair {
                [earlier, later] => !later.precedes(*earlier),
                _ => false,
            })
    );
    Ok(())
}

#[test]
fn status_round_trips_through_storage_string() -> eyre::Result<()> {
    for status in ALL_STATUSES {
        ensure!(MessageStatus::try_from(status.as_str())? == status);
    }
    Ok(())
}

#[test]
fn status_parse_refuses_unknown_values() {
    assert!(MessageStatus::try_from("queued").is_err());
}
