//! Domain model for two-party messaging.
//!
//! The messaging domain models individual messages, their monotonic
//! delivery-status lifecycle, and the conversation summaries derived from
//! them, while keeping all store concerns outside of the domain boundary.

mod conversation;
mod error;
mod ids;
mod message;

pub use conversation::{ConversationKey, ConversationSummary, group_by_partner};
pub use error::{MessagingDomainError, ParseMessageStatusError};
pub use ids::MessageId;
pub use message::{Message, MessageKind, MessageStatus, PersistedMessageData};
