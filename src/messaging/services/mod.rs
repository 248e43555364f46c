//! Application services for messaging.

mod conversations;
mod live;
mod messages;

pub use conversations::ConversationService;
pub use live::{FeedSubscription, LiveMessageFeed};
pub use messages::{MessageService, MessagingError, MessagingResult};
