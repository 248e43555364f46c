//! Port contracts for messaging.
//!
//! Ports define store-agnostic interfaces used by the messaging services.

pub mod blobs;
pub mod changes;
pub mod repository;

pub use blobs::{BlobStore, BlobStoreError, BlobStoreResult, ObjectRef};
pub use changes::{ChangeFeed, FeedClosed, MessageChange, MessageChanges};
pub use repository::{MessageRepository, MessageStoreError, MessageStoreResult};
