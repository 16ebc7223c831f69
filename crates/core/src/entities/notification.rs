//! Notification entity.

use serde::{Deserialize, Serialize};

use super::status::StatusSnapshot;

/// Notification types.
///
/// Servers are free to introduce new type strings; anything this client
/// does not recognize deserializes as [`NotificationType::Unknown`] so
/// the record is retained but hidden from the rendered feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Someone followed the account.
    Follow,
    /// Someone favourited one of the account's statuses.
    Favourite,
    /// Someone reblogged one of the account's statuses.
    Reblog,
    /// The account was mentioned in a status.
    Mention,
    /// Someone reacted to a status with an emoji.
    EmojiReaction,
    /// Someone requested to follow the locked account.
    FollowRequest,
    /// Someone the account subscribes to posted a status.
    Status,
    /// A poll the account voted in has received a vote.
    PollVote,
    /// A poll the account voted in or authored has ended.
    PollExpired,
    /// Unrecognized server type string.
    #[serde(other)]
    Unknown,
}

impl NotificationType {
    /// Whether this client knows how to render the type.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// One entry of the notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Server-assigned identifier, unique and roughly monotonic.
    pub id: String,

    /// What happened.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,

    /// Embedded status copy, present for status-bearing types
    /// (mention, favourite, reblog, ...).
    #[serde(default)]
    pub status: Option<StatusSnapshot>,

    /// Display fields of the actor, opaque to this crate.
    #[serde(default)]
    pub account: Option<serde_json::Value>,

    /// When the notification was created.
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
