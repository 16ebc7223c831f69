//! Core state management for the fedifeed notification feed.
//!
//! The aggregate is [`NotificationFeed`]: it owns the authoritative,
//! deduplicated, newest-first record list, coordinates backward
//! pagination against an injected [`NotificationSource`], keeps the
//! list consistent as statuses are edited or deleted elsewhere, and
//! emits read-marker and badge-reset commands through a [`HostBridge`].

pub mod bridge;
pub mod entities;
pub mod feed;
pub mod source;
pub mod state;

pub use bridge::{HostBridge, HostCommand, LocalMarker, MARKER_TIMELINE};
pub use entities::{
    FilterContext, FilterRule, NotificationRecord, NotificationType, StatusSnapshot,
};
pub use feed::NotificationFeed;
pub use source::{NotificationSource, PageRequest};
pub use state::{ARCHIVE_KEEP, FeedState, PAGE_SIZE};
