//! Feed state and its synchronous mutations.
//!
//! All mutations are deterministic, infallible and perform no I/O.
//! Operations in [`feed`](crate::feed) never touch the record list
//! directly; they go through these methods.

use crate::entities::{NotificationRecord, NotificationType, StatusSnapshot};

/// Page size requested from the server.
pub const PAGE_SIZE: u32 = 30;

/// Number of entries kept when archiving.
pub const ARCHIVE_KEEP: usize = 30;

/// Authoritative state of one account's notification feed.
#[derive(Debug, Clone)]
pub struct FeedState {
    /// Deduplicated-at-head, newest-first record list.
    pub notifications: Vec<NotificationRecord>,
    /// Backward-pagination-in-flight guard.
    pub lazy_loading: bool,
    /// Whether the view is pinned to the head of the feed.
    pub heading: bool,
    /// Whether the view is currently being scrolled.
    pub scrolling: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            notifications: Vec::new(),
            lazy_loading: false,
            heading: true,
            scrolling: false,
        }
    }
}

impl FeedState {
    /// Create the empty session-start state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pagination-in-flight guard.
    pub fn set_lazy_loading(&mut self, value: bool) {
        self.lazy_loading = value;
    }

    /// Set the heading flag.
    pub fn set_heading(&mut self, value: bool) {
        self.heading = value;
    }

    /// Set the scrolling flag.
    pub fn set_scrolling(&mut self, value: bool) {
        self.scrolling = value;
    }

    /// Prepend a record unless one with the same id is already present.
    ///
    /// The guard makes streaming inserts and head re-fetches idempotent;
    /// a duplicate is silently dropped, never an error.
    pub fn append_head(&mut self, record: NotificationRecord) {
        if self.notifications.iter().any(|n| n.id == record.id) {
            return;
        }
        self.notifications.insert(0, record);
    }

    /// Replace the whole list, newest-first as supplied.
    pub fn replace_all(&mut self, records: Vec<NotificationRecord>) {
        self.notifications = records;
    }

    /// Concatenate an older page after the existing records.
    ///
    /// No id re-check happens here; if the server ever returns
    /// overlapping pages, duplicates get in. Known upstream gap.
    pub fn append_tail(&mut self, records: Vec<NotificationRecord>) {
        self.notifications.extend(records);
    }

    /// Re-sync the embedded status copy on mention records.
    ///
    /// Only mentions are updated. The renderer does not consult status
    /// data for the other types, so their stale copies are harmless.
    pub fn sync_embedded_status(&mut self, status: &StatusSnapshot) {
        for record in &mut self.notifications {
            if record.notification_type == NotificationType::Mention
                && record.status.as_ref().is_some_and(|s| s.id == status.id)
            {
                record.status = Some(status.clone());
            }
        }
    }

    /// Remove every record generated about the given status.
    ///
    /// A record matches when its embedded status has this id, or when
    /// the embedded status is a reblog wrapper around it: deleting an
    /// original also removes notifications about its reblogs.
    pub fn remove_by_status(&mut self, status_id: &str) {
        self.notifications.retain(|record| {
            record
                .status
                .as_ref()
                .is_none_or(|status| !status.references(status_id))
        });
    }

    /// Empty the list on session teardown.
    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Truncate to the newest [`ARCHIVE_KEEP`] entries to bound memory.
    pub fn archive(&mut self) {
        self.notifications.truncate(ARCHIVE_KEEP);
    }
}
