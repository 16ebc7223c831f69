//! Fetch collaborator seam.
//!
//! The feed never performs HTTP itself. It asks a [`NotificationSource`]
//! for pages; the `fedifeed-client` crate provides the production
//! implementation, tests substitute doubles.

use async_trait::async_trait;
use fedifeed_common::{AppResult, Session};

use crate::entities::NotificationRecord;
use crate::state::PAGE_SIZE;

/// One page request against the notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of records to return.
    pub limit: u32,
    /// Return only records strictly older than this id.
    pub max_id: Option<String>,
}

impl PageRequest {
    /// Request the most recent page.
    #[must_use]
    pub const fn latest() -> Self {
        Self {
            limit: PAGE_SIZE,
            max_id: None,
        }
    }

    /// Request the page strictly older than the given record id.
    #[must_use]
    pub fn older_than(max_id: &str) -> Self {
        Self {
            limit: PAGE_SIZE,
            max_id: Some(max_id.to_string()),
        }
    }
}

/// Trait for fetching notification pages from a server.
///
/// Implementations fail with a transport or auth error on non-success
/// responses; the feed propagates those unmodified and never retries.
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// Fetch one page of notifications for the session's account,
    /// newest-first.
    async fn notifications(
        &self,
        session: &Session,
        page: &PageRequest,
    ) -> AppResult<Vec<NotificationRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_constructors() {
        assert_eq!(PageRequest::latest().limit, PAGE_SIZE);
        assert_eq!(PageRequest::latest().max_id, None);

        let older = PageRequest::older_than("99");
        assert_eq!(older.limit, PAGE_SIZE);
        assert_eq!(older.max_id.as_deref(), Some("99"));
    }
}
