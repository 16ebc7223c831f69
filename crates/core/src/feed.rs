//! The notification feed aggregate.
//!
//! [`NotificationFeed`] owns the feed state and orchestrates the async
//! operations around it: initial fetch, backward pagination, marker
//! persistence and badge reset. It depends on a [`NotificationSource`]
//! for pages and a [`HostBridge`] for host-process signals; both are
//! injected so the feed is testable in isolation.
//!
//! Concurrency model: mutations run under a short-lived lock that is
//! never held across an `.await`, so they apply atomically in the order
//! their issuing operation resolves. The `lazy_loading` flag is the
//! sole mutual-exclusion primitive and guards exactly one in-flight
//! backward-pagination request.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use fedifeed_common::{AppResult, Session};

use crate::bridge::{HostBridge, LocalMarker, MARKER_TIMELINE};
use crate::entities::{FilterContext, FilterRule, NotificationRecord, StatusSnapshot};
use crate::source::{NotificationSource, PageRequest};
use crate::state::FeedState;

/// One account's notification feed.
#[derive(Clone)]
pub struct NotificationFeed {
    state: Arc<RwLock<FeedState>>,
    source: Arc<dyn NotificationSource>,
    bridge: HostBridge,
}

impl NotificationFeed {
    /// Create an empty feed backed by the given collaborators.
    #[must_use]
    pub fn new(source: Arc<dyn NotificationSource>, bridge: HostBridge) -> Self {
        Self {
            state: Arc::new(RwLock::new(FeedState::new())),
            source,
            bridge,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FeedState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FeedState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // === Operations ===

    /// Fetch the most recent page and replace the feed with it.
    ///
    /// Errors from the source propagate unmodified; no retry.
    pub async fn fetch_latest(&self, session: &Session) -> AppResult<Vec<NotificationRecord>> {
        let page = self
            .source
            .notifications(session, &PageRequest::latest())
            .await?;
        self.write().replace_all(page.clone());
        Ok(page)
    }

    /// Fetch the page strictly older than `last` and append it.
    ///
    /// Returns `Ok(None)` without issuing a request when a backward
    /// fetch is already in flight; a successful empty page is
    /// `Ok(Some(vec![]))`, so the two are distinguishable. The
    /// `lazy_loading` flag is released on both success and failure,
    /// so a single failed request never blocks later pagination.
    pub async fn fetch_older_than(
        &self,
        session: &Session,
        last: &NotificationRecord,
    ) -> AppResult<Option<Vec<NotificationRecord>>> {
        {
            let mut state = self.write();
            if state.lazy_loading {
                debug!(max_id = %last.id, "Backward fetch already in flight, skipping");
                return Ok(None);
            }
            state.set_lazy_loading(true);
        }

        let result = self
            .source
            .notifications(session, &PageRequest::older_than(&last.id))
            .await;

        self.write().set_lazy_loading(false);

        let page = result?;
        self.write().append_tail(page.clone());
        Ok(Some(page))
    }

    /// Persist the read position through the host bridge. Best-effort.
    pub async fn save_marker(&self, session: &Session, last_read_id: &str) {
        self.bridge
            .save_marker(LocalMarker {
                owner_id: session.account_id.clone(),
                timeline: MARKER_TIMELINE.to_string(),
                last_read_id: last_read_id.to_string(),
            })
            .await;
    }

    /// Ask the host to clear the unread badge. Best-effort.
    pub fn reset_badge(&self) {
        self.bridge.reset_badge();
    }

    // === State pass-throughs ===

    /// Insert a record at the head, e.g. from a streaming layer.
    /// Duplicate ids are silently dropped.
    pub fn push_head(&self, record: NotificationRecord) {
        self.write().append_head(record);
    }

    /// Set the heading flag.
    pub fn set_heading(&self, value: bool) {
        self.write().set_heading(value);
    }

    /// Set the scrolling flag.
    pub fn set_scrolling(&self, value: bool) {
        self.write().set_scrolling(value);
    }

    /// Re-sync the embedded copy of an edited status.
    pub fn sync_status(&self, status: &StatusSnapshot) {
        self.write().sync_embedded_status(status);
    }

    /// Drop every record generated about a deleted status.
    pub fn remove_status(&self, status_id: &str) {
        self.write().remove_by_status(status_id);
    }

    /// Empty the feed on session teardown.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Truncate old entries to bound memory.
    pub fn archive(&self) {
        self.write().archive();
    }

    // === Views ===

    /// Snapshot of the raw record list, newest-first.
    #[must_use]
    pub fn notifications(&self) -> Vec<NotificationRecord> {
        self.read().notifications.clone()
    }

    /// Records of recognized types only; unknown server types are
    /// hidden rather than rendered incorrectly.
    #[must_use]
    pub fn recognized(&self) -> Vec<NotificationRecord> {
        self.read()
            .notifications
            .iter()
            .filter(|n| n.notification_type.is_recognized())
            .cloned()
            .collect()
    }

    /// Whether a backward fetch is in flight.
    #[must_use]
    pub fn is_lazy_loading(&self) -> bool {
        self.read().lazy_loading
    }

    /// Whether the view is pinned to the head.
    #[must_use]
    pub fn heading(&self) -> bool {
        self.read().heading
    }

    /// Whether the view is being scrolled.
    #[must_use]
    pub fn scrolling(&self) -> bool {
        self.read().scrolling
    }

    /// Select the filter rules this feed must apply at render time:
    /// reversible rules scoped to the notifications context.
    #[must_use]
    pub fn applicable_filters(rules: &[FilterRule]) -> Vec<FilterRule> {
        rules
            .iter()
            .filter(|rule| rule.applies_to(FilterContext::Notifications) && !rule.irreversible)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::NotificationType;
    use async_trait::async_trait;
    use fedifeed_common::{AppError, SnsVariant};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Mutex as AsyncMutex, oneshot};

    fn session() -> Session {
        Session {
            base_url: "http://localhost".to_string(),
            access_token: "token".to_string(),
            user_agent: "fedifeed-test".to_string(),
            sns: SnsVariant::Mastodon,
            account_id: "acct1".to_string(),
        }
    }

    fn record(id: &str) -> NotificationRecord {
        NotificationRecord {
            id: id.to_string(),
            notification_type: NotificationType::Mention,
            status: None,
            account: None,
            created_at: None,
        }
    }

    fn unknown_record(id: &str) -> NotificationRecord {
        NotificationRecord {
            notification_type: NotificationType::Unknown,
            ..record(id)
        }
    }

    /// Source returning a fixed page, counting calls and remembering
    /// the last page request.
    struct StaticSource {
        page: Vec<NotificationRecord>,
        calls: AtomicUsize,
        last_request: Mutex<Option<PageRequest>>,
    }

    impl StaticSource {
        fn new(page: Vec<NotificationRecord>) -> Arc<Self> {
            Arc::new(Self {
                page,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl NotificationSource for StaticSource {
        async fn notifications(
            &self,
            _session: &Session,
            page: &PageRequest,
        ) -> AppResult<Vec<NotificationRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(page.clone());
            Ok(self.page.clone())
        }
    }

    /// Source that always fails with a transport error.
    struct FailingSource;

    #[async_trait]
    impl NotificationSource for FailingSource {
        async fn notifications(
            &self,
            _session: &Session,
            _page: &PageRequest,
        ) -> AppResult<Vec<NotificationRecord>> {
            Err(AppError::Transport {
                status: 502,
                body: "bad gateway".to_string(),
            })
        }
    }

    /// Source whose first call signals entry and then blocks until
    /// released, to hold a request in flight during a test.
    struct GatedSource {
        page: Vec<NotificationRecord>,
        calls: AtomicUsize,
        entered: Mutex<Option<oneshot::Sender<()>>>,
        release: AsyncMutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl NotificationSource for GatedSource {
        async fn notifications(
            &self,
            _session: &Session,
            _page: &PageRequest,
        ) -> AppResult<Vec<NotificationRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(tx) = self.entered.lock().unwrap().take() {
                let _ = tx.send(());
            }
            let gate = self.release.lock().await.take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            Ok(self.page.clone())
        }
    }

    fn feed_with(source: Arc<dyn NotificationSource>) -> NotificationFeed {
        let (bridge, _receiver) = HostBridge::channel();
        NotificationFeed::new(source, bridge)
    }

    #[tokio::test]
    async fn test_fetch_latest_replaces_state() {
        let source = StaticSource::new(vec![record("X"), record("Y")]);
        let feed = feed_with(source.clone());
        feed.push_head(record("A"));

        let page = feed.fetch_latest(&session()).await.unwrap();

        assert_eq!(page.len(), 2);
        let ids: Vec<_> = feed.notifications().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, ["X", "Y"]);
        let request = source.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request, PageRequest::latest());
    }

    #[tokio::test]
    async fn test_fetch_latest_error_leaves_state_intact() {
        let feed = feed_with(Arc::new(FailingSource));
        feed.push_head(record("A"));

        let err = feed.fetch_latest(&session()).await.unwrap_err();

        assert!(matches!(err, AppError::Transport { status: 502, .. }));
        assert_eq!(feed.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_older_than_appends_page() {
        let source = StaticSource::new(vec![record("P1"), record("P2")]);
        let feed = feed_with(source.clone());
        feed.push_head(record("B"));
        feed.push_head(record("A"));

        let page = feed
            .fetch_older_than(&session(), &record("B"))
            .await
            .unwrap();

        assert_eq!(page.unwrap().len(), 2);
        let ids: Vec<_> = feed.notifications().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, ["A", "B", "P1", "P2"]);
        let request = source.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request, PageRequest::older_than("B"));
        assert!(!feed.is_lazy_loading());
    }

    #[tokio::test]
    async fn test_fetch_older_than_rejects_overlapping_request() {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let source = Arc::new(GatedSource {
            page: vec![record("P1")],
            calls: AtomicUsize::new(0),
            entered: Mutex::new(Some(entered_tx)),
            release: AsyncMutex::new(Some(release_rx)),
        });
        let feed = feed_with(source.clone());

        let first = {
            let feed = feed.clone();
            tokio::spawn(async move { feed.fetch_older_than(&session(), &record("Z")).await })
        };
        entered_rx.await.unwrap();

        // Second call while the first is unresolved: no-op, no request.
        let second = feed.fetch_older_than(&session(), &record("Z")).await.unwrap();
        assert!(second.is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        release_tx.send(()).unwrap();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.unwrap().len(), 1);
        assert!(!feed.is_lazy_loading());

        // After release a subsequent call proceeds normally.
        let third = feed.fetch_older_than(&session(), &record("P1")).await.unwrap();
        assert!(third.is_some());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_older_than_releases_flag_on_failure() {
        let feed = feed_with(Arc::new(FailingSource));

        let err = feed
            .fetch_older_than(&session(), &record("Z"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Transport { .. }));
        assert!(!feed.is_lazy_loading());

        // Pagination is not locked out; the next attempt still fails in
        // the source rather than being rejected by the guard.
        let err = feed
            .fetch_older_than(&session(), &record("Z"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_save_marker_payload() {
        let (bridge, mut receiver) = HostBridge::channel();
        let feed = NotificationFeed::new(StaticSource::new(vec![]), bridge);

        feed.save_marker(&session(), "41").await;

        match receiver.recv().await.unwrap() {
            crate::bridge::HostCommand::SaveMarker(marker) => {
                assert_eq!(marker.owner_id, "acct1");
                assert_eq!(marker.timeline, "notifications");
                assert_eq!(marker.last_read_id, "41");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reset_badge_signals_host() {
        let (bridge, mut receiver) = HostBridge::channel();
        let feed = NotificationFeed::new(StaticSource::new(vec![]), bridge);

        feed.reset_badge();

        assert_eq!(
            receiver.recv().await.unwrap(),
            crate::bridge::HostCommand::ResetBadge
        );
    }

    #[tokio::test]
    async fn test_recognized_hides_unknown_types() {
        let feed = feed_with(StaticSource::new(vec![]));
        feed.push_head(unknown_record("2"));
        feed.push_head(record("1"));

        let recognized = feed.recognized();
        assert_eq!(recognized.len(), 1);
        assert_eq!(recognized[0].id, "1");
        // Still present in the raw list.
        assert_eq!(feed.notifications().len(), 2);
    }

    #[test]
    fn test_applicable_filters_selection() {
        let rule = |id: &str, context: Vec<FilterContext>, irreversible: bool| FilterRule {
            id: id.to_string(),
            phrase: "spoiler".to_string(),
            context,
            irreversible,
        };
        let rules = vec![
            rule("1", vec![FilterContext::Notifications], false),
            rule("2", vec![FilterContext::Home], false),
            rule(
                "3",
                vec![FilterContext::Home, FilterContext::Notifications],
                true,
            ),
        ];

        let applicable = NotificationFeed::applicable_filters(&rules);

        assert_eq!(applicable.len(), 1);
        assert_eq!(applicable[0].id, "1");
    }
}
