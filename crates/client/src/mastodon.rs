//! Mastodon-compatible notification source.
//!
//! Talks to the `/api/v1/notifications` endpoint, which Mastodon,
//! Pleroma and Friendica all serve.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, warn};
use url::Url;

use fedifeed_common::{AppError, AppResult, Session};
use fedifeed_core::{NotificationRecord, NotificationSource, PageRequest};

/// Request timeout for notification fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout for notification fetches.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reqwest-backed [`NotificationSource`] for Mastodon-compatible servers.
///
/// Credentials and the server address come from the [`Session`] passed
/// into each call; the client itself holds only the connection pool.
#[derive(Clone)]
pub struct MastodonSource {
    client: Client,
}

impl MastodonSource {
    /// Create a source with the standard timeouts.
    pub fn new() -> AppResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Build the notifications endpoint URL for one page request.
    fn endpoint(session: &Session, page: &PageRequest) -> AppResult<Url> {
        let base = Url::parse(&session.base_url)
            .map_err(|e| AppError::Config(format!("Invalid base URL: {e}")))?;
        let mut url = base
            .join("/api/v1/notifications")
            .map_err(|e| AppError::Config(format!("Invalid base URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("limit", &page.limit.to_string());
        if let Some(max_id) = &page.max_id {
            url.query_pairs_mut().append_pair("max_id", max_id);
        }
        Ok(url)
    }
}

#[async_trait]
impl NotificationSource for MastodonSource {
    async fn notifications(
        &self,
        session: &Session,
        page: &PageRequest,
    ) -> AppResult<Vec<NotificationRecord>> {
        let url = Self::endpoint(session, page)?;

        debug!(
            url = %url,
            sns = session.sns.as_str(),
            "Fetching notification page"
        );

        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &session.user_agent)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %url, "Notification fetch rejected: bad credentials");
            return Err(AppError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                url = %url,
                status = %status,
                body = %body,
                "Notification fetch failed"
            );
            return Err(AppError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let records: Vec<NotificationRecord> = response.json().await?;
        debug!(count = records.len(), "Notification page received");
        Ok(records)
    }
}
