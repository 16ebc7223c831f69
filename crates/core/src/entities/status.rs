//! Status snapshot entity.

use serde::{Deserialize, Serialize};

/// Denormalized copy of a status, embedded inside a notification.
///
/// This copy can drift from the canonical server entity when the status
/// is edited elsewhere; the feed re-syncs it explicitly through
/// [`FeedState::sync_embedded_status`](crate::state::FeedState::sync_embedded_status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Server-assigned status identifier.
    pub id: String,

    /// The boosted status, when this snapshot is a reblog wrapper.
    #[serde(default)]
    pub reblog: Option<Box<StatusSnapshot>>,

    /// Rendered body, opaque to this crate.
    #[serde(default)]
    pub content: String,

    /// Display fields of the author, opaque to this crate.
    #[serde(default)]
    pub account: Option<serde_json::Value>,
}

impl StatusSnapshot {
    /// Whether this snapshot is about the given status, either directly
    /// or through its reblog target.
    #[must_use]
    pub fn references(&self, status_id: &str) -> bool {
        if self.id == status_id {
            return true;
        }
        self.reblog.as_deref().is_some_and(|reblog| reblog.id == status_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str, reblog_id: Option<&str>) -> StatusSnapshot {
        StatusSnapshot {
            id: id.to_string(),
            reblog: reblog_id.map(|r| Box::new(snapshot(r, None))),
            content: String::new(),
            account: None,
        }
    }

    #[test]
    fn test_references_direct() {
        assert!(snapshot("5", None).references("5"));
        assert!(!snapshot("5", None).references("6"));
    }

    #[test]
    fn test_references_through_reblog() {
        let wrapper = snapshot("90", Some("77"));
        assert!(wrapper.references("77"));
        assert!(wrapper.references("90"));
        assert!(!wrapper.references("5"));
    }
}
