//! One-way channel to the host process.
//!
//! Badge resets and marker persistence are owned by the host process;
//! the feed only emits commands. Sends are best-effort: a full or
//! closed channel is logged and swallowed, never surfaced to the
//! caller.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// Channel buffer size for host commands.
const COMMAND_BUFFER_SIZE: usize = 64;

/// Timeline label under which the read marker is persisted.
pub const MARKER_TIMELINE: &str = "notifications";

/// Persisted last-read position for one timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalMarker {
    /// Account the marker belongs to.
    pub owner_id: String,
    /// Timeline label, `"notifications"` for this feed.
    pub timeline: String,
    /// Id of the last record the user has read.
    pub last_read_id: String,
}

/// Commands the feed sends to the host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Clear the unread-count indicator.
    ResetBadge,
    /// Durably persist a read marker.
    SaveMarker(LocalMarker),
}

/// Clonable sender half of the host channel.
#[derive(Clone)]
pub struct HostBridge {
    sender: mpsc::Sender<HostCommand>,
}

impl HostBridge {
    /// Create a bridge together with the receiver the host process
    /// (or a test) drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::Receiver<HostCommand>) {
        let (sender, receiver) = mpsc::channel(COMMAND_BUFFER_SIZE);
        (Self { sender }, receiver)
    }

    /// Signal the host to clear the unread badge.
    pub fn reset_badge(&self) {
        if let Err(e) = self.sender.try_send(HostCommand::ResetBadge) {
            warn!(error = %e, "Failed to send badge reset to host");
        }
    }

    /// Ask the host to persist a read marker.
    pub async fn save_marker(&self, marker: LocalMarker) {
        if let Err(e) = self.sender.send(HostCommand::SaveMarker(marker)).await {
            warn!(error = %e, "Failed to send marker to host");
        }
    }
}
