//! Wire-facing entities of the notification feed.

pub mod filter;
pub mod notification;
pub mod status;

pub use filter::{FilterContext, FilterRule};
pub use notification::{NotificationRecord, NotificationType};
pub use status::StatusSnapshot;
