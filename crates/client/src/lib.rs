//! HTTP fetch collaborator for fedifeed.
//!
//! Provides [`MastodonSource`], the production implementation of
//! [`fedifeed_core::NotificationSource`].

pub mod mastodon;

pub use mastodon::MastodonSource;
