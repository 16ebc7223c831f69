//! Session configuration.
//!
//! The feed never owns account or credential state; it receives a
//! read-only [`Session`] describing which server to talk to and as
//! whom. The session is loaded once by the host application and passed
//! into each operation call.

use serde::Deserialize;
use std::path::Path;

/// Server protocol variant the session speaks.
///
/// All listed variants serve the Mastodon v1 notifications endpoint;
/// the variant is carried so callers can branch if endpoints diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnsVariant {
    /// Mastodon.
    Mastodon,
    /// Pleroma (and forks such as Akkoma).
    Pleroma,
    /// Friendica.
    Friendica,
}

impl SnsVariant {
    /// Lowercase wire/display name of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mastodon => "mastodon",
            Self::Pleroma => "pleroma",
            Self::Friendica => "friendica",
        }
    }
}

/// Read-only session context for one signed-in account.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Base URL of the server, e.g. `https://mastodon.social`.
    pub base_url: String,
    /// OAuth access token for the account.
    pub access_token: String,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Protocol variant of the server.
    #[serde(default = "default_sns")]
    pub sns: SnsVariant,
    /// Local identifier of the signed-in account.
    pub account_id: String,
}

fn default_user_agent() -> String {
    concat!("fedifeed/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_sns() -> SnsVariant {
    SnsVariant::Mastodon
}

impl Session {
    /// Load the session from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `FEDIFEED_ENV`)
    /// 3. Environment variables with `FEDIFEED_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("FEDIFEED_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FEDIFEED")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load the session from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("FEDIFEED")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
