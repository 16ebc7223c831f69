//! Content filter rule entity.
//!
//! Rules are stored elsewhere; the feed consumes them read-only to
//! decide which apply to the notifications context.

use serde::{Deserialize, Serialize};

/// Timeline contexts a filter rule can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterContext {
    /// Home and list timelines.
    Home,
    /// The notification feed.
    Notifications,
    /// Public timelines.
    Public,
    /// Expanded conversation threads.
    Thread,
    /// Profile pages.
    Account,
}

/// One server-side content filter rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    /// Server-assigned rule identifier.
    pub id: String,
    /// Text the rule matches against.
    pub phrase: String,
    /// Contexts the rule applies to.
    pub context: Vec<FilterContext>,
    /// Irreversible rules are applied server-side and never reach the
    /// client; reversible ones must be applied at render time.
    #[serde(default)]
    pub irreversible: bool,
}

impl FilterRule {
    /// Whether the rule applies to the given context.
    #[must_use]
    pub fn applies_to(&self, context: FilterContext) -> bool {
        self.context.contains(&context)
    }
}
