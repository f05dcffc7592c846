//! # Access Gate
//!
//! Decides which controls the page shows.
//!
//! ## NOT A SECURITY BOUNDARY
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  This is a presentation filter. Every inventory operation stays        │
//! │  callable whatever the decision says, and the stored flag can be       │
//! │  edited by anyone with access to the storage. Real access control      │
//! │  needs an enforcing boundary outside the page.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decision Table
//! ```text
//!   stored isAdmin   ?role=guest   privileged   stored flag afterwards
//!   ──────────────   ───────────   ──────────   ──────────────────────
//!   "true"           no            yes          unchanged
//!   "true"           yes           no           "false"
//!   other/absent     no            no           unchanged
//!   other/absent     yes           no           "false"
//! ```
//! Guest mode can only take privilege away, never grant it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query parameter carrying the role.
pub const ROLE_PARAM: &str = "role";

/// Role value that forces the non-privileged view.
pub const GUEST_ROLE: &str = "guest";

/// Result of evaluating the gate at page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AccessDecision {
    /// Creation, category management and delete controls are shown.
    pub privileged: bool,

    /// The query requested guest mode.
    pub guest: bool,

    /// The stored admin flag must be overwritten with `false`.
    pub revoke_stored_flag: bool,
}

impl AccessDecision {
    /// Evaluates the gate.
    ///
    /// ## Arguments
    /// * `query` - Page query string, with or without the leading `?`
    /// * `stored_flag` - Raw stored `isAdmin` value, if any
    pub fn evaluate(query: &str, stored_flag: Option<&str>) -> Self {
        let guest = is_guest_query(query);
        let admin = stored_flag == Some("true");

        AccessDecision {
            privileged: admin && !guest,
            guest,
            revoke_stored_flag: guest,
        }
    }

    /// A decision for a viewer with no rights (used after logout).
    pub fn anonymous() -> Self {
        AccessDecision {
            privileged: false,
            guest: false,
            revoke_stored_flag: false,
        }
    }

    pub fn visibility(&self) -> Visibility {
        Visibility {
            show_create: self.privileged,
            show_categories: self.privileged,
            show_delete: self.privileged,
        }
    }
}

/// Which gated controls are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Visibility {
    /// "Add product" entry point.
    pub show_create: bool,
    /// "Categories" entry point.
    pub show_categories: bool,
    /// Delete buttons in the product table and category list.
    pub show_delete: bool,
}

/// True when the first `role` parameter of `query` is `guest`.
pub fn is_guest_query(query: &str) -> bool {
    let query = query.trim().trim_start_matches('?');
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == ROLE_PARAM)
        .is_some_and(|(_, value)| value == GUEST_ROLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_without_guest_is_privileged() {
        let decision = AccessDecision::evaluate("", Some("true"));
        assert!(decision.privileged);
        assert!(!decision.revoke_stored_flag);
        assert!(decision.visibility().show_delete);
    }

    #[test]
    fn test_guest_revokes_admin() {
        let decision = AccessDecision::evaluate("?role=guest", Some("true"));
        assert!(!decision.privileged);
        assert!(decision.guest);
        assert!(decision.revoke_stored_flag);

        let visibility = decision.visibility();
        assert!(!visibility.show_create);
        assert!(!visibility.show_categories);
        assert!(!visibility.show_delete);
    }

    #[test]
    fn test_guest_never_grants() {
        let decision = AccessDecision::evaluate("role=guest", None);
        assert!(!decision.privileged);
        assert!(decision.revoke_stored_flag);
    }

    #[test]
    fn test_flag_must_be_exactly_true() {
        assert!(!AccessDecision::evaluate("", Some("TRUE")).privileged);
        assert!(!AccessDecision::evaluate("", Some("false")).privileged);
        assert!(!AccessDecision::evaluate("", None).privileged);
    }

    #[test]
    fn test_guest_query_parsing() {
        assert!(is_guest_query("?lang=es&role=guest"));
        assert!(is_guest_query("role=%67uest"));
        assert!(!is_guest_query("?role=admin&role=guest"));
        assert!(!is_guest_query("?role=Guest"));
        assert!(!is_guest_query("?guest"));
    }
}
