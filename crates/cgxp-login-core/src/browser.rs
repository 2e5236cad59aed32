//! Browser surface the widget drives: location, navigation and alerts.
//!
//! # Design
//! - Keep the core DOM-free; the UI crate implements [`Browser`] over `window`.
//! - Alerts are blocking in the browser, so callers treat them as fire-and-forget.

use crate::form::Credentials;

/// Snapshot of the current page address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLocation {
    /// Full URL (`window.location.href`).
    pub href: String,
    /// Query string including the leading `?` (`window.location.search`), or empty.
    pub search: String,
}

impl PageLocation {
    /// Build a location from explicit `href` and `search` parts.
    #[must_use]
    pub fn new(href: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            search: search.into(),
        }
    }

    /// Build a location from a full URL, deriving the query string from it.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        let search = url::Url::parse(href).map_or_else(
            |_| raw_search(href),
            |parsed| {
                parsed
                    .query()
                    .filter(|query| !query.is_empty())
                    .map_or_else(String::new, |query| format!("?{query}"))
            },
        );
        Self::new(href, search)
    }
}

fn raw_search(href: &str) -> String {
    let without_fragment = href.split('#').next().unwrap_or_default();
    without_fragment
        .find('?')
        .map(|idx| without_fragment[idx..].to_string())
        .filter(|search| search.len() > 1)
        .unwrap_or_default()
}

/// Browser operations used by the login and logout flows.
pub trait Browser {
    /// Current page address.
    fn location(&self) -> PageLocation;

    /// Navigate the page to `url`.
    fn navigate(&self, url: &str);

    /// Reload the page by re-navigating to the current URL.
    fn reload(&self) {
        let href = self.location().href;
        self.navigate(&href);
    }

    /// Show a blocking alert.
    fn alert(&self, message: &str);

    /// Offer the native credential-save prompt where the platform supports it.
    fn offer_credential_save(&self, _credentials: &Credentials) {}
}
