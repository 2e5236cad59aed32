//! Post-login redirect target resolution.
//!
//! # Design
//! - [`plan_redirect`] is pure and reports misconfiguration as an error.
//! - [`resolve_redirect_url`] turns that error into one blocking alert and falls back
//!   to the current URL, so a bad config never blocks a successful login.

use crate::browser::{Browser, PageLocation};
use crate::config::{LoginConfig, PermalinkDetection};
use crate::error::{LoginError, LoginResult};
use crate::tool::ToolRegistry;

/// Query parameter whose presence marks the current URL as a permalink.
pub const PERMALINK_MARKER: &str = "map_x";

/// Where the browser goes after a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The current URL already encodes the map state.
    ExistingPermalink(String),
    /// Fresh permalink published by the sibling tool.
    Permalink(String),
}

impl RedirectTarget {
    /// URL to navigate to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::ExistingPermalink(url) | Self::Permalink(url) => url,
        }
    }

    /// Consume the target, returning its URL.
    #[must_use]
    pub fn into_url(self) -> String {
        match self {
            Self::ExistingPermalink(url) | Self::Permalink(url) => url,
        }
    }
}

/// Whether `search` carries the permalink marker under `detection`.
#[must_use]
pub fn has_permalink_marker(search: &str, detection: PermalinkDetection) -> bool {
    match detection {
        PermalinkDetection::Substring => search.contains(PERMALINK_MARKER),
        PermalinkDetection::QueryParameter => {
            url::form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
                .any(|(name, _)| name == PERMALINK_MARKER)
        }
    }
}

/// Decide the redirect target without side effects.
///
/// # Errors
///
/// Returns [`LoginError::PermalinkIdMissing`] when no permalink tool is configured and
/// [`LoginError::PermalinkToolNotFound`] when the configured tool has no permalink.
pub fn plan_redirect<R>(
    config: &LoginConfig,
    location: &PageLocation,
    tools: &R,
) -> LoginResult<RedirectTarget>
where
    R: ToolRegistry + ?Sized,
{
    let Some(permalink_id) = config.permalink_id.as_deref() else {
        return Err(LoginError::PermalinkIdMissing);
    };
    if !config.ignore_existing_permalink
        && has_permalink_marker(&location.search, config.permalink_detection)
    {
        return Ok(RedirectTarget::ExistingPermalink(location.href.clone()));
    }
    tools
        .permalink(permalink_id)
        .map(RedirectTarget::Permalink)
        .ok_or_else(|| LoginError::PermalinkToolNotFound {
            id: permalink_id.to_string(),
        })
}

/// URL the browser is sent to after a successful login.
///
/// Configuration errors raise exactly one alert and yield the current URL.
pub fn resolve_redirect_url<B, R>(config: &LoginConfig, browser: &B, tools: &R) -> String
where
    B: Browser + ?Sized,
    R: ToolRegistry + ?Sized,
{
    let location = browser.location();
    match plan_redirect(config, &location, tools) {
        Ok(target) => target.into_url(),
        Err(err) => {
            tracing::warn!(error = %err, href = %location.href, "redirect falls back to current url");
            browser.alert(&err.user_message());
            location.href
        }
    }
}
