//! Login tool configuration as supplied by the host viewer.
//!
//! # Design
//! - Keys follow the viewer's camelCase tool config; snake case is accepted as an alias.
//! - Every field is optional so a partial host config still builds a widget.
//! - Unknown keys (`ptype`, `actionTarget`, ...) belong to the host and are ignored.

use crate::error::{LoginError, LoginResult};
use crate::texts::TextOverrides;
use serde::Deserialize;
use serde_json::Value;

/// Plugin type tag the login tool registers under.
pub const LOGIN_PTYPE: &str = "cgxp_login";

/// Immutable configuration for one login widget.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginConfig {
    /// Tool id assigned by the host viewer.
    #[serde(default)]
    pub id: Option<String>,
    /// URL of the login service.
    #[serde(default, rename = "loginURL", alias = "login_url")]
    pub login_url: Option<String>,
    /// URL of the logout service.
    #[serde(default, rename = "logoutURL", alias = "logout_url")]
    pub logout_url: Option<String>,
    /// Username of the currently logged in user.
    #[serde(default)]
    pub username: Option<String>,
    /// Id of the sibling permalink tool.
    #[serde(default, alias = "permalink_id")]
    pub permalink_id: Option<String>,
    /// Always use the permalink tool, even when the current URL already is a permalink.
    #[serde(default, alias = "ignore_existing_permalink")]
    pub ignore_existing_permalink: bool,
    /// How the current URL is recognised as an existing permalink.
    #[serde(default, alias = "permalink_detection")]
    pub permalink_detection: PermalinkDetection,
    /// Extra HTML rendered below the login form.
    #[serde(default, alias = "extra_html")]
    pub extra_html: Option<String>,
    /// Group the toggle button is a member of.
    #[serde(default, alias = "toggle_group")]
    pub toggle_group: Option<String>,
    /// Overrides applied to the action created by this tool.
    #[serde(default, alias = "action_config")]
    pub action_config: Option<ActionConfig>,
    /// User-facing text overrides.
    #[serde(flatten)]
    pub texts: TextOverrides,
}

impl LoginConfig {
    /// Decode a tool config object handed over by the host viewer.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::InvalidConfig`] when a recognised key has the wrong shape.
    pub fn from_value(value: Value) -> LoginResult<Self> {
        serde_json::from_value(value).map_err(|source| LoginError::InvalidConfig { source })
    }

    /// Decode a tool config from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::InvalidConfig`] when the payload is not a valid config object.
    pub fn from_json_str(raw: &str) -> LoginResult<Self> {
        serde_json::from_str(raw).map_err(|source| LoginError::InvalidConfig { source })
    }

    /// Configured username, ignoring empty values.
    #[must_use]
    pub fn known_username(&self) -> Option<&str> {
        self.username.as_deref().filter(|name| !name.is_empty())
    }
}

/// Strategy used to decide whether the current URL already encodes a permalink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermalinkDetection {
    /// Raw substring scan of the query string for `map_x`.
    ///
    /// Matches parameters that merely contain the marker, e.g. `other_map_x2=1`.
    #[default]
    Substring,
    /// Exact `map_x` parameter name match over the parsed query string.
    QueryParameter,
}

/// Style and behaviour overrides for the rendered action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    /// Button label override.
    #[serde(default)]
    pub text: Option<String>,
    /// Tooltip shown on hover.
    #[serde(default)]
    pub tooltip: Option<String>,
    /// Icon class added to the button.
    #[serde(default, alias = "icon_cls")]
    pub icon_cls: Option<String>,
    /// Extra css class added to the button.
    #[serde(default)]
    pub cls: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn host_config_decodes_with_viewer_key_names() {
        let config = LoginConfig::from_value(json!({
            "ptype": "cgxp_login",
            "actionTarget": "center.tbar",
            "toggleGroup": "maptools",
            "username": "alice",
            "loginURL": "/login",
            "logoutURL": "/logout",
            "permalinkId": "permalink",
            "ignoreExistingPermalink": true,
            "actionConfig": {"iconCls": "user", "tooltip": "Sign in"},
            "loggedAsText": "Connecté en tant que ${user}"
        }))
        .expect("config decodes");

        assert_eq!(config.login_url.as_deref(), Some("/login"));
        assert_eq!(config.logout_url.as_deref(), Some("/logout"));
        assert_eq!(config.toggle_group.as_deref(), Some("maptools"));
        assert_eq!(config.permalink_id.as_deref(), Some("permalink"));
        assert!(config.ignore_existing_permalink);
        assert_eq!(config.permalink_detection, PermalinkDetection::Substring);
        let action = config.action_config.expect("action config");
        assert_eq!(action.icon_cls.as_deref(), Some("user"));
        assert_eq!(action.tooltip.as_deref(), Some("Sign in"));
        assert_eq!(
            config.texts.logged_as_text.as_deref(),
            Some("Connecté en tant que ${user}")
        );
    }

    #[test]
    fn defaults_apply_to_empty_config() {
        let config = LoginConfig::from_json_str("{}").expect("config decodes");
        assert_eq!(config, LoginConfig::default());
        assert!(!config.ignore_existing_permalink);
        assert!(config.known_username().is_none());
    }

    #[test]
    fn snake_case_aliases_are_accepted() {
        let config = LoginConfig::from_value(json!({
            "login_url": "/login",
            "permalink_id": "pl",
            "permalink_detection": "queryParameter"
        }))
        .expect("config decodes");
        assert_eq!(config.login_url.as_deref(), Some("/login"));
        assert_eq!(config.permalink_id.as_deref(), Some("pl"));
        assert_eq!(
            config.permalink_detection,
            PermalinkDetection::QueryParameter
        );
    }

    #[test]
    fn wrong_shape_is_reported() {
        let err = LoginConfig::from_value(json!({"ignoreExistingPermalink": "yes"}))
            .expect_err("string is not a bool");
        assert!(matches!(err, LoginError::InvalidConfig { .. }));
    }

    #[test]
    fn empty_username_is_not_known() {
        let config = LoginConfig {
            username: Some(String::new()),
            ..LoginConfig::default()
        };
        assert!(config.known_username().is_none());
    }
}
