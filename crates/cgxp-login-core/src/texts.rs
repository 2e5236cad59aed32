//! User-facing strings and `${name}` template formatting.

use serde::Deserialize;

/// Per-widget text overrides read from the tool config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverrides {
    /// Inline message shown after a failed login.
    #[serde(default)]
    pub authentication_failure_text: Option<String>,
    /// Template for the authenticated label; `${user}` is replaced by the username.
    #[serde(default)]
    pub logged_as_text: Option<String>,
    /// Logout button label.
    #[serde(default)]
    pub logout_text: Option<String>,
    /// Login button label.
    #[serde(default)]
    pub login_text: Option<String>,
    /// Username field label.
    #[serde(default)]
    pub username_text: Option<String>,
    /// Password field label.
    #[serde(default)]
    pub password_text: Option<String>,
}

/// Resolved strings used when rendering the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginTexts {
    /// Inline failure message.
    pub authentication_failure: String,
    /// Authenticated label template.
    pub logged_as: String,
    /// Logout button label.
    pub logout: String,
    /// Login button label.
    pub login: String,
    /// Username field label.
    pub username: String,
    /// Password field label.
    pub password: String,
}

impl Default for LoginTexts {
    fn default() -> Self {
        Self {
            authentication_failure: "Impossible to connect.".into(),
            logged_as: "Logged in as ${user}".into(),
            logout: "Logout".into(),
            login: "Login".into(),
            username: "Username".into(),
            password: "Password".into(),
        }
    }
}

impl LoginTexts {
    /// Resolve each string from the config override, then `lookup`, then the built-in default.
    ///
    /// `lookup` receives dotted bundle keys such as `login.logout`.
    #[must_use]
    pub fn resolve<F>(overrides: &TextOverrides, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pick = |value: &Option<String>, key: &str, fallback: String| {
            value.clone().or_else(|| lookup(key)).unwrap_or(fallback)
        };
        Self {
            authentication_failure: pick(
                &overrides.authentication_failure_text,
                "login.failure",
                defaults.authentication_failure,
            ),
            logged_as: pick(
                &overrides.logged_as_text,
                "login.logged_as",
                defaults.logged_as,
            ),
            logout: pick(&overrides.logout_text, "login.logout", defaults.logout),
            login: pick(&overrides.login_text, "login.login", defaults.login),
            username: pick(&overrides.username_text, "login.username", defaults.username),
            password: pick(&overrides.password_text, "login.password", defaults.password),
        }
    }

    /// Authenticated label for `username`.
    #[must_use]
    pub fn logged_as_label(&self, username: &str) -> String {
        format_template(&self.logged_as, &[("user", username)])
    }
}

/// Replace `${name}` placeholders with the matching value.
///
/// Placeholders without a value are left untouched.
#[must_use]
pub fn format_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_replaces_known_placeholders() {
        assert_eq!(
            format_template("Logged in as ${user}", &[("user", "alice")]),
            "Logged in as alice"
        );
        assert_eq!(
            format_template("${user} / ${user}", &[("user", "bob")]),
            "bob / bob"
        );
    }

    #[test]
    fn template_keeps_unknown_and_unterminated_placeholders() {
        assert_eq!(
            format_template("hi ${who} ${user}", &[("user", "x")]),
            "hi ${who} x"
        );
        assert_eq!(format_template("open ${user", &[("user", "x")]), "open ${user");
    }

    #[test]
    fn resolution_prefers_override_then_bundle_then_default() {
        let overrides = TextOverrides {
            logout_text: Some("Sign out".into()),
            ..TextOverrides::default()
        };
        let texts = LoginTexts::resolve(&overrides, |key| {
            (key == "login.login" || key == "login.logout").then(|| "Connexion".to_string())
        });
        assert_eq!(texts.logout, "Sign out");
        assert_eq!(texts.login, "Connexion");
        assert_eq!(texts.password, "Password");
    }

    #[test]
    fn logged_as_label_uses_template() {
        let texts = LoginTexts::default();
        assert_eq!(texts.logged_as_label("carol"), "Logged in as carol");
    }
}
