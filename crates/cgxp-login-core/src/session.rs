//! Session display state, fixed for the lifetime of a widget.

use crate::config::LoginConfig;

/// Which controls the widget shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionView {
    /// No user known: show the login toggle.
    Anonymous,
    /// A user is logged in: show the label and logout button.
    Authenticated(String),
}

impl SessionView {
    /// Derive the view from the configured username.
    #[must_use]
    pub fn from_config(config: &LoginConfig) -> Self {
        config
            .known_username()
            .map_or(Self::Anonymous, |name| Self::Authenticated(name.to_string()))
    }

    /// Username when authenticated.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(name) => Some(name),
        }
    }
}
