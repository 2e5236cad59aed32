//! Test fixtures: canned configs and tracing setup.

use cgxp_login_core::LoginConfig;
use std::sync::Once;

/// Login endpoint used by fixture configs.
pub const LOGIN_URL: &str = "http://x/login";
/// Logout endpoint used by fixture configs.
pub const LOGOUT_URL: &str = "http://x/logout";
/// Permalink tool id used by fixture configs.
pub const PERMALINK_ID: &str = "permalink";

static TRACING: Once = Once::new();

/// Install a fmt subscriber writing through the test harness, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Anonymous config with both endpoints and the fixture permalink id.
#[must_use]
pub fn anonymous_config() -> LoginConfig {
    LoginConfig {
        login_url: Some(LOGIN_URL.into()),
        logout_url: Some(LOGOUT_URL.into()),
        permalink_id: Some(PERMALINK_ID.into()),
        ..LoginConfig::default()
    }
}

/// Fixture config for a logged-in `username`.
#[must_use]
pub fn authenticated_config(username: &str) -> LoginConfig {
    LoginConfig {
        username: Some(username.into()),
        ..anonymous_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_configs_differ_only_by_username() {
        let anonymous = anonymous_config();
        let authenticated = authenticated_config("gail");
        assert_eq!(authenticated.username.as_deref(), Some("gail"));
        assert_eq!(authenticated.login_url, anonymous.login_url);
        assert_eq!(authenticated.permalink_id, anonymous.permalink_id);
    }

    #[test]
    fn tracing_init_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
