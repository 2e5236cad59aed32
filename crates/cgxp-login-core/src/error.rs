//! Error types for the login widget.

use thiserror::Error;

/// Primary error type for login widget operations.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The widget was configured without a permalink tool id.
    #[error("permalink tool id missing from login config")]
    PermalinkIdMissing,
    /// No sibling tool is registered under the configured permalink id.
    #[error("permalink tool not found")]
    PermalinkToolNotFound {
        /// Tool id that failed to resolve.
        id: String,
    },
    /// The login endpoint answered but refused the credentials.
    #[error("authentication failed")]
    AuthenticationFailed,
    /// The endpoint answered with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected {
        /// HTTP status code returned by the endpoint.
        status: u16,
    },
    /// The request never produced a response.
    #[error("transport failure during {operation}")]
    Transport {
        /// Operation identifier (`login` or `logout`).
        operation: &'static str,
        /// Transport-level failure detail.
        detail: String,
    },
    /// Submission was attempted with an empty username or password.
    #[error("username and password are required")]
    BlankCredentials,
    /// An endpoint URL needed by the operation is not configured.
    #[error("endpoint not configured")]
    MissingEndpoint {
        /// Configuration key of the missing endpoint.
        endpoint: &'static str,
    },
    /// The tool configuration payload could not be decoded.
    #[error("invalid tool configuration")]
    InvalidConfig {
        /// Source decoding error.
        source: serde_json::Error,
    },
    /// No factory is registered for the requested plugin type.
    #[error("unknown plugin type")]
    UnknownPlugin {
        /// Plugin type tag that was requested.
        ptype: String,
    },
}

impl LoginError {
    /// Whether the error stems from widget misconfiguration rather than the user or network.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::PermalinkIdMissing
                | Self::PermalinkToolNotFound { .. }
                | Self::MissingEndpoint { .. }
                | Self::InvalidConfig { .. }
                | Self::UnknownPlugin { .. }
        )
    }

    /// Text shown to the user in a blocking alert for configuration errors.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::PermalinkIdMissing => "permalinkId is missing in your login plugin config.".into(),
            Self::PermalinkToolNotFound { .. } => {
                "permalinkId not found, your permalink plugin \"id\" config is either missing or wrong"
                    .into()
            }
            Self::MissingEndpoint { endpoint } => {
                format!("{endpoint} is missing in your login plugin config.")
            }
            other => other.to_string(),
        }
    }
}

/// Convenience alias for login widget results.
pub type LoginResult<T> = Result<T, LoginError>;

#[cfg(test)]
mod tests {
    use super::LoginError;

    #[test]
    fn configuration_errors_are_flagged() {
        assert!(LoginError::PermalinkIdMissing.is_configuration());
        assert!(
            LoginError::PermalinkToolNotFound {
                id: "permalink".into()
            }
            .is_configuration()
        );
        assert!(!LoginError::AuthenticationFailed.is_configuration());
        assert!(!LoginError::Rejected { status: 401 }.is_configuration());
    }

    #[test]
    fn user_messages_name_the_misconfiguration() {
        assert!(
            LoginError::PermalinkIdMissing
                .user_message()
                .contains("permalinkId is missing")
        );
        let not_found = LoginError::PermalinkToolNotFound { id: "pl".into() };
        assert!(not_found.user_message().contains("permalinkId not found"));
        assert_eq!(
            LoginError::MissingEndpoint {
                endpoint: "loginURL"
            }
            .user_message(),
            "loginURL is missing in your login plugin config."
        );
    }
}
