//! Login form state: field values, loading indicator and failure message.
//!
//! # Design
//! - Credentials live only in this state and are dropped on reset.
//! - The loading flag is a visual affordance; it never blocks a second submit.

use crate::error::{LoginError, LoginResult};
use std::fmt;

/// Form field name for the username.
pub const LOGIN_FIELD: &str = "login";
/// Form field name for the password.
pub const PASSWORD_FIELD: &str = "password";

/// Username/password pair captured from the form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username value.
    pub login: String,
    /// Password value.
    pub password: String,
}

impl Credentials {
    /// Form-encoded request body (`login=..&password=..`).
    #[must_use]
    pub fn form_body(&self) -> String {
        format!(
            "{LOGIN_FIELD}={}&{PASSWORD_FIELD}={}",
            urlencoding::encode(&self.login),
            urlencoding::encode(&self.password)
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Mutable state of the login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    login: String,
    password: String,
    loading: bool,
    failure_visible: bool,
}

impl LoginForm {
    /// Current username field value.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Current password field value.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Update the username field.
    pub fn set_login(&mut self, value: impl Into<String>) {
        self.login = value.into();
    }

    /// Update the password field.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    /// Whether the submit button shows its loading indicator.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the inline failure message is shown.
    #[must_use]
    pub const fn failure_visible(&self) -> bool {
        self.failure_visible
    }

    /// Both fields are non-empty; whitespace counts as a value.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.login.is_empty() && !self.password.is_empty()
    }

    /// Capture the credentials and switch the button to its loading state.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::BlankCredentials`] and leaves the state untouched when a
    /// field is empty.
    pub fn begin_submit(&mut self) -> LoginResult<Credentials> {
        if !self.is_valid() {
            return Err(LoginError::BlankCredentials);
        }
        self.loading = true;
        Ok(Credentials {
            login: self.login.clone(),
            password: self.password.clone(),
        })
    }

    /// Clear the loading state, empty both fields and reveal the failure message.
    pub fn apply_failure(&mut self) {
        self.loading = false;
        self.login.clear();
        self.password.clear();
        self.failure_visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> LoginForm {
        let mut form = LoginForm::default();
        form.set_login("alice");
        form.set_password("s3cret&co");
        form
    }

    #[test]
    fn empty_fields_block_submission() {
        let mut form = LoginForm::default();
        form.set_login("alice");
        assert!(!form.is_valid());
        assert!(matches!(
            form.begin_submit(),
            Err(LoginError::BlankCredentials)
        ));
        assert!(!form.is_loading());
    }

    #[test]
    fn whitespace_password_is_submittable() {
        let mut form = LoginForm::default();
        form.set_login("alice");
        form.set_password("   ");
        assert!(form.is_valid());
        let credentials = form.begin_submit().expect("whitespace is a value");
        assert_eq!(credentials.password, "   ");
    }

    #[test]
    fn begin_submit_sets_loading_and_captures_fields() {
        let mut form = filled();
        let credentials = form.begin_submit().expect("valid form");
        assert!(form.is_loading());
        assert_eq!(credentials.login, "alice");
        assert_eq!(credentials.password, "s3cret&co");
    }

    #[test]
    fn failure_resets_fields_and_shows_message() {
        let mut form = filled();
        form.begin_submit().expect("valid form");
        form.apply_failure();
        assert_eq!(form.login(), "");
        assert_eq!(form.password(), "");
        assert!(!form.is_loading());
        assert!(form.failure_visible());
    }

    #[test]
    fn body_is_form_encoded() {
        let credentials = Credentials {
            login: "jean dupont".into(),
            password: "a&b=c".into(),
        };
        assert_eq!(
            credentials.form_body(),
            "login=jean%20dupont&password=a%26b%3Dc"
        );
    }

    #[test]
    fn debug_output_redacts_password() {
        let credentials = Credentials {
            login: "alice".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{credentials:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
