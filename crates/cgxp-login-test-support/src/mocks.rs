//! Fake collaborators recording what the widget asked of them.

use async_trait::async_trait;
use cgxp_login_core::{
    Browser, Credentials, LoginError, LoginResult, LoginTransport, PageLocation,
    classify_login_read, classify_logout_response,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Browser double with a fixed location that records navigations and alerts.
#[derive(Debug)]
pub struct RecordingBrowser {
    location: PageLocation,
    navigations: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
    credential_saves: Cell<usize>,
}

impl RecordingBrowser {
    /// Browser sitting on `href`.
    #[must_use]
    pub fn at(href: &str) -> Self {
        Self {
            location: PageLocation::from_href(href),
            navigations: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
            credential_saves: Cell::new(0),
        }
    }

    /// URLs navigated to, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    /// Alert messages shown, in order.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    /// Number of credential-save prompts offered.
    #[must_use]
    pub fn credential_saves(&self) -> usize {
        self.credential_saves.get()
    }
}

impl Browser for RecordingBrowser {
    fn location(&self) -> PageLocation {
        self.location.clone()
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn offer_credential_save(&self, _credentials: &Credentials) {
        self.credential_saves.set(self.credential_saves.get() + 1);
    }
}

/// Canned endpoint behaviour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptedResponse {
    /// Respond with a status and body.
    Status(u16, String),
    /// Respond with a status whose body cannot be read.
    UnreadableBody(u16),
    /// Fail before any response arrives.
    NetworkDown,
}

impl ScriptedResponse {
    /// `200` with the given body.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::Status(200, body.into())
    }
}

/// Request observed by [`ScriptedTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportCall {
    /// Login POST with its form body.
    Login {
        /// Target URL.
        url: String,
        /// Form-encoded body.
        body: String,
    },
    /// Logout request.
    Logout {
        /// Target URL.
        url: String,
    },
}

/// Transport double answering from scripted queues.
///
/// An exhausted queue answers `NetworkDown`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    login: RefCell<VecDeque<ScriptedResponse>>,
    logout: RefCell<VecDeque<ScriptedResponse>>,
    calls: RefCell<Vec<TransportCall>>,
}

impl ScriptedTransport {
    /// Transport with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next login response.
    #[must_use]
    pub fn with_login(self, response: ScriptedResponse) -> Self {
        self.login.borrow_mut().push_back(response);
        self
    }

    /// Queue the next logout response.
    #[must_use]
    pub fn with_logout(self, response: ScriptedResponse) -> Self {
        self.logout.borrow_mut().push_back(response);
        self
    }

    /// Requests issued so far.
    #[must_use]
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.borrow().clone()
    }
}

fn next_response(queue: &RefCell<VecDeque<ScriptedResponse>>) -> ScriptedResponse {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or(ScriptedResponse::NetworkDown)
}

fn network_down(operation: &'static str) -> LoginError {
    LoginError::Transport {
        operation,
        detail: "scripted network failure".into(),
    }
}

#[async_trait(?Send)]
impl LoginTransport for ScriptedTransport {
    async fn submit_login(&self, url: &str, credentials: &Credentials) -> LoginResult<()> {
        self.calls.borrow_mut().push(TransportCall::Login {
            url: url.to_string(),
            body: credentials.form_body(),
        });
        match next_response(&self.login) {
            ScriptedResponse::Status(status, body) => {
                classify_login_read(status, Ok::<_, &str>(body))
            }
            ScriptedResponse::UnreadableBody(status) => {
                classify_login_read(status, Err::<String, _>("scripted body read failure"))
            }
            ScriptedResponse::NetworkDown => Err(network_down("login")),
        }
    }

    async fn request_logout(&self, url: &str) -> LoginResult<()> {
        self.calls.borrow_mut().push(TransportCall::Logout {
            url: url.to_string(),
        });
        match next_response(&self.logout) {
            ScriptedResponse::Status(status, _) | ScriptedResponse::UnreadableBody(status) => {
                classify_logout_response(status)
            }
            ScriptedResponse::NetworkDown => Err(network_down("logout")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_records_reload_as_self_navigation() {
        let browser = RecordingBrowser::at("http://x/app?a=1");
        browser.reload();
        assert_eq!(browser.navigations(), vec!["http://x/app?a=1".to_string()]);
        assert!(browser.alerts().is_empty());
    }

    #[test]
    fn scripted_response_helper_uses_ok_status() {
        assert_eq!(
            ScriptedResponse::ok("true"),
            ScriptedResponse::Status(200, "true".into())
        );
    }
}
