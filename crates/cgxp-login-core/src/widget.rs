//! The login tool: controls, floating panel and the login/logout flows.
//!
//! # Design
//! - Session view, panel and texts are fixed at construction; only the form mutates.
//! - Submission is split into begin/send/finish so a UI can repaint between steps;
//!   [`LoginWidget::submit`] runs the three in order for non-UI callers.
//! - Every failure cause collapses into the same form reset; causes are only logged.

use crate::actions::{ButtonSpec, ToggleSpec, ToolAction};
use crate::browser::Browser;
use crate::config::{LOGIN_PTYPE, LoginConfig};
use crate::error::{LoginError, LoginResult};
use crate::form::{Credentials, LoginForm};
use crate::redirect::resolve_redirect_url;
use crate::session::SessionView;
use crate::texts::LoginTexts;
use crate::toggle::ToggleGroups;
use crate::tool::{PluginRegistry, Tool, ToolRegistry};
use crate::transport::LoginTransport;
use uuid::Uuid;

/// Floating panel width in pixels.
pub const PANEL_WIDTH: u32 = 250;
/// Login form width in pixels.
pub const FORM_WIDTH: u32 = 230;
/// Field label column width in pixels.
pub const LABEL_WIDTH: u32 = 100;
/// Text field width in pixels.
pub const FIELD_WIDTH: u32 = 120;
/// Icon class shown on the submit button while a login is in flight.
pub const LOADING_ICON_CLS: &str = "loading";

/// Layout of the login form inside the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormLayout {
    /// Label column width.
    pub label_width: u32,
    /// Form width.
    pub width: u32,
    /// Field width.
    pub field_width: u32,
}

/// Floating panel holding the login form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginPanel {
    /// Panel width.
    pub width: u32,
    /// Form layout.
    pub form: FormLayout,
    /// Extra HTML rendered below the form.
    pub extra_html: Option<String>,
}

impl LoginPanel {
    fn from_config(config: &LoginConfig) -> Self {
        Self {
            width: PANEL_WIDTH,
            form: FormLayout {
                label_width: LABEL_WIDTH,
                width: FORM_WIDTH,
                field_width: FIELD_WIDTH,
            },
            extra_html: config.extra_html.clone().filter(|html| !html.is_empty()),
        }
    }
}

/// Result of the network half of a login.
#[derive(Debug)]
pub enum LoginOutcome {
    /// The endpoint accepted the credentials.
    Accepted(Credentials),
    /// The login failed for any reason.
    Failed(LoginError),
}

/// What the widget did after a login attempt settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitResult {
    /// The browser was sent to this URL.
    Redirected(String),
    /// The form was reset and the failure message shown.
    Failed,
}

/// Login request captured by [`LoginWidget::begin_submit`], not yet sent.
#[derive(Clone, Debug)]
pub struct PendingLogin {
    url: Option<String>,
    credentials: Credentials,
}

impl PendingLogin {
    /// Credentials being submitted.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// POST the credentials through `transport`.
    pub async fn send<T>(self, transport: &T) -> LoginOutcome
    where
        T: LoginTransport + ?Sized,
    {
        let Some(url) = self.url else {
            return LoginOutcome::Failed(LoginError::MissingEndpoint {
                endpoint: "loginURL",
            });
        };
        match transport.submit_login(&url, &self.credentials).await {
            Ok(()) => LoginOutcome::Accepted(self.credentials),
            Err(err) => LoginOutcome::Failed(err),
        }
    }
}

/// Login tool instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginWidget {
    config: LoginConfig,
    texts: LoginTexts,
    session: SessionView,
    action_id: String,
    panel: LoginPanel,
    form: LoginForm,
}

impl LoginWidget {
    /// Build a widget with the built-in English texts plus config overrides.
    #[must_use]
    pub fn new(config: LoginConfig) -> Self {
        Self::with_texts(config, |_| None)
    }

    /// Build a widget resolving texts through `lookup` before the built-in defaults.
    #[must_use]
    pub fn with_texts<F>(config: LoginConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let texts = LoginTexts::resolve(&config.texts, lookup);
        let session = SessionView::from_config(&config);
        let action_id = config
            .id
            .clone()
            .unwrap_or_else(|| format!("cgxp-login-{}", Uuid::new_v4()));
        let panel = LoginPanel::from_config(&config);
        Self {
            config,
            texts,
            session,
            action_id,
            panel,
            form: LoginForm::default(),
        }
    }

    /// Configuration the widget was built from.
    #[must_use]
    pub const fn config(&self) -> &LoginConfig {
        &self.config
    }

    /// Resolved user-facing texts.
    #[must_use]
    pub const fn texts(&self) -> &LoginTexts {
        &self.texts
    }

    /// Session view chosen at construction.
    #[must_use]
    pub const fn session(&self) -> &SessionView {
        &self.session
    }

    /// Floating panel description.
    #[must_use]
    pub const fn panel(&self) -> &LoginPanel {
        &self.panel
    }

    /// Action id used for toggle bookkeeping.
    #[must_use]
    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    /// Login form state.
    #[must_use]
    pub const fn form(&self) -> &LoginForm {
        &self.form
    }

    /// Mutable login form state for field edits.
    pub const fn form_mut(&mut self) -> &mut LoginForm {
        &mut self.form
    }

    /// Toggle bound to the panel, absent when a user is logged in.
    #[must_use]
    pub fn toggle(&self) -> Option<ToggleSpec> {
        match self.session {
            SessionView::Authenticated(_) => None,
            SessionView::Anonymous => Some(ToggleSpec {
                action_id: self.action_id.clone(),
                button: ButtonSpec::labelled(self.texts.login.clone())
                    .with_overrides(self.config.action_config.as_ref()),
                toggle_group: self.config.toggle_group.clone(),
            }),
        }
    }

    /// Whether the floating panel is shown: exactly while its toggle is pressed.
    #[must_use]
    pub fn panel_visible(&self, toggles: &ToggleGroups) -> bool {
        self.toggle().is_some_and(|spec| {
            toggles.is_pressed(spec.toggle_group.as_deref(), &spec.action_id)
        })
    }

    /// Form submit button, showing the loading icon while a login is in flight.
    #[must_use]
    pub fn submit_button(&self) -> ButtonSpec {
        let mut button = ButtonSpec::labelled(self.texts.login.clone());
        if self.form.is_loading() {
            button.icon_cls = Some(LOADING_ICON_CLS.to_string());
        }
        button
    }

    /// Redirect target for the current page.
    #[must_use]
    pub fn redirect_url<B, R>(&self, browser: &B, tools: &R) -> String
    where
        B: Browser + ?Sized,
        R: ToolRegistry + ?Sized,
    {
        resolve_redirect_url(&self.config, browser, tools)
    }

    /// Switch to the loading state and capture the request to send.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::BlankCredentials`] without touching the form when a field
    /// is empty.
    pub fn begin_submit(&mut self) -> LoginResult<PendingLogin> {
        let credentials = self.form.begin_submit()?;
        tracing::info!(login = %credentials.login, "submitting login form");
        Ok(PendingLogin {
            url: self.config.login_url.clone(),
            credentials,
        })
    }

    /// Apply a settled login: redirect on success, reset the form on failure.
    pub fn finish_submit<B, R>(
        &mut self,
        outcome: LoginOutcome,
        browser: &B,
        tools: &R,
    ) -> SubmitResult
    where
        B: Browser + ?Sized,
        R: ToolRegistry + ?Sized,
    {
        match outcome {
            LoginOutcome::Accepted(credentials) => {
                browser.offer_credential_save(&credentials);
                let url = self.redirect_url(browser, tools);
                tracing::info!(login = %credentials.login, target = %url, "login accepted");
                browser.navigate(&url);
                SubmitResult::Redirected(url)
            }
            LoginOutcome::Failed(err) => {
                tracing::warn!(error = %err, "login failed");
                self.form.apply_failure();
                SubmitResult::Failed
            }
        }
    }

    /// Run a full login: begin, send, finish.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::BlankCredentials`] when the form is not submittable;
    /// network and authentication failures are reported through [`SubmitResult::Failed`].
    pub async fn submit<T, B, R>(
        &mut self,
        transport: &T,
        browser: &B,
        tools: &R,
    ) -> LoginResult<SubmitResult>
    where
        T: LoginTransport + ?Sized,
        B: Browser + ?Sized,
        R: ToolRegistry + ?Sized,
    {
        let pending = self.begin_submit()?;
        let outcome = pending.send(transport).await;
        Ok(self.finish_submit(outcome, browser, tools))
    }

    /// End the server session and reload the page.
    ///
    /// A failure leaves the page untouched and is only logged.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or [`LoginError::MissingEndpoint`] without a logout URL.
    pub async fn logout<T, B>(&self, transport: &T, browser: &B) -> LoginResult<()>
    where
        T: LoginTransport + ?Sized,
        B: Browser + ?Sized,
    {
        let result = match self.config.logout_url.as_deref() {
            Some(url) => transport.request_logout(url).await,
            None => Err(LoginError::MissingEndpoint {
                endpoint: "logoutURL",
            }),
        };
        match result {
            Ok(()) => {
                tracing::info!("logout accepted, reloading page");
                browser.reload();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "logout failed");
                Err(err)
            }
        }
    }
}

impl Tool for LoginWidget {
    fn ptype(&self) -> &'static str {
        LOGIN_PTYPE
    }

    fn id(&self) -> Option<&str> {
        self.config.id.as_deref()
    }

    fn add_actions(&self) -> Vec<ToolAction> {
        match &self.session {
            SessionView::Authenticated(username) => vec![
                ToolAction::Text(self.texts.logged_as_label(username)),
                ToolAction::Button(
                    ButtonSpec::labelled(self.texts.logout.clone())
                        .with_overrides(self.config.action_config.as_ref()),
                ),
            ],
            SessionView::Anonymous => self.toggle().map(ToolAction::Toggle).into_iter().collect(),
        }
    }
}

/// Register the login tool factory under [`LOGIN_PTYPE`].
pub fn register_login_tool(plugins: &mut PluginRegistry<Box<dyn Tool>>) {
    plugins.register(LOGIN_PTYPE, |value| {
        let config = LoginConfig::from_value(value)?;
        Ok(Box::new(LoginWidget::new(config)) as Box<dyn Tool>)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActionConfig;
    use serde_json::json;

    fn anonymous() -> LoginWidget {
        LoginWidget::new(LoginConfig {
            toggle_group: Some("maptools".into()),
            login_url: Some("/login".into()),
            permalink_id: Some("pl".into()),
            ..LoginConfig::default()
        })
    }

    #[test]
    fn anonymous_widget_renders_single_toggle() {
        let widget = anonymous();
        let actions = widget.add_actions();
        assert_eq!(actions.len(), 1);
        let ToolAction::Toggle(toggle) = &actions[0] else {
            panic!("expected toggle, got {actions:?}");
        };
        assert_eq!(toggle.button.text, "Login");
        assert_eq!(toggle.toggle_group.as_deref(), Some("maptools"));
        assert_eq!(toggle.action_id, widget.action_id());
    }

    #[test]
    fn authenticated_widget_renders_label_and_logout() {
        let widget = LoginWidget::new(LoginConfig {
            username: Some("erin".into()),
            action_config: Some(ActionConfig {
                cls: Some("danger".into()),
                ..ActionConfig::default()
            }),
            ..LoginConfig::default()
        });
        assert!(widget.toggle().is_none());
        assert_eq!(
            widget.add_actions(),
            vec![
                ToolAction::Text("Logged in as erin".into()),
                ToolAction::Button(ButtonSpec {
                    text: "Logout".into(),
                    cls: Some("danger".into()),
                    ..ButtonSpec::default()
                }),
            ]
        );
    }

    #[test]
    fn panel_follows_its_toggle() {
        let widget = anonymous();
        let spec = widget.toggle().expect("anonymous widget has a toggle");
        let mut toggles = ToggleGroups::default();
        assert!(!widget.panel_visible(&toggles));

        toggles.toggle(spec.toggle_group.as_deref(), &spec.action_id);
        assert!(widget.panel_visible(&toggles));

        toggles.toggle(spec.toggle_group.as_deref(), "measure");
        assert!(!widget.panel_visible(&toggles));

        toggles.toggle(spec.toggle_group.as_deref(), &spec.action_id);
        assert!(widget.panel_visible(&toggles));
        toggles.toggle(spec.toggle_group.as_deref(), &spec.action_id);
        assert!(!widget.panel_visible(&toggles));
    }

    #[test]
    fn authenticated_panel_is_never_visible() {
        let widget = LoginWidget::new(LoginConfig {
            id: Some("login".into()),
            username: Some("erin".into()),
            ..LoginConfig::default()
        });
        let mut toggles = ToggleGroups::default();
        toggles.toggle(None, "login");
        assert!(!widget.panel_visible(&toggles));
    }

    #[test]
    fn panel_is_built_for_both_session_views() {
        let widget = LoginWidget::new(LoginConfig {
            username: Some("erin".into()),
            extra_html: Some("<a href=\"/reset\">Forgot?</a>".into()),
            ..LoginConfig::default()
        });
        assert_eq!(widget.panel().width, PANEL_WIDTH);
        assert_eq!(widget.panel().form.field_width, FIELD_WIDTH);
        assert!(widget.panel().extra_html.is_some());
        assert!(anonymous().panel().extra_html.is_none());
    }

    #[test]
    fn config_id_becomes_action_id() {
        let widget = LoginWidget::new(LoginConfig {
            id: Some("login".into()),
            ..LoginConfig::default()
        });
        assert_eq!(widget.action_id(), "login");
        assert_eq!(Tool::id(&widget), Some("login"));
        assert!(anonymous().action_id().starts_with("cgxp-login-"));
    }

    #[test]
    fn submit_button_shows_loading_icon() {
        let mut widget = anonymous();
        widget.form_mut().set_login("a");
        widget.form_mut().set_password("b");
        assert!(widget.submit_button().icon_cls.is_none());
        widget.begin_submit().expect("valid form");
        assert_eq!(
            widget.submit_button().icon_cls.as_deref(),
            Some(LOADING_ICON_CLS)
        );
    }

    #[test]
    fn factory_builds_login_tool() {
        let mut plugins = PluginRegistry::new();
        register_login_tool(&mut plugins);
        let tool = plugins
            .create_from_config(json!({"ptype": LOGIN_PTYPE, "id": "login", "username": "f"}))
            .expect("login tool");
        assert_eq!(tool.ptype(), LOGIN_PTYPE);
        assert_eq!(tool.add_actions().len(), 2);
        assert!(tool.permalink().is_none());
    }

    #[test]
    fn bundle_lookup_feeds_texts() {
        let widget = LoginWidget::with_texts(LoginConfig::default(), |key| {
            (key == "login.login").then(|| "Connexion".to_string())
        });
        assert_eq!(widget.submit_button().text, "Connexion");
    }
}
