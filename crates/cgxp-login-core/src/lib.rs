#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::future_not_send)]

//! DOM-free core of the CGXP login tool.
//!
//! Layout: `config.rs` (tool config), `widget.rs` (controls and login/logout flows),
//! `redirect.rs` (post-login target), `tool.rs` (tool capability and registries),
//! `browser.rs`/`transport.rs` (collaborator seams implemented by the UI crate).

pub mod actions;
pub mod browser;
pub mod config;
pub mod error;
pub mod form;
pub mod redirect;
pub mod session;
pub mod texts;
pub mod toggle;
pub mod tool;
pub mod transport;
pub mod widget;

pub use actions::{ButtonSpec, ToggleSpec, ToolAction};
pub use browser::{Browser, PageLocation};
pub use config::{ActionConfig, LOGIN_PTYPE, LoginConfig, PermalinkDetection};
pub use error::{LoginError, LoginResult};
pub use form::{Credentials, LoginForm};
pub use redirect::{RedirectTarget, plan_redirect, resolve_redirect_url};
pub use session::SessionView;
pub use texts::{LoginTexts, TextOverrides, format_template};
pub use toggle::ToggleGroups;
pub use tool::{PluginRegistry, StaticPermalinks, Tool, ToolRegistry, ToolSet};
pub use transport::{
    LoginTransport, classify_login_read, classify_login_response, classify_logout_response,
};
pub use widget::{
    LoginOutcome, LoginPanel, LoginWidget, PendingLogin, SubmitResult, register_login_tool,
};
