//! HTTP seam for the login and logout endpoints.
//!
//! # Design
//! - Transports report raw outcomes; [`classify_login_response`] applies the form
//!   toolkit's success convention so every transport agrees on it.
//! - Futures are `?Send` because the browser event loop is single-threaded.

use crate::error::{LoginError, LoginResult};
use crate::form::Credentials;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Network operations issued by the widget.
#[async_trait(?Send)]
pub trait LoginTransport {
    /// POST `credentials` form-encoded to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the response is not a login success.
    async fn submit_login(&self, url: &str, credentials: &Credentials) -> LoginResult<()>;

    /// Request `url` to end the server session.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or answers with a non-success status.
    async fn request_logout(&self, url: &str) -> LoginResult<()>;
}

/// Decide whether a login response counts as success.
///
/// A 2xx response succeeds when its body is empty, the JSON literal `true`, or a
/// JSON object with a truthy `success` member.
///
/// # Errors
///
/// Returns [`LoginError::Rejected`] for non-2xx statuses and
/// [`LoginError::AuthenticationFailed`] for any other body.
pub fn classify_login_response(status: u16, body: &str) -> LoginResult<()> {
    ensure_success_status(status)?;
    if body.trim().is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Bool(true)) => Ok(()),
        Ok(Value::Object(map)) if map.get("success").is_some_and(is_truthy) => Ok(()),
        _ => Err(LoginError::AuthenticationFailed),
    }
}

/// Classify a login response whose body may have failed to read.
///
/// # Errors
///
/// Returns [`LoginError::Rejected`] for non-2xx statuses, [`LoginError::Transport`]
/// when the body could not be read, otherwise as [`classify_login_response`].
pub fn classify_login_read<E>(status: u16, body: Result<String, E>) -> LoginResult<()>
where
    E: fmt::Display,
{
    ensure_success_status(status)?;
    let body = body.map_err(|err| LoginError::Transport {
        operation: "login",
        detail: err.to_string(),
    })?;
    classify_login_response(status, &body)
}

/// Decide whether a logout response counts as success.
///
/// # Errors
///
/// Returns [`LoginError::Rejected`] for non-2xx statuses.
pub fn classify_logout_response(status: u16) -> LoginResult<()> {
    ensure_success_status(status)
}

fn ensure_success_status(status: u16) -> LoginResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(LoginError::Rejected { status })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
