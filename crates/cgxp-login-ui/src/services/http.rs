//! HTTP transport for the login and logout endpoints.

use async_trait::async_trait;
use cgxp_login_core::{
    Credentials, LoginError, LoginResult, LoginTransport, classify_login_read,
    classify_logout_response,
};
use gloo_net::http::Request;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GlooTransport;

#[async_trait(?Send)]
impl LoginTransport for GlooTransport {
    async fn submit_login(&self, url: &str, credentials: &Credentials) -> LoginResult<()> {
        let response = Request::post(url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .header("X-Requested-With", "XMLHttpRequest")
            .body(credentials.form_body())
            .send()
            .await
            .map_err(|err| transport_error("login", &err))?;
        classify_login_read(response.status(), response.text().await)
    }

    async fn request_logout(&self, url: &str) -> LoginResult<()> {
        let response = Request::get(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|err| transport_error("logout", &err))?;
        classify_logout_response(response.status())
    }
}

fn transport_error(operation: &'static str, err: &gloo_net::Error) -> LoginError {
    LoginError::Transport {
        operation,
        detail: err.to_string(),
    }
}
