//! `window`-backed browser surface.

use cgxp_login_core::{Browser, Credentials, PageLocation};
use gloo::console;
use gloo::utils::window;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WindowBrowser;

impl Browser for WindowBrowser {
    fn location(&self) -> PageLocation {
        let location = window().location();
        PageLocation::new(
            location.href().unwrap_or_default(),
            location.search().unwrap_or_default(),
        )
    }

    fn navigate(&self, url: &str) {
        if let Err(err) = window().location().set_href(url) {
            console::error!("navigation failed", url, err);
        }
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn offer_credential_save(&self, credentials: &Credentials) {
        if let Err(err) = store_password_credential(credentials) {
            console::warn!("credential save unavailable", err);
        }
    }
}

// Browsers without the Credential Management API fall back to their own
// form-submission heuristics.
fn store_password_credential(credentials: &Credentials) -> Result<(), JsValue> {
    let win = window();
    let ctor = Reflect::get(&JsValue::from(win.clone()), &JsValue::from_str("PasswordCredential"))?;
    let Some(ctor) = ctor.dyn_ref::<Function>() else {
        return Ok(());
    };
    let data = Object::new();
    Reflect::set(&data, &JsValue::from_str("id"), &JsValue::from_str(&credentials.login))?;
    Reflect::set(
        &data,
        &JsValue::from_str("password"),
        &JsValue::from_str(&credentials.password),
    )?;
    let credential = Reflect::construct(ctor, &Array::of1(&data))?;
    win.navigator()
        .credentials()
        .store(credential.unchecked_ref())?;
    Ok(())
}
