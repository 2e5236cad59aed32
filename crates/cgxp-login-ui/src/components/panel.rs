//! Floating panel holding the login form.
//!
//! # Design
//! - Pure view: form state lives in the owning widget and flows in through props.
//! - A real `<form>` so Enter in either field submits and password managers see the fields.

use crate::components::raw_html::RawHtml;
use cgxp_login_core::form::{LOGIN_FIELD, PASSWORD_FIELD};
use cgxp_login_core::{ButtonSpec, LoginForm, LoginPanel, LoginTexts};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LoginPanelProps {
    pub(crate) panel: LoginPanel,
    pub(crate) texts: LoginTexts,
    pub(crate) form: LoginForm,
    pub(crate) submit: ButtonSpec,
    pub(crate) action: Option<String>,
    pub(crate) visible: bool,
    pub(crate) on_login_input: Callback<String>,
    pub(crate) on_password_input: Callback<String>,
    pub(crate) on_submit: Callback<()>,
}

#[function_component(LoginPanelView)]
pub(crate) fn login_panel_view(props: &LoginPanelProps) -> Html {
    let layout = props.panel.form;
    let field_style = format!("width: {}px", layout.field_width);
    let label_style = format!("width: {}px", layout.label_width);

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };
    let on_login = input_callback(props.on_login_input.clone());
    let on_password = input_callback(props.on_password_input.clone());

    html! {
        <div
            class="cgxp-login-window"
            style={format!("width: {}px;{}", props.panel.width, hidden_style(props.visible))}>
            <form
                class="cgxp-login-form"
                method="post"
                action={props.action.clone().unwrap_or_default()}
                style={format!("width: {}px", layout.width)}
                onsubmit={on_submit}>
                <label class="cgxp-login-row">
                    <span style={label_style.clone()}>{props.texts.username.clone()}</span>
                    <input
                        id={LOGIN_FIELD}
                        name={LOGIN_FIELD}
                        type="text"
                        autocomplete="username"
                        required={true}
                        style={field_style.clone()}
                        value={props.form.login().to_string()}
                        oninput={on_login} />
                </label>
                <label class="cgxp-login-row">
                    <span style={label_style}>{props.texts.password.clone()}</span>
                    <input
                        id={PASSWORD_FIELD}
                        name={PASSWORD_FIELD}
                        type="password"
                        autocomplete="current-password"
                        required={true}
                        style={field_style}
                        value={props.form.password().to_string()}
                        oninput={on_password} />
                </label>
                <div
                    class="cgxp-login-failure"
                    role="alert"
                    style={hidden_style(props.form.failure_visible())}>
                    {props.texts.authentication_failure.clone()}
                </div>
                <div class="cgxp-login-buttons">
                    <button
                        type="submit"
                        class={classes!("cgxp-login-submit", props.submit.icon_cls.clone())}
                        disabled={!props.form.is_valid()}>
                        {props.submit.text.clone()}
                    </button>
                </div>
            </form>
            {if let Some(extra) = props.panel.extra_html.as_ref() {
                html! { <RawHtml html={AttrValue::from(extra.clone())} class={classes!("cgxp-login-extra")} /> }
            } else { html! {} }}
        </div>
    }
}

fn input_callback(target: Callback<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
            target.emit(input.value());
        }
    })
}

const fn hidden_style(visible: bool) -> &'static str {
    if visible { "" } else { "display: none" }
}
