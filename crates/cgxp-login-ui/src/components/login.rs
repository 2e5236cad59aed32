//! Login tool component: toolbar controls plus the floating login panel.
//!
//! # Design
//! - The core `LoginWidget` is the single source of truth; callbacks clone, mutate and set it.
//! - Permalinks are read from the store when the login settles, not when it starts.
//! - Logout failures stay on the console; the page is left as it was.

use crate::components::panel::LoginPanelView;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::browser::WindowBrowser;
use crate::services::http::GlooTransport;
use crate::store::{PermalinkStore, ToggleStore};
use cgxp_login_core::{ButtonSpec, LoginConfig, LoginWidget, SubmitResult, Tool, ToolAction};
use gloo::console;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_store};

#[derive(Properties, PartialEq)]
pub(crate) struct LoginWidgetProps {
    pub(crate) config: LoginConfig,
}

#[function_component(LoginWidgetView)]
pub(crate) fn login_widget_view(props: &LoginWidgetProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let widget = {
        let config = props.config.clone();
        use_state(move || LoginWidget::with_texts(config, |key| bundle.lookup(key)))
    };
    let (toggles, toggle_dispatch) = use_store::<ToggleStore>();

    let toggle = widget.toggle();
    let panel_visible = widget.panel_visible(&toggles.groups);

    let on_toggle = {
        let toggle = toggle.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(spec) = toggle.as_ref() {
                toggle_dispatch.reduce_mut(|store| {
                    store
                        .groups
                        .toggle(spec.toggle_group.as_deref(), &spec.action_id);
                });
            }
        })
    };

    let on_logout = {
        let widget = widget.clone();
        Callback::from(move |_: MouseEvent| {
            let snapshot = (*widget).clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = snapshot.logout(&GlooTransport, &WindowBrowser).await {
                    console::warn!("logout failed", err.to_string());
                }
            });
        })
    };

    let on_login_input = {
        let widget = widget.clone();
        Callback::from(move |value: String| {
            let mut next = (*widget).clone();
            next.form_mut().set_login(value);
            widget.set(next);
        })
    };

    let on_password_input = {
        let widget = widget.clone();
        Callback::from(move |value: String| {
            let mut next = (*widget).clone();
            next.form_mut().set_password(value);
            widget.set(next);
        })
    };

    let on_submit = {
        let widget = widget.clone();
        Callback::from(move |()| {
            let mut next = (*widget).clone();
            let Ok(pending) = next.begin_submit() else {
                return;
            };
            widget.set(next.clone());
            let widget = widget.clone();
            yew::platform::spawn_local(async move {
                let outcome = pending.send(&GlooTransport).await;
                let permalinks = Dispatch::<PermalinkStore>::new().get();
                if next.finish_submit(outcome, &WindowBrowser, &permalinks.links)
                    == SubmitResult::Failed
                {
                    console::warn!("login failed");
                }
                widget.set(next);
            });
        })
    };

    let actions = widget.add_actions();

    html! {
        <div class="cgxp-login">
            {for actions.into_iter().map(|action| match action {
                ToolAction::Text(label) => html! {
                    <span class="cgxp-login-label">{label}</span>
                },
                ToolAction::Button(spec) => html! {
                    <button
                        type="button"
                        class={button_classes(&spec, false)}
                        title={spec.tooltip.clone().unwrap_or_default()}
                        onclick={on_logout.clone()}>
                        {spec.text.clone()}
                    </button>
                },
                ToolAction::Toggle(spec) => html! {
                    <button
                        type="button"
                        class={button_classes(&spec.button, panel_visible)}
                        title={spec.button.tooltip.clone().unwrap_or_default()}
                        aria-pressed={panel_visible.to_string()}
                        onclick={on_toggle.clone()}>
                        {spec.button.text.clone()}
                    </button>
                },
            })}
            <LoginPanelView
                panel={widget.panel().clone()}
                texts={widget.texts().clone()}
                form={widget.form().clone()}
                submit={widget.submit_button()}
                action={widget.config().login_url.clone()}
                visible={panel_visible}
                on_login_input={on_login_input}
                on_password_input={on_password_input}
                on_submit={on_submit} />
        </div>
    }
}

fn button_classes(spec: &ButtonSpec, pressed: bool) -> Classes {
    classes!(
        "cgxp-login-button",
        spec.icon_cls.clone(),
        spec.cls.clone(),
        pressed.then_some("active")
    )
}
