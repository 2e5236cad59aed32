//! Mounting: viewer config, plugin registration and the toolbar root.
//!
//! # Design
//! - Tool factories are registered explicitly once per boot, keyed by `ptype`.
//! - A tool whose config fails to build is skipped and logged; the rest still render.
//! - Sibling permalink tools live in the host page and publish through a
//!   `cgxp:permalink` event carrying `{id, permalink}` in its detail.

use crate::components::login::LoginWidgetView;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use crate::store::PermalinkStore;
use anyhow::Context;
use cgxp_login_core::{LOGIN_PTYPE, LoginConfig, PluginRegistry};
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::{document, window};
use js_sys::Reflect;
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use yew::prelude::*;
use yewdux::prelude::Dispatch;

const CONFIG_ELEMENT_ID: &str = "cgxp-viewer-config";
const TOOLBAR_ELEMENT_ID: &str = "cgxp-toolbar";
const PERMALINK_EVENT: &str = "cgxp:permalink";

#[derive(Debug, Default, Deserialize)]
struct ViewerConfig {
    #[serde(default)]
    tools: Vec<Value>,
    #[serde(default)]
    locale: Option<String>,
}

#[derive(Properties, PartialEq)]
struct ToolbarProps {
    tools: Vec<Value>,
    locale: LocaleCode,
}

fn register_login_component(plugins: &mut PluginRegistry<Html>) {
    plugins.register(LOGIN_PTYPE, |value| {
        let config = LoginConfig::from_value(value)?;
        Ok(html! { <LoginWidgetView config={config} /> })
    });
}

fn component_plugins() -> PluginRegistry<Html> {
    let mut plugins = PluginRegistry::new();
    register_login_component(&mut plugins);
    plugins
}

#[function_component(Toolbar)]
fn toolbar(props: &ToolbarProps) -> Html {
    let plugins = use_memo(|_| component_plugins(), ());
    let bundle = use_memo(|locale| TranslationBundle::new(*locale), props.locale);

    let items = props.tools.iter().cloned().filter_map(|config| {
        match plugins.create_from_config(config) {
            Ok(item) => Some(item),
            Err(err) => {
                console::error!("tool skipped", err.to_string());
                None
            }
        }
    });

    html! {
        <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
            <div class="cgxp-toolbar">
                {for items}
            </div>
        </ContextProvider<TranslationBundle>>
    }
}

fn load_viewer_config() -> anyhow::Result<ViewerConfig> {
    let Some(element) = document().get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(ViewerConfig::default());
    };
    let raw = element.text_content().unwrap_or_default();
    serde_json::from_str(&raw).context("decode viewer config")
}

fn pick_locale(configured: Option<&str>) -> LocaleCode {
    configured
        .and_then(LocaleCode::from_lang_tag)
        .or_else(|| {
            window()
                .navigator()
                .language()
                .as_deref()
                .and_then(LocaleCode::from_lang_tag)
        })
        .unwrap_or(DEFAULT_LOCALE)
}

fn publish_permalink(tool_id: &str, permalink: &str) {
    Dispatch::<PermalinkStore>::new().reduce_mut(|store| store.links.publish(tool_id, permalink));
}

fn detail_string(detail: &JsValue, key: &str) -> Option<String> {
    Reflect::get(detail, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_string())
}

fn listen_for_permalinks() {
    let listener = EventListener::new(&window(), PERMALINK_EVENT, |event| {
        let Some(event) = event.dyn_ref::<web_sys::CustomEvent>() else {
            return;
        };
        let detail = event.detail();
        match (
            detail_string(&detail, "id"),
            detail_string(&detail, "permalink"),
        ) {
            (Some(id), Some(permalink)) => publish_permalink(&id, &permalink),
            _ => console::warn!("permalink event ignored", detail),
        }
    });
    listener.forget();
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    listen_for_permalinks();
    let viewer = load_viewer_config().unwrap_or_else(|err| {
        console::error!("viewer config unreadable", format!("{err:#}"));
        ViewerConfig::default()
    });
    let props = ToolbarProps {
        locale: pick_locale(viewer.locale.as_deref()),
        tools: viewer.tools,
    };
    if let Some(root) = document().get_element_by_id(TOOLBAR_ELEMENT_ID) {
        yew::Renderer::<Toolbar>::with_root_and_props(root, props).render();
    } else {
        yew::Renderer::<Toolbar>::with_props(props).render();
    }
}
