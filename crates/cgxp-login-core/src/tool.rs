//! Tool capability, sibling-tool lookup and the plugin registry.
//!
//! # Design
//! - Tools are plain values implementing [`Tool`]; the host composes them instead of
//!   subclassing a base tool.
//! - Factories are registered explicitly at startup and keyed by their `ptype` tag.
//! - Sibling lookups go through [`ToolRegistry`] so the login flow never owns the
//!   permalink tool.

use crate::actions::ToolAction;
use crate::error::{LoginError, LoginResult};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A tool hosted by the viewer.
pub trait Tool {
    /// Type tag the tool's factory is registered under.
    fn ptype(&self) -> &'static str;

    /// Id assigned by the host config.
    fn id(&self) -> Option<&str>;

    /// Controls this tool contributes to the toolbar.
    fn add_actions(&self) -> Vec<ToolAction>;

    /// Current permalink for tools that publish one.
    fn permalink(&self) -> Option<String> {
        None
    }
}

/// Read-only lookup of sibling tools by id.
pub trait ToolRegistry {
    /// Current permalink of the tool registered under `tool_id`.
    fn permalink(&self, tool_id: &str) -> Option<String>;
}

/// Fixed id → permalink map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticPermalinks {
    links: BTreeMap<String, String>,
}

impl StaticPermalinks {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `permalink` under `tool_id`, replacing any previous value.
    pub fn publish(&mut self, tool_id: impl Into<String>, permalink: impl Into<String>) {
        self.links.insert(tool_id.into(), permalink.into());
    }

    /// Builder form of [`Self::publish`].
    #[must_use]
    pub fn with(mut self, tool_id: impl Into<String>, permalink: impl Into<String>) -> Self {
        self.publish(tool_id, permalink);
        self
    }
}

impl ToolRegistry for StaticPermalinks {
    fn permalink(&self, tool_id: &str) -> Option<String> {
        self.links.get(tool_id).cloned()
    }
}

/// Tools owned by a viewer, keyed by id where they have one.
#[derive(Default)]
pub struct ToolSet {
    by_id: BTreeMap<String, Box<dyn Tool>>,
    unnamed: Vec<Box<dyn Tool>>,
}

impl ToolSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every tool described in `configs` through `plugins`.
    ///
    /// # Errors
    ///
    /// Fails on the first config whose `ptype` is unknown or whose payload is invalid.
    pub fn build<I>(plugins: &PluginRegistry<Box<dyn Tool>>, configs: I) -> LoginResult<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut set = Self::new();
        for config in configs {
            set.insert(plugins.create_from_config(config)?);
        }
        Ok(set)
    }

    /// Add a tool; a tool with an existing id replaces the previous one.
    pub fn insert(&mut self, tool: Box<dyn Tool>) {
        match tool.id().map(ToString::to_string) {
            Some(id) => {
                if self.by_id.insert(id.clone(), tool).is_some() {
                    tracing::debug!(tool_id = %id, "replaced tool with duplicate id");
                }
            }
            None => self.unnamed.push(tool),
        }
    }

    /// Tool registered under `tool_id`.
    #[must_use]
    pub fn get(&self, tool_id: &str) -> Option<&dyn Tool> {
        self.by_id.get(tool_id).map(|tool| &**tool)
    }

    /// Number of tools held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len() + self.unnamed.len()
    }

    /// Whether the set holds no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All toolbar actions, named tools first in id order, then unnamed ones.
    #[must_use]
    pub fn actions(&self) -> Vec<ToolAction> {
        self.by_id
            .values()
            .chain(self.unnamed.iter())
            .flat_map(|tool| tool.add_actions())
            .collect()
    }
}

impl ToolRegistry for ToolSet {
    fn permalink(&self, tool_id: &str) -> Option<String> {
        self.get(tool_id).and_then(|tool| tool.permalink())
    }
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSet")
            .field("ids", &self.by_id.keys().collect::<Vec<_>>())
            .field("unnamed", &self.unnamed.len())
            .finish()
    }
}

/// Factory turning a tool config payload into a product.
pub type PluginFactory<T> = Box<dyn Fn(Value) -> LoginResult<T>>;

/// Factories keyed by plugin type tag.
pub struct PluginRegistry<T> {
    factories: HashMap<&'static str, PluginFactory<T>>,
}

impl<T> Default for PluginRegistry<T> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<T> PluginRegistry<T> {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `ptype`, replacing an earlier registration.
    pub fn register<F>(&mut self, ptype: &'static str, factory: F)
    where
        F: Fn(Value) -> LoginResult<T> + 'static,
    {
        if self.factories.insert(ptype, Box::new(factory)).is_some() {
            tracing::debug!(ptype, "replaced plugin factory");
        }
    }

    /// Whether a factory is registered under `ptype`.
    #[must_use]
    pub fn contains(&self, ptype: &str) -> bool {
        self.factories.contains_key(ptype)
    }

    /// Build a product for `ptype` from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::UnknownPlugin`] when no factory is registered, or the
    /// factory's own error.
    pub fn create(&self, ptype: &str, config: Value) -> LoginResult<T> {
        let factory = self
            .factories
            .get(ptype)
            .ok_or_else(|| LoginError::UnknownPlugin {
                ptype: ptype.to_string(),
            })?;
        factory(config)
    }

    /// Build a product from a config object carrying its own `ptype` key.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::UnknownPlugin`] when `ptype` is missing or unregistered.
    pub fn create_from_config(&self, config: Value) -> LoginResult<T> {
        let ptype = config
            .get("ptype")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.create(&ptype, config)
    }
}

impl<T> fmt::Debug for PluginRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.factories.keys().collect();
        tags.sort_unstable();
        f.debug_struct("PluginRegistry").field("ptypes", &tags).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct PermalinkTool {
        id: String,
        link: Option<String>,
    }

    impl Tool for PermalinkTool {
        fn ptype(&self) -> &'static str {
            "permalink"
        }

        fn id(&self) -> Option<&str> {
            Some(&self.id)
        }

        fn add_actions(&self) -> Vec<ToolAction> {
            vec![ToolAction::Text("link".into())]
        }

        fn permalink(&self) -> Option<String> {
            self.link.clone()
        }
    }

    fn permalink_plugins() -> PluginRegistry<Box<dyn Tool>> {
        let mut plugins = PluginRegistry::new();
        plugins.register("permalink", |config: Value| {
            let id = config
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("permalink")
                .to_string();
            let link = config
                .get("link")
                .and_then(Value::as_str)
                .map(ToString::to_string);
            Ok(Box::new(PermalinkTool { id, link }) as Box<dyn Tool>)
        });
        plugins
    }

    #[test]
    fn unknown_ptype_is_an_error() {
        let plugins = permalink_plugins();
        assert!(plugins.contains("permalink"));
        let err = plugins
            .create_from_config(json!({"ptype": "nope"}))
            .err()
            .expect("unknown plugin");
        assert!(matches!(err, LoginError::UnknownPlugin { ptype } if ptype == "nope"));
        assert!(matches!(
            plugins.create_from_config(json!({})),
            Err(LoginError::UnknownPlugin { .. })
        ));
    }

    #[test]
    fn tool_set_resolves_permalinks_by_id() {
        let plugins = permalink_plugins();
        let tools = ToolSet::build(
            &plugins,
            [
                json!({"ptype": "permalink", "id": "pl", "link": "http://x/app?map_x=2"}),
                json!({"ptype": "permalink", "id": "bare"}),
            ],
        )
        .expect("tools build");
        assert_eq!(tools.len(), 2);
        assert_eq!(
            ToolRegistry::permalink(&tools, "pl").as_deref(),
            Some("http://x/app?map_x=2")
        );
        assert_eq!(ToolRegistry::permalink(&tools, "bare"), None);
        assert_eq!(ToolRegistry::permalink(&tools, "missing"), None);
        assert_eq!(tools.actions().len(), 2);
    }

    #[test]
    fn static_permalinks_replace_previous_value() {
        let mut links = StaticPermalinks::new().with("pl", "http://a");
        links.publish("pl", "http://b");
        assert_eq!(links.permalink("pl").as_deref(), Some("http://b"));
    }

    #[test]
    fn reregistering_replaces_factory() {
        let mut plugins: PluginRegistry<u8> = PluginRegistry::new();
        plugins.register("n", |_| Ok(1));
        plugins.register("n", |_| Ok(2));
        assert_eq!(plugins.create("n", Value::Null).expect("factory"), 2);
    }
}
