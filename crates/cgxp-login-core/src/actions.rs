//! Declarative description of the controls a tool contributes to the host toolbar.

use crate::config::ActionConfig;

/// One control rendered into the host toolbar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolAction {
    /// Static text item.
    Text(String),
    /// Plain push button.
    Button(ButtonSpec),
    /// Toggle button bound to a floating panel.
    Toggle(ToggleSpec),
}

/// Push button appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonSpec {
    /// Button label.
    pub text: String,
    /// Tooltip shown on hover.
    pub tooltip: Option<String>,
    /// Icon class.
    pub icon_cls: Option<String>,
    /// Extra css class.
    pub cls: Option<String>,
}

impl ButtonSpec {
    /// Button with `text` and no styling overrides.
    #[must_use]
    pub fn labelled(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Apply `overrides` on top of this button; set fields win.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Option<&ActionConfig>) -> Self {
        if let Some(overrides) = overrides {
            if let Some(text) = &overrides.text {
                self.text.clone_from(text);
            }
            if overrides.tooltip.is_some() {
                self.tooltip.clone_from(&overrides.tooltip);
            }
            if overrides.icon_cls.is_some() {
                self.icon_cls.clone_from(&overrides.icon_cls);
            }
            if overrides.cls.is_some() {
                self.cls.clone_from(&overrides.cls);
            }
        }
        self
    }
}

/// Toggle button bound to a floating panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleSpec {
    /// Action id used for toggle-group bookkeeping.
    pub action_id: String,
    /// Button appearance.
    pub button: ButtonSpec,
    /// Group the toggle is exclusive within.
    pub toggle_group: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::ButtonSpec;
    use crate::config::ActionConfig;

    #[test]
    fn overrides_replace_only_set_fields() {
        let base = ButtonSpec {
            text: "Login".into(),
            tooltip: Some("Open".into()),
            icon_cls: None,
            cls: Some("btn".into()),
        };
        let overrides = ActionConfig {
            icon_cls: Some("user".into()),
            ..ActionConfig::default()
        };
        let merged = base.with_overrides(Some(&overrides));
        assert_eq!(merged.text, "Login");
        assert_eq!(merged.tooltip.as_deref(), Some("Open"));
        assert_eq!(merged.icon_cls.as_deref(), Some("user"));
        assert_eq!(merged.cls.as_deref(), Some("btn"));
    }

    #[test]
    fn text_override_replaces_label() {
        let overrides = ActionConfig {
            text: Some("Sign in".into()),
            ..ActionConfig::default()
        };
        let merged = ButtonSpec::labelled("Login").with_overrides(Some(&overrides));
        assert_eq!(merged.text, "Sign in");
        assert_eq!(ButtonSpec::labelled("Login").with_overrides(None).text, "Login");
    }
}
