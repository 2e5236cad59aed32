//! Lightweight JSON-backed translations with per-locale bundles.

use serde_json::Value;
use std::sync::LazyLock;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocaleCode {
    /// English.
    En,
    /// French.
    Fr,
    /// German.
    De,
}

impl LocaleCode {
    #[must_use]
    /// All supported locales in display order.
    pub const fn all() -> [Self; 3] {
        [Self::En, Self::Fr, Self::De]
    }

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }

    /// Map an arbitrary browser language tag to a supported locale, falling back to None.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Default fallback locale.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Translation bundle containing a parsed JSON tree for the locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Build a translation bundle for the given locale.
    ///
    /// Missing keys degrade to English strings.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree: Value = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`) with English fallback.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<String> {
        resolve(&self.tree, path).or_else(|| resolve(&EN_FALLBACK.tree, path))
    }
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::Fr => include_str!("../../i18n/fr.json"),
        LocaleCode::De => include_str!("../../i18n/de.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgxp_login_core::{LoginTexts, TextOverrides};

    #[test]
    fn missing_key_resolves_to_none() {
        let bundle = TranslationBundle::new(LocaleCode::Fr);
        assert!(bundle.lookup("nonexistent.key").is_none());
        assert!(bundle.lookup("login").is_none());
    }

    #[test]
    fn bundles_load_all_locales() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            assert!(bundle.lookup("login.logged_as").is_some_and(|t| t.contains("${user}")));
        }
    }

    #[test]
    fn lang_tags_map_to_base_locale() {
        assert_eq!(LocaleCode::from_lang_tag("fr-CH"), Some(LocaleCode::Fr));
        assert_eq!(LocaleCode::from_lang_tag("de_DE"), Some(LocaleCode::De));
        assert_eq!(LocaleCode::from_lang_tag("it"), None);
    }

    #[test]
    fn bundle_feeds_login_texts_below_overrides() {
        let bundle = TranslationBundle::new(LocaleCode::Fr);
        let overrides = TextOverrides {
            login_text: Some("Entrer".into()),
            ..TextOverrides::default()
        };
        let texts = LoginTexts::resolve(&overrides, |key| bundle.lookup(key));
        assert_eq!(texts.login, "Entrer");
        assert_eq!(texts.logout, "Déconnexion");
        assert_eq!(texts.logged_as_label("jo"), "Connecté en tant que jo");
    }
}
