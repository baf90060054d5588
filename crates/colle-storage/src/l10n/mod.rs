//! Bilingual copy handling for the storefront and the generated documents.
//!
//! Every user-facing string in the catalog carries both an English and a
//! French rendition, and every rendering call states which language it wants.
//! Nothing in this module keeps a current-language global.

mod format;
mod resolve;

pub use format::{
    format_currency, format_date, format_date_range, format_money_for_document, format_phone,
};
pub use resolve::resolve_language;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Display language for one rendering call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub const fn all() -> [Language; 2] {
        [Language::En, Language::Fr]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    pub fn from_key(raw: &str) -> Option<Language> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }

    pub const fn other(self) -> Language {
        match self {
            Language::En => Language::Fr,
            Language::Fr => Language::En,
        }
    }
}

/// A static English/French string pair.
///
/// An empty rendition means the translation is missing and the other language
/// is used instead, so stale catalog entries degrade to readable copy rather
/// than blank labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub en: &'static str,
    pub fr: &'static str,
}

impl LocalizedText {
    pub const fn new(en: &'static str, fr: &'static str) -> LocalizedText {
        LocalizedText { en, fr }
    }

    pub fn resolve(&self, language: Language) -> &'static str {
        let (wanted, fallback) = match language {
            Language::En => (self.en, self.fr),
            Language::Fr => (self.fr, self.en),
        };
        if !wanted.is_empty() {
            wanted
        } else {
            fallback
        }
    }
}

type Render = dyn Fn(Language) -> String + Send + Sync;

/// A catalog string that is either a fixed pair or computed per language.
///
/// Computed entries interpolate live values (formatted money, dates) into
/// translated sentences at render time.
#[derive(Clone)]
pub enum LocalizedValue {
    Static(LocalizedText),
    Computed(Arc<Render>),
}

impl LocalizedValue {
    pub const fn fixed(en: &'static str, fr: &'static str) -> LocalizedValue {
        LocalizedValue::Static(LocalizedText::new(en, fr))
    }

    pub fn computed<F>(render: F) -> LocalizedValue
    where
        F: Fn(Language) -> String + Send + Sync + 'static,
    {
        LocalizedValue::Computed(Arc::new(render))
    }

    pub fn render(&self, language: Language) -> String {
        match self {
            LocalizedValue::Static(text) => text.resolve(language).to_string(),
            LocalizedValue::Computed(render) => render(language),
        }
    }
}

impl fmt::Debug for LocalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalizedValue::Static(text) => f.debug_tuple("Static").field(text).finish(),
            LocalizedValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_keys_round_trip() {
        for language in Language::all() {
            assert_eq!(Language::from_key(language.key()), Some(language));
        }
        assert_eq!(Language::from_key(" FR "), Some(Language::Fr));
        assert_eq!(Language::from_key("de"), None);
    }

    #[test]
    fn localized_text_falls_back_to_other_language() {
        let text = LocalizedText::new("Winter Storage", "");
        assert_eq!(text.resolve(Language::Fr), "Winter Storage");

        let text = LocalizedText::new("Winter Storage", "Entreposage d'hiver");
        assert_eq!(text.resolve(Language::Fr), "Entreposage d'hiver");
    }

    #[test]
    fn computed_value_renders_per_language() {
        let value = LocalizedValue::computed(|language| match language {
            Language::En => format!("pickup by {}", 26),
            Language::Fr => format!("reprise avant le {}", 26),
        });
        assert_eq!(value.render(Language::En), "pickup by 26");
        assert_eq!(value.render(Language::Fr), "reprise avant le 26");
    }
}
