//! Localization tables and lookup.
//!
//! A [`Translations`] value is built once and handed to every widget that
//! should use it. Lookups fall back from the requested language to the default
//! language and finally to the key itself, so a partial dictionary is always
//! usable.

use std::collections::{BTreeMap, HashMap};

use crate::error::ConfigError;

/// Dictionary keys used by the widget.
pub mod keys {
    pub const SEARCH_PLACEHOLDER: &str = "search_placeholder";
    pub const SEARCH_BUTTON: &str = "search_button";
    pub const CLEAR_BUTTON: &str = "clear_button";
    pub const LOCATE_BUTTON: &str = "locate_button";
    pub const LIGHT_MODE: &str = "light_mode";
    pub const DARK_MODE: &str = "dark_mode";
    pub const STORES_FOUND: &str = "stores_found";
    pub const FILTERED_BY: &str = "filtered_by";
    pub const PRODUCTS_AVAILABLE: &str = "products_available";
    pub const MORE_PRODUCTS: &str = "more_products";
    pub const VISIT_STORE: &str = "visit_store";
    pub const YOUR_LOCATION: &str = "your_location";
    pub const LOADING_MAP: &str = "loading_map";
    pub const LOCATION_ERROR: &str = "location_error";
    pub const GEOLOCATION_NOT_SUPPORTED: &str = "geolocation_not_supported";
    pub const FAILED_TO_LOAD_DATA: &str = "failed_to_load_data";
    pub const DEFAULT_TITLE: &str = "default_title";
    pub const POWERED_BY: &str = "powered_by";
    pub const PROVIDER_TITLE: &str = "provider_title";
}

pub type Dictionary = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct Translations {
    default_language: String,
    tables: BTreeMap<String, Dictionary>,
}

const EN: &[(&str, &str)] = &[
    (keys::SEARCH_PLACEHOLDER, "Search stores by name..."),
    (keys::SEARCH_BUTTON, "Search"),
    (keys::CLEAR_BUTTON, "Clear"),
    (keys::LOCATE_BUTTON, "Find My Location"),
    (keys::LIGHT_MODE, "Light Mode"),
    (keys::DARK_MODE, "Dark Mode"),
    (keys::STORES_FOUND, "stores found"),
    (keys::FILTERED_BY, "filtered by"),
    (keys::PRODUCTS_AVAILABLE, "products available"),
    (keys::MORE_PRODUCTS, "more products"),
    (keys::VISIT_STORE, "Visit Store"),
    (keys::YOUR_LOCATION, "Your Location"),
    (keys::LOADING_MAP, "Loading map..."),
    (keys::LOCATION_ERROR, "Unable to get your location: "),
    (
        keys::GEOLOCATION_NOT_SUPPORTED,
        "Geolocation is not supported by this browser.",
    ),
    (
        keys::FAILED_TO_LOAD_DATA,
        "Failed to load store data. Please try again later.",
    ),
    (keys::DEFAULT_TITLE, "Store Locator"),
    (keys::POWERED_BY, "Powered by"),
    (keys::PROVIDER_TITLE, "Weed Crawler - Cannabis Data Provider"),
];

const FR: &[(&str, &str)] = &[
    (keys::SEARCH_PLACEHOLDER, "Rechercher des magasins par nom..."),
    (keys::SEARCH_BUTTON, "Rechercher"),
    (keys::CLEAR_BUTTON, "Effacer"),
    (keys::LOCATE_BUTTON, "Trouver ma position"),
    (keys::LIGHT_MODE, "Mode clair"),
    (keys::DARK_MODE, "Mode sombre"),
    (keys::STORES_FOUND, "magasins trouvés"),
    (keys::FILTERED_BY, "filtré par"),
    (keys::PRODUCTS_AVAILABLE, "produits disponibles"),
    (keys::MORE_PRODUCTS, "produits supplémentaires"),
    (keys::VISIT_STORE, "Visiter le magasin"),
    (keys::YOUR_LOCATION, "Votre position"),
    (keys::LOADING_MAP, "Chargement de la carte..."),
    (keys::LOCATION_ERROR, "Impossible d'obtenir votre position : "),
    (
        keys::GEOLOCATION_NOT_SUPPORTED,
        "La géolocalisation n'est pas prise en charge par ce navigateur.",
    ),
    (
        keys::FAILED_TO_LOAD_DATA,
        "Échec du chargement des données. Veuillez réessayer plus tard.",
    ),
    (keys::DEFAULT_TITLE, "Localisateur de magasins"),
    (keys::POWERED_BY, "Propulsé par"),
    (
        keys::PROVIDER_TITLE,
        "Weed Crawler - Fournisseur de données sur le cannabis",
    ),
];

fn dictionary(entries: &[(&str, &str)]) -> Dictionary {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl Translations {
    /// Empty table whose fallback language is `default_language`.
    #[must_use]
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
            tables: BTreeMap::new(),
        }
    }

    /// English and French, English as the default.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new("en")
            .with_language("en", dictionary(EN))
            .with_language("fr", dictionary(FR))
    }

    /// Add (or replace) the dictionary for `language`.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>, dictionary: Dictionary) -> Self {
        self.tables.insert(language.into(), dictionary);
        self
    }

    /// Parse `{ "<lang>": { "<key>": "<text>" } }`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OptionsParse`] for malformed JSON and
    /// [`ConfigError::Translations`] when the default language has no table.
    pub fn from_json_str(default_language: &str, json: &str) -> Result<Self, ConfigError> {
        let tables: BTreeMap<String, Dictionary> = serde_json::from_str(json)?;
        if !tables.contains_key(default_language) {
            return Err(ConfigError::Translations(format!(
                "default language \"{default_language}\" has no dictionary"
            )));
        }
        Ok(Self {
            default_language: default_language.to_string(),
            tables,
        })
    }

    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    #[must_use]
    pub fn supports(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Look up `key` for `language`.
    ///
    /// Never fails: an unknown language or a key missing from its dictionary
    /// falls back to the default language, and a key missing there too is
    /// returned unchanged.
    #[must_use]
    pub fn resolve<'a>(&'a self, language: &str, key: &'a str) -> &'a str {
        if let Some(text) = self.tables.get(language).and_then(|d| d.get(key)) {
            return text;
        }
        if let Some(text) = self
            .tables
            .get(&self.default_language)
            .and_then(|d| d.get(key))
        {
            tracing::trace!(language, key, "translation falling back to default language");
            return text;
        }
        tracing::debug!(language, key, "no translation found; using key");
        key
    }

    /// Validate `language` against the table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedLanguage`] when no dictionary exists.
    pub fn ensure_supported(&self, language: &str) -> Result<(), ConfigError> {
        if self.supports(language) {
            Ok(())
        } else {
            Err(ConfigError::UnsupportedLanguage {
                requested: language.to_string(),
                supported: self.languages().collect::<Vec<_>>().join(", "),
            })
        }
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_both_languages() {
        let t = Translations::builtin();
        assert_eq!(t.resolve("en", keys::SEARCH_BUTTON), "Search");
        assert_eq!(t.resolve("fr", keys::SEARCH_BUTTON), "Rechercher");
    }

    #[test]
    fn builtin_dictionaries_are_complete() {
        let t = Translations::builtin();
        for (key, _) in EN {
            assert_ne!(t.resolve("fr", key), *key, "fr is missing {key}");
        }
        assert_eq!(EN.len(), FR.len());
    }

    #[test]
    fn unsupported_language_falls_back_to_default() {
        let t = Translations::builtin();
        assert_eq!(t.resolve("de", keys::CLEAR_BUTTON), "Clear");
    }

    #[test]
    fn unknown_key_returns_key() {
        let t = Translations::builtin();
        assert_eq!(t.resolve("fr", "no_such_key"), "no_such_key");
        assert_eq!(t.resolve("xx", "no_such_key"), "no_such_key");
    }

    #[test]
    fn partial_dictionary_falls_back_per_key() {
        let mut es = Dictionary::new();
        es.insert(keys::SEARCH_BUTTON.to_string(), "Buscar".to_string());
        let t = Translations::builtin().with_language("es", es);

        assert!(t.supports("es"));
        assert_eq!(t.resolve("es", keys::SEARCH_BUTTON), "Buscar");
        assert_eq!(t.resolve("es", keys::CLEAR_BUTTON), "Clear");
    }

    #[test]
    fn custom_default_language_is_used_for_fallback() {
        let json = r#"{ "fr": { "search_button": "Rechercher" }, "en": {} }"#;
        let t = Translations::from_json_str("fr", json).expect("valid table");
        assert_eq!(t.resolve("en", keys::SEARCH_BUTTON), "Rechercher");
        assert_eq!(t.default_language(), "fr");
    }

    #[test]
    fn from_json_requires_default_dictionary() {
        let err = Translations::from_json_str("en", r#"{ "fr": {} }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Translations(_)), "got {err:?}");
    }

    #[test]
    fn ensure_supported_lists_known_languages() {
        let err = Translations::builtin().ensure_supported("de").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported language \"de\" (supported: en, fr)"
        );
    }
}
