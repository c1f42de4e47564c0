//! Localized text for everything around the map: heading, controls,
//! count indicator and attribution footer.

use storemap_core::i18n::keys;
use storemap_core::{Theme, Translations, WidgetOptions};

pub const PROVIDER_URL: &str = "https://weedcrawler.ca";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    /// Namespace for the widget's elements on the page.
    pub instance_id: String,
    pub theme: Theme,
    pub height: String,
    pub title: Option<String>,
    pub controls: Option<Controls>,
    pub attribution: Option<Attribution>,
    pub loading: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub search_placeholder: String,
    pub search_button: String,
    pub clear_button: String,
    pub locate_button: String,
    pub theme_toggle: Option<ThemeToggle>,
}

/// The toggle offers the theme that is *not* active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeToggle {
    pub icon: ToggleIcon,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIcon {
    Sun,
    Moon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub powered_by: String,
    pub link_text: String,
    pub url: &'static str,
}

impl ThemeToggle {
    #[must_use]
    pub fn for_theme(theme: Theme, translations: &Translations, language: &str) -> Self {
        match theme {
            Theme::Dark => Self {
                icon: ToggleIcon::Sun,
                label: translations.resolve(language, keys::LIGHT_MODE).to_string(),
            },
            Theme::Light => Self {
                icon: ToggleIcon::Moon,
                label: translations.resolve(language, keys::DARK_MODE).to_string(),
            },
        }
    }
}

impl Chrome {
    #[must_use]
    pub fn build(
        instance_id: &str,
        options: &WidgetOptions,
        theme: Theme,
        language: &str,
        translations: &Translations,
    ) -> Self {
        let t = |key: &'static str| translations.resolve(language, key).to_string();

        let title = options.show_title.then(|| {
            options
                .title
                .clone()
                .unwrap_or_else(|| t(keys::DEFAULT_TITLE))
        });

        let controls = options.show_controls.then(|| Controls {
            search_placeholder: t(keys::SEARCH_PLACEHOLDER),
            search_button: t(keys::SEARCH_BUTTON),
            clear_button: t(keys::CLEAR_BUTTON),
            locate_button: t(keys::LOCATE_BUTTON),
            theme_toggle: options
                .show_theme_toggle
                .then(|| ThemeToggle::for_theme(theme, translations, language)),
        });

        let attribution = options.show_attribution.then(|| Attribution {
            powered_by: t(keys::POWERED_BY),
            link_text: t(keys::PROVIDER_TITLE),
            url: PROVIDER_URL,
        });

        Self {
            instance_id: instance_id.to_string(),
            theme,
            height: options.height.clone(),
            title,
            controls,
            attribution,
            loading: t(keys::LOADING_MAP),
        }
    }
}

/// `"{count} stores found"`, plus ` filtered by "{term}"` while searching.
#[must_use]
pub fn count_text(
    count: usize,
    search_term: Option<&str>,
    translations: &Translations,
    language: &str,
) -> String {
    let found = translations.resolve(language, keys::STORES_FOUND);
    match search_term {
        Some(term) => format!(
            "{count} {found} {} \"{term}\"",
            translations.resolve(language, keys::FILTERED_BY)
        ),
        None => format!("{count} {found}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_text_without_search() {
        let t = Translations::builtin();
        assert_eq!(count_text(2, None, &t, "en"), "2 stores found");
        assert_eq!(count_text(2, None, &t, "fr"), "2 magasins trouvés");
    }

    #[test]
    fn count_text_includes_active_term() {
        let t = Translations::builtin();
        assert_eq!(
            count_text(1, Some("leaf"), &t, "en"),
            "1 stores found filtered by \"leaf\""
        );
    }

    #[test]
    fn default_chrome_has_every_section() {
        let t = Translations::builtin();
        let chrome = Chrome::build("csm_1", &WidgetOptions::default(), Theme::Light, "en", &t);

        assert_eq!(chrome.title.as_deref(), Some("Store Locator"));
        let controls = chrome.controls.expect("controls shown by default");
        assert_eq!(controls.search_placeholder, "Search stores by name...");
        let toggle = controls.theme_toggle.expect("toggle shown by default");
        assert_eq!(toggle.icon, ToggleIcon::Moon);
        assert_eq!(toggle.label, "Dark Mode");
        let attribution = chrome.attribution.expect("attribution shown by default");
        assert_eq!(attribution.powered_by, "Powered by");
        assert_eq!(attribution.url, PROVIDER_URL);
    }

    #[test]
    fn hidden_sections_are_omitted() {
        let options = WidgetOptions {
            show_title: false,
            show_controls: false,
            show_attribution: false,
            ..WidgetOptions::default()
        };
        let chrome = Chrome::build("csm_1", &options, Theme::Dark, "en", &Translations::builtin());
        assert!(chrome.title.is_none());
        assert!(chrome.controls.is_none());
        assert!(chrome.attribution.is_none());
    }

    #[test]
    fn caller_title_is_not_translated() {
        let options = WidgetOptions {
            title: Some("Our Shops".to_string()),
            ..WidgetOptions::default()
        };
        let chrome = Chrome::build("csm_1", &options, Theme::Light, "fr", &Translations::builtin());
        assert_eq!(chrome.title.as_deref(), Some("Our Shops"));
    }

    #[test]
    fn dark_theme_toggle_offers_light_mode() {
        let toggle = ThemeToggle::for_theme(Theme::Dark, &Translations::builtin(), "fr");
        assert_eq!(toggle.icon, ToggleIcon::Sun);
        assert_eq!(toggle.label, "Mode clair");
    }
}
