//! Widget options: documented defaults plus caller overrides.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geo::LatLng;

/// Geographic center of the contiguous United States.
pub const DEFAULT_CENTER: LatLng = LatLng::new(39.8283, -98.5795);
pub const DEFAULT_ZOOM: u8 = 4;
pub const DEFAULT_MIN_ZOOM: u8 = 3;
pub const DEFAULT_MAX_ZOOM: u8 = 18;
pub const DEFAULT_HEIGHT: &str = "600px";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ConfigError::InvalidTheme(other.to_string())),
        }
    }
}

/// Fully resolved widget configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub show_controls: bool,
    pub show_title: bool,
    /// Heading text; `None` means the localized default title.
    pub title: Option<String>,
    pub height: String,
    pub show_attribution: bool,
    /// Region codes to restrict the map to; empty means no restriction.
    pub provinces: Vec<String>,
    pub theme: Theme,
    pub show_theme_toggle: bool,
    pub language: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            show_controls: true,
            show_title: true,
            title: None,
            height: DEFAULT_HEIGHT.to_string(),
            show_attribution: true,
            provinces: Vec::new(),
            theme: Theme::Light,
            show_theme_toggle: true,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Caller-supplied options. Every field is optional and unknown keys are
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptionOverrides {
    /// `[lat, lng]`.
    pub center: Option<[f64; 2]>,
    pub zoom: Option<u8>,
    pub min_zoom: Option<u8>,
    pub max_zoom: Option<u8>,
    pub show_controls: Option<bool>,
    pub show_title: Option<bool>,
    pub title: Option<String>,
    pub height: Option<String>,
    pub show_attribution: Option<bool>,
    pub provinces: Option<Vec<String>>,
    pub theme: Option<Theme>,
    pub show_theme_toggle: Option<bool>,
    pub language: Option<String>,
}

impl OptionOverrides {
    /// Parse overrides from a JSON object such as an embedding page's options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OptionsParse`] for malformed JSON, unknown keys,
    /// or values of the wrong type (including an invalid theme).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Load overrides from a YAML (or JSON) options file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_overrides(path: &Path) -> Result<OptionOverrides, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::OptionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let overrides: OptionOverrides = serde_yaml::from_str(&content)?;
    Ok(overrides)
}

impl WidgetOptions {
    /// Defaults with every supplied override applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidZoom`] when the zoom bounds are inverted
    /// or the initial zoom falls outside them.
    pub fn merged(overrides: OptionOverrides) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        options.apply(overrides);
        options.validate()?;
        Ok(options)
    }

    fn apply(&mut self, o: OptionOverrides) {
        if let Some([lat, lng]) = o.center {
            self.center = LatLng::new(lat, lng);
        }
        if let Some(v) = o.zoom {
            self.zoom = v;
        }
        if let Some(v) = o.min_zoom {
            self.min_zoom = v;
        }
        if let Some(v) = o.max_zoom {
            self.max_zoom = v;
        }
        if let Some(v) = o.show_controls {
            self.show_controls = v;
        }
        if let Some(v) = o.show_title {
            self.show_title = v;
        }
        if o.title.is_some() {
            self.title = o.title;
        }
        if let Some(v) = o.height {
            self.height = v;
        }
        if let Some(v) = o.show_attribution {
            self.show_attribution = v;
        }
        if let Some(v) = o.provinces {
            self.provinces = v;
        }
        if let Some(v) = o.theme {
            self.theme = v;
        }
        if let Some(v) = o.show_theme_toggle {
            self.show_theme_toggle = v;
        }
        if let Some(v) = o.language {
            self.language = v;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvalidZoom(format!(
                "minZoom {} exceeds maxZoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.zoom) {
            return Err(ConfigError::InvalidZoom(format!(
                "zoom {} outside {}..={}",
                self.zoom, self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = WidgetOptions::default();
        assert_eq!(options.center, LatLng::new(39.8283, -98.5795));
        assert_eq!(options.zoom, 4);
        assert_eq!((options.min_zoom, options.max_zoom), (3, 18));
        assert!(options.show_controls);
        assert!(options.show_title);
        assert!(options.title.is_none());
        assert_eq!(options.height, "600px");
        assert!(options.show_attribution);
        assert!(options.provinces.is_empty());
        assert_eq!(options.theme, Theme::Light);
        assert!(options.show_theme_toggle);
        assert_eq!(options.language, "en");
    }

    #[test]
    fn empty_overrides_yield_defaults() {
        let merged = WidgetOptions::merged(OptionOverrides::default()).expect("valid");
        assert_eq!(merged, WidgetOptions::default());
    }

    #[test]
    fn caller_values_win_field_by_field() {
        let overrides = OptionOverrides::from_json_str(
            r#"{ "zoom": 6, "provinces": ["BC", "ON"], "theme": "dark", "showTitle": false, "title": "Find us" }"#,
        )
        .expect("valid overrides");
        let merged = WidgetOptions::merged(overrides).expect("valid");

        assert_eq!(merged.zoom, 6);
        assert_eq!(merged.provinces, ["BC", "ON"]);
        assert_eq!(merged.theme, Theme::Dark);
        assert!(!merged.show_title);
        assert_eq!(merged.title.as_deref(), Some("Find us"));
        // untouched fields keep defaults
        assert_eq!(merged.height, "600px");
        assert_eq!(merged.language, "en");
    }

    #[test]
    fn unknown_option_key_is_rejected() {
        let err = OptionOverrides::from_json_str(r#"{ "clustering": true }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OptionsParse(_)), "got {err:?}");
    }

    #[test]
    fn invalid_theme_override_is_rejected() {
        let err = OptionOverrides::from_json_str(r#"{ "theme": "blue" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OptionsParse(_)), "got {err:?}");
    }

    #[test]
    fn inverted_zoom_bounds_are_rejected() {
        let overrides = OptionOverrides {
            min_zoom: Some(12),
            max_zoom: Some(5),
            ..OptionOverrides::default()
        };
        let err = WidgetOptions::merged(overrides).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidZoom(_)), "got {err:?}");
    }

    #[test]
    fn zoom_outside_bounds_is_rejected() {
        let overrides = OptionOverrides {
            zoom: Some(2),
            ..OptionOverrides::default()
        };
        assert!(WidgetOptions::merged(overrides).is_err());
    }

    #[test]
    fn theme_parses_and_toggles() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        let err = "blue".parse::<Theme>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTheme(ref t) if t == "blue"));
    }

    #[test]
    fn load_overrides_reads_yaml_file() {
        let path = std::env::temp_dir().join(format!("storemap-options-{}.yaml", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("create temp file");
        writeln!(file, "language: fr\nprovinces:\n  - BC\ncenter: [49.28, -123.12]").expect("write");
        drop(file);

        let overrides = load_overrides(&path).expect("yaml parses");
        std::fs::remove_file(&path).ok();

        assert_eq!(overrides.language.as_deref(), Some("fr"));
        assert_eq!(overrides.provinces, Some(vec!["BC".to_string()]));
        assert_eq!(overrides.center, Some([49.28, -123.12]));
    }

    #[test]
    fn load_overrides_reports_missing_file() {
        let err = load_overrides(Path::new("/nonexistent/storemap.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::OptionsFileIo { .. }), "got {err:?}");
    }
}
