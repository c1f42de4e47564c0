//! Base-map tile sources per theme.

use storemap_core::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub subdomains: &'static str,
}

pub const OPENSTREETMAP: TileLayer = TileLayer {
    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    attribution: "© OpenStreetMap contributors",
    subdomains: "abc",
};

pub const CARTO_DARK: TileLayer = TileLayer {
    url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
    attribution: "© CartoDB",
    subdomains: "abcd",
};

impl TileLayer {
    #[must_use]
    pub fn for_theme(theme: Theme) -> &'static TileLayer {
        match theme {
            Theme::Light => &OPENSTREETMAP,
            Theme::Dark => &CARTO_DARK,
        }
    }

    /// Known-good source used when the themed layer cannot be added.
    #[must_use]
    pub fn fallback() -> &'static TileLayer {
        &OPENSTREETMAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_theme_uses_carto_tiles() {
        let layer = TileLayer::for_theme(Theme::Dark);
        assert!(layer.url_template.contains("dark_all"));
        assert_eq!(layer.attribution, "© CartoDB");
        assert_eq!(layer.subdomains, "abcd");
    }

    #[test]
    fn light_theme_and_fallback_are_openstreetmap() {
        assert_eq!(TileLayer::for_theme(Theme::Light), TileLayer::fallback());
    }
}
