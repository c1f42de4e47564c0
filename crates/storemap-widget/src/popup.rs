//! Marker popup content.
//!
//! Content is structured data rather than markup; the map collaborator decides
//! how to draw it.

use storemap_core::i18n::keys;
use storemap_core::{Store, Translations};

/// How many products a popup lists before collapsing the rest into a count.
pub const PRODUCT_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub title: String,
    /// Shown under the title when the store has one.
    pub address: Option<String>,
    pub products: Option<ProductsSection>,
    pub visit_link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductsSection {
    /// e.g. `5 products available`.
    pub summary: String,
    pub preview: Vec<ProductEntry>,
    /// e.g. `+2 more products`; present only when the preview is truncated.
    pub more: Option<String>,
}

/// One previewed product. Clickable only when it carries a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    /// Product name line above `text`, when the record carries one.
    pub name: Option<String>,
    /// `brand • title • $price`.
    pub text: String,
    pub url: Option<String>,
}

impl ProductEntry {
    #[must_use]
    pub fn is_clickable(&self) -> bool {
        self.url.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl PopupContent {
    /// Popup for a store marker in `language`.
    #[must_use]
    pub fn for_store(store: &Store, translations: &Translations, language: &str) -> Self {
        let products = (!store.products.is_empty()).then(|| {
            let total = store.products.len();
            let preview = store
                .products
                .iter()
                .take(PRODUCT_PREVIEW_LIMIT)
                .map(|product| ProductEntry {
                    name: product.name.clone().filter(|n| !n.is_empty()),
                    text: product.summary_line(),
                    url: product.url.clone().filter(|u| !u.is_empty()),
                })
                .collect();
            let more = (total > PRODUCT_PREVIEW_LIMIT).then(|| {
                format!(
                    "+{} {}",
                    total - PRODUCT_PREVIEW_LIMIT,
                    translations.resolve(language, keys::MORE_PRODUCTS)
                )
            });
            ProductsSection {
                summary: format!(
                    "{total} {}",
                    translations.resolve(language, keys::PRODUCTS_AVAILABLE)
                ),
                preview,
                more,
            }
        });

        let visit_link = store
            .url
            .as_ref()
            .filter(|u| !u.is_empty())
            .map(|url| Link {
                label: translations.resolve(language, keys::VISIT_STORE).to_string(),
                url: url.clone(),
            });

        Self {
            title: store.name.clone(),
            address: store.address.clone().filter(|a| !a.is_empty()),
            products,
            visit_link,
        }
    }

    /// Popup for the "your location" marker.
    #[must_use]
    pub fn for_user_location(translations: &Translations, language: &str) -> Self {
        Self {
            title: translations.resolve(language, keys::YOUR_LOCATION).to_string(),
            address: None,
            products: None,
            visit_link: None,
        }
    }
}
