//! Store and product records as the widget receives them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::LatLng;

/// One retail location.
///
/// Records are supplied by the embedding page (or the remote provider) and are
/// never mutated by the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Provider-assigned identifier; numeric ids are kept in string form.
    #[serde(default, deserialize_with = "opt_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub province_code: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "products_or_empty")]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub brand: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    /// Accepts `12.5` as well as `"12.50"`; anything else becomes `None`.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_string")]
    pub url: Option<String>,
}

impl Store {
    /// Minimal record, mostly for tests and hand-built lists.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            lat: None,
            lng: None,
            address: None,
            province_code: None,
            url: None,
            products: Vec::new(),
        }
    }

    /// Plottable position of the store.
    ///
    /// A missing, non-finite, or exactly-zero value on either axis means "no
    /// coordinates": `0` is treated as a sentinel, not as the equator or the
    /// prime meridian.
    #[must_use]
    pub fn coordinates(&self) -> Option<LatLng> {
        let lat = self.lat.filter(|v| is_usable_axis(*v))?;
        let lng = self.lng.filter(|v| is_usable_axis(*v))?;
        Some(LatLng::new(lat, lng))
    }

    #[must_use]
    pub fn is_plottable(&self) -> bool {
        self.coordinates().is_some()
    }

    /// Case-insensitive substring match against the name and, when present,
    /// the address. `needle` must already be lowercased.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .address
                .as_deref()
                .is_some_and(|address| address.to_lowercase().contains(needle))
    }
}

impl Product {
    /// `brand • title • $price`, with the price fixed to two decimals
    /// (halves round away from zero).
    #[must_use]
    pub fn summary_line(&self) -> String {
        match self.price {
            Some(price) => {
                let cents =
                    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                format!("{} • {} • ${cents:.2}", self.brand, self.title)
            }
            None => format!("{} • {}", self.brand, self.title),
        }
    }
}

fn is_usable_axis(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_f64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
    }))
}

fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }))
}

fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let parsed = match &value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        serde_json::Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    };
    if parsed.is_none() {
        tracing::warn!(price = %value, "ignoring unparseable product price");
    }
    Ok(parsed)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Product list that tolerates `null` and drops entries that are not
/// product objects.
pub(crate) fn products_or_empty<'de, D>(deserializer: D) -> Result<Vec<Product>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Product>(entry) {
            Ok(product) => Some(product),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping undecodable product");
                None
            }
        })
        .collect())
}
