//! Wire format of the remote store provider.
//!
//! The provider wraps records in `{ "data": [...] }` and reports coordinates
//! with latitude and longitude transposed relative to [`Store`]. Both quirks
//! are absorbed here so nothing downstream sees the provider's shape.

use serde::Deserialize;

use crate::error::DataError;
use crate::store::{Product, Store};

#[derive(Debug, Deserialize)]
struct ApiStore {
    #[serde(default)]
    id: Option<serde_json::Value>,
    name: String,
    #[serde(default)]
    lat: Option<serde_json::Value>,
    #[serde(default)]
    lng: Option<serde_json::Value>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    province_code: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, deserialize_with = "crate::store::products_or_empty")]
    products: Vec<Product>,
}

/// Convert a provider response body into store records.
///
/// Individual records that do not decode (for example a record without a
/// `name`) are skipped with a warning; the rest are kept in order.
///
/// # Errors
///
/// Returns [`DataError`] if the body is not an object or has no `data` array.
pub fn transform_api_response(body: &serde_json::Value) -> Result<Vec<Store>, DataError> {
    let envelope = body.as_object().ok_or(DataError::NotAnObject)?;
    let records = envelope
        .get("data")
        .and_then(serde_json::Value::as_array)
        .ok_or(DataError::MissingData)?;

    let stores = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            match serde_json::from_value::<ApiStore>(record.clone()) {
                Ok(api) => Some(api.into_store()),
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping undecodable store record");
                    None
                }
            }
        })
        .collect();

    Ok(stores)
}

impl ApiStore {
    fn into_store(self) -> Store {
        Store {
            id: self.id.and_then(|v| match v {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            }),
            name: self.name,
            // The provider's axes are swapped.
            lat: self.lng.as_ref().and_then(number),
            lng: self.lat.as_ref().and_then(number),
            address: self.address,
            province_code: self.province_code,
            url: self.url,
            products: self.products,
        }
    }
}

fn number(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn swaps_provider_axes() {
        let body = json!({
            "data": [{
                "id": 7,
                "name": "Green Leaf",
                "lat": -123.12,
                "lng": 49.28,
                "address": "1 Robson St",
                "province_code": "BC",
                "url": "https://example.com/green-leaf",
                "products": [{ "brand": "Acme", "title": "Pre-roll", "price": "9.99" }]
            }]
        });

        let stores = transform_api_response(&body).expect("valid envelope");
        assert_eq!(stores.len(), 1);
        let store = &stores[0];
        assert_eq!(store.id.as_deref(), Some("7"));
        assert_eq!(store.lat, Some(49.28));
        assert_eq!(store.lng, Some(-123.12));
        assert_eq!(store.province_code.as_deref(), Some("BC"));
        assert_eq!(store.products.len(), 1);
    }

    #[test]
    fn missing_products_become_empty() {
        let body = json!({ "data": [{ "name": "Blue Sky", "lat": -79.38, "lng": 43.65, "products": null }] });
        let stores = transform_api_response(&body).expect("valid envelope");
        assert!(stores[0].products.is_empty());
    }

    #[test]
    fn bad_product_fields_do_not_drop_the_store() {
        let body = json!({
            "data": [
                {
                    "name": "Null Brand",
                    "lat": -123.12,
                    "lng": 49.28,
                    "products": [{ "brand": null, "title": "Pre-roll", "price": "9.99" }]
                },
                {
                    "name": "Bad Price",
                    "lat": -79.38,
                    "lng": 43.65,
                    "products": [{ "brand": "Acme", "title": "Gummies", "price": "N/A" }]
                }
            ]
        });

        let stores = transform_api_response(&body).expect("valid envelope");
        assert_eq!(stores.len(), 2);
        assert!(stores.iter().all(Store::is_plottable));
        assert_eq!(stores[0].products[0].brand, "");
        assert_eq!(stores[1].products[0].price, None);
        assert_eq!(stores[1].products[0].summary_line(), "Acme • Gummies");
    }

    #[test]
    fn skips_records_without_name() {
        let body = json!({ "data": [{ "lat": 1.0 }, { "name": "Kept" }] });
        let stores = transform_api_response(&body).expect("valid envelope");
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].name, "Kept");
    }

    #[test]
    fn rejects_envelope_without_data_array() {
        let err = transform_api_response(&json!({ "stores": [] })).unwrap_err();
        assert!(matches!(err, DataError::MissingData));
        let err = transform_api_response(&json!({ "data": "nope" })).unwrap_err();
        assert!(matches!(err, DataError::MissingData));
    }

    #[test]
    fn rejects_non_object_body() {
        let err = transform_api_response(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, DataError::NotAnObject));
    }
}
