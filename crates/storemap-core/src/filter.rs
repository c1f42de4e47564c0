//! Province and search narrowing.
//!
//! Both filters return a subsequence of their input in the original order.
//! Search is meant to run on the output of the province filter so that it only
//! ever narrows the region-restricted set.

use crate::store::Store;

/// Keep stores whose `province_code` is one of `allowed`.
///
/// An empty `allowed` list means "no restriction" and keeps every store.
/// Stores without a province code are dropped whenever a restriction applies.
pub fn filter_by_province<'a, I, S>(stores: I, allowed: &[S]) -> Vec<&'a Store>
where
    I: IntoIterator<Item = &'a Store>,
    S: AsRef<str>,
{
    if allowed.is_empty() {
        return stores.into_iter().collect();
    }
    stores
        .into_iter()
        .filter(|store| {
            store
                .province_code
                .as_deref()
                .is_some_and(|code| allowed.iter().any(|a| AsRef::<str>::as_ref(a) == code))
        })
        .collect()
}

/// Keep stores whose name or address contains `term`, ignoring case.
///
/// A blank term keeps every store.
pub fn filter_by_search<'a, I>(stores: I, term: &str) -> Vec<&'a Store>
where
    I: IntoIterator<Item = &'a Store>,
{
    match normalize_search_term(term) {
        Some(needle) => stores
            .into_iter()
            .filter(|store| store.matches_lowercase(&needle))
            .collect(),
        None => stores.into_iter().collect(),
    }
}

/// Trimmed, lowercased term, or `None` when nothing is left to search for.
#[must_use]
pub fn normalize_search_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str, province: Option<&str>, address: Option<&str>) -> Store {
        Store {
            province_code: province.map(str::to_string),
            address: address.map(str::to_string),
            ..Store::new(name)
        }
    }

    fn names(stores: &[&Store]) -> Vec<String> {
        stores.iter().map(|s| s.name.clone()).collect()
    }

    fn fixture() -> Vec<Store> {
        vec![
            store("Green Leaf", Some("BC"), Some("1 Robson St, Vancouver")),
            store("Blue Sky", Some("ON"), Some("200 Queen St, Toronto")),
            store("Leafy Corner", None, None),
            store("Kootenay Greens", Some("BC"), None),
        ]
    }

    #[test]
    fn empty_province_set_is_identity() {
        let stores = fixture();
        let none: [&str; 0] = [];
        let result = filter_by_province(&stores, &none);
        assert_eq!(result.len(), stores.len());
        assert!(result.iter().zip(&stores).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn province_filter_keeps_matching_codes_in_order() {
        let stores = fixture();
        let result = filter_by_province(&stores, &["BC"]);
        assert_eq!(names(&result), ["Green Leaf", "Kootenay Greens"]);
    }

    #[test]
    fn province_filter_drops_stores_without_code() {
        let stores = fixture();
        let result = filter_by_province(&stores, &["BC", "ON"]);
        assert!(result.iter().all(|s| s.province_code.is_some()));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn blank_search_is_identity() {
        let stores = fixture();
        assert_eq!(filter_by_search(&stores, "").len(), stores.len());
        assert_eq!(filter_by_search(&stores, "   ").len(), stores.len());
    }

    #[test]
    fn search_is_case_insensitive() {
        let stores = vec![
            store("Green Leaf", Some("BC"), None),
            store("Blue Sky", Some("ON"), None),
        ];
        let lower = filter_by_search(&stores, "leaf");
        let upper = filter_by_search(&stores, "LEAF");
        assert_eq!(names(&lower), ["Green Leaf"]);
        assert_eq!(names(&lower), names(&upper));
    }

    #[test]
    fn search_matches_address_when_present() {
        let stores = fixture();
        let result = filter_by_search(&stores, "toronto");
        assert_eq!(names(&result), ["Blue Sky"]);
    }

    #[test]
    fn search_trims_the_term() {
        let stores = fixture();
        assert_eq!(names(&filter_by_search(&stores, "  sky ")), ["Blue Sky"]);
    }

    #[test]
    fn search_is_idempotent() {
        let stores = fixture();
        let once = filter_by_search(&stores, "leaf");
        let twice = filter_by_search(once.iter().copied(), "leaf");
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn search_narrows_the_province_filtered_set() {
        let stores = fixture();
        let in_bc = filter_by_province(&stores, &["BC"]);
        let result = filter_by_search(in_bc, "leaf");
        // "Leafy Corner" matches the term but has no province, so it stays out.
        assert_eq!(names(&result), ["Green Leaf"]);
    }

    #[test]
    fn normalize_search_term_handles_blank_and_case() {
        assert_eq!(normalize_search_term(" \t "), None);
        assert_eq!(normalize_search_term(" LeAf ").as_deref(), Some("leaf"));
    }
}
