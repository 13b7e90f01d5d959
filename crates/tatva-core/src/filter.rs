//! Category filtering over a capsule's property list.

use tatva_types::context::ALL_CATEGORIES;
use tatva_types::property::Property;

/// Whether `category` means "no filtering".
pub fn is_all(category: &str) -> bool {
    let category = category.trim();
    category.is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES)
}

/// Properties whose type contains `category`, case-insensitively.
///
/// [`ALL_CATEGORIES`] returns every property. Order is preserved. Listings
/// without a type only survive the "All" category.
pub fn filter<'a>(properties: &'a [Property], category: &str) -> Vec<&'a Property> {
    if is_all(category) {
        return properties.iter().collect();
    }

    let needle = category.trim().to_lowercase();
    properties
        .iter()
        .filter(|p| {
            p.property_type
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

/// "All" followed by each distinct property type in first-seen order.
pub fn categories(properties: &[Property]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for kind in properties.iter().filter_map(|p| p.property_type.as_deref()) {
        let kind = kind.trim();
        if kind.is_empty() || out.iter().any(|c| c.eq_ignore_ascii_case(kind)) {
            continue;
        }
        out.push(kind.to_string());
    }
    out
}
