//! Human-readable capsule labels derived from the search snapshot.

use tatva_types::capsule::SearchSnapshot;

/// Build a short label such as `"2 BHK in HSR Layout under ₹25,000"`.
///
/// Parts the snapshot does not carry are left out. With none at all the
/// label falls back to `"Search #<ordinal>"`, where `ordinal` is the
/// 1-based position the capsule will take in the store.
pub fn derive_label(snapshot: &SearchSnapshot, ordinal: usize) -> String {
    let mut parts = Vec::new();
    if let Some(bhk) = snapshot.size_bhk() {
        parts.push(format!("{bhk} BHK"));
    }
    if let Some(location) = snapshot.location() {
        parts.push(format!("in {location}"));
    }
    if let Some(budget) = snapshot.budget() {
        parts.push(format!("under ₹{}", group_thousands(budget.round() as u64)));
    }

    if parts.is_empty() {
        format!("Search #{ordinal}")
    } else {
        parts.join(" ")
    }
}

/// `1234567` as `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
