//! Lenient readers for loosely typed backend JSON.
//!
//! The backend mixes strings and numbers for the same field across
//! responses. These helpers read what makes sense and return `None` for the
//! rest, so a single odd value only blanks that one field.

use serde_json::Value;

/// A finite number from a JSON number or a numeric string.
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n: &f64| n.is_finite())
}

/// Non-blank text. Numbers are rendered as text (`17` becomes `"17"`).
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A non-negative whole count such as a bedroom count. `2.0` and `"2"` both
/// read as `2`.
pub(crate) fn count(value: &Value) -> Option<u32> {
    number(value)
        .filter(|n| *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_accepts_strings_and_numbers() {
        assert_eq!(number(&json!(25000)), Some(25000.0));
        assert_eq!(number(&json!(" 1100.5 ")), Some(1100.5));
        assert_eq!(number(&json!("NaN")), None);
        assert_eq!(number(&json!("lots")), None);
        assert_eq!(number(&json!(true)), None);
    }

    #[test]
    fn test_text_renders_numbers() {
        assert_eq!(text(&json!(17)), Some("17".to_string()));
        assert_eq!(text(&json!("  L-17 ")), Some("L-17".to_string()));
        assert_eq!(text(&json!("   ")), None);
        assert_eq!(text(&json!(null)), None);
        assert_eq!(text(&json!(["a"])), None);
    }

    #[test]
    fn test_count_rounds_and_rejects_negatives() {
        assert_eq!(count(&json!(2)), Some(2));
        assert_eq!(count(&json!(2.0)), Some(2));
        assert_eq!(count(&json!("3")), Some(3));
        assert_eq!(count(&json!(-1)), None);
        assert_eq!(count(&json!({})), None);
    }
}
