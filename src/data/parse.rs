//! Field Parsing Module
//! Cell-level conversions from loosely formatted listing text.
//!
//! Every parser is total: malformed input yields `None`, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fragments removed before a plain numeric parse.
const NUMERIC_NOISE: [&str; 5] = [",", " ", "m²", "AZN", "₼"];

const TRUE_WORDS: [&str; 5] = ["yes", "true", "1", "var", "bəli"];
const FALSE_WORDS: [&str; 4] = ["no", "false", "0", "yox"];

static FIRST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number pattern"));

/// Trimmed, non-empty text or `None`.
pub fn clean_text(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a number after stripping thousands separators, spaces and unit/currency marks.
///
/// `"1,200"` → 1200, `"120 m²"` → 120, `"85 000 AZN"` → 85000.
pub fn safe_numeric(raw: &str) -> Option<f64> {
    let mut cleaned = raw.replace('\u{a0}', "");
    for noise in NUMERIC_NOISE {
        cleaned = cleaned.replace(noise, "");
    }
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric value of a mixed-format string.
///
/// Tries [`safe_numeric`] first, then falls back to the first number embedded
/// in the text (`"3 otaqlı"` → 3, `"45/9"` → 45).
pub fn extract_number(raw: &str) -> Option<f64> {
    if let Some(value) = safe_numeric(raw) {
        return Some(value);
    }
    FIRST_NUMBER
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Split a `"current/total"` floor string.
///
/// `"5/9"` → `(Some(5), Some(9))`, `"5"` → `(Some(5), None)`.
pub fn split_floor(raw: &str) -> (Option<f64>, Option<f64>) {
    let raw = raw.trim();
    match raw.split_once('/') {
        Some((current, total)) => (safe_numeric(current), safe_numeric(total)),
        None => (safe_numeric(raw), None),
    }
}

/// Current floor of a floor string; see [`split_floor`].
pub fn parse_floor(raw: &str) -> Option<f64> {
    split_floor(raw).0
}

/// Boolean reading of a locale-dependent flag value, `None` when unrecognised.
pub fn parse_bool(raw: &str) -> Option<bool> {
    let lowered = raw.trim().to_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        return Some(true);
    }
    if FALSE_WORDS.contains(&lowered.as_str()) {
        return Some(false);
    }
    lowered
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .map(|v| v != 0.0)
}

/// [`parse_bool`] with a fallback for missing or unrecognised values.
pub fn normalize_bool(raw: Option<&str>, default: bool) -> bool {
    raw.and_then(parse_bool).unwrap_or(default)
}

/// Integral value of a number, dropping anything non-finite.
pub fn to_integer(value: f64) -> Option<i64> {
    if value.is_finite() {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

/// Listing identifier with float artefacts removed (`"1234.0"` → `"1234"`).
pub fn normalize_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(integral) = trimmed.strip_suffix(".0") {
        if !integral.is_empty() && integral.bytes().all(|b| b.is_ascii_digit()) {
            return Some(integral.to_string());
        }
    }
    Some(trimmed.to_string())
}

/// Prefix `https://` onto scheme-less links.
pub fn ensure_scheme(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_numeric_strips_units_and_separators() {
        assert_eq!(safe_numeric("120 m²"), Some(120.0));
        assert_eq!(safe_numeric("1,200"), Some(1200.0));
        assert_eq!(safe_numeric("85 000 AZN"), Some(85000.0));
        assert_eq!(safe_numeric("150000₼"), Some(150000.0));
        assert_eq!(safe_numeric("72.5"), Some(72.5));
        assert_eq!(safe_numeric("  "), None);
        assert_eq!(safe_numeric("razılaşma"), None);
        assert_eq!(safe_numeric("NaN"), None);
        assert_eq!(safe_numeric("inf"), None);
    }

    #[test]
    fn test_extract_number_falls_back_to_first_number() {
        assert_eq!(extract_number("120 m²"), Some(120.0));
        assert_eq!(extract_number("1,200"), Some(1200.0));
        assert_eq!(extract_number("3 otaqlı"), Some(3.0));
        assert_eq!(extract_number("45/9"), Some(45.0));
        assert_eq!(extract_number("Sahə: 64.5 kv.m"), Some(64.5));
        assert_eq!(extract_number("yoxdur"), None);
        assert_eq!(extract_number(""), None);
    }

    #[test]
    fn test_split_floor() {
        assert_eq!(split_floor("5/9"), (Some(5.0), Some(9.0)));
        assert_eq!(split_floor(" 12 / 16 "), (Some(12.0), Some(16.0)));
        assert_eq!(split_floor("5"), (Some(5.0), None));
        assert_eq!(split_floor("5/"), (Some(5.0), None));
        assert_eq!(split_floor("zirzəmi/9"), (None, Some(9.0)));
        assert_eq!(split_floor(""), (None, None));
        assert_eq!(parse_floor("7/17"), Some(7.0));
    }

    #[test]
    fn test_bool_normalization_across_locales() {
        for truthy in ["Yes", "var", "1", "True", "bəli", " TRUE ", "1.0", "2"] {
            assert_eq!(parse_bool(truthy), Some(true), "{truthy}");
        }
        for falsy in ["No", "yox", "0", "False", "0.0"] {
            assert_eq!(parse_bool(falsy), Some(false), "{falsy}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert!(normalize_bool(Some("maybe"), true));
        assert!(!normalize_bool(Some("maybe"), false));
        assert!(!normalize_bool(None, false));
        assert!(normalize_bool(Some("var"), false));
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("1234.0").as_deref(), Some("1234"));
        assert_eq!(normalize_id(" 98765 ").as_deref(), Some("98765"));
        assert_eq!(normalize_id("AB-12.0").as_deref(), Some("AB-12.0"));
        assert_eq!(normalize_id(""), None);
    }

    #[test]
    fn test_ensure_scheme_and_text() {
        assert_eq!(ensure_scheme("yeniemlak.az/elan/1"), "https://yeniemlak.az/elan/1");
        assert_eq!(ensure_scheme("http://unvan.az/2"), "http://unvan.az/2");
        assert_eq!(clean_text(Some("  Nəsimi ")).as_deref(), Some("Nəsimi"));
        assert_eq!(clean_text(Some("   ")), None);
        assert_eq!(clean_text(None), None);
        assert_eq!(to_integer(12.9), Some(12));
        assert_eq!(to_integer(f64::NAN), None);
    }
}
