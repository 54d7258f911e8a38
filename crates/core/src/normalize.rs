//! String normalization applied to form input after validation passes.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::validation::website_with_scheme;

/// Trim surrounding whitespace.
pub fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

/// Trim and lowercase an email address.
pub fn email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trim an optional string, mapping blank values to `None`.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Blank-to-`None`, then prefix `https://` when no scheme was given.
pub fn website(value: Option<&str>) -> Option<String> {
    optional(value).map(|w| website_with_scheme(&w))
}

/// Trim and uppercase a currency code.
pub fn currency(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}

/// Deserialize an optional typed field, treating a blank string as absent.
///
/// Forms submit untouched date and number inputs as `""`. Use with
/// `#[serde(default, deserialize_with = "blank_as_none")]`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BlankOr<T> {
        Value(T),
        Text(String),
    }

    match Option::<BlankOr<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BlankOr::Value(value)) => Ok(Some(value)),
        Some(BlankOr::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(BlankOr::Text(text)) => Err(D::Error::custom(format!("invalid value {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased_and_trimmed() {
        assert_eq!(email("  Ops@Acme.TEST "), "ops@acme.test");
    }

    #[test]
    fn blank_optional_becomes_none() {
        assert_eq!(optional(Some("   ")), None);
        assert_eq!(optional(None), None);
        assert_eq!(optional(Some(" note ")), Some("note".to_string()));
    }

    #[test]
    fn website_gets_scheme() {
        assert_eq!(
            website(Some(" acme.test ")),
            Some("https://acme.test".to_string())
        );
        assert_eq!(website(Some("")), None);
    }

    #[test]
    fn currency_is_uppercased() {
        assert_eq!(currency(" eur"), "EUR");
        assert_eq!(currency("ß"), "ß");
    }

    #[derive(Debug, Default, serde::Deserialize)]
    #[serde(default)]
    struct Form {
        #[serde(deserialize_with = "blank_as_none")]
        budget: Option<f64>,
        #[serde(deserialize_with = "blank_as_none")]
        start_date: Option<chrono::NaiveDate>,
    }

    #[test]
    fn blank_typed_fields_become_none() {
        let form: Form =
            serde_json::from_str(r#"{ "budget": "", "start_date": "  " }"#).unwrap();
        assert_eq!(form.budget, None);
        assert_eq!(form.start_date, None);

        let form: Form = serde_json::from_str(r#"{ "budget": null }"#).unwrap();
        assert_eq!(form.budget, None);
        assert_eq!(form.start_date, None);
    }

    #[test]
    fn typed_fields_still_parse() {
        let form: Form =
            serde_json::from_str(r#"{ "budget": 12.5, "start_date": "2024-03-01" }"#).unwrap();
        assert_eq!(form.budget, Some(12.5));
        assert_eq!(
            form.start_date,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn non_blank_garbage_is_rejected() {
        let err = serde_json::from_str::<Form>(r#"{ "budget": "abc" }"#).unwrap_err();
        assert!(err.to_string().contains("invalid value \"abc\""));
    }
}
