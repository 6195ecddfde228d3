/// Serde helpers shared by provider payloads
use serde::{Deserialize, Deserializer};

/// Accepts `123.4`, `"123.4"` or `null`
///
/// Providers are inconsistent about quoting numerics; an unparseable string
/// reads as absent.
pub fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::String(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_optional_f64")]
        value: Option<f64>,
    }

    fn parse(json: &str) -> Option<f64> {
        serde_json::from_str::<Probe>(json).unwrap().value
    }

    #[test]
    fn test_number_or_string() {
        assert_eq!(parse(r#"{"value": 1.5}"#), Some(1.5));
        assert_eq!(parse(r#"{"value": "2.25"}"#), Some(2.25));
        assert_eq!(parse(r#"{"value": null}"#), None);
        assert_eq!(parse(r#"{"value": "n/a"}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }
}
