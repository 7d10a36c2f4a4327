//! Field-level deserializers that default instead of failing.
//!
//! Profile records come from scrapers and third-party APIs, so any field may
//! be missing, `null`, or of the wrong JSON type. Each helper here accepts
//! whatever is present and falls back to the field's empty value, so one bad
//! field never rejects the whole record.
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Strings pass through, numbers are rendered (numeric company ids), anything
/// else is `""`.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Only a JSON `true` is true.
pub(crate) fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Non-negative integers, integral floats and numeric strings; `None` otherwise.
pub(crate) fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A nested object decoded as `T`; `None` when absent, not an object, or undecodable.
pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// An array of objects decoded as `T`. A non-array is an empty list and
/// elements that are not objects are skipped.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// A list of strings; a lone string becomes a one-element list.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let render = |value: Value| match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(render)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Default)]
    struct Probe {
        #[serde(default, deserialize_with = "super::string")]
        name: String,
        #[serde(default, deserialize_with = "super::boolean")]
        flag: bool,
        #[serde(default, deserialize_with = "super::opt_u32")]
        year: Option<u32>,
        #[serde(default, deserialize_with = "super::list")]
        items: Vec<Item>,
        #[serde(default, deserialize_with = "super::string_list")]
        tags: Vec<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        #[serde(default, deserialize_with = "super::string")]
        name: String,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).expect("lenient probe always decodes")
    }

    #[test]
    fn wrong_types_fall_back_to_empty_values() {
        let p = probe(json!({
            "name": {"nested": true},
            "flag": "yes",
            "year": "not a year",
            "items": "nope",
            "tags": 42.5
        }));
        assert_eq!(p.name, "");
        assert!(!p.flag);
        assert_eq!(p.year, None);
        assert!(p.items.is_empty());
        assert!(p.tags.is_empty());
    }

    #[test]
    fn nulls_and_missing_fields_default() {
        let p = probe(json!({ "name": null, "year": null }));
        assert_eq!(p.name, "");
        assert_eq!(p.year, None);
        let q = probe(json!({}));
        assert_eq!(q.year, None);
        assert!(!q.flag);
    }

    #[test]
    fn numbers_are_accepted_where_strings_are_expected() {
        let p = probe(json!({ "name": 12345, "year": "2021", "flag": true }));
        assert_eq!(p.name, "12345");
        assert_eq!(p.year, Some(2021));
        assert!(p.flag);
    }

    #[test]
    fn integral_floats_decode_as_years() {
        assert_eq!(probe(json!({ "year": 2019.0 })).year, Some(2019));
        assert_eq!(probe(json!({ "year": 2019.5 })).year, None);
        assert_eq!(probe(json!({ "year": -3 })).year, None);
    }

    #[test]
    fn list_skips_non_object_elements() {
        let p = probe(json!({ "items": [{"name": "Rust"}, "junk", 3, {"name": "Go"}] }));
        assert_eq!(
            p.items,
            vec![Item { name: "Rust".into() }, Item { name: "Go".into() }]
        );
    }

    #[test]
    fn string_list_accepts_single_string() {
        assert_eq!(probe(json!({ "tags": "Cloud" })).tags, vec!["Cloud"]);
        assert_eq!(
            probe(json!({ "tags": ["Cloud", "", "SaaS", null] })).tags,
            vec!["Cloud", "SaaS"]
        );
    }
}
