//! Deserializers for the loosely typed post meta that WordPress returns.
//!
//! Meta values arrive as numbers, numeric strings, empty strings or `false`
//! depending on how they were stored. Empty strings, `null` and `false` are
//! all read as "absent".
use serde::Deserialize;
use serde::Deserializer;
use serde::de::DeserializeOwned;
use serde::de::Error;
use serde_json::Value;

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(string) => string.trim().is_empty(),
        _ => false,
    }
}

pub(crate) fn u64_from_value(value: &Value) -> Result<u64, String> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| format!("{number} is not a valid identifier")),
        Value::String(string) => string
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("\"{string}\" is not a valid identifier")),
        // Linked posts may be expanded into the full post object.
        Value::Object(post) => match post.get("ID").or_else(|| post.get("id")) {
            Some(id) => u64_from_value(id),
            None => Err("post object without an ID".to_string()),
        },
        other => Err(format!("expected an identifier, found {other}")),
    }
}

pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if is_absent(&value) {
        return Ok(None);
    }
    match value {
        Value::Number(number) => Ok(number.as_f64()),
        Value::String(string) => string.trim().parse::<f64>().map(Some).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected a number, found {other}"))),
    }
}

pub fn optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if is_absent(&value) {
        return Ok(None);
    }
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{number} is not an integer"))),
        Value::String(string) => string.trim().parse::<i64>().map(Some).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected an integer, found {other}"))),
    }
}

pub fn optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(flag)),
        Value::Number(number) => Ok(Some(number.as_i64() != Some(0))),
        Value::String(string) => match string.trim() {
            "" => Ok(None),
            "1" | "true" | "on" | "yes" => Ok(Some(true)),
            "0" | "false" | "off" | "no" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("\"{other}\" is not a flag"))),
        },
        other => Err(D::Error::custom(format!("expected a flag, found {other}"))),
    }
}

pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if is_absent(&value) {
        return Ok(None);
    }
    match value {
        Value::String(string) => Ok(Some(string)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(true) => Ok(Some("true".to_string())),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

/// Nested records (a linked seaman post, a vessel reference) are `false`
/// when the link is empty.
pub fn optional_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if is_absent(&value) {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct Meta {
        #[serde(default, deserialize_with = "super::optional_f64")]
        wage: Option<f64>,
        #[serde(default, deserialize_with = "super::optional_i64")]
        plus: Option<i64>,
        #[serde(default, deserialize_with = "super::optional_bool")]
        uniform: Option<bool>,
        #[serde(default, deserialize_with = "super::optional_string")]
        port: Option<String>,
    }

    #[test]
    fn test_meta_strings_are_read_as_values() {
        let meta: Meta = serde_json::from_str(
            r#"{ "wage": "960.5", "plus": "2", "uniform": "1", "port": "Manila" }"#,
        )
        .unwrap();

        assert_eq!(meta.wage, Some(960.5));
        assert_eq!(meta.plus, Some(2));
        assert_eq!(meta.uniform, Some(true));
        assert_eq!(meta.port.as_deref(), Some("Manila"));
    }

    #[test]
    fn test_empty_meta_is_absent() {
        let meta: Meta =
            serde_json::from_str(r#"{ "wage": "", "plus": null, "port": false }"#).unwrap();

        assert_eq!(meta.wage, None);
        assert_eq!(meta.plus, None);
        assert_eq!(meta.uniform, None);
        assert_eq!(meta.port, None);
    }

    #[test]
    fn test_identifiers_from_post_objects() {
        assert_eq!(
            super::u64_from_value(&serde_json::json!({ "ID": 12, "post_title": "MV Northern Star" })),
            Ok(12)
        );
        assert_eq!(super::u64_from_value(&serde_json::json!({ "id": "7" })), Ok(7));
        assert!(super::u64_from_value(&serde_json::json!({ "post_title": "x" })).is_err());
    }

    #[test]
    fn test_garbage_numbers_are_rejected() {
        assert!(serde_json::from_str::<Meta>(r#"{ "plus": "two" }"#).is_err());
    }
}
