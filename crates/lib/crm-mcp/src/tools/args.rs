//! Lenient argument coercion.
//!
//! LLM clients are loose with scalar types: ids arrive as numbers, counts as
//! strings, and lists as comma-separated text. These deserializers accept
//! those variants and reject everything else. The schema stand-ins below
//! describe the same accepted shapes in each tool's `inputSchema`.

use std::borrow::Cow;

use crm_core::shaping::{CompactOptions, PropertyLimit};
use crm_model::{EngagementKind, ObjectType, PropertyMap};
use rmcp::schemars::{self, JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ToolError, ToolResult};

/// Decodes a tool's argument object into its typed form.
pub(crate) fn decode<T: DeserializeOwned>(tool: &'static str, arguments: Value) -> ToolResult<T> {
    let arguments = if arguments.is_null() {
        Value::Object(PropertyMap::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|err| ToolError::InvalidArguments {
        tool,
        message: err.to_string(),
    })
}

macro_rules! schema_stand_in {
    ($(#[$meta:meta])* $name:ident => $schema:tt) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name;

        impl JsonSchema for $name {
            fn inline_schema() -> bool {
                true
            }

            fn schema_name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($name))
            }

            fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
                json_schema!($schema)
            }
        }
    };
}

schema_stand_in! {
    /// An id given as text or as a bare number.
    Identifier => { "type": ["string", "integer"] }
}

schema_stand_in! {
    /// A count given as a number or numeric text; out-of-range values are clamped.
    Count => { "type": ["integer", "string"] }
}

schema_stand_in! {
    /// A decimal given as a number or numeric text.
    Amount => { "type": ["number", "string"] }
}

schema_stand_in! {
    /// `true`/`false` as a boolean or as text.
    Flag => { "type": ["boolean", "string"] }
}

schema_stand_in! {
    /// A list of strings, or one comma-separated string.
    StringList => {
        "type": ["array", "string"],
        "items": { "type": "string" }
    }
}

schema_stand_in! {
    /// A character count, or `"unbounded"`.
    LengthLimit => {
        "anyOf": [
            { "type": "integer", "minimum": 0 },
            { "type": "string" }
        ]
    }
}

schema_stand_in! {
    /// Engagement type names, as a list or one comma-separated string.
    EngagementTypes => {
        "type": ["array", "string"],
        "items": {
            "type": "string",
            "enum": EngagementKind::ALL.into_iter().map(EngagementKind::as_str).collect::<Vec<_>>()
        }
    }
}

schema_stand_in! {
    /// An object type name.
    ObjectTypeName => {
        "type": "string",
        "enum": ObjectType::ALL.into_iter().map(ObjectType::as_str).collect::<Vec<_>>()
    }
}

schema_stand_in! {
    /// Task status name.
    TaskStatus => {
        "type": "string",
        "enum": ["NOT_STARTED", "IN_PROGRESS", "WAITING", "COMPLETED", "DEFERRED"]
    }
}

schema_stand_in! {
    /// Email direction name.
    EmailDirection => {
        "type": "string",
        "enum": ["EMAIL", "INCOMING_EMAIL", "FORWARDED_EMAIL"]
    }
}

/// Read-shaping arguments shared by every read tool.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShapingArgs {
    /// Maximum characters kept per text property (default 500). 0 or "unbounded" disables truncation.
    #[serde(default, deserialize_with = "property_limit")]
    #[schemars(with = "LengthLimit")]
    pub max_property_length: Option<PropertyLimit>,
    /// Include createdAt, updatedAt, archived, and url (default false).
    #[serde(default, deserialize_with = "opt_bool")]
    #[schemars(with = "Flag")]
    pub include_metadata: Option<bool>,
}

impl ShapingArgs {
    pub fn options(&self) -> CompactOptions {
        CompactOptions {
            max_property_length: self.max_property_length.unwrap_or_default(),
            include_metadata: self.include_metadata.unwrap_or(false),
        }
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Required non-blank string; numbers and booleans are converted to text.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = scalar_text(value).ok_or_else(|| D::Error::custom("expected a string or number"))?;
    if text.trim().is_empty() {
        return Err(D::Error::custom("must not be blank"));
    }
    Ok(text)
}

/// Optional string; `null` and blank text read as absent.
pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => scalar_text(value)
            .map(|text| Some(text).filter(|text| !text.trim().is_empty()))
            .ok_or_else(|| D::Error::custom("expected a string or number")),
    }
}

/// Saturates a whole number into `u32`; negatives read as zero so the
/// caller's clamp lifts them to its minimum.
fn saturate_count(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}

#[allow(clippy::cast_possible_truncation)]
fn whole_number(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract().abs() > 0.0 {
        return None;
    }
    // float-to-int casts saturate at the i64 bounds
    Some(value as i64)
}

fn count_from_number(number: &serde_json::Number) -> Option<u32> {
    if let Some(count) = number.as_i64() {
        return Some(saturate_count(count));
    }
    if number.as_u64().is_some() {
        return Some(u32::MAX);
    }
    number.as_f64().and_then(whole_number).map(saturate_count)
}

/// Optional count. Accepts integers, integral floats, and numeric text;
/// range checks are left to the control plane's clamp.
pub(crate) fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(number) => count_from_number(&number)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a whole number, got {number}"))),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::String(text) => text
            .trim()
            .parse::<serde_json::Number>()
            .ok()
            .and_then(|number| count_from_number(&number))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a whole number, got {text:?}"))),
        _ => Err(D::Error::custom("expected a number")),
    }
}

pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(number) => Ok(number.as_f64()),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected a number, got {text:?}"))),
        _ => Err(D::Error::custom("expected a number")),
    }
}

pub(crate) fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(flag)),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("expected a boolean, got {text:?}"))),
        },
        _ => Err(D::Error::custom("expected a boolean")),
    }
}

/// String list from an array or a single comma-separated string.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string_list(deserializer)?.unwrap_or_default())
}

pub(crate) fn opt_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::String(text) => text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(values) => values
            .into_iter()
            .filter_map(scalar_text)
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        _ => return Err(D::Error::custom("expected a list of strings")),
    };
    Ok(Some(items))
}

/// Property limit from a count, a numeric string, or `"unbounded"`.
pub(crate) fn property_limit<'de, D>(deserializer: D) -> Result<Option<PropertyLimit>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) if text.trim().eq_ignore_ascii_case("unbounded") => {
            Ok(Some(PropertyLimit::Unbounded))
        }
        Value::String(text) => text
            .trim()
            .parse::<usize>()
            .map(|max| Some(PropertyLimit::chars(max)))
            .map_err(|_| D::Error::custom(format!("expected a length or \"unbounded\", got {text:?}"))),
        Value::Number(number) => number
            .as_u64()
            .and_then(|max| usize::try_from(max).ok())
            .map(|max| Some(PropertyLimit::chars(max)))
            .ok_or_else(|| D::Error::custom("expected a non-negative length")),
        _ => Err(D::Error::custom("expected a length or \"unbounded\"")),
    }
}

/// Free-form property map; `null` reads as empty.
pub(crate) fn property_map<'de, D>(deserializer: D) -> Result<PropertyMap, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(PropertyMap::new()),
        Value::Object(map) => Ok(map),
        _ => Err(D::Error::custom("expected an object of properties")),
    }
}

/// Collects the present optional fields into a property map.
pub(crate) fn collect_properties<'a, I>(fields: I) -> PropertyMap
where
    I: IntoIterator<Item = (&'a str, Option<String>)>,
{
    fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), Value::String(value))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::control::clamp_limit;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        #[serde(deserialize_with = "string")]
        contact_id: String,
        #[serde(default, deserialize_with = "opt_u32")]
        limit: Option<u32>,
        #[serde(default, deserialize_with = "string_list")]
        exclude_companies: Vec<String>,
        #[serde(default, deserialize_with = "opt_string")]
        after: Option<String>,
        #[serde(flatten)]
        shaping: ShapingArgs,
    }

    #[test]
    fn scalars_are_coerced() {
        let sample: Sample = decode(
            "sample",
            json!({
                "contactId": 101,
                "limit": "25",
                "excludeCompanies": "Acme, Globex ,",
                "after": "",
                "maxPropertyLength": "unbounded",
                "includeMetadata": "true"
            }),
        )
        .expect("decode");

        assert_eq!(sample.contact_id, "101");
        assert_eq!(sample.limit, Some(25));
        assert_eq!(sample.exclude_companies, vec!["Acme", "Globex"]);
        assert_eq!(sample.after, None);
        assert_eq!(
            sample.shaping.options(),
            CompactOptions {
                max_property_length: PropertyLimit::Unbounded,
                include_metadata: true,
            }
        );
    }

    #[test]
    fn out_of_range_counts_are_left_for_the_clamp() {
        let negative: Sample =
            decode("sample", json!({ "contactId": "7", "limit": -5 })).expect("negative");
        assert_eq!(negative.limit, Some(0));
        assert_eq!(clamp_limit(negative.limit, 20, 100), 1);

        let huge: Sample =
            decode("sample", json!({ "contactId": "7", "limit": 1e12 })).expect("huge");
        assert_eq!(clamp_limit(huge.limit, 20, 100), 100);

        let text: Sample =
            decode("sample", json!({ "contactId": "7", "limit": " -3 " })).expect("text");
        assert_eq!(text.limit, Some(0));
    }

    #[test]
    fn integral_floats_are_counts() {
        let float: Sample =
            decode("sample", json!({ "contactId": "7", "limit": 10.0 })).expect("float");
        assert_eq!(float.limit, Some(10));

        let text: Sample =
            decode("sample", json!({ "contactId": "7", "limit": "10.0" })).expect("text");
        assert_eq!(text.limit, Some(10));

        let err = decode::<Sample>("list_companies", json!({ "contactId": "7", "limit": 2.5 }))
            .expect_err("fractional");
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn shaping_defaults_apply_when_absent() {
        let sample: Sample = decode("sample", json!({ "contactId": "7" })).expect("decode");
        assert_eq!(sample.shaping.options(), CompactOptions::default());
        assert!(sample.exclude_companies.is_empty());
    }

    #[test]
    fn zero_length_means_unbounded() {
        let sample: Sample =
            decode("sample", json!({ "contactId": "7", "maxPropertyLength": 0 })).expect("decode");
        assert_eq!(
            sample.shaping.max_property_length,
            Some(PropertyLimit::Unbounded)
        );
    }

    #[test]
    fn malformed_payload_names_the_tool() {
        let err = decode::<Sample>("get_contact", json!({ "limit": 5 })).expect_err("missing id");
        let message = err.to_string();
        assert!(message.starts_with("invalid arguments for get_contact"));
        assert!(message.contains("contactId"));

        let err = decode::<Sample>("get_contact", json!(["not", "an", "object"])).expect_err("array");
        assert!(matches!(err, ToolError::InvalidArguments { tool: "get_contact", .. }));
    }

    #[test]
    fn absent_fields_are_not_collected() {
        let properties = collect_properties([
            ("hs_task_subject", Some("Call back".to_string())),
            ("hs_task_body", None),
        ]);
        assert_eq!(properties.len(), 1);
        assert_eq!(properties["hs_task_subject"], json!("Call back"));
    }
}
