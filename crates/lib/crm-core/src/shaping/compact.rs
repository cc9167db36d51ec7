use crm_model::{CrmObject, PropertyMap, ResultPage};
use serde::Serialize;
use serde_json::Value;

/// Appended to every truncated string value.
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Applied when the caller does not choose a limit.
pub const DEFAULT_MAX_PROPERTY_LENGTH: usize = 500;

/// Upper bound on characters kept per string property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyLimit {
    Unbounded,
    Chars(usize),
}

impl PropertyLimit {
    /// Builds a limit from a character count. Zero opts out of truncation.
    #[must_use]
    pub const fn chars(max: usize) -> Self {
        if max == 0 { Self::Unbounded } else { Self::Chars(max) }
    }
}

impl Default for PropertyLimit {
    fn default() -> Self {
        Self::Chars(DEFAULT_MAX_PROPERTY_LENGTH)
    }
}

/// Per-call compaction settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactOptions {
    pub max_property_length: PropertyLimit,
    pub include_metadata: bool,
}

/// A CRM object reduced for the caller's context budget.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompactObject {
    pub id: String,
    pub properties: PropertyMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PageMeta {
    pub excluded: usize,
}

/// A compacted result page. Order, `total`, and `paging` are preserved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompactPage {
    pub results: Vec<CompactObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Value>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

#[must_use]
pub fn compact(object: CrmObject, options: &CompactOptions) -> CompactObject {
    let CrmObject {
        id,
        properties,
        created_at,
        updated_at,
        archived,
        url,
    } = object;

    let properties = properties
        .into_iter()
        .map(|(name, value)| (name, truncate_value(value, options.max_property_length)))
        .collect();

    if options.include_metadata {
        CompactObject {
            id,
            properties,
            created_at,
            updated_at,
            archived,
            url,
        }
    } else {
        CompactObject {
            id,
            properties,
            created_at: None,
            updated_at: None,
            archived: None,
            url: None,
        }
    }
}

#[must_use]
pub fn compact_page(page: ResultPage, options: &CompactOptions) -> CompactPage {
    CompactPage {
        results: page
            .results
            .into_iter()
            .map(|object| compact(object, options))
            .collect(),
        total: page.total,
        paging: page.paging,
        meta: None,
    }
}

/// Truncates string values; every other value passes through unchanged.
#[must_use]
pub fn truncate_value(value: Value, limit: PropertyLimit) -> Value {
    match (value, limit) {
        (Value::String(text), PropertyLimit::Chars(max)) => Value::String(truncate_text(text, max)),
        (value, _) => value,
    }
}

fn truncate_text(mut text: String, max: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(max) {
        text.truncate(cut);
        text.push_str(TRUNCATION_MARKER);
    }
    text
}
