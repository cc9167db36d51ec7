//! Argument shapes shared by the list, get, and search tools.

use crm_core::control::{ListRequest, SearchSpec};
use crm_core::shaping::ExclusionFilter;
use crm_model::SearchFilter;
use rmcp::schemars;
use serde::Deserialize;
use serde_json::Value;

use super::args::{self, ShapingArgs};

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListArgs {
    /// Maximum number of results, 1 to 100 (default 20).
    #[serde(default, deserialize_with = "args::opt_u32")]
    #[schemars(with = "args::Count")]
    pub limit: Option<u32>,
    /// Paging cursor from a previous response.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub after: Option<String>,
    /// Property names to return. Defaults to a common set for the object type.
    #[serde(default, deserialize_with = "args::string_list")]
    #[schemars(with = "args::StringList")]
    pub properties: Vec<String>,
    #[serde(flatten)]
    pub shaping: ShapingArgs,
}

impl ListArgs {
    pub fn into_request(self, exclusions: ExclusionFilter) -> ListRequest {
        ListRequest {
            limit: self.limit,
            after: self.after,
            properties: self.properties,
            exclusions,
            shaping: self.shaping.options(),
        }
    }
}

/// Contact exclusion terms, matched client-side after the fetch.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionArgs {
    /// Drop contacts whose company contains any of these terms (case-insensitive substring; broad terms over-exclude).
    #[serde(default, deserialize_with = "args::string_list")]
    #[schemars(with = "args::StringList")]
    pub exclude_companies: Vec<String>,
    /// Drop contacts whose job title contains any of these terms (case-insensitive substring).
    #[serde(default, deserialize_with = "args::string_list")]
    #[schemars(with = "args::StringList")]
    pub exclude_job_titles: Vec<String>,
}

impl ExclusionArgs {
    pub fn filter(&self) -> ExclusionFilter {
        ExclusionFilter::new(&self.exclude_companies, &self.exclude_job_titles)
    }
}

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchArgs {
    /// Free-text search across the object's default searchable properties.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub query: Option<String>,
    /// Groups of `{propertyName, operator, value}` filters. Filters are ANDed within a group; groups are ORed.
    #[serde(default)]
    #[schemars(with = "Vec<Value>")]
    pub filter_groups: Option<Vec<Value>>,
    /// Property names to return.
    #[serde(default, deserialize_with = "args::opt_string_list")]
    #[schemars(with = "args::StringList")]
    pub properties: Option<Vec<String>>,
    /// `{propertyName, direction}` entries; direction is ASCENDING or DESCENDING.
    #[serde(default)]
    #[schemars(with = "Vec<Value>")]
    pub sorts: Option<Vec<Value>>,
    /// Maximum number of results, 1 to 100 (default 20).
    #[serde(default, deserialize_with = "args::opt_u32")]
    #[schemars(with = "args::Count")]
    pub limit: Option<u32>,
    /// Paging cursor from a previous response.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub after: Option<String>,
    #[serde(flatten)]
    pub shaping: ShapingArgs,
}

impl SearchArgs {
    pub fn into_spec(self, filters: Vec<SearchFilter>, exclusions: ExclusionFilter) -> SearchSpec {
        SearchSpec {
            query: self.query,
            filter_groups: self.filter_groups,
            properties: self.properties,
            sorts: self.sorts,
            limit: self.limit,
            after: self.after,
            filters,
            exclusions,
            shaping: self.shaping.options(),
        }
    }
}
