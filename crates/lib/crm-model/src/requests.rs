use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ObjectType;

/// Query for paging through one object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    pub after: Option<String>,
    pub properties: Vec<String>,
}

/// A single property predicate inside a search filter group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub property_name: String,
    pub operator: String,
    pub value: Value,
}

impl SearchFilter {
    pub fn new(property_name: impl Into<String>, operator: &str, value: impl Into<Value>) -> Self {
        Self {
            property_name: property_name.into(),
            operator: operator.to_string(),
            value: value.into(),
        }
    }
}

/// Body of a remote search call.
///
/// Optional members are omitted from the wire form when absent so the remote
/// engine applies its own defaults.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_groups: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Vec<Value>>,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// A directed link to create between two existing objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationLink {
    pub from_type: ObjectType,
    pub from_id: String,
    pub to_type: ObjectType,
    pub to_id: String,
    pub label: &'static str,
}

/// Query for the owners listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerQuery {
    pub limit: u32,
    pub after: Option<String>,
    pub email: Option<String>,
}
