use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{
    CALL_PROPERTIES,
    COMPANY_DEFAULT_PROPERTIES,
    CONTACT_DEFAULT_PROPERTIES,
    DEAL_DEFAULT_PROPERTIES,
    EMAIL_PROPERTIES,
    MEETING_PROPERTIES,
    NOTE_PROPERTIES,
    TASK_DEFAULT_PROPERTIES,
    TASK_ENGAGEMENT_PROPERTIES,
};

/// Schema-free property bag carried by every CRM object.
pub type PropertyMap = Map<String, Value>;

/// A typed business record owned by the remote CRM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrmObject {
    pub id: String,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CrmObject {
    /// Returns a property value as a string slice, if present and textual.
    #[must_use]
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }
}

/// One page of results as returned by list, search, and batch-read calls.
///
/// Ordering is owned by the remote system and is never changed locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultPage {
    #[serde(default)]
    pub results: Vec<CrmObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Value>,
}

/// One entry of an association lookup response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssociationRef {
    #[serde(alias = "toObjectId", deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Association lookup response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssociationPage {
    #[serde(default)]
    pub results: Vec<AssociationRef>,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "association id must be a string or number, got {other}"
        ))),
    }
}

/// A property schema entry reduced to its key, label, and type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Property schema listing response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyListing {
    #[serde(default)]
    pub results: Vec<PropertyDefinition>,
}

/// Object types addressable through the remote object API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Contacts,
    Companies,
    Deals,
    Tasks,
    Notes,
    Emails,
    Calls,
    Meetings,
}

impl ObjectType {
    pub const ALL: [Self; 8] = [
        Self::Contacts,
        Self::Companies,
        Self::Deals,
        Self::Tasks,
        Self::Notes,
        Self::Emails,
        Self::Calls,
        Self::Meetings,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Companies => "companies",
            Self::Deals => "deals",
            Self::Tasks => "tasks",
            Self::Notes => "notes",
            Self::Emails => "emails",
            Self::Calls => "calls",
            Self::Meetings => "meetings",
        }
    }

    /// Singular noun used as the result key of write operations.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Contacts => "contact",
            Self::Companies => "company",
            Self::Deals => "deal",
            Self::Tasks => "task",
            Self::Notes => "note",
            Self::Emails => "email",
            Self::Calls => "call",
            Self::Meetings => "meeting",
        }
    }

    /// Properties requested by list and get calls when the caller names none.
    #[must_use]
    pub const fn default_properties(self) -> &'static [&'static str] {
        match self {
            Self::Contacts => CONTACT_DEFAULT_PROPERTIES,
            Self::Companies => COMPANY_DEFAULT_PROPERTIES,
            Self::Deals => DEAL_DEFAULT_PROPERTIES,
            Self::Tasks => TASK_DEFAULT_PROPERTIES,
            Self::Notes => NOTE_PROPERTIES,
            Self::Emails => EMAIL_PROPERTIES,
            Self::Calls => CALL_PROPERTIES,
            Self::Meetings => MEETING_PROPERTIES,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name that matches no object or engagement type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown object type: {0}")]
pub struct UnknownObjectType(pub String);

impl FromStr for ObjectType {
    type Err = UnknownObjectType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownObjectType(value.to_string()))
    }
}

/// Timeline event types that can be associated with a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Notes,
    Emails,
    Calls,
    Meetings,
    Tasks,
}

impl EngagementKind {
    pub const ALL: [Self; 5] = [
        Self::Notes,
        Self::Emails,
        Self::Calls,
        Self::Meetings,
        Self::Tasks,
    ];

    #[must_use]
    pub const fn object_type(self) -> ObjectType {
        match self {
            Self::Notes => ObjectType::Notes,
            Self::Emails => ObjectType::Emails,
            Self::Calls => ObjectType::Calls,
            Self::Meetings => ObjectType::Meetings,
            Self::Tasks => ObjectType::Tasks,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.object_type().as_str()
    }

    /// Fixed property subset fetched for this engagement type.
    #[must_use]
    pub const fn properties(self) -> &'static [&'static str] {
        match self {
            Self::Notes => NOTE_PROPERTIES,
            Self::Emails => EMAIL_PROPERTIES,
            Self::Calls => CALL_PROPERTIES,
            Self::Meetings => MEETING_PROPERTIES,
            Self::Tasks => TASK_ENGAGEMENT_PROPERTIES,
        }
    }
}

impl FromStr for EngagementKind {
    type Err = UnknownObjectType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownObjectType(value.to_string()))
    }
}
