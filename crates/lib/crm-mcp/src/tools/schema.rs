use crm_model::ObjectType;
use rmcp::schemars;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;

use super::args;

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetPropertiesArgs {
    /// Object type whose property schema to list.
    #[serde(deserialize_with = "object_type")]
    #[schemars(with = "args::ObjectTypeName")]
    pub object_type: ObjectType,
}

fn object_type<'de, D>(deserializer: D) -> Result<ObjectType, D::Error>
where
    D: Deserializer<'de>,
{
    args::string(deserializer)?.parse().map_err(D::Error::custom)
}

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetOwnersArgs {
    /// Maximum number of owners (default 100, at most 500).
    #[serde(default, deserialize_with = "args::opt_u32")]
    #[schemars(with = "args::Count")]
    pub limit: Option<u32>,
    /// Paging cursor from a previous response.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub after: Option<String>,
    /// Filter owners by email.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub email: Option<String>,
}
