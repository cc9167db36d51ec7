use crm_core::control::EngagementRequest;
use crm_model::schema::{
    PROP_EMAIL_DIRECTION,
    PROP_EMAIL_STATUS,
    PROP_EMAIL_SUBJECT,
    PROP_EMAIL_TEXT,
    PROP_NOTE_BODY,
    PROP_TIMESTAMP,
};
use crm_model::{EngagementKind, PropertyMap};
use rmcp::schemars;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;

use super::args::{self, ShapingArgs, collect_properties};

const DEFAULT_EMAIL_DIRECTION: &str = "EMAIL";
const DEFAULT_EMAIL_STATUS: &str = "SENT";

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetEngagementsArgs {
    /// Contact id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub contact_id: String,
    /// Engagement types to fetch (default all).
    #[serde(default, deserialize_with = "engagement_kinds")]
    #[schemars(with = "args::EngagementTypes")]
    pub types: Vec<EngagementKind>,
    /// Maximum records per type (default 20, at most 100).
    #[serde(default, deserialize_with = "args::opt_u32")]
    #[schemars(with = "args::Count")]
    pub limit: Option<u32>,
    #[serde(flatten)]
    pub shaping: ShapingArgs,
}

impl GetEngagementsArgs {
    pub fn into_request(self) -> EngagementRequest {
        EngagementRequest {
            contact_id: self.contact_id,
            kinds: self.types,
            limit: self.limit,
            shaping: self.shaping.options(),
        }
    }
}

fn engagement_kinds<'de, D>(deserializer: D) -> Result<Vec<EngagementKind>, D::Error>
where
    D: Deserializer<'de>,
{
    args::string_list(deserializer)?
        .iter()
        .map(|name| name.parse().map_err(D::Error::custom))
        .collect()
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteArgs {
    /// Contact id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub contact_id: String,
    /// Note text.
    #[serde(deserialize_with = "args::string")]
    pub body: String,
    /// When the note applies (ISO 8601, default now).
    #[serde(default, deserialize_with = "args::opt_string")]
    pub timestamp: Option<String>,
}

impl CreateNoteArgs {
    pub fn into_parts(self) -> (String, PropertyMap) {
        let properties = collect_properties([
            (PROP_NOTE_BODY, Some(self.body)),
            (PROP_TIMESTAMP, self.timestamp),
        ]);
        (self.contact_id, properties)
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmailArgs {
    /// Contact id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub contact_id: String,
    /// Email subject.
    #[serde(deserialize_with = "args::string")]
    pub subject: String,
    /// Email body text.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub body: Option<String>,
    /// Direction (default EMAIL).
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::EmailDirection")]
    pub direction: Option<String>,
    /// When the email was sent (ISO 8601, default now).
    #[serde(default, deserialize_with = "args::opt_string")]
    pub timestamp: Option<String>,
}

impl CreateEmailArgs {
    pub fn into_parts(self) -> (String, PropertyMap) {
        let direction = self
            .direction
            .unwrap_or_else(|| DEFAULT_EMAIL_DIRECTION.to_string());
        let properties = collect_properties([
            (PROP_EMAIL_SUBJECT, Some(self.subject)),
            (PROP_EMAIL_TEXT, self.body),
            (PROP_EMAIL_DIRECTION, Some(direction)),
            (PROP_EMAIL_STATUS, Some(DEFAULT_EMAIL_STATUS.to_string())),
            (PROP_TIMESTAMP, self.timestamp),
        ]);
        (self.contact_id, properties)
    }
}
