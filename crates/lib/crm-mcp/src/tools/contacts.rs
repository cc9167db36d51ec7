use crm_core::control::{GetRequest, ListRequest, SearchSpec};
use crm_model::PropertyMap;
use crm_model::schema::{PROP_COMPANY, PROP_JOBTITLE};
use rmcp::schemars;
use serde::Deserialize;

use super::args::{self, ShapingArgs, collect_properties};
use super::objects::{ExclusionArgs, ListArgs, SearchArgs};

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct ListContactsArgs {
    #[serde(flatten)]
    pub list: ListArgs,
    #[serde(flatten)]
    pub exclusions: ExclusionArgs,
}

impl ListContactsArgs {
    pub fn into_request(self) -> ListRequest {
        let exclusions = self.exclusions.filter();
        self.list.into_request(exclusions)
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetContactArgs {
    /// Contact id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub contact_id: String,
    /// Property names to return.
    #[serde(default, deserialize_with = "args::string_list")]
    #[schemars(with = "args::StringList")]
    pub properties: Vec<String>,
    #[serde(flatten)]
    pub shaping: ShapingArgs,
}

impl GetContactArgs {
    pub fn into_request(self) -> GetRequest {
        GetRequest {
            id: self.contact_id,
            properties: self.properties,
            shaping: self.shaping.options(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchContactsArgs {
    #[serde(flatten)]
    pub search: SearchArgs,
    #[serde(flatten)]
    pub exclusions: ExclusionArgs,
}

impl SearchContactsArgs {
    pub fn into_spec(self) -> SearchSpec {
        let exclusions = self.exclusions.filter();
        self.search.into_spec(Vec::new(), exclusions)
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactArgs {
    /// Primary email address.
    #[serde(deserialize_with = "args::string")]
    pub email: String,
    /// First name.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub firstname: Option<String>,
    /// Last name.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub lastname: Option<String>,
    /// Phone number.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub phone: Option<String>,
    /// Company name.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub company: Option<String>,
    /// Job title.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub jobtitle: Option<String>,
    /// Lifecycle stage, e.g. lead or customer.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub lifecyclestage: Option<String>,
    /// Any other contact properties to set. Named fields win on conflict.
    #[serde(default, deserialize_with = "args::property_map")]
    pub additional_properties: PropertyMap,
}

impl CreateContactArgs {
    /// Named fields win over the same key in `additionalProperties`.
    pub fn into_properties(self) -> PropertyMap {
        let mut properties = self.additional_properties;
        properties.extend(collect_properties([
            ("email", Some(self.email)),
            ("firstname", self.firstname),
            ("lastname", self.lastname),
            ("phone", self.phone),
            (PROP_COMPANY, self.company),
            (PROP_JOBTITLE, self.jobtitle),
            ("lifecyclestage", self.lifecyclestage),
        ]));
        properties
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactArgs {
    /// Contact id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub contact_id: String,
    /// Properties to change; at least one.
    #[serde(default, deserialize_with = "args::property_map")]
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactIdArgs {
    /// Contact id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub contact_id: String,
}
