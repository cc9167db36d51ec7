use crm_core::control::GetRequest;
use crm_model::PropertyMap;
use rmcp::schemars;
use serde::Deserialize;

use super::args::{self, ShapingArgs, collect_properties};

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCompanyArgs {
    /// Company id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub company_id: String,
    /// Property names to return.
    #[serde(default, deserialize_with = "args::string_list")]
    #[schemars(with = "args::StringList")]
    pub properties: Vec<String>,
    #[serde(flatten)]
    pub shaping: ShapingArgs,
}

impl GetCompanyArgs {
    pub fn into_request(self) -> GetRequest {
        GetRequest {
            id: self.company_id,
            properties: self.properties,
            shaping: self.shaping.options(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyArgs {
    /// Company name.
    #[serde(deserialize_with = "args::string")]
    pub name: String,
    /// Primary web domain.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "args::opt_string")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "args::opt_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "args::opt_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "args::opt_string")]
    pub phone: Option<String>,
    /// Any other company properties to set. Named fields win on conflict.
    #[serde(default, deserialize_with = "args::property_map")]
    pub additional_properties: PropertyMap,
}

impl CreateCompanyArgs {
    pub fn into_properties(self) -> PropertyMap {
        let mut properties = self.additional_properties;
        properties.extend(collect_properties([
            ("name", Some(self.name)),
            ("domain", self.domain),
            ("industry", self.industry),
            ("city", self.city),
            ("country", self.country),
            ("phone", self.phone),
        ]));
        properties
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyArgs {
    /// Company id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub company_id: String,
    /// Properties to change; at least one.
    #[serde(default, deserialize_with = "args::property_map")]
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyIdArgs {
    /// Company id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub company_id: String,
}
