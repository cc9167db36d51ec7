use crm_core::control::{CreateDealRequest, DealFilters, GetRequest, SearchSpec};
use crm_core::shaping::ExclusionFilter;
use crm_model::PropertyMap;
use crm_model::schema::{
    PROP_DEAL_AMOUNT,
    PROP_DEAL_CLOSE_DATE,
    PROP_DEAL_NAME,
    PROP_DEAL_PIPELINE,
    PROP_DEAL_STAGE,
    PROP_OWNER_ID,
};
use rmcp::schemars;
use serde::Deserialize;

use super::args::{self, ShapingArgs, collect_properties};
use super::objects::SearchArgs;

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDealArgs {
    /// Deal id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub deal_id: String,
    /// Property names to return.
    #[serde(default, deserialize_with = "args::string_list")]
    #[schemars(with = "args::StringList")]
    pub properties: Vec<String>,
    #[serde(flatten)]
    pub shaping: ShapingArgs,
}

impl GetDealArgs {
    pub fn into_request(self) -> GetRequest {
        GetRequest {
            id: self.deal_id,
            properties: self.properties,
            shaping: self.shaping.options(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchDealsArgs {
    #[serde(flatten)]
    pub search: SearchArgs,
    /// Owner id.
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::Identifier")]
    pub owner_id: Option<String>,
    /// Deal stage id.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub dealstage: Option<String>,
    /// Pipeline id.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub pipeline: Option<String>,
    /// Earliest close date (ISO 8601).
    #[serde(default, deserialize_with = "args::opt_string")]
    pub close_date_from: Option<String>,
    /// Latest close date (ISO 8601).
    #[serde(default, deserialize_with = "args::opt_string")]
    pub close_date_to: Option<String>,
    /// Minimum amount.
    #[serde(default, deserialize_with = "args::opt_f64")]
    #[schemars(with = "args::Amount")]
    pub min_amount: Option<f64>,
    /// Maximum amount.
    #[serde(default, deserialize_with = "args::opt_f64")]
    #[schemars(with = "args::Amount")]
    pub max_amount: Option<f64>,
}

impl SearchDealsArgs {
    pub fn into_spec(self) -> SearchSpec {
        let filters = DealFilters {
            owner_id: self.owner_id,
            stage: self.dealstage,
            pipeline: self.pipeline,
            close_date_from: self.close_date_from,
            close_date_to: self.close_date_to,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        }
        .into_filters();
        self.search.into_spec(filters, ExclusionFilter::default())
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealArgs {
    /// Deal name.
    #[serde(deserialize_with = "args::string")]
    pub dealname: String,
    /// Deal amount.
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::Amount")]
    pub amount: Option<String>,
    /// Deal stage id.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub dealstage: Option<String>,
    /// Pipeline id.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub pipeline: Option<String>,
    /// Expected close date (ISO 8601).
    #[serde(default, deserialize_with = "args::opt_string")]
    pub closedate: Option<String>,
    /// Owner id.
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::Identifier")]
    pub owner_id: Option<String>,
    /// Contact to associate.
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::Identifier")]
    pub contact_id: Option<String>,
    /// Company to associate.
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::Identifier")]
    pub company_id: Option<String>,
}

impl CreateDealArgs {
    pub fn into_request(self) -> CreateDealRequest {
        let properties = collect_properties([
            (PROP_DEAL_NAME, Some(self.dealname)),
            (PROP_DEAL_AMOUNT, self.amount),
            (PROP_DEAL_STAGE, self.dealstage),
            (PROP_DEAL_PIPELINE, self.pipeline),
            (PROP_DEAL_CLOSE_DATE, self.closedate),
            (PROP_OWNER_ID, self.owner_id),
        ]);
        CreateDealRequest {
            properties,
            contact_id: self.contact_id,
            company_id: self.company_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealArgs {
    /// Deal id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub deal_id: String,
    /// Properties to change; at least one.
    #[serde(default, deserialize_with = "args::property_map")]
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealIdArgs {
    /// Deal id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub deal_id: String,
}

/// `get_deal_pipelines` takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct GetDealPipelinesArgs {}
