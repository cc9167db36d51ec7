use crm_model::schema::{
    ASSOC_DEAL_TO_COMPANY,
    ASSOC_DEAL_TO_CONTACT,
    PROP_DEAL_AMOUNT,
    PROP_DEAL_CLOSE_DATE,
    PROP_DEAL_PIPELINE,
    PROP_DEAL_STAGE,
    PROP_OWNER_ID,
};
use crm_model::{ObjectType, PropertyMap, SearchFilter};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::{CrmControlPlane, created_id, require_id};
use crate::client::CrmApi;
use crate::error::CrmResult;

/// Deal creation with optional links to a contact and a company.
#[derive(Debug, Clone, Default)]
pub struct CreateDealRequest {
    pub properties: PropertyMap,
    pub contact_id: Option<String>,
    pub company_id: Option<String>,
}

/// Field-specific deal search predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealFilters {
    pub owner_id: Option<String>,
    pub stage: Option<String>,
    pub pipeline: Option<String>,
    pub close_date_from: Option<String>,
    pub close_date_to: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl DealFilters {
    #[must_use]
    pub fn into_filters(self) -> Vec<SearchFilter> {
        let mut filters = Vec::new();
        if let Some(owner_id) = self.owner_id {
            filters.push(SearchFilter::new(PROP_OWNER_ID, "EQ", owner_id));
        }
        if let Some(stage) = self.stage {
            filters.push(SearchFilter::new(PROP_DEAL_STAGE, "EQ", stage));
        }
        if let Some(pipeline) = self.pipeline {
            filters.push(SearchFilter::new(PROP_DEAL_PIPELINE, "EQ", pipeline));
        }
        if let Some(from) = self.close_date_from {
            filters.push(SearchFilter::new(PROP_DEAL_CLOSE_DATE, "GTE", from));
        }
        if let Some(to) = self.close_date_to {
            filters.push(SearchFilter::new(PROP_DEAL_CLOSE_DATE, "LTE", to));
        }
        if let Some(min) = self.min_amount {
            filters.push(SearchFilter::new(PROP_DEAL_AMOUNT, "GTE", min));
        }
        if let Some(max) = self.max_amount {
            filters.push(SearchFilter::new(PROP_DEAL_AMOUNT, "LTE", max));
        }
        filters
    }
}

impl<A: CrmApi> CrmControlPlane<A> {
    /// Creates a deal, then links the contact and the company, in that order.
    ///
    /// Each association is awaited before the next call is issued. A failed
    /// association fails the call; the deal already created is not removed.
    ///
    /// # Errors
    /// Propagates the first remote failure.
    pub async fn create_deal(&self, request: CreateDealRequest) -> CrmResult<Value> {
        let CreateDealRequest {
            properties,
            contact_id,
            company_id,
        } = request;
        let contact_id = contact_id.map(|id| require_id(id, "contactId")).transpose()?;
        let company_id = company_id.map(|id| require_id(id, "companyId")).transpose()?;

        let deal = self.api().create_object(ObjectType::Deals, properties).await?;
        let deal_id = created_id(&deal)?;
        debug!(deal_id = %deal_id, "deal created");

        let mut associations = Map::new();
        if let Some(contact_id) = contact_id {
            self.link(
                ObjectType::Deals,
                &deal_id,
                ObjectType::Contacts,
                &contact_id,
                ASSOC_DEAL_TO_CONTACT,
            )
            .await?;
            associations.insert("contactId".to_string(), Value::String(contact_id));
        }
        if let Some(company_id) = company_id {
            self.link(
                ObjectType::Deals,
                &deal_id,
                ObjectType::Companies,
                &company_id,
                ASSOC_DEAL_TO_COMPANY,
            )
            .await?;
            associations.insert("companyId".to_string(), Value::String(company_id));
        }

        Ok(json!({
            "success": true,
            "deal": deal,
            "associations": associations,
        }))
    }

    /// Returns the deal pipelines and their stages as the remote reports them.
    ///
    /// # Errors
    /// Propagates remote failures.
    pub async fn list_deal_pipelines(&self) -> CrmResult<Value> {
        self.api().list_deal_pipelines().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_filters_cover_ranges_and_thresholds() {
        let filters = DealFilters {
            owner_id: Some("9".to_string()),
            close_date_from: Some("2024-01-01".to_string()),
            close_date_to: Some("2024-03-31".to_string()),
            min_amount: Some(5000.0),
            ..DealFilters::default()
        }
        .into_filters();

        let summary: Vec<(&str, &str)> = filters
            .iter()
            .map(|filter| (filter.property_name.as_str(), filter.operator.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("hubspot_owner_id", "EQ"),
                ("closedate", "GTE"),
                ("closedate", "LTE"),
                ("amount", "GTE"),
            ]
        );
    }
}
