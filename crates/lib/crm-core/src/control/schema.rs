use crm_model::{ObjectType, OwnerQuery, PropertyListing};
use serde_json::{Value, json};

use super::{CrmControlPlane, DEFAULT_OWNER_PAGE_SIZE, MAX_OWNER_PAGE_SIZE, clamp_limit};
use crate::client::CrmApi;
use crate::error::CrmResult;

impl<A: CrmApi> CrmControlPlane<A> {
    /// Lists the property schema of an object type as name/label/type triples.
    ///
    /// # Errors
    /// Propagates remote and decode failures.
    pub async fn list_properties(&self, object_type: ObjectType) -> CrmResult<Value> {
        let raw = self.api().list_properties(object_type).await?;
        let listing: PropertyListing = serde_json::from_value(raw)?;
        Ok(json!({
            "objectType": object_type.as_str(),
            "properties": listing.results,
        }))
    }

    /// # Errors
    /// Propagates remote failures.
    pub async fn list_owners(
        &self,
        limit: Option<u32>,
        after: Option<String>,
        email: Option<String>,
    ) -> CrmResult<Value> {
        let query = OwnerQuery {
            limit: clamp_limit(limit, DEFAULT_OWNER_PAGE_SIZE, MAX_OWNER_PAGE_SIZE),
            after,
            email,
        };
        self.api().list_owners(&query).await
    }
}
