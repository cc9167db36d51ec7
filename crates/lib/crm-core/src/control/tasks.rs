use crm_model::schema::{
    ASSOC_TASK_TO_CONTACT,
    PROP_OWNER_ID,
    PROP_TASK_STATUS,
    PROP_TIMESTAMP,
};
use crm_model::{ObjectType, PropertyMap, SearchFilter};
use serde_json::Value;

use super::CrmControlPlane;
use super::engagements::ensure_timestamp;
use crate::client::CrmApi;
use crate::error::CrmResult;

/// Field-specific task search predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub owner_id: Option<String>,
    pub status: Option<String>,
    pub due_from: Option<String>,
    pub due_to: Option<String>,
}

impl TaskFilters {
    #[must_use]
    pub fn into_filters(self) -> Vec<SearchFilter> {
        let mut filters = Vec::new();
        if let Some(owner_id) = self.owner_id {
            filters.push(SearchFilter::new(PROP_OWNER_ID, "EQ", owner_id));
        }
        if let Some(status) = self.status {
            filters.push(SearchFilter::new(PROP_TASK_STATUS, "EQ", status));
        }
        if let Some(from) = self.due_from {
            filters.push(SearchFilter::new(PROP_TIMESTAMP, "GTE", from));
        }
        if let Some(to) = self.due_to {
            filters.push(SearchFilter::new(PROP_TIMESTAMP, "LTE", to));
        }
        filters
    }
}

impl<A: CrmApi> CrmControlPlane<A> {
    /// Creates a task and links it to a contact. The due date defaults to now.
    ///
    /// # Errors
    /// Propagates the first remote failure.
    pub async fn create_task(
        &self,
        contact_id: String,
        mut properties: PropertyMap,
    ) -> CrmResult<Value> {
        ensure_timestamp(&mut properties);
        self.create_for_contact(
            ObjectType::Tasks,
            ASSOC_TASK_TO_CONTACT,
            contact_id,
            properties,
        )
        .await
    }
}
