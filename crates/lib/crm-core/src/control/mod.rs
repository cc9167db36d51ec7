//! Control plane: one method per CRM operation.
//!
//! Reads issue a single remote call and run the shaping pipeline. Single-object
//! writes issue a single remote call. Composite writes create the primary
//! object first and then link it, one association call at a time.

pub mod deals;
pub mod engagements;
pub mod objects;
pub mod schema;
pub mod search;
pub mod tasks;

use std::sync::Arc;

use crm_model::schema::{PROP_COMPANY, PROP_JOBTITLE};
use crm_model::{AssociationLink, ObjectType, PropertyMap};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::client::CrmApi;
use crate::error::{CrmError, CrmResult};

pub use deals::{CreateDealRequest, DealFilters};
pub use engagements::{EngagementReport, EngagementRequest};
pub use objects::{GetRequest, ListRequest};
pub use search::SearchSpec;
pub use tasks::TaskFilters;

pub const MIN_PAGE_SIZE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_OWNER_PAGE_SIZE: u32 = 100;
pub const MAX_OWNER_PAGE_SIZE: u32 = 500;

/// Clamps a caller-supplied result size into `[MIN_PAGE_SIZE, max]`.
#[must_use]
pub fn clamp_limit(requested: Option<u32>, default: u32, max: u32) -> u32 {
    requested.map_or(default, |limit| limit.clamp(MIN_PAGE_SIZE, max))
}

pub struct CrmControlPlane<A: CrmApi> {
    api: Arc<A>,
}

impl<A: CrmApi> Clone for CrmControlPlane<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<A: CrmApi> CrmControlPlane<A> {
    pub fn new(api: A) -> Self {
        Self { api: Arc::new(api) }
    }

    pub const fn from_arc(api: Arc<A>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Creates an object and links it to a contact.
    ///
    /// The association is only attempted once the create has resolved. A
    /// failed association fails the whole call and leaves the created object
    /// in place; nothing is rolled back.
    pub(crate) async fn create_for_contact(
        &self,
        object_type: ObjectType,
        label: &'static str,
        contact_id: String,
        properties: PropertyMap,
    ) -> CrmResult<Value> {
        let contact_id = require_id(contact_id, "contactId")?;
        let created = self.api.create_object(object_type, properties).await?;
        let created_id = created_id(&created)?;

        self.link(object_type, &created_id, ObjectType::Contacts, &contact_id, label)
            .await?;

        let mut associations = Map::new();
        associations.insert("contactId".to_string(), Value::String(contact_id));
        Ok(json!({
            "success": true,
            object_type.singular(): created,
            "associations": associations,
        }))
    }

    pub(crate) async fn link(
        &self,
        from_type: ObjectType,
        from_id: &str,
        to_type: ObjectType,
        to_id: &str,
        label: &'static str,
    ) -> CrmResult<Value> {
        debug!(from = %from_type, from_id, to = %to_type, to_id, label, "creating association");
        self.api
            .create_association(&AssociationLink {
                from_type,
                from_id: from_id.to_string(),
                to_type,
                to_id: to_id.to_string(),
                label,
            })
            .await
    }
}

/// Wraps a single-object write result.
pub(crate) fn write_result(object_type: ObjectType, result: Value) -> Value {
    json!({
        "success": true,
        object_type.singular(): result,
    })
}

/// Rejects blank identifiers before they reach a URL path.
pub(crate) fn require_id(id: String, field: &str) -> CrmResult<String> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CrmError::validation(format!("{field} is required")));
    }
    if trimmed.len() == id.len() {
        Ok(id)
    } else {
        Ok(trimmed.to_string())
    }
}

pub(crate) fn created_id(created: &Value) -> CrmResult<String> {
    match created.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(CrmError::UnexpectedResponse(
            "created object carried no id".to_string(),
        )),
    }
}

/// Resolves the property projection for list and get calls.
///
/// Falls back to the type's default set and, when exclusions are active,
/// makes sure the fields they inspect are fetched.
pub(crate) fn projection(
    object_type: ObjectType,
    requested: Vec<String>,
    needs_filter_fields: bool,
) -> Vec<String> {
    let mut properties = if requested.is_empty() {
        object_type
            .default_properties()
            .iter()
            .map(|name| (*name).to_string())
            .collect()
    } else {
        requested
    };
    if needs_filter_fields {
        include_filter_fields(&mut properties);
    }
    properties
}

pub(crate) fn include_filter_fields(properties: &mut Vec<String>) {
    for field in [PROP_COMPANY, PROP_JOBTITLE] {
        if !properties.iter().any(|name| name == field) {
            properties.push(field.to_string());
        }
    }
}
