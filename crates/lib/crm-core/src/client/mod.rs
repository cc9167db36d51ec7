//! Remote object client interface and its HTTP implementation.
//!
//! `CrmApi` is the seam between orchestration and the network: the control
//! plane only ever talks to the remote system through it.

pub mod http;

use async_trait::async_trait;
use crm_model::{AssociationLink, ListQuery, ObjectType, OwnerQuery, PropertyMap, SearchRequest};
use serde_json::Value;

use crate::error::CrmResult;

pub use http::{DEFAULT_BASE_URL, HttpCrmClient, HttpCrmClientBuilder};

/// Capabilities of the remote CRM consumed by the control plane.
///
/// Every method returns the decoded JSON payload; shaping is the caller's job.
#[async_trait]
pub trait CrmApi: Send + Sync {
    async fn list_objects(&self, object_type: ObjectType, query: &ListQuery) -> CrmResult<Value>;

    async fn get_object(
        &self,
        object_type: ObjectType,
        id: &str,
        properties: &[String],
    ) -> CrmResult<Value>;

    async fn create_object(
        &self,
        object_type: ObjectType,
        properties: PropertyMap,
    ) -> CrmResult<Value>;

    async fn update_object(
        &self,
        object_type: ObjectType,
        id: &str,
        properties: PropertyMap,
    ) -> CrmResult<Value>;

    async fn delete_object(&self, object_type: ObjectType, id: &str) -> CrmResult<()>;

    async fn search_objects(
        &self,
        object_type: ObjectType,
        request: &SearchRequest,
    ) -> CrmResult<Value>;

    async fn batch_read(
        &self,
        object_type: ObjectType,
        ids: &[String],
        properties: &[String],
    ) -> CrmResult<Value>;

    async fn create_association(&self, link: &AssociationLink) -> CrmResult<Value>;

    async fn list_associations(
        &self,
        from_type: ObjectType,
        id: &str,
        to_type: ObjectType,
    ) -> CrmResult<Value>;

    async fn list_properties(&self, object_type: ObjectType) -> CrmResult<Value>;

    async fn list_deal_pipelines(&self) -> CrmResult<Value>;

    async fn list_owners(&self, query: &OwnerQuery) -> CrmResult<Value>;
}
