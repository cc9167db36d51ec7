use crm_model::{CrmObject, ListQuery, ObjectType, PropertyMap, ResultPage};
use serde_json::{Value, json};
use tracing::debug;

use super::{
    CrmControlPlane,
    DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
    clamp_limit,
    projection,
    require_id,
    write_result,
};
use crate::client::CrmApi;
use crate::error::{CrmError, CrmResult};
use crate::shaping::{CompactObject, CompactOptions, CompactPage, ExclusionFilter, compact, shape_page};

/// Paged listing of one object type.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub limit: Option<u32>,
    pub after: Option<String>,
    pub properties: Vec<String>,
    pub exclusions: ExclusionFilter,
    pub shaping: CompactOptions,
}

/// Fetch of a single object by id.
#[derive(Debug, Clone, Default)]
pub struct GetRequest {
    pub id: String,
    pub properties: Vec<String>,
    pub shaping: CompactOptions,
}

impl<A: CrmApi> CrmControlPlane<A> {
    /// Lists objects, then filters and compacts the page.
    ///
    /// # Errors
    /// Propagates remote and decode failures.
    pub async fn list_objects(
        &self,
        object_type: ObjectType,
        request: ListRequest,
    ) -> CrmResult<CompactPage> {
        let ListRequest {
            limit,
            after,
            properties,
            exclusions,
            shaping,
        } = request;
        let query = ListQuery {
            limit: clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            after,
            properties: projection(object_type, properties, !exclusions.is_empty()),
        };
        debug!(object_type = %object_type, limit = query.limit, "listing objects");

        let raw = self.api().list_objects(object_type, &query).await?;
        let page: ResultPage = serde_json::from_value(raw)?;
        Ok(shape_page(page, &exclusions, &shaping))
    }

    /// # Errors
    /// Fails on a blank id or any remote failure.
    pub async fn get_object(
        &self,
        object_type: ObjectType,
        request: GetRequest,
    ) -> CrmResult<CompactObject> {
        let id = require_id(request.id, "id")?;
        let properties = projection(object_type, request.properties, false);
        let raw = self.api().get_object(object_type, &id, &properties).await?;
        let object: CrmObject = serde_json::from_value(raw)?;
        Ok(compact(object, &request.shaping))
    }

    /// # Errors
    /// Propagates remote failures.
    pub async fn create_object(
        &self,
        object_type: ObjectType,
        properties: PropertyMap,
    ) -> CrmResult<Value> {
        let created = self.api().create_object(object_type, properties).await?;
        Ok(write_result(object_type, created))
    }

    /// Applies a partial property update.
    ///
    /// # Errors
    /// Returns `CrmError::Validation` without any remote call when there is
    /// nothing to change.
    pub async fn update_object(
        &self,
        object_type: ObjectType,
        id: String,
        properties: PropertyMap,
    ) -> CrmResult<Value> {
        let id = require_id(id, "id")?;
        if properties.is_empty() {
            return Err(CrmError::validation(format!(
                "at least one property must be provided to update the {}",
                object_type.singular()
            )));
        }
        let updated = self.api().update_object(object_type, &id, properties).await?;
        Ok(write_result(object_type, updated))
    }

    /// Deletes an object without fetching it first.
    ///
    /// # Errors
    /// Propagates remote failures.
    pub async fn delete_object(&self, object_type: ObjectType, id: String) -> CrmResult<Value> {
        let id = require_id(id, "id")?;
        self.api().delete_object(object_type, &id).await?;
        Ok(json!({ "success": true, "deleted": id }))
    }
}
