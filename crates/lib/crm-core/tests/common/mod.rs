use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use crm_core::client::CrmApi;
use crm_core::{CrmError, CrmResult};
use crm_model::{AssociationLink, ListQuery, ObjectType, OwnerQuery, PropertyMap, SearchRequest};
use serde_json::{Value, json};

enum Scripted {
    Reply(Value),
    Fail(u16, String),
}

/// In-memory `CrmApi` that records every call and answers from a script.
///
/// Script keys are `"{method}:{object type}"`, e.g. `"list_associations:calls"`.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<String>>,
    script: Mutex<HashMap<String, Scripted>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, key: &str, value: Value) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .insert(key.to_string(), Scripted::Reply(value));
        self
    }

    pub fn fail(self, key: &str, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .insert(key.to_string(), Scripted::Fail(status, body.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn answer(&self, key: String, call: String, default: Value) -> CrmResult<Value> {
        self.calls.lock().expect("calls lock").push(call);
        match self.script.lock().expect("script lock").get(&key) {
            Some(Scripted::Reply(value)) => Ok(value.clone()),
            Some(Scripted::Fail(status, body)) => Err(CrmError::Remote {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(default),
        }
    }
}

#[async_trait]
impl CrmApi for RecordingApi {
    async fn list_objects(&self, object_type: ObjectType, query: &ListQuery) -> CrmResult<Value> {
        self.answer(
            format!("list_objects:{object_type}"),
            format!(
                "list_objects {object_type} limit={} properties={}",
                query.limit,
                query.properties.join(",")
            ),
            json!({ "results": [] }),
        )
    }

    async fn get_object(
        &self,
        object_type: ObjectType,
        id: &str,
        _properties: &[String],
    ) -> CrmResult<Value> {
        self.answer(
            format!("get_object:{object_type}"),
            format!("get_object {object_type}/{id}"),
            json!({ "id": id, "properties": {} }),
        )
    }

    async fn create_object(
        &self,
        object_type: ObjectType,
        properties: PropertyMap,
    ) -> CrmResult<Value> {
        self.answer(
            format!("create_object:{object_type}"),
            format!("create_object {object_type}"),
            json!({ "id": "900", "properties": properties }),
        )
    }

    async fn update_object(
        &self,
        object_type: ObjectType,
        id: &str,
        properties: PropertyMap,
    ) -> CrmResult<Value> {
        self.answer(
            format!("update_object:{object_type}"),
            format!("update_object {object_type}/{id}"),
            json!({ "id": id, "properties": properties }),
        )
    }

    async fn delete_object(&self, object_type: ObjectType, id: &str) -> CrmResult<()> {
        self.answer(
            format!("delete_object:{object_type}"),
            format!("delete_object {object_type}/{id}"),
            Value::Null,
        )
        .map(|_| ())
    }

    async fn search_objects(
        &self,
        object_type: ObjectType,
        request: &SearchRequest,
    ) -> CrmResult<Value> {
        let body = serde_json::to_string(request).expect("search body serializes");
        self.answer(
            format!("search_objects:{object_type}"),
            format!("search_objects {object_type} {body}"),
            json!({ "results": [], "total": 0 }),
        )
    }

    async fn batch_read(
        &self,
        object_type: ObjectType,
        ids: &[String],
        _properties: &[String],
    ) -> CrmResult<Value> {
        self.answer(
            format!("batch_read:{object_type}"),
            format!("batch_read {object_type} {}", ids.join(",")),
            json!({ "results": [] }),
        )
    }

    async fn create_association(&self, link: &AssociationLink) -> CrmResult<Value> {
        self.answer(
            format!("create_association:{}", link.from_type),
            format!(
                "create_association {}/{} -> {}/{} {}",
                link.from_type, link.from_id, link.to_type, link.to_id, link.label
            ),
            json!({}),
        )
    }

    async fn list_associations(
        &self,
        from_type: ObjectType,
        id: &str,
        to_type: ObjectType,
    ) -> CrmResult<Value> {
        self.answer(
            format!("list_associations:{to_type}"),
            format!("list_associations {from_type}/{id} -> {to_type}"),
            json!({ "results": [] }),
        )
    }

    async fn list_properties(&self, object_type: ObjectType) -> CrmResult<Value> {
        self.answer(
            format!("list_properties:{object_type}"),
            format!("list_properties {object_type}"),
            json!({ "results": [] }),
        )
    }

    async fn list_deal_pipelines(&self) -> CrmResult<Value> {
        self.answer(
            "list_deal_pipelines:deals".to_string(),
            "list_deal_pipelines".to_string(),
            json!({ "results": [] }),
        )
    }

    async fn list_owners(&self, query: &OwnerQuery) -> CrmResult<Value> {
        self.answer(
            "list_owners:owners".to_string(),
            format!("list_owners limit={}", query.limit),
            json!({ "results": [] }),
        )
    }
}
