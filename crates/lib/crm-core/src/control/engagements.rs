use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use crm_model::schema::{ASSOC_EMAIL_TO_CONTACT, ASSOC_NOTE_TO_CONTACT, PROP_TIMESTAMP};
use crm_model::{AssociationPage, CrmObject, EngagementKind, ObjectType, PropertyMap, ResultPage};
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{CrmControlPlane, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, clamp_limit, require_id};
use crate::client::CrmApi;
use crate::error::{CrmError, CrmResult};
use crate::shaping::{CompactObject, CompactOptions, compact};

/// Timeline fetch for one contact.
#[derive(Debug, Clone, Default)]
pub struct EngagementRequest {
    pub contact_id: String,
    /// Types to fetch; empty means every known type.
    pub kinds: Vec<EngagementKind>,
    /// Per-type cap on associated records read.
    pub limit: Option<u32>,
    pub shaping: CompactOptions,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngagementReport {
    pub contact_id: String,
    pub engagements: BTreeMap<EngagementKind, Vec<CompactObject>>,
}

impl<A: CrmApi> CrmControlPlane<A> {
    /// Fetches a contact's engagements, one association lookup plus one batch
    /// read per type, with all types in flight at once.
    ///
    /// A failure inside one type degrades that type to an empty list and
    /// leaves the others untouched. A missing credential is not a per-type
    /// failure and fails the whole call.
    ///
    /// # Errors
    /// Fails on a blank contact id or when the client has no credential.
    pub async fn get_engagements(&self, request: EngagementRequest) -> CrmResult<EngagementReport> {
        let contact_id = require_id(request.contact_id, "contactId")?;
        let mut kinds = if request.kinds.is_empty() {
            EngagementKind::ALL.to_vec()
        } else {
            request.kinds
        };
        kinds.sort_unstable();
        kinds.dedup();
        let limit = clamp_limit(request.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE) as usize;

        let fetches = kinds.iter().map(|&kind| {
            let contact_id = contact_id.as_str();
            async move { (kind, self.fetch_engagements(contact_id, kind, limit).await) }
        });
        let outcomes = join_all(fetches).await;

        let mut engagements = BTreeMap::new();
        for (kind, outcome) in outcomes {
            let objects = match outcome {
                Ok(objects) => objects,
                Err(CrmError::NotConfigured) => return Err(CrmError::NotConfigured),
                Err(err) => {
                    warn!(kind = kind.as_str(), contact_id = %contact_id, error = %err, "engagement fetch failed");
                    Vec::new()
                }
            };
            let shaped = objects
                .into_iter()
                .map(|object| compact(object, &request.shaping))
                .collect();
            engagements.insert(kind, shaped);
        }

        Ok(EngagementReport {
            contact_id,
            engagements,
        })
    }

    async fn fetch_engagements(
        &self,
        contact_id: &str,
        kind: EngagementKind,
        limit: usize,
    ) -> CrmResult<Vec<CrmObject>> {
        let object_type = kind.object_type();
        let raw = self
            .api()
            .list_associations(ObjectType::Contacts, contact_id, object_type)
            .await?;
        let associations: AssociationPage = serde_json::from_value(raw)?;
        let ids: Vec<String> = associations
            .results
            .into_iter()
            .map(|entry| entry.id)
            .take(limit)
            .collect();
        debug!(kind = kind.as_str(), count = ids.len(), "engagement associations");
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let properties: Vec<String> = kind
            .properties()
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        let raw = self.api().batch_read(object_type, &ids, &properties).await?;
        let page: ResultPage = serde_json::from_value(raw)?;
        Ok(page.results)
    }

    /// Logs a note against a contact.
    ///
    /// # Errors
    /// Propagates the first remote failure.
    pub async fn create_note(
        &self,
        contact_id: String,
        mut properties: PropertyMap,
    ) -> CrmResult<Value> {
        ensure_timestamp(&mut properties);
        self.create_for_contact(
            ObjectType::Notes,
            ASSOC_NOTE_TO_CONTACT,
            contact_id,
            properties,
        )
        .await
    }

    /// Logs an email against a contact.
    ///
    /// # Errors
    /// Propagates the first remote failure.
    pub async fn create_email(
        &self,
        contact_id: String,
        mut properties: PropertyMap,
    ) -> CrmResult<Value> {
        ensure_timestamp(&mut properties);
        self.create_for_contact(
            ObjectType::Emails,
            ASSOC_EMAIL_TO_CONTACT,
            contact_id,
            properties,
        )
        .await
    }
}

/// Engagement objects require a timestamp; default it to now.
pub(crate) fn ensure_timestamp(properties: &mut PropertyMap) {
    properties
        .entry(PROP_TIMESTAMP)
        .or_insert_with(|| Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)));
}
