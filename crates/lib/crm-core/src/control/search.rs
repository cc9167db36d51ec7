use crm_model::{ObjectType, ResultPage, SearchFilter, SearchRequest};
use serde_json::Value;
use tracing::debug;

use super::{
    CrmControlPlane,
    DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
    clamp_limit,
    include_filter_fields,
};
use crate::client::CrmApi;
use crate::error::CrmResult;
use crate::shaping::{CompactOptions, CompactPage, ExclusionFilter, shape_page};

/// Structured search arguments before translation into a remote request.
///
/// `filters` holds field-specific convenience predicates; they are ANDed
/// together.
#[derive(Debug, Clone, Default)]
pub struct SearchSpec {
    pub query: Option<String>,
    pub filter_groups: Option<Vec<Value>>,
    pub properties: Option<Vec<String>>,
    pub sorts: Option<Vec<Value>>,
    pub limit: Option<u32>,
    pub after: Option<String>,
    pub filters: Vec<SearchFilter>,
    pub exclusions: ExclusionFilter,
    pub shaping: CompactOptions,
}

impl SearchSpec {
    /// Translates the arguments into the remote search body.
    ///
    /// Caller-supplied members pass through verbatim and absent ones stay
    /// absent. Convenience filters become one synthesized group, or are ANDed
    /// into each caller group when groups were supplied.
    ///
    /// # Errors
    /// Fails only if a convenience filter value cannot be serialized.
    pub fn to_request(&self, object_type: ObjectType) -> CrmResult<SearchRequest> {
        let mut properties = self.properties.clone();
        if !self.exclusions.is_empty() {
            let fields = properties.get_or_insert_with(|| {
                object_type
                    .default_properties()
                    .iter()
                    .map(|name| (*name).to_string())
                    .collect()
            });
            include_filter_fields(fields);
        }

        Ok(SearchRequest {
            query: self.query.clone(),
            filter_groups: merge_filter_groups(self.filter_groups.clone(), &self.filters)?,
            properties,
            sorts: self.sorts.clone(),
            limit: clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            after: self.after.clone(),
        })
    }
}

fn merge_filter_groups(
    groups: Option<Vec<Value>>,
    filters: &[SearchFilter],
) -> CrmResult<Option<Vec<Value>>> {
    if filters.is_empty() {
        return Ok(groups);
    }
    let Value::Array(encoded) = serde_json::to_value(filters)? else {
        return Ok(groups);
    };

    let merged = match groups {
        Some(groups) if !groups.is_empty() => Some(
            groups
                .into_iter()
                .map(|mut group| {
                    if let Some(entry) = group.as_object_mut() {
                        let members = entry
                            .entry("filters")
                            .or_insert_with(|| Value::Array(Vec::new()));
                        if let Some(members) = members.as_array_mut() {
                            members.extend(encoded.iter().cloned());
                        }
                    }
                    group
                })
                .collect(),
        ),
        _ => {
            let mut group = serde_json::Map::new();
            group.insert("filters".to_string(), Value::Array(encoded));
            Some(vec![Value::Object(group)])
        }
    };
    Ok(merged)
}

impl<A: CrmApi> CrmControlPlane<A> {
    /// Runs a remote search, then filters and compacts the page.
    ///
    /// # Errors
    /// Propagates remote and decode failures.
    pub async fn search_objects(
        &self,
        object_type: ObjectType,
        spec: SearchSpec,
    ) -> CrmResult<CompactPage> {
        let request = spec.to_request(object_type)?;
        debug!(
            object_type = %object_type,
            limit = request.limit,
            groups = request.filter_groups.as_ref().map_or(0, Vec::len),
            "searching objects"
        );
        let raw = self.api().search_objects(object_type, &request).await?;
        let page: ResultPage = serde_json::from_value(raw)?;
        Ok(shape_page(page, &spec.exclusions, &spec.shaping))
    }
}
