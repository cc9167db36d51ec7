use crm_core::control::{SearchSpec, TaskFilters};
use crm_core::shaping::ExclusionFilter;
use crm_model::PropertyMap;
use crm_model::schema::{
    PROP_OWNER_ID,
    PROP_TASK_BODY,
    PROP_TASK_PRIORITY,
    PROP_TASK_STATUS,
    PROP_TASK_SUBJECT,
    PROP_TASK_TYPE,
    PROP_TIMESTAMP,
};
use rmcp::schemars;
use serde::Deserialize;

use super::args::{self, collect_properties};
use super::objects::SearchArgs;

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchTasksArgs {
    #[serde(flatten)]
    pub search: SearchArgs,
    /// Owner id.
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::Identifier")]
    pub owner_id: Option<String>,
    /// Task status.
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::TaskStatus")]
    pub status: Option<String>,
    /// Earliest due date (ISO 8601).
    #[serde(default, deserialize_with = "args::opt_string")]
    pub due_date_from: Option<String>,
    /// Latest due date (ISO 8601).
    #[serde(default, deserialize_with = "args::opt_string")]
    pub due_date_to: Option<String>,
}

impl SearchTasksArgs {
    pub fn into_spec(self) -> SearchSpec {
        let filters = TaskFilters {
            owner_id: self.owner_id,
            status: self.status,
            due_from: self.due_date_from,
            due_to: self.due_date_to,
        }
        .into_filters();
        self.search.into_spec(filters, ExclusionFilter::default())
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskArgs {
    /// Contact the task is for.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub contact_id: String,
    /// Task subject.
    #[serde(deserialize_with = "args::string")]
    pub subject: String,
    /// Task notes.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub body: Option<String>,
    /// NOT_STARTED, IN_PROGRESS, WAITING, COMPLETED, or DEFERRED.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub status: Option<String>,
    /// LOW, MEDIUM, or HIGH.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub priority: Option<String>,
    /// Due date (ISO 8601, default now).
    #[serde(default, deserialize_with = "args::opt_string")]
    pub due_date: Option<String>,
    /// Owner id.
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::Identifier")]
    pub owner_id: Option<String>,
    /// CALL, EMAIL, or TODO.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub task_type: Option<String>,
}

impl CreateTaskArgs {
    pub fn into_parts(self) -> (String, PropertyMap) {
        let properties = collect_properties([
            (PROP_TASK_SUBJECT, Some(self.subject)),
            (PROP_TASK_BODY, self.body),
            (PROP_TASK_STATUS, self.status),
            (PROP_TASK_PRIORITY, self.priority),
            (PROP_TIMESTAMP, self.due_date),
            (PROP_OWNER_ID, self.owner_id),
            (PROP_TASK_TYPE, self.task_type),
        ]);
        (self.contact_id, properties)
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskArgs {
    /// Task id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub task_id: String,
    /// Task subject.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub subject: Option<String>,
    /// Task notes.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub body: Option<String>,
    /// NOT_STARTED, IN_PROGRESS, WAITING, COMPLETED, or DEFERRED.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub status: Option<String>,
    /// LOW, MEDIUM, or HIGH.
    #[serde(default, deserialize_with = "args::opt_string")]
    pub priority: Option<String>,
    /// Due date (ISO 8601).
    #[serde(default, deserialize_with = "args::opt_string")]
    pub due_date: Option<String>,
    /// Owner id.
    #[serde(default, deserialize_with = "args::opt_string")]
    #[schemars(with = "args::Identifier")]
    pub owner_id: Option<String>,
}

impl UpdateTaskArgs {
    /// Only the fields that were supplied end up in the update.
    pub fn into_parts(self) -> (String, PropertyMap) {
        let properties = collect_properties([
            (PROP_TASK_SUBJECT, self.subject),
            (PROP_TASK_BODY, self.body),
            (PROP_TASK_STATUS, self.status),
            (PROP_TASK_PRIORITY, self.priority),
            (PROP_TIMESTAMP, self.due_date),
            (PROP_OWNER_ID, self.owner_id),
        ]);
        (self.task_id, properties)
    }
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskIdArgs {
    /// Task id.
    #[serde(deserialize_with = "args::string")]
    #[schemars(with = "args::Identifier")]
    pub task_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::args::decode;
    use serde_json::json;

    #[test]
    fn task_id_alone_yields_no_properties() {
        let args: UpdateTaskArgs = decode("update_task", json!({ "taskId": 5 })).expect("decode");
        let (id, properties) = args.into_parts();
        assert_eq!(id, "5");
        assert!(properties.is_empty());
    }

    #[test]
    fn due_date_maps_to_the_task_timestamp() {
        let args: CreateTaskArgs = decode(
            "create_task",
            json!({ "contactId": "10", "subject": "Follow up", "dueDate": "2026-11-01T09:00:00Z" }),
        )
        .expect("decode");
        let (contact_id, properties) = args.into_parts();
        assert_eq!(contact_id, "10");
        assert_eq!(properties["hs_task_subject"], json!("Follow up"));
        assert_eq!(properties["hs_timestamp"], json!("2026-11-01T09:00:00Z"));
    }
}
