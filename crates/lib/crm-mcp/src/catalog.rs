//! Static tool catalog.
//!
//! The catalog is declarative data built once per process. [`ToolName`] is the
//! single list of callable tools; both discovery and dispatch match on it
//! exhaustively, so a tool cannot be listed without being callable or the
//! reverse.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use rmcp::model::{JsonObject, Tool};
use rmcp::schemars::generate::SchemaSettings;
use rmcp::schemars::transform::transform_subschemas;
use rmcp::schemars::{JsonSchema, Schema};
use serde_json::Value;

use crate::error::ToolError;
use crate::tools::companies::{CompanyIdArgs, CreateCompanyArgs, GetCompanyArgs, UpdateCompanyArgs};
use crate::tools::contacts::{
    ContactIdArgs,
    CreateContactArgs,
    GetContactArgs,
    ListContactsArgs,
    SearchContactsArgs,
    UpdateContactArgs,
};
use crate::tools::deals::{
    CreateDealArgs,
    DealIdArgs,
    GetDealArgs,
    GetDealPipelinesArgs,
    SearchDealsArgs,
    UpdateDealArgs,
};
use crate::tools::engagements::{CreateEmailArgs, CreateNoteArgs, GetEngagementsArgs};
use crate::tools::objects::{ListArgs, SearchArgs};
use crate::tools::schema::{GetOwnersArgs, GetPropertiesArgs};
use crate::tools::tasks::{CreateTaskArgs, SearchTasksArgs, TaskIdArgs, UpdateTaskArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListContacts,
    GetContact,
    SearchContacts,
    CreateContact,
    UpdateContact,
    DeleteContact,
    ListCompanies,
    GetCompany,
    SearchCompanies,
    CreateCompany,
    UpdateCompany,
    DeleteCompany,
    ListDeals,
    GetDeal,
    SearchDeals,
    CreateDeal,
    UpdateDeal,
    DeleteDeal,
    GetDealPipelines,
    SearchTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
    GetEngagements,
    CreateNote,
    CreateEmail,
    GetProperties,
    GetOwners,
}

impl ToolName {
    pub const ALL: [Self; 28] = [
        Self::ListContacts,
        Self::GetContact,
        Self::SearchContacts,
        Self::CreateContact,
        Self::UpdateContact,
        Self::DeleteContact,
        Self::ListCompanies,
        Self::GetCompany,
        Self::SearchCompanies,
        Self::CreateCompany,
        Self::UpdateCompany,
        Self::DeleteCompany,
        Self::ListDeals,
        Self::GetDeal,
        Self::SearchDeals,
        Self::CreateDeal,
        Self::UpdateDeal,
        Self::DeleteDeal,
        Self::GetDealPipelines,
        Self::SearchTasks,
        Self::CreateTask,
        Self::UpdateTask,
        Self::DeleteTask,
        Self::GetEngagements,
        Self::CreateNote,
        Self::CreateEmail,
        Self::GetProperties,
        Self::GetOwners,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListContacts => "list_contacts",
            Self::GetContact => "get_contact",
            Self::SearchContacts => "search_contacts",
            Self::CreateContact => "create_contact",
            Self::UpdateContact => "update_contact",
            Self::DeleteContact => "delete_contact",
            Self::ListCompanies => "list_companies",
            Self::GetCompany => "get_company",
            Self::SearchCompanies => "search_companies",
            Self::CreateCompany => "create_company",
            Self::UpdateCompany => "update_company",
            Self::DeleteCompany => "delete_company",
            Self::ListDeals => "list_deals",
            Self::GetDeal => "get_deal",
            Self::SearchDeals => "search_deals",
            Self::CreateDeal => "create_deal",
            Self::UpdateDeal => "update_deal",
            Self::DeleteDeal => "delete_deal",
            Self::GetDealPipelines => "get_deal_pipelines",
            Self::SearchTasks => "search_tasks",
            Self::CreateTask => "create_task",
            Self::UpdateTask => "update_task",
            Self::DeleteTask => "delete_task",
            Self::GetEngagements => "get_engagements",
            Self::CreateNote => "create_note",
            Self::CreateEmail => "create_email",
            Self::GetProperties => "get_properties",
            Self::GetOwners => "get_owners",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }
}

static CATALOG: LazyLock<Vec<Tool>> =
    LazyLock::new(|| ToolName::ALL.into_iter().map(definition).collect());

/// The full process-wide catalog, in [`ToolName::ALL`] order.
#[must_use]
pub fn catalog() -> &'static [Tool] {
    &CATALOG
}

/// Optional fields carry a `null` default that says nothing to a client.
fn drop_null_defaults(schema: &mut Schema) {
    if schema.get("default").is_some_and(Value::is_null) {
        schema.remove("default");
    }
    transform_subschemas(&mut drop_null_defaults, schema);
}

/// Input schema for an argument struct, as served in `inputSchema`.
fn input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    let schema = SchemaSettings::draft2020_12()
        .with_transform(drop_null_defaults)
        .into_generator()
        .into_root_schema_for::<T>();
    match schema.to_value() {
        Value::Object(object) => Arc::new(object),
        _ => Arc::new(JsonObject::new()),
    }
}

fn definition(tool: ToolName) -> Tool {
    let (description, schema) = match tool {
        ToolName::ListContacts => (
            "List contacts with paging and property projection. Contacts can be dropped client-side by company or job title.",
            input_schema::<ListContactsArgs>(),
        ),
        ToolName::GetContact => ("Fetch a single contact by id.", input_schema::<GetContactArgs>()),
        ToolName::SearchContacts => (
            "Search contacts with free text, filter groups, and sorts. Exclusions are applied after the search.",
            input_schema::<SearchContactsArgs>(),
        ),
        ToolName::CreateContact => ("Create a contact.", input_schema::<CreateContactArgs>()),
        ToolName::UpdateContact => (
            "Update properties on a contact.",
            input_schema::<UpdateContactArgs>(),
        ),
        ToolName::DeleteContact => ("Delete (archive) a contact.", input_schema::<ContactIdArgs>()),
        ToolName::ListCompanies => (
            "List companies with paging and property projection.",
            input_schema::<ListArgs>(),
        ),
        ToolName::GetCompany => ("Fetch a single company by id.", input_schema::<GetCompanyArgs>()),
        ToolName::SearchCompanies => (
            "Search companies with free text, filter groups, and sorts.",
            input_schema::<SearchArgs>(),
        ),
        ToolName::CreateCompany => ("Create a company.", input_schema::<CreateCompanyArgs>()),
        ToolName::UpdateCompany => (
            "Update properties on a company.",
            input_schema::<UpdateCompanyArgs>(),
        ),
        ToolName::DeleteCompany => ("Delete (archive) a company.", input_schema::<CompanyIdArgs>()),
        ToolName::ListDeals => (
            "List deals with paging and property projection.",
            input_schema::<ListArgs>(),
        ),
        ToolName::GetDeal => ("Fetch a single deal by id.", input_schema::<GetDealArgs>()),
        ToolName::SearchDeals => (
            "Search deals. Owner, stage, pipeline, close date range, and amount thresholds are ANDed into the search.",
            input_schema::<SearchDealsArgs>(),
        ),
        ToolName::CreateDeal => (
            "Create a deal, then optionally associate it with a contact and a company.",
            input_schema::<CreateDealArgs>(),
        ),
        ToolName::UpdateDeal => ("Update properties on a deal.", input_schema::<UpdateDealArgs>()),
        ToolName::DeleteDeal => ("Delete (archive) a deal.", input_schema::<DealIdArgs>()),
        ToolName::GetDealPipelines => (
            "List deal pipelines and their stages.",
            input_schema::<GetDealPipelinesArgs>(),
        ),
        ToolName::SearchTasks => (
            "Search tasks. Owner, status, and due date range are ANDed into the search.",
            input_schema::<SearchTasksArgs>(),
        ),
        ToolName::CreateTask => (
            "Create a task linked to a contact. The due date defaults to now.",
            input_schema::<CreateTaskArgs>(),
        ),
        ToolName::UpdateTask => (
            "Update a task. At least one field besides taskId is required.",
            input_schema::<UpdateTaskArgs>(),
        ),
        ToolName::DeleteTask => ("Delete a task.", input_schema::<TaskIdArgs>()),
        ToolName::GetEngagements => (
            "Fetch a contact's notes, emails, calls, meetings, and tasks. A type that fails to load comes back empty.",
            input_schema::<GetEngagementsArgs>(),
        ),
        ToolName::CreateNote => ("Log a note on a contact.", input_schema::<CreateNoteArgs>()),
        ToolName::CreateEmail => ("Log an email on a contact.", input_schema::<CreateEmailArgs>()),
        ToolName::GetProperties => (
            "List the property schema (name, label, type) for an object type.",
            input_schema::<GetPropertiesArgs>(),
        ),
        ToolName::GetOwners => (
            "List CRM owners (users who can own records).",
            input_schema::<GetOwnersArgs>(),
        ),
    };

    Tool::new(tool.as_str(), description, schema)
}
