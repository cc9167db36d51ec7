//! Tool dispatch.
//!
//! Every catalog entry maps to one [`ToolCall`] variant carrying its decoded
//! arguments. Dispatch is an exhaustive match that hands the call to the
//! control plane, so each tool's remote call pattern lives in one place.

pub mod args;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod engagements;
pub mod objects;
pub mod schema;
pub mod tasks;

use crm_core::CrmError;
use crm_core::client::CrmApi;
use crm_core::shaping::ExclusionFilter;
use crm_model::ObjectType;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use self::args::decode;
use self::companies::{CompanyIdArgs, CreateCompanyArgs, GetCompanyArgs, UpdateCompanyArgs};
use self::contacts::{
    ContactIdArgs,
    CreateContactArgs,
    GetContactArgs,
    ListContactsArgs,
    SearchContactsArgs,
    UpdateContactArgs,
};
use self::deals::{
    CreateDealArgs,
    DealIdArgs,
    GetDealArgs,
    GetDealPipelinesArgs,
    SearchDealsArgs,
    UpdateDealArgs,
};
use self::engagements::{CreateEmailArgs, CreateNoteArgs, GetEngagementsArgs};
use self::objects::{ListArgs, SearchArgs};
use self::schema::{GetOwnersArgs, GetPropertiesArgs};
use self::tasks::{CreateTaskArgs, SearchTasksArgs, TaskIdArgs, UpdateTaskArgs};
pub use self::args::ShapingArgs;
use crate::CrmMcp;
use crate::catalog::ToolName;
use crate::error::{ToolError, ToolResult};

/// A decoded tool invocation.
#[derive(Debug, Clone)]
pub enum ToolCall {
    ListContacts(ListContactsArgs),
    GetContact(GetContactArgs),
    SearchContacts(SearchContactsArgs),
    CreateContact(CreateContactArgs),
    UpdateContact(UpdateContactArgs),
    DeleteContact(ContactIdArgs),
    ListCompanies(ListArgs),
    GetCompany(GetCompanyArgs),
    SearchCompanies(SearchArgs),
    CreateCompany(CreateCompanyArgs),
    UpdateCompany(UpdateCompanyArgs),
    DeleteCompany(CompanyIdArgs),
    ListDeals(ListArgs),
    GetDeal(GetDealArgs),
    SearchDeals(SearchDealsArgs),
    CreateDeal(CreateDealArgs),
    UpdateDeal(UpdateDealArgs),
    DeleteDeal(DealIdArgs),
    GetDealPipelines,
    SearchTasks(SearchTasksArgs),
    CreateTask(CreateTaskArgs),
    UpdateTask(UpdateTaskArgs),
    DeleteTask(TaskIdArgs),
    GetEngagements(GetEngagementsArgs),
    CreateNote(CreateNoteArgs),
    CreateEmail(CreateEmailArgs),
    GetProperties(GetPropertiesArgs),
    GetOwners(GetOwnersArgs),
}

impl ToolCall {
    /// Resolves a tool name against the catalog and decodes its arguments.
    ///
    /// # Errors
    /// `UnknownTool` for names outside the catalog, `InvalidArguments` when
    /// the argument object cannot be coerced.
    pub fn parse(name: &str, arguments: Value) -> ToolResult<Self> {
        let tool: ToolName = name.parse()?;
        let name = tool.as_str();
        let call = match tool {
            ToolName::ListContacts => Self::ListContacts(decode(name, arguments)?),
            ToolName::GetContact => Self::GetContact(decode(name, arguments)?),
            ToolName::SearchContacts => Self::SearchContacts(decode(name, arguments)?),
            ToolName::CreateContact => Self::CreateContact(decode(name, arguments)?),
            ToolName::UpdateContact => Self::UpdateContact(decode(name, arguments)?),
            ToolName::DeleteContact => Self::DeleteContact(decode(name, arguments)?),
            ToolName::ListCompanies => Self::ListCompanies(decode(name, arguments)?),
            ToolName::GetCompany => Self::GetCompany(decode(name, arguments)?),
            ToolName::SearchCompanies => Self::SearchCompanies(decode(name, arguments)?),
            ToolName::CreateCompany => Self::CreateCompany(decode(name, arguments)?),
            ToolName::UpdateCompany => Self::UpdateCompany(decode(name, arguments)?),
            ToolName::DeleteCompany => Self::DeleteCompany(decode(name, arguments)?),
            ToolName::ListDeals => Self::ListDeals(decode(name, arguments)?),
            ToolName::GetDeal => Self::GetDeal(decode(name, arguments)?),
            ToolName::SearchDeals => Self::SearchDeals(decode(name, arguments)?),
            ToolName::CreateDeal => Self::CreateDeal(decode(name, arguments)?),
            ToolName::UpdateDeal => Self::UpdateDeal(decode(name, arguments)?),
            ToolName::DeleteDeal => Self::DeleteDeal(decode(name, arguments)?),
            ToolName::GetDealPipelines => {
                decode::<GetDealPipelinesArgs>(name, arguments)?;
                Self::GetDealPipelines
            }
            ToolName::SearchTasks => Self::SearchTasks(decode(name, arguments)?),
            ToolName::CreateTask => Self::CreateTask(decode(name, arguments)?),
            ToolName::UpdateTask => Self::UpdateTask(decode(name, arguments)?),
            ToolName::DeleteTask => Self::DeleteTask(decode(name, arguments)?),
            ToolName::GetEngagements => Self::GetEngagements(decode(name, arguments)?),
            ToolName::CreateNote => Self::CreateNote(decode(name, arguments)?),
            ToolName::CreateEmail => Self::CreateEmail(decode(name, arguments)?),
            ToolName::GetProperties => Self::GetProperties(decode(name, arguments)?),
            ToolName::GetOwners => Self::GetOwners(decode(name, arguments)?),
        };
        Ok(call)
    }
}

fn to_json<T: Serialize>(value: &T) -> ToolResult<Value> {
    serde_json::to_value(value).map_err(|err| ToolError::Crm(CrmError::Decode(err)))
}

impl<A: CrmApi> CrmMcp<A> {
    /// Runs one tool by name and returns its JSON result.
    ///
    /// # Errors
    /// Any parse failure or control plane error for this call.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolResult<Value> {
        let call = ToolCall::parse(name, arguments)?;
        debug!(tool = name, "dispatching tool");
        self.dispatch(call).await
    }

    /// Executes a decoded call.
    ///
    /// # Errors
    /// Propagates control plane errors.
    pub async fn dispatch(&self, call: ToolCall) -> ToolResult<Value> {
        let control = self.control();
        match call {
            ToolCall::ListContacts(args) => {
                to_json(&control.list_objects(ObjectType::Contacts, args.into_request()).await?)
            }
            ToolCall::GetContact(args) => {
                to_json(&control.get_object(ObjectType::Contacts, args.into_request()).await?)
            }
            ToolCall::SearchContacts(args) => {
                to_json(&control.search_objects(ObjectType::Contacts, args.into_spec()).await?)
            }
            ToolCall::CreateContact(args) => Ok(control
                .create_object(ObjectType::Contacts, args.into_properties())
                .await?),
            ToolCall::UpdateContact(args) => Ok(control
                .update_object(ObjectType::Contacts, args.contact_id, args.properties)
                .await?),
            ToolCall::DeleteContact(args) => Ok(control
                .delete_object(ObjectType::Contacts, args.contact_id)
                .await?),

            ToolCall::ListCompanies(args) => to_json(
                &control
                    .list_objects(ObjectType::Companies, args.into_request(ExclusionFilter::default()))
                    .await?,
            ),
            ToolCall::GetCompany(args) => {
                to_json(&control.get_object(ObjectType::Companies, args.into_request()).await?)
            }
            ToolCall::SearchCompanies(args) => to_json(
                &control
                    .search_objects(
                        ObjectType::Companies,
                        args.into_spec(Vec::new(), ExclusionFilter::default()),
                    )
                    .await?,
            ),
            ToolCall::CreateCompany(args) => Ok(control
                .create_object(ObjectType::Companies, args.into_properties())
                .await?),
            ToolCall::UpdateCompany(args) => Ok(control
                .update_object(ObjectType::Companies, args.company_id, args.properties)
                .await?),
            ToolCall::DeleteCompany(args) => Ok(control
                .delete_object(ObjectType::Companies, args.company_id)
                .await?),

            ToolCall::ListDeals(args) => to_json(
                &control
                    .list_objects(ObjectType::Deals, args.into_request(ExclusionFilter::default()))
                    .await?,
            ),
            ToolCall::GetDeal(args) => {
                to_json(&control.get_object(ObjectType::Deals, args.into_request()).await?)
            }
            ToolCall::SearchDeals(args) => {
                to_json(&control.search_objects(ObjectType::Deals, args.into_spec()).await?)
            }
            ToolCall::CreateDeal(args) => Ok(control.create_deal(args.into_request()).await?),
            ToolCall::UpdateDeal(args) => Ok(control
                .update_object(ObjectType::Deals, args.deal_id, args.properties)
                .await?),
            ToolCall::DeleteDeal(args) => Ok(control
                .delete_object(ObjectType::Deals, args.deal_id)
                .await?),
            ToolCall::GetDealPipelines => Ok(control.list_deal_pipelines().await?),

            ToolCall::SearchTasks(args) => {
                to_json(&control.search_objects(ObjectType::Tasks, args.into_spec()).await?)
            }
            ToolCall::CreateTask(args) => {
                let (contact_id, properties) = args.into_parts();
                Ok(control.create_task(contact_id, properties).await?)
            }
            ToolCall::UpdateTask(args) => {
                let (task_id, properties) = args.into_parts();
                Ok(control
                    .update_object(ObjectType::Tasks, task_id, properties)
                    .await?)
            }
            ToolCall::DeleteTask(args) => Ok(control
                .delete_object(ObjectType::Tasks, args.task_id)
                .await?),

            ToolCall::GetEngagements(args) => {
                to_json(&control.get_engagements(args.into_request()).await?)
            }
            ToolCall::CreateNote(args) => {
                let (contact_id, properties) = args.into_parts();
                Ok(control.create_note(contact_id, properties).await?)
            }
            ToolCall::CreateEmail(args) => {
                let (contact_id, properties) = args.into_parts();
                Ok(control.create_email(contact_id, properties).await?)
            }

            ToolCall::GetProperties(args) => Ok(control.list_properties(args.object_type).await?),
            ToolCall::GetOwners(args) => Ok(control
                .list_owners(args.limit, args.after, args.email)
                .await?),
        }
    }
}
