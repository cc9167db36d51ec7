//! MCP server implementation for crm-mcp.
//!
//! This crate exposes the CRM control plane as a static tool catalog behind a
//! JSON-RPC router, reachable over HTTP or stdio.

pub mod catalog;
pub mod error;
mod helpers;
pub mod router;
pub mod server;
pub mod tools;

use crm_core::client::CrmApi;
use crm_core::control::CrmControlPlane;
use rmcp::model::ProtocolVersion;

pub use catalog::{ToolName, catalog};
pub use error::{ToolError, ToolResult};
pub use router::RpcResponse;

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "crm-mcp";

/// MCP protocol revision spoken by the router.
pub const PROTOCOL_VERSION: ProtocolVersion = ProtocolVersion::V_2024_11_05;

const SERVER_INSTRUCTIONS: &str = r"crm-mcp exposes CRM contacts, companies, deals, tasks, and engagements as tools.

Workflow:
1. Find records with `search_contacts`, `search_companies`, `search_deals`, or `search_tasks`.
   `filterGroups` are ORed; filters inside a group are ANDed. Convenience filters such as
   `ownerId`, `dealstage`, or `dueDateFrom` are ANDed into every group.
2. Read details with `get_contact`, `get_company`, `get_deal`, and `get_engagements`.
3. Write with the `create_*`, `update_*`, and `delete_*` tools. `create_deal`, `create_task`,
   `create_note`, and `create_email` create the record first and then link it; if a link
   fails the record still exists.
4. Use `get_properties`, `get_deal_pipelines`, and `get_owners` to discover valid property
   names, stage ids, and owner ids.

Notes:
- Text properties are truncated to 500 characters unless `maxPropertyLength` says otherwise
  (0 or `unbounded` disables truncation).
- `excludeCompanies` and `excludeJobTitles` are case-insensitive substring matches applied after
  the fetch; `_meta.excluded` reports how many records they removed.";

/// Tool server over a CRM control plane.
pub struct CrmMcp<A: CrmApi> {
    control: CrmControlPlane<A>,
}

impl<A: CrmApi> Clone for CrmMcp<A> {
    fn clone(&self) -> Self {
        Self {
            control: self.control.clone(),
        }
    }
}

impl<A: CrmApi> CrmMcp<A> {
    /// Creates a server that owns its API client.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_control(CrmControlPlane::new(api))
    }

    #[must_use]
    pub const fn with_control(control: CrmControlPlane<A>) -> Self {
        Self { control }
    }

    #[must_use]
    pub const fn control(&self) -> &CrmControlPlane<A> {
        &self.control
    }

    /// Workflow guidance returned from `initialize`.
    #[must_use]
    pub const fn instructions(&self) -> &'static str {
        SERVER_INSTRUCTIONS
    }
}
