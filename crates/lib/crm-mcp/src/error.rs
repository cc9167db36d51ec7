use crm_core::CrmError;
use thiserror::Error;

/// Failure of a single `tools/call`.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },
    #[error(transparent)]
    Crm(#[from] CrmError),
}

pub type ToolResult<T> = Result<T, ToolError>;
