//! CRM object model and request shapes for crm-mcp.
//!
//! This crate defines the data model shared by the remote client, the result
//! shaping pipeline, and the tool layer. Property maps are schema-free: the
//! remote system decides which keys exist.

pub mod models;
pub mod requests;
pub mod schema;

pub use models::*;
pub use requests::*;
