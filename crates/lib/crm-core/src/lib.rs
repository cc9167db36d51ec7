//! Core services for crm-mcp.
//!
//! This crate owns the remote object client, the result shaping pipeline
//! (client-side exclusion filtering and compaction), and the control plane
//! that maps each operation onto one or more remote calls.

pub mod client;
pub mod control;
pub mod error;
pub mod shaping;

pub use error::{CrmError, CrmResult};
