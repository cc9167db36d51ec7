use clap::{ArgAction, Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;

use crm_core::client::DEFAULT_BASE_URL;
use url::Url;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "crm-mcpd", version, about = "CRM MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "CRM_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[arg(long, env = "CRM_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: String,

    #[arg(long, env = "CRM_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "CRM_MCP_SERVE",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(
        long = "stdio",
        env = "CRM_ENABLE_STDIO",
        default_value_t = false,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(long, env = "CRM_LOG", default_value = DEFAULT_LOG_FILTER)]
    log: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct CrmConfig {
    pub access_token: Option<String>,
    pub api_base_url: Url,
    pub mcp_http_addr: SocketAddr,
    pub mcp_serve: bool,
    pub enable_stdio: bool,
    pub log: String,
}

impl fmt::Debug for CrmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrmConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url.as_str())
            .field("mcp_http_addr", &self.mcp_http_addr)
            .field("mcp_serve", &self.mcp_serve)
            .field("enable_stdio", &self.enable_stdio)
            .field("log", &self.log)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl CrmConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for CrmConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let access_token = args
            .access_token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let base_url = args.api_base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingSetting("CRM_API_BASE_URL"));
        }
        let api_base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidSetting {
                name: "CRM_API_BASE_URL",
                value: args.api_base_url.clone(),
            })?;

        if !args.mcp_serve && !args.enable_stdio {
            return Err(ConfigError::InvalidSetting {
                name: "CRM_MCP_SERVE",
                value: "false (with CRM_ENABLE_STDIO also false, no transport is enabled)"
                    .to_string(),
            });
        }

        let log = if args.log.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            args.log
        };

        Ok(Self {
            access_token,
            api_base_url,
            mcp_http_addr: args.mcp_http_addr,
            mcp_serve: args.mcp_serve,
            enable_stdio: args.enable_stdio,
            log,
        })
    }
}
