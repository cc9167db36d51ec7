use thiserror::Error;

/// Failures raised below the protocol boundary.
#[derive(Debug, Error)]
pub enum CrmError {
    /// No bearer credential was configured.
    #[error("CRM access token is not configured (set CRM_ACCESS_TOKEN)")]
    NotConfigured,

    /// The remote system answered with a non-success status.
    #[error("CRM API error ({status}): {body}")]
    Remote { status: u16, body: String },

    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid CRM URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A remote payload could not be decoded.
    #[error("failed to decode CRM response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A remote payload decoded but lacked a member the operation needs.
    #[error("unexpected CRM response: {0}")]
    UnexpectedResponse(String),

    /// Caller input that would produce a malformed remote call.
    #[error("{0}")]
    Validation(String),
}

impl CrmError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type CrmResult<T> = Result<T, CrmError>;
