//! Error taxonomy for a single notification run.
use thiserror::Error;

pub type NotifyResult<T> = Result<T, NotifyError>;

/// Every variant is terminal: the binary reports it and exits with status 1.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0}")]
    MissingRequiredInput(&'static str),

    #[error("{0}")]
    Payload(#[from] serde_json::Error),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook responded with {status}: {body}")]
    DeliveryRejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl NotifyError {
    /// Heading printed (in red) ahead of the error detail.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::MissingRequiredInput(_) => "Issue with input:",
            Self::Payload(_) => "Failed to create JSON payload:",
            Self::Transport(_) => "Failed to send the request:",
            Self::DeliveryRejected { .. } => "Request failed",
        }
    }
}
