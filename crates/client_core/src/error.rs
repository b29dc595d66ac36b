use shared::error::ValidationError;
use thiserror::Error;

pub const CONNECTIVITY_MESSAGE: &str = "Could not connect to the simulation server.";
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "Received an invalid response from the simulation server.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Surface area '{0}' is not a number.")]
    NotANumber(String),
    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

/// Every way a submission can end without a result to show.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("simulation server returned status {status}")]
    Http { status: u16, detail: Option<String> },
    #[error("simulation server unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed simulation response: {0}")]
    MalformedResponse(String),
}

impl SubmitError {
    /// Text for the error alert. Server-supplied detail is shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(err) => err.to_string(),
            Self::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Http {
                status,
                detail: None,
            } => format!("An error occurred (Status: {status})"),
            Self::Transport(_) => CONNECTIVITY_MESSAGE.to_string(),
            Self::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
        }
    }
}
