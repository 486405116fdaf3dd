use handyman_store::StorageError;
use serde_json::Value;
use thiserror::Error;

pub const REQUEST_FAILED: &str = "request failed";
pub const NETWORK_ERROR: &str = "network error";
pub const LOGIN_FAILED: &str = "login failed";
pub const REGISTER_FAILED: &str = "registration failed";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport could not complete the exchange.
    #[error("{0}")]
    Transport(String),

    /// The server answered without a usable body.
    #[error("no response from server")]
    EmptyResponse,

    /// Status outside 200..=299.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx status carrying a non-success `code`.
    #[error("{message}")]
    Api { code: Value, message: String },

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("local storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// Text suitable for showing to the end user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for transport-level rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
