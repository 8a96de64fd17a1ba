use std::fmt;

use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum CompileApiError {
    InvalidHeader(String),
    Request(reqwest::Error),
    Serde(JsonError),
    MalformedResponse(String),
    Unknown(String),
}

impl fmt::Display for CompileApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::MalformedResponse(message) => write!(f, "malformed response: {message}"),
            Self::Unknown(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for CompileApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(error) => Some(error),
            Self::Serde(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CompileApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for CompileApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}
