use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CompileApiError;

/// Request body for the compile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub code: String,
}

impl CompileRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Response body from the compile endpoint.
///
/// Both fields are kept as raw JSON so non-string payloads (`{"output": 7}`)
/// still decode; [`CompileResponse::into_outcome`] decides what they mean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// Decoded result of one compile round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Output(String),
    Error(String),
}

impl CompileResponse {
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            output: Some(Value::String(text.into())),
            error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            output: None,
            error: Some(Value::String(text.into())),
        }
    }

    /// A truthy `error` wins over `output`; a body with neither is malformed.
    pub fn into_outcome(self) -> Result<CompileOutcome, CompileApiError> {
        if let Some(error) = self.error.as_ref().filter(|value| is_truthy(value)) {
            return Ok(CompileOutcome::Error(display_value(error)));
        }

        match self.output {
            Some(Value::Null) | None => Err(CompileApiError::MalformedResponse(
                "response has neither 'output' nor 'error'".to_string(),
            )),
            Some(output) => Ok(CompileOutcome::Output(display_value(&output))),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
