use std::fmt;

use compile_api::{CompileApiClient, CompileApiConfig, CompileApiError, CompileOutcome, CompileRequest};

use crate::app::RunId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub run_id: RunId,
    pub code: String,
}

/// Result of one run, as delivered back to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    Output(String),
    CompileError(String),
    /// The request could not be completed or its reply could not be decoded.
    /// The cause is kept for diagnostics only.
    TransportFailed(String),
}

impl From<Result<CompileOutcome, CompileApiError>> for RunResult {
    fn from(result: Result<CompileOutcome, CompileApiError>) -> Self {
        match result {
            Ok(CompileOutcome::Output(output)) => Self::Output(output),
            Ok(CompileOutcome::Error(error)) => Self::CompileError(error),
            Err(error) => Self::TransportFailed(error.to_string()),
        }
    }
}

pub trait CompileBackend: Send + Sync + 'static {
    /// Executes one request to completion. Must not panic on transport errors.
    fn compile(&self, req: RunRequest) -> RunResult;
}

/// Backend that posts the buffer to a remote `/compile` endpoint.
pub struct HttpBackend {
    client: CompileApiClient,
}

impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("endpoint", &self.client.normalized_endpoint())
            .finish()
    }
}

impl HttpBackend {
    pub fn new(config: CompileApiConfig) -> Result<Self, CompileApiError> {
        Ok(Self {
            client: CompileApiClient::new(config)?,
        })
    }

    pub fn endpoint(&self) -> String {
        self.client.normalized_endpoint()
    }

    fn compile_blocking(&self, code: String) -> Result<CompileOutcome, CompileApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                CompileApiError::Unknown(format!("failed to initialize tokio runtime: {error}"))
            })?;

        runtime.block_on(self.client.compile(&CompileRequest::new(code)))
    }
}

impl CompileBackend for HttpBackend {
    fn compile(&self, req: RunRequest) -> RunResult {
        let run_id = req.run_id;
        let result = RunResult::from(self.compile_blocking(req.code));
        if let RunResult::TransportFailed(cause) = &result {
            tracing::debug!(run_id, %cause, "compile request failed");
        }
        result
    }
}
