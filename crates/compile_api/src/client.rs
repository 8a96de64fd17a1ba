use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::config::CompileApiConfig;
use crate::error::CompileApiError;
use crate::headers::build_headers;
use crate::payload::{CompileOutcome, CompileRequest, CompileResponse};
use crate::url::normalize_compile_url;

#[derive(Debug)]
pub struct CompileApiClient {
    http: Client,
    config: CompileApiConfig,
}

impl CompileApiClient {
    /// Builds the client. Headers are validated here so a bad config fails at startup.
    pub fn new(config: CompileApiConfig) -> Result<Self, CompileApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CompileApiError::from)?;
        let client = Self { http, config };
        client.build_headers()?;
        Ok(client)
    }

    pub fn config(&self) -> &CompileApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_compile_url(&self.config.base_url)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, CompileApiError> {
        let mut out = HeaderMap::new();
        for (key, value) in build_headers(&self.config) {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| CompileApiError::InvalidHeader(format!("invalid key: {key}")))?,
                HeaderValue::from_str(&value).map_err(|_| {
                    CompileApiError::InvalidHeader(format!("invalid value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &CompileRequest,
    ) -> Result<reqwest::RequestBuilder, CompileApiError> {
        let headers = self.build_headers()?;
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Sends one compile request and decodes the reply.
    ///
    /// The HTTP status is not interpreted: a JSON body carrying `error` is a
    /// compile error whatever the status, and an undecodable body is a
    /// [`CompileApiError::Serde`] failure.
    pub async fn compile(
        &self,
        request: &CompileRequest,
    ) -> Result<CompileOutcome, CompileApiError> {
        let response = self.build_request(request)?.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "compile endpoint answered with non-success status");
        }

        let body = response.bytes().await?;
        tracing::debug!(%status, bytes = body.len(), "compile response received");

        let decoded: CompileResponse = serde_json::from_slice(&body)?;
        decoded.into_outcome()
    }

    /// Convenience wrapper over [`CompileApiClient::compile`] for raw source text.
    pub async fn compile_code(&self, code: &str) -> Result<CompileOutcome, CompileApiError> {
        self.compile(&CompileRequest::new(code)).await
    }
}
