//! Transport-only client for the `/compile` endpoint.
//!
//! This crate owns request building and response decoding for the compile
//! contract only. It contains no editor state and no terminal coupling.
//!
//! Wire contract: `POST <base>/compile` with `{"code": "..."}`; the server answers
//! with either `{"output": "..."}` or `{"error": "..."}`.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;

pub use client::CompileApiClient;
pub use config::CompileApiConfig;
pub use error::CompileApiError;
pub use payload::{CompileOutcome, CompileRequest, CompileResponse};
pub use url::normalize_compile_url;
