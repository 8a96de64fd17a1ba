//! The codepad application: run controller, compile backends, runtime host and
//! the terminal front end.
//!
//! Environment:
//! - `CODEPAD_CONFIG_PATH`: optional JSON config file.
//! - `CODEPAD_BASE_URL`, `CODEPAD_TIMEOUT_SEC`, `CODEPAD_RUN_POLICY`: overrides.
//! - `CODEPAD_LOG`, `CODEPAD_LOG_DIR`: tracing filter and log directory.
//! - `NO_COLOR`, `CODEPAD_COLOR`, `CODEPAD_LINE_NUMBERS`: rendering.

pub mod app;
pub mod backend;
pub mod batch;
pub mod commands;
pub mod config;
pub mod logging;
pub mod repl;
pub mod runtime;

pub use app::{App, HostOps, RunId, RunPolicy};
pub use backend::{CompileBackend, HttpBackend, RunRequest, RunResult};
pub use config::{AppConfig, ConfigError};
pub use runtime::{LoopEvent, RunEvent, RuntimeController, RuntimeHandle};
