//! File-backed tracing setup. Logs never go to stdout, which belongs to the REPL.

use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_DIR_ENV_VAR: &str = "CODEPAD_LOG_DIR";
pub const LOG_FILTER_ENV_VAR: &str = "CODEPAD_LOG";
pub const DEFAULT_LOG_FILTER: &str = "codepad=info,codepad_app=info,compile_api=info";

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

pub fn default_log_dir() -> PathBuf {
    std::env::var(LOG_DIR_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("codepad").join("logs"))
}

/// Installs the global subscriber. Returns `None` when the log directory cannot
/// be created or a subscriber is already installed.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = default_log_dir();
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "codepad.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_env(LOG_FILTER_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(chain_panic_hook(previous));

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

/// Records the panic as an `error` event, then runs `previous`.
fn chain_panic_hook(previous: PanicHook) -> PanicHook {
    Box::new(move |panic_info: &PanicHookInfo<'_>| {
        tracing::error!(panic = %panic_info, "panic");
        previous(panic_info);
    })
}
