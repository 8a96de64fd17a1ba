use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use codepad::{AnsiRenderer, EditorOptions, EditorSession, LineEditor, OutputKind, OutputLog, RenderConfig};
use codepad_app::app::App;
use codepad_app::backend::{CompileBackend, HttpBackend};
use codepad_app::batch::run_source;
use codepad_app::config::AppConfig;
use codepad_app::logging;
use codepad_app::repl::{self, Repl, DEFAULT_PROMPT};
use codepad_app::runtime::{RuntimeController, RuntimeHandle};

fn main() -> io::Result<ExitCode> {
    let _logging = logging::init();

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    let render = RenderConfig::from_env();
    let backend = HttpBackend::new(config.api.clone()).map_err(io::Error::other)?;
    tracing::info!(
        endpoint = %backend.endpoint(),
        policy = %config.run_policy,
        "codepad starting"
    );

    let app = build_app(&config, render);
    match std::env::args_os().nth(1) {
        Some(path) => run_file(Path::new(&path), app, &backend),
        None => run_interactive(app, Arc::new(backend)),
    }
}

fn build_app(config: &AppConfig, render: RenderConfig) -> App {
    let editor = EditorSession::new(Box::new(LineEditor::new(EditorOptions {
        line_numbers: render.line_numbers,
        ..EditorOptions::default()
    })));
    let log = OutputLog::new(Box::new(AnsiRenderer::stdout(render.color)));

    App::with_parts(editor, log)
        .with_policy(config.run_policy)
        .with_listing_width(config.listing_width)
}

fn run_file(path: &Path, mut app: App, backend: &dyn CompileBackend) -> io::Result<ExitCode> {
    let source = std::fs::read_to_string(path)?;
    match run_source(&mut app, backend, &source) {
        Ok(OutputKind::Success) => Ok(ExitCode::SUCCESS),
        Ok(OutputKind::Error) => Ok(ExitCode::FAILURE),
        Err(message) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_interactive(app: App, backend: Arc<dyn CompileBackend>) -> io::Result<ExitCode> {
    let (runtime_handle, events) = RuntimeHandle::channel();
    let controller = RuntimeController::new(
        Arc::new(Mutex::new(app)),
        runtime_handle.clone(),
        backend,
    );

    let interactive = io::stdin().is_terminal();
    repl::spawn_input_reader(io::BufReader::new(io::stdin()), runtime_handle.clone())?;

    #[cfg(unix)]
    if let Err(error) = repl::spawn_signal_forwarder(runtime_handle) {
        tracing::warn!(%error, "failed to install signal handlers");
    }

    let mut repl = Repl::new(controller, events, io::stdout());
    if interactive {
        repl = repl.with_prompt(DEFAULT_PROMPT);
    }
    repl.run()?;

    Ok(ExitCode::SUCCESS)
}
