use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use codepad::{EditorSession, ExampleSet, OutputEntry, OutputLog};
use serde::Deserialize;

use crate::backend::RunResult;
use crate::commands::{parse_command, Command, HELP_TEXT};

pub type RunId = u64;

pub const OUTPUT_PREFIX: &str = "Output: ";
pub const ERROR_PREFIX: &str = "Error: ";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Error: Failed to compile code";
pub const RUN_ALREADY_IN_PROGRESS: &str = "Run already in progress";
pub const DEFAULT_LISTING_WIDTH: usize = 80;

/// How runs triggered while another is in flight are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunPolicy {
    /// Every run is sent; every completion is appended in arrival order.
    #[default]
    Concurrent,
    /// Completions older than an already applied one are discarded.
    LatestWins,
    /// A run is refused while another is in flight.
    Serial,
}

impl RunPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concurrent => "concurrent",
            Self::LatestWins => "latest-wins",
            Self::Serial => "serial",
        }
    }
}

impl fmt::Display for RunPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "concurrent" => Ok(Self::Concurrent),
            "latest-wins" => Ok(Self::LatestWins),
            "serial" => Ok(Self::Serial),
            other => Err(format!(
                "unknown run policy '{other}' (expected concurrent, latest-wins or serial)"
            )),
        }
    }
}

/// Operations the app needs from whatever hosts it.
pub trait HostOps {
    fn start_run(&mut self, code: String) -> Result<RunId, String>;
    /// Shows a transient message that is not part of the output log.
    fn notify(&mut self, text: String);
    fn request_render(&mut self);
    fn request_stop(&mut self);
}

#[derive(Debug)]
pub struct App {
    pub editor: EditorSession,
    pub log: OutputLog,
    examples: &'static ExampleSet,
    policy: RunPolicy,
    listing_width: usize,
    in_flight: BTreeSet<RunId>,
    newest_applied: Option<RunId>,
    exit_when_idle: bool,
    pub should_exit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_parts(EditorSession::default(), OutputLog::default())
    }

    pub fn with_parts(editor: EditorSession, log: OutputLog) -> Self {
        Self {
            editor,
            log,
            examples: ExampleSet::builtin(),
            policy: RunPolicy::default(),
            listing_width: DEFAULT_LISTING_WIDTH,
            in_flight: BTreeSet::new(),
            newest_applied: None,
            exit_when_idle: false,
            should_exit: false,
        }
    }

    pub fn with_policy(mut self, policy: RunPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_examples(mut self, examples: &'static ExampleSet) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_listing_width(mut self, width: usize) -> Self {
        self.listing_width = width;
        self
    }

    pub fn policy(&self) -> RunPolicy {
        self.policy
    }

    pub fn examples(&self) -> &'static ExampleSet {
        self.examples
    }

    /// Runs that were started and have not completed yet, oldest first.
    pub fn in_flight(&self) -> impl Iterator<Item = RunId> + '_ {
        self.in_flight.iter().copied()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Handles one submitted line: a command, or text for the buffer.
    pub fn on_input_line(&mut self, line: &str, host: &mut dyn HostOps) {
        let Some(command) = parse_command(line) else {
            self.editor.append_line(line);
            host.request_render();
            return;
        };

        match command {
            Command::Run => self.on_run(host),
            Command::Clear => self.on_clear(host),
            Command::Example(name) => {
                self.on_load_example(&name, host);
            }
            Command::Examples => {
                let names = self.examples.names().collect::<Vec<_>>().join(", ");
                host.notify(format!("Examples: {names}"));
                host.request_render();
            }
            Command::Show => {
                let listing = self.editor.render(self.listing_width).join("\n");
                host.notify(listing);
                host.request_render();
            }
            Command::New => {
                self.editor.set_text("");
                host.request_render();
            }
            Command::Open(path) => self.on_open(&path, host),
            Command::Help => {
                host.notify(HELP_TEXT.to_string());
                host.request_render();
            }
            Command::Quit => self.on_quit(host),
            Command::Unknown(command) => {
                host.notify(format!("Unknown command: {command}"));
                host.request_render();
            }
        }
    }

    /// Sends the current buffer for execution.
    pub fn on_run(&mut self, host: &mut dyn HostOps) {
        if self.policy == RunPolicy::Serial && !self.in_flight.is_empty() {
            host.notify(RUN_ALREADY_IN_PROGRESS.to_string());
            host.request_render();
            return;
        }

        let code = self.editor.get_text();
        match host.start_run(code) {
            Ok(run_id) => {
                tracing::info!(run_id, in_flight = self.in_flight.len() + 1, "run started");
                self.in_flight.insert(run_id);
            }
            Err(error) => {
                tracing::warn!(%error, "failed to start run");
                host.notify(format!("Failed to start run: {error}"));
            }
        }

        host.request_render();
    }

    /// Applies the single completion of a run to the output log.
    pub fn on_run_completed(&mut self, run_id: RunId, result: RunResult) {
        if !self.in_flight.remove(&run_id) {
            tracing::warn!(run_id, "ignoring completion for unknown run");
            return;
        }

        let out_of_order = self.newest_applied.is_some_and(|newest| run_id < newest);
        if out_of_order {
            if self.policy == RunPolicy::LatestWins {
                tracing::debug!(run_id, newest = ?self.newest_applied, "discarding stale run result");
                self.exit_if_drained();
                return;
            }
            tracing::debug!(run_id, newest = ?self.newest_applied, "run completed out of trigger order");
        } else {
            self.newest_applied = Some(run_id);
        }

        let entry = match result {
            RunResult::Output(output) => OutputEntry::success(format!("{OUTPUT_PREFIX}{output}")),
            RunResult::CompileError(error) => OutputEntry::error(format!("{ERROR_PREFIX}{error}")),
            RunResult::TransportFailed(_) => OutputEntry::error(TRANSPORT_FAILURE_MESSAGE),
        };
        tracing::info!(run_id, kind = entry.kind.as_str(), "run completed");
        self.log.append(entry);
        self.exit_if_drained();
    }

    pub fn on_clear(&mut self, host: &mut dyn HostOps) {
        self.log.clear();
        host.request_render();
    }

    /// Loads a named example into the editor. Unknown names are ignored.
    pub fn on_load_example(&mut self, name: &str, host: &mut dyn HostOps) -> bool {
        let Some(text) = self.examples.get(name) else {
            tracing::debug!(name, "ignoring unknown example");
            return false;
        };

        self.editor.set_text(text);
        host.request_render();
        true
    }

    pub fn on_open(&mut self, path: &str, host: &mut dyn HostOps) {
        if path.is_empty() {
            host.notify("Usage: /open <path>".to_string());
            host.request_render();
            return;
        }

        match std::fs::read_to_string(Path::new(path)) {
            Ok(text) => {
                self.editor.set_text(&text);
            }
            Err(error) => {
                host.notify(format!("Failed to open {path}: {error}"));
            }
        }
        host.request_render();
    }

    pub fn on_quit(&mut self, host: &mut dyn HostOps) {
        self.should_exit = true;
        host.request_stop();
    }

    /// Input ended: exit once every in-flight run has completed.
    pub fn on_input_closed(&mut self, host: &mut dyn HostOps) {
        self.exit_when_idle = true;
        if self.in_flight.is_empty() {
            self.on_quit(host);
        }
    }

    fn exit_if_drained(&mut self) {
        if self.exit_when_idle && self.in_flight.is_empty() {
            self.should_exit = true;
        }
    }
}
