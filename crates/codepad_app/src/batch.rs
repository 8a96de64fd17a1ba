//! One-shot mode: run a program once on the calling thread.

use codepad::OutputKind;

use crate::app::{App, HostOps, RunId};
use crate::backend::{CompileBackend, RunRequest, RunResult};

/// Host that executes runs synchronously and hands the results back afterwards.
struct SyncHost<'a> {
    backend: &'a dyn CompileBackend,
    next_run_id: RunId,
    completed: Vec<(RunId, RunResult)>,
    notices: Vec<String>,
}

impl HostOps for SyncHost<'_> {
    fn start_run(&mut self, code: String) -> Result<RunId, String> {
        self.next_run_id += 1;
        let run_id = self.next_run_id;
        let result = self.backend.compile(RunRequest { run_id, code });
        self.completed.push((run_id, result));
        Ok(run_id)
    }

    fn notify(&mut self, text: String) {
        self.notices.push(text);
    }

    fn request_render(&mut self) {}

    fn request_stop(&mut self) {}
}

/// Replaces the buffer with `source`, runs it once and returns the kind of the
/// entry it appended.
pub fn run_source(
    app: &mut App,
    backend: &dyn CompileBackend,
    source: &str,
) -> Result<OutputKind, String> {
    let mut host = SyncHost {
        backend,
        next_run_id: 0,
        completed: Vec::new(),
        notices: Vec::new(),
    };

    app.editor.set_text(source);
    let entries_before = app.log.len();
    app.on_run(&mut host);

    for (run_id, result) in host.completed.drain(..) {
        app.on_run_completed(run_id, result);
    }

    if app.log.len() == entries_before {
        return Err(if host.notices.is_empty() {
            "run produced no result".to_string()
        } else {
            host.notices.join("\n")
        });
    }

    app.log
        .last()
        .map(|entry| entry.kind)
        .ok_or_else(|| "run produced no result".to_string())
}
