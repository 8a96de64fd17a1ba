#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use codepad::{LogRenderer, OutputEntry};
use codepad_app::app::{HostOps, RunId};
use codepad_app::backend::{CompileBackend, RunRequest, RunResult};

pub const WAIT: Duration = Duration::from_secs(5);

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Records every host call and hands out sequential run ids.
#[derive(Default)]
pub struct HostSpy {
    pub started: Vec<(RunId, String)>,
    pub notices: Vec<String>,
    pub render_requests: usize,
    pub stop_requests: usize,
    pub fail_next_start: Option<String>,
}

impl HostOps for HostSpy {
    fn start_run(&mut self, code: String) -> Result<RunId, String> {
        if let Some(error) = self.fail_next_start.take() {
            return Err(error);
        }
        let run_id = self.started.len() as RunId + 1;
        self.started.push((run_id, code));
        Ok(run_id)
    }

    fn notify(&mut self, text: String) {
        self.notices.push(text);
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }

    fn request_stop(&mut self) {
        self.stop_requests += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drawn {
    Append(OutputEntry),
    Clear,
}

/// Renderer that records every draw call into a shared trace.
pub struct CaptureRenderer {
    trace: Arc<Mutex<Vec<Drawn>>>,
}

impl CaptureRenderer {
    pub fn new() -> (Self, Arc<Mutex<Vec<Drawn>>>) {
        let trace = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                trace: Arc::clone(&trace),
            },
            trace,
        )
    }
}

impl LogRenderer for CaptureRenderer {
    fn append(&mut self, entry: &OutputEntry) {
        lock_unpoisoned(&self.trace).push(Drawn::Append(entry.clone()));
    }

    fn clear(&mut self) {
        lock_unpoisoned(&self.trace).push(Drawn::Clear);
    }
}

/// Backend whose requests block until the test releases them with a result.
pub struct ScriptedBackend {
    requests_tx: Sender<RunRequest>,
    pending: Mutex<BTreeMap<RunId, Receiver<RunResult>>>,
    releases: Mutex<BTreeMap<RunId, Sender<RunResult>>>,
}

pub struct ScriptedControl {
    backend: Arc<ScriptedBackend>,
    pub requests: Receiver<RunRequest>,
}

impl ScriptedBackend {
    pub fn new() -> (Arc<Self>, ScriptedControl) {
        let (requests_tx, requests) = mpsc::channel();
        let backend = Arc::new(Self {
            requests_tx,
            pending: Mutex::new(BTreeMap::new()),
            releases: Mutex::new(BTreeMap::new()),
        });
        let control = ScriptedControl {
            backend: Arc::clone(&backend),
            requests,
        };
        (backend, control)
    }

    fn release_channel(&self, run_id: RunId) -> Receiver<RunResult> {
        let mut pending = lock_unpoisoned(&self.pending);
        if let Some(rx) = pending.remove(&run_id) {
            return rx;
        }
        let (tx, rx) = mpsc::channel();
        lock_unpoisoned(&self.releases).insert(run_id, tx);
        rx
    }
}

impl CompileBackend for ScriptedBackend {
    fn compile(&self, req: RunRequest) -> RunResult {
        let run_id = req.run_id;
        let release = self.release_channel(run_id);
        let _ = self.requests_tx.send(req);
        release
            .recv()
            .unwrap_or_else(|_| RunResult::TransportFailed("released without result".to_string()))
    }
}

impl ScriptedControl {
    pub fn next_request(&self) -> RunRequest {
        self.requests
            .recv_timeout(WAIT)
            .expect("backend should receive a request")
    }

    /// Completes `run_id` with `result`, whether or not its request has arrived yet.
    pub fn release(&self, run_id: RunId, result: RunResult) {
        let mut pending = lock_unpoisoned(&self.backend.pending);
        match lock_unpoisoned(&self.backend.releases).remove(&run_id) {
            Some(sender) => {
                let _ = sender.send(result);
            }
            None => {
                let (tx, rx) = mpsc::channel();
                let _ = tx.send(result);
                pending.insert(run_id, rx);
            }
        }
    }
}

/// Backend that answers every request immediately with the same result.
pub struct FixedBackend(pub RunResult);

impl CompileBackend for FixedBackend {
    fn compile(&self, _req: RunRequest) -> RunResult {
        self.0.clone()
    }
}

pub struct PanickingBackend;

impl CompileBackend for PanickingBackend {
    fn compile(&self, _req: RunRequest) -> RunResult {
        panic!("backend exploded");
    }
}
