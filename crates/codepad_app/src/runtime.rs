use std::collections::{BTreeMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use crate::app::{App, HostOps, RunId};
use crate::backend::{CompileBackend, RunRequest, RunResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEvent {
    pub run_id: RunId,
    pub result: RunResult,
}

/// Everything the UI loop wakes up for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Input(String),
    InputClosed,
    Interrupted,
    DrainRunEvents,
    Notice(String),
    Render,
    Stop,
}

/// Cloneable sender into the UI loop.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    tx: Sender<LoopEvent>,
}

impl RuntimeHandle {
    pub fn channel() -> (Self, Receiver<LoopEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    /// Queues an event for the UI loop. Events sent after the loop has gone
    /// away are dropped.
    pub fn dispatch(&self, event: LoopEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("ui loop is gone; dropping event");
        }
    }
}

pub struct RuntimeController {
    app: Arc<Mutex<App>>,
    runtime_handle: RuntimeHandle,
    pending_events: Mutex<VecDeque<RunEvent>>,
    next_run_id: AtomicU64,
    active_runs: Mutex<BTreeMap<RunId, JoinHandle<()>>>,
    backend: Arc<dyn CompileBackend>,
}

impl RuntimeController {
    /// Creates a controller that buffers run completions before applying them to `App`.
    ///
    /// Completions are applied when the UI loop handles
    /// [`LoopEvent::DrainRunEvents`]. Headless callers that never run the loop
    /// call [`RuntimeController::flush_pending_run_events`] instead.
    pub fn new(
        app: Arc<Mutex<App>>,
        runtime_handle: RuntimeHandle,
        backend: Arc<dyn CompileBackend>,
    ) -> Arc<Self> {
        Arc::new(Self {
            app,
            runtime_handle,
            pending_events: Mutex::new(VecDeque::new()),
            next_run_id: AtomicU64::new(1),
            active_runs: Mutex::new(BTreeMap::new()),
            backend,
        })
    }

    pub fn app(&self) -> &Arc<Mutex<App>> {
        &self.app
    }

    fn start_run_internal(self: &Arc<Self>, code: String) -> Result<RunId, String> {
        let run_id = self.next_run_id.fetch_add(1, Ordering::SeqCst);
        let request = RunRequest { run_id, code };
        // Held across the spawn so a fast completion cannot be reaped before it is recorded.
        let mut active_runs = lock_unpoisoned(&self.active_runs);
        let join_handle = self.spawn_worker(request)?;
        active_runs.insert(run_id, join_handle);
        Ok(run_id)
    }

    fn spawn_worker(self: &Arc<Self>, request: RunRequest) -> Result<JoinHandle<()>, String> {
        let run_id = request.run_id;
        let controller = Arc::clone(self);
        thread::Builder::new()
            .name(format!("codepad-run-{run_id}"))
            .spawn(move || controller.run_worker(request))
            .map_err(|error| format!("Failed to spawn run worker: {error}"))
    }

    fn run_worker(self: Arc<Self>, request: RunRequest) {
        let run_id = request.run_id;
        let backend = Arc::clone(&self.backend);

        let result = match catch_unwind(AssertUnwindSafe(|| backend.compile(request))) {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(run_id, "compile backend panicked");
                RunResult::TransportFailed("compile backend panicked".to_string())
            }
        };

        self.enqueue_run_event(RunEvent { run_id, result });
    }

    fn enqueue_run_event(&self, event: RunEvent) {
        let should_drain = {
            let mut queue = lock_unpoisoned(&self.pending_events);
            let should_drain = queue.is_empty();
            queue.push_back(event);
            should_drain
        };

        if should_drain {
            self.runtime_handle.dispatch(LoopEvent::DrainRunEvents);
        }
    }

    /// Applies every queued completion in arrival order and returns how many were applied.
    pub fn drain_pending_run_events(&self) -> usize {
        let mut drained = 0usize;

        loop {
            let event = lock_unpoisoned(&self.pending_events).pop_front();
            match event {
                Some(event) => {
                    self.apply_run_event(event);
                    drained += 1;
                }
                None => break,
            }
        }

        drained
    }

    /// Drains queued completions and schedules a render.
    pub fn flush_pending_run_events(&self) -> usize {
        let drained = self.drain_pending_run_events();
        if drained > 0 {
            self.runtime_handle.dispatch(LoopEvent::Render);
        }

        drained
    }

    /// Number of runs whose worker has not been reaped yet.
    pub fn active_run_count(&self) -> usize {
        lock_unpoisoned(&self.active_runs).len()
    }

    fn apply_run_event(&self, event: RunEvent) {
        let run_id = event.run_id;
        lock_unpoisoned(&self.app).on_run_completed(run_id, event.result);
        self.reap_run(run_id);
    }

    fn reap_run(&self, run_id: RunId) {
        let Some(join_handle) = lock_unpoisoned(&self.active_runs).remove(&run_id) else {
            return;
        };

        let is_current_thread = join_handle.thread().id() == thread::current().id();
        if !is_current_thread && join_handle.is_finished() {
            let _ = join_handle.join();
        }
    }
}

impl HostOps for Arc<RuntimeController> {
    fn start_run(&mut self, code: String) -> Result<RunId, String> {
        self.start_run_internal(code)
    }

    fn notify(&mut self, text: String) {
        self.runtime_handle.dispatch(LoopEvent::Notice(text));
    }

    fn request_render(&mut self) {
        self.runtime_handle.dispatch(LoopEvent::Render);
    }

    fn request_stop(&mut self) {
        self.runtime_handle.dispatch(LoopEvent::Stop);
    }
}

pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
