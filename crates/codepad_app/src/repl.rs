//! Line-mode front end: one event loop fed by stdin, signals and run completions.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::runtime::{lock_unpoisoned, LoopEvent, RuntimeController, RuntimeHandle};

pub const DEFAULT_PROMPT: &str = "pad> ";

/// Forwards each line of `input` to the loop, then [`LoopEvent::InputClosed`].
pub fn spawn_input_reader<R>(input: R, handle: RuntimeHandle) -> io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("codepad-input".to_string())
        .spawn(move || {
            for line in input.lines() {
                match line {
                    Ok(line) => handle.dispatch(LoopEvent::Input(line)),
                    Err(error) => {
                        tracing::warn!(%error, "failed to read input");
                        break;
                    }
                }
            }
            handle.dispatch(LoopEvent::InputClosed);
        })
}

/// Turns SIGINT and SIGTERM into [`LoopEvent::Interrupted`].
#[cfg(unix)]
pub fn spawn_signal_forwarder(handle: RuntimeHandle) -> io::Result<JoinHandle<()>> {
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([libc::SIGINT, libc::SIGTERM])?;
    thread::Builder::new()
        .name("codepad-signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                tracing::info!(signal, "received termination signal");
                handle.dispatch(LoopEvent::Interrupted);
            }
        })
}

pub struct Repl<W: Write> {
    controller: Arc<RuntimeController>,
    events: Receiver<LoopEvent>,
    out: W,
    prompt: Option<String>,
}

impl<W: Write> Repl<W> {
    /// `out` receives notices and the prompt; log entries go through the log's renderer.
    pub fn new(controller: Arc<RuntimeController>, events: Receiver<LoopEvent>, out: W) -> Self {
        Self {
            controller,
            events,
            out,
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until the app asks to exit or every event source is gone.
    pub fn run(&mut self) -> io::Result<()> {
        self.write_prompt()?;

        loop {
            let Ok(event) = self.events.recv() else {
                tracing::debug!("event channel closed");
                return Ok(());
            };

            let mut render = self.handle_event(event)?;
            while !self.should_exit() {
                match self.events.try_recv() {
                    Ok(event) => render |= self.handle_event(event)?,
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                }
            }

            if self.should_exit() {
                self.write_queued_notices()?;
                return self.out.flush();
            }
            if render {
                self.write_prompt()?;
            }
        }
    }

    /// Handles one event; returns whether the prompt should be redrawn.
    fn handle_event(&mut self, event: LoopEvent) -> io::Result<bool> {
        let mut host = Arc::clone(&self.controller);
        match event {
            LoopEvent::Input(line) => {
                lock_unpoisoned(self.controller.app()).on_input_line(&line, &mut host);
                Ok(false)
            }
            LoopEvent::InputClosed => {
                tracing::debug!("input closed");
                lock_unpoisoned(self.controller.app()).on_input_closed(&mut host);
                Ok(false)
            }
            LoopEvent::Interrupted => {
                lock_unpoisoned(self.controller.app()).on_quit(&mut host);
                Ok(false)
            }
            LoopEvent::DrainRunEvents => Ok(self.controller.drain_pending_run_events() > 0),
            LoopEvent::Notice(text) => {
                writeln!(self.out, "{text}")?;
                Ok(false)
            }
            LoopEvent::Render => Ok(true),
            LoopEvent::Stop => Ok(false),
        }
    }

    /// Prints notices already queued at exit and drops every other event.
    fn write_queued_notices(&mut self) -> io::Result<()> {
        while let Ok(event) = self.events.try_recv() {
            match event {
                LoopEvent::Notice(text) => writeln!(self.out, "{text}")?,
                other => tracing::debug!(?other, "dropping event after exit"),
            }
        }
        Ok(())
    }

    fn should_exit(&self) -> bool {
        lock_unpoisoned(self.controller.app()).should_exit
    }

    fn write_prompt(&mut self) -> io::Result<()> {
        if let Some(prompt) = &self.prompt {
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
        }
        Ok(())
    }
}
