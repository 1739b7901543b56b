//! The render session: one browser, owned by one worker thread, fed through a bounded channel.
//!
//! ```text
//! Unstarted --first render--> Ready <--> Rendering
//!     \                         |
//!      `------ shutdown ------> Terminated
//! ```
//!
//! Requests are served strictly in submission order and one at a time. There is no per-request
//! timeout: a hung driver blocks the caller.

use crate::driver::{BrowserDriver, DriverLauncher};
use crate::format::ImageFormat;
use crate::{RenderError, Result};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// HTML file to load.
    pub input: PathBuf,
    /// When set, the driver also writes the image here.
    pub output: Option<PathBuf>,
    pub format: ImageFormat,
    /// DOM id of the element to capture.
    pub element_id: String,
    /// Viewport size in CSS pixels.
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unstarted,
    Ready,
    Rendering,
    Terminated,
}

enum Message {
    Render(RenderRequest, SyncSender<Result<Vec<u8>>>),
    Finish,
}

struct Worker {
    requests: SyncSender<Message>,
    handle: JoinHandle<()>,
}

pub struct RenderSession {
    launcher: Box<dyn DriverLauncher>,
    worker: Option<Worker>,
    state: SessionState,
}

impl RenderSession {
    pub fn new(launcher: impl DriverLauncher + 'static) -> Self {
        Self::with_boxed_launcher(Box::new(launcher))
    }

    pub fn with_boxed_launcher(launcher: Box<dyn DriverLauncher>) -> Self {
        Self {
            launcher,
            worker: None,
            state: SessionState::Unstarted,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Starts the browser if it is not running yet.
    ///
    /// A launch failure is logged with its remediation hint and returned; the session stays
    /// unstarted.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            SessionState::Terminated => return Err(RenderError::SessionTerminated),
            SessionState::Ready | SessionState::Rendering => return Ok(()),
            SessionState::Unstarted => {}
        }

        let driver = match self.launcher.launch() {
            Ok(driver) => driver,
            Err(err) => {
                tracing::error!(error = %err, "unable to start the browser driver");
                return Err(err);
            }
        };

        let (requests, inbox) = sync_channel(0);
        let handle = std::thread::Builder::new()
            .name("plotwire-render".to_string())
            .spawn(move || run_worker(driver, inbox))?;
        self.worker = Some(Worker { requests, handle });
        self.state = SessionState::Ready;
        tracing::debug!("render session started");
        Ok(())
    }

    /// Captures one element as an image, starting the session on first use.
    pub fn render(&mut self, request: RenderRequest) -> Result<Vec<u8>> {
        self.start()?;
        let Some(worker) = &self.worker else {
            return Err(RenderError::WorkerGone);
        };
        tracing::debug!(
            input = %request.input.display(),
            element_id = %request.element_id,
            format = request.format.as_str(),
            "render request"
        );

        self.state = SessionState::Rendering;
        let (reply_to, reply) = sync_channel(1);
        let result = worker
            .requests
            .send(Message::Render(request, reply_to))
            .map_err(|_| RenderError::WorkerGone)
            .and_then(|()| reply.recv().map_err(|_| RenderError::WorkerGone))
            .and_then(|result| result);
        if matches!(result, Err(RenderError::WorkerGone)) {
            self.discard_worker();
        } else {
            self.state = SessionState::Ready;
        }
        result
    }

    /// Forgets a worker that stopped answering; the next render launches a new browser.
    fn discard_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            drop(worker.requests);
            if worker.handle.join().is_err() {
                tracing::warn!("render worker panicked");
            }
        }
        self.state = SessionState::Unstarted;
    }

    /// Closes the browser and ends the session. Later renders fail with
    /// [`RenderError::SessionTerminated`]; calling it again is a no-op.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.state == SessionState::Terminated {
            return Ok(());
        }
        self.state = SessionState::Terminated;
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        let _ = worker.requests.send(Message::Finish);
        worker.handle.join().map_err(|_| RenderError::WorkerGone)?;
        tracing::debug!("render session terminated");
        Ok(())
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            tracing::warn!(error = %err, "render session shutdown failed");
        }
    }
}

fn run_worker(mut driver: Box<dyn BrowserDriver>, inbox: Receiver<Message>) {
    while let Ok(message) = inbox.recv() {
        match message {
            Message::Render(request, reply_to) => {
                let result = driver.render(&request);
                let _ = reply_to.send(result);
            }
            Message::Finish => break,
        }
    }
    if let Err(err) = driver.finish() {
        tracing::warn!(error = %err, "browser driver did not finish cleanly");
    }
}
