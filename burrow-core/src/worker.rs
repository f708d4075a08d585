use std::thread::{self, JoinHandle};
use std::time::Duration;

use flume::{Receiver, Sender};

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::navigator::Navigator;

const WORKER_THREAD_NAME: &str = "burrow-navigator";

/// Work submitted to a [`NavigatorWorker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorRequest {
    List,
    Enter(String),
    Up,
    MakeFolder(String),
    Capture(Vec<u8>),
    Remove(Entry),
    Shutdown,
}

/// Results delivered back to the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorEvent {
    /// A capture was written (or attempted) under `file_name`.
    Captured { file_name: String },
    /// Snapshot of the current folder taken after the request completed.
    Listed {
        breadcrumb: String,
        at_root: bool,
        entries: Vec<Entry>,
    },
}

/// Runs a [`Navigator`] on a dedicated thread.
///
/// Requests are handled one at a time in submission order, which serializes
/// mutations. Every request except `Shutdown` is answered with a
/// [`NavigatorEvent::Listed`] snapshot read after the request finished.
pub struct NavigatorWorker;

impl NavigatorWorker {
    pub fn spawn(navigator: Navigator) -> Result<WorkerHandle> {
        let (request_tx, request_rx) = flume::unbounded();
        let (event_tx, event_rx) = flume::unbounded();

        let thread = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run(navigator, request_rx, event_tx))?;

        Ok(WorkerHandle {
            requests: request_tx,
            events: event_rx,
            thread: Some(thread),
        })
    }
}

/// Front-end side of a running [`NavigatorWorker`].
pub struct WorkerHandle {
    requests: Sender<NavigatorRequest>,
    events: Receiver<NavigatorEvent>,
    thread: Option<JoinHandle<Navigator>>,
}

impl WorkerHandle {
    /// Queue a request for the worker.
    pub fn send(&self, request: NavigatorRequest) -> Result<()> {
        self.requests.send(request).map_err(|_| Error::WorkerClosed)
    }

    /// Block until the next event arrives.
    pub fn recv(&self) -> Result<NavigatorEvent> {
        self.events.recv().map_err(|_| Error::WorkerClosed)
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<NavigatorEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Take the next event without blocking.
    pub fn try_recv(&self) -> Option<NavigatorEvent> {
        self.events.try_recv().ok()
    }

    /// Stop the worker and hand the navigator back.
    pub fn shutdown(mut self) -> Result<Navigator> {
        let _ = self.requests.send(NavigatorRequest::Shutdown);
        let thread = self.thread.take().ok_or(Error::WorkerClosed)?;
        thread.join().map_err(|_| Error::WorkerClosed)
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.requests.send(NavigatorRequest::Shutdown);
            if thread.join().is_err() {
                log::warn!("navigator worker panicked");
            }
        }
    }
}

fn run(
    mut navigator: Navigator,
    requests: Receiver<NavigatorRequest>,
    events: Sender<NavigatorEvent>,
) -> Navigator {
    log::debug!("navigator worker started");
    while let Ok(request) = requests.recv() {
        match request {
            NavigatorRequest::List => {},
            NavigatorRequest::Enter(name) => {
                navigator.enter(&name);
            },
            NavigatorRequest::Up => {
                navigator.up();
            },
            NavigatorRequest::MakeFolder(name) => {
                navigator.make_folder(&name);
            },
            NavigatorRequest::Capture(bytes) => {
                let file_name = navigator.capture(&bytes);
                if events.send(NavigatorEvent::Captured { file_name }).is_err() {
                    break;
                }
            },
            NavigatorRequest::Remove(entry) => {
                navigator.remove(&entry);
            },
            NavigatorRequest::Shutdown => break,
        }

        if events.send(snapshot(&navigator)).is_err() {
            break;
        }
    }
    log::debug!("navigator worker stopped");
    navigator
}

fn snapshot(navigator: &Navigator) -> NavigatorEvent {
    NavigatorEvent::Listed {
        breadcrumb: navigator.breadcrumb(),
        at_root: navigator.at_root(),
        entries: navigator.list_current(),
    }
}
