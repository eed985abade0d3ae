use std::{
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, RecvTimeoutError, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use tracing::debug;

use super::Store;

/// Handle to a background sync loop started by `Store::sync`.
///
/// The loop ends when `stop` is called or the handle is dropped. Only
/// `stop` waits for a cycle in progress to finish.
pub struct SyncHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
    cycles: Arc<AtomicUsize>,
}

impl SyncHandle {
    /// Number of pull-then-push cycles completed so far.
    pub fn cycles(&self) -> usize {
        self.cycles.load(Ordering::SeqCst)
    }

    /// Stop the loop and wait for the sync thread to exit.
    pub fn stop(mut self) {
        self.signal_stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                debug!("sync thread panicked");
            }
        }
    }

    /// Block until the loop ends. Without a call to `stop` from elsewhere
    /// this never returns.
    pub fn wait(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                debug!("sync thread panicked");
            }
        }
    }

    fn signal_stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            // A send error means the loop is already gone.
            let _ = stop.send(());
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

pub(super) fn spawn(store: Store, interval: Duration) -> io::Result<SyncHandle> {
    let (stop, stopped) = mpsc::channel::<()>();
    let cycles = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&cycles);

    let thread = thread::Builder::new()
        .name("exo-sync".to_string())
        .spawn(move || loop {
            match stopped.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    store.sync_once();
                    counter.fetch_add(1, Ordering::SeqCst);
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    debug!("Stopping sync for {}", store.repo().display());
                    break;
                }
            }
        })?;

    Ok(SyncHandle {
        stop: Some(stop),
        thread: Some(thread),
        cycles,
    })
}
