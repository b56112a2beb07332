//! Background bridge worker
//!
//! The worker stands ready for the serial side of the bridge. Until that
//! transport exists it only parks itself on a short sleep and watches the
//! stop flag, mirroring the lifecycle the daemon expects: started during
//! bring-up, joined during shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::BridgeError;

/// Interval at which the idle worker re-checks the stop flag
const IDLE_PERIOD: Duration = Duration::from_millis(50);

/// Handle to the bridge worker thread
#[derive(Debug)]
pub struct Bridge {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Bridge {
    /// Spawn the worker thread.
    ///
    /// The thread runs until [`Bridge::stop`] flips the shared flag.
    pub fn start() -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::spawn(move || {
            debug!("bridge worker started");
            while flag.load(Ordering::Relaxed) {
                thread::sleep(IDLE_PERIOD);
            }
            debug!("bridge worker exiting");
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Check whether the worker has been asked to run
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Flip the stop flag and join the worker.
    ///
    /// Idempotent: a second call returns without touching the thread.
    pub fn stop(&mut self) -> Result<(), BridgeError> {
        self.running.store(false, Ordering::SeqCst);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| BridgeError::WorkerFailed),
            None => Ok(()),
        }
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        // last-resort join so the thread never outlives its handle
        let _ = self.stop();
    }
}
