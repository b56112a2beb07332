//! Named bounded queue endpoints
//!
//! One pair of unidirectional queues stands in for the two OS message
//! queues: application to communicator and communicator back to the
//! application. Each side owns one sender and one receiver, so dropping a
//! side makes the peer observe a disconnect rather than blocking forever.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::time::Duration;

use crate::BridgeError;

/// Application-facing side of the queue pair
#[derive(Debug)]
pub struct AppEndpoint {
    to_comm: SyncSender<Vec<u8>>,
    from_comm: Receiver<Vec<u8>>,
    outbound_name: String,
    inbound_name: String,
}

/// Communicator-facing side of the queue pair
#[derive(Debug)]
pub struct CommEndpoint {
    to_app: SyncSender<Vec<u8>>,
    from_app: Receiver<Vec<u8>>,
    outbound_name: String,
    inbound_name: String,
}

/// Create both sides of a queue pair.
///
/// `a2q_name` labels the application-to-communicator direction and
/// `q2a_name` the reverse; the labels come from the system object's queue
/// name properties and only serve diagnostics.
pub fn queue_pair(
    a2q_name: &str,
    q2a_name: &str,
    depth: usize,
) -> (AppEndpoint, CommEndpoint) {
    let (a2q_tx, a2q_rx) = mpsc::sync_channel(depth);
    let (q2a_tx, q2a_rx) = mpsc::sync_channel(depth);
    let app = AppEndpoint {
        to_comm: a2q_tx,
        from_comm: q2a_rx,
        outbound_name: a2q_name.to_owned(),
        inbound_name: q2a_name.to_owned(),
    };
    let comm = CommEndpoint {
        to_app: q2a_tx,
        from_app: a2q_rx,
        outbound_name: q2a_name.to_owned(),
        inbound_name: a2q_name.to_owned(),
    };
    (app, comm)
}

fn push(
    sender: &SyncSender<Vec<u8>>,
    name: &str,
    payload: Vec<u8>,
) -> Result<(), BridgeError> {
    match sender.try_send(payload) {
        Ok(()) => Ok(()),
        Err(TrySendError::Full(_)) => Err(BridgeError::QueueFull(name.to_owned())),
        Err(TrySendError::Disconnected(_)) => Err(BridgeError::Disconnected(name.to_owned())),
    }
}

fn pull(
    receiver: &Receiver<Vec<u8>>,
    name: &str,
    timeout: Duration,
) -> Result<Option<Vec<u8>>, BridgeError> {
    match receiver.recv_timeout(timeout) {
        Ok(payload) => Ok(Some(payload)),
        Err(RecvTimeoutError::Timeout) => Ok(None),
        Err(RecvTimeoutError::Disconnected) => Err(BridgeError::Disconnected(name.to_owned())),
    }
}

impl AppEndpoint {
    /// Queue a payload toward the communicator without blocking
    pub fn send(&self, payload: Vec<u8>) -> Result<(), BridgeError> {
        push(&self.to_comm, &self.outbound_name, payload)
    }

    /// Wait up to `timeout` for a payload from the communicator.
    ///
    /// `Ok(None)` means the timeout elapsed with the queue still empty.
    pub fn poll(&self, timeout: Duration) -> Result<Option<Vec<u8>>, BridgeError> {
        pull(&self.from_comm, &self.inbound_name, timeout)
    }

    /// Diagnostics label of the outbound direction
    pub fn outbound_name(&self) -> &str {
        &self.outbound_name
    }
}

impl CommEndpoint {
    /// Queue a payload toward the application without blocking
    pub fn send(&self, payload: Vec<u8>) -> Result<(), BridgeError> {
        push(&self.to_app, &self.outbound_name, payload)
    }

    /// Wait up to `timeout` for a payload from the application.
    ///
    /// `Ok(None)` means the timeout elapsed with the queue still empty.
    pub fn poll(&self, timeout: Duration) -> Result<Option<Vec<u8>>, BridgeError> {
        pull(&self.from_app, &self.inbound_name, timeout)
    }

    /// Diagnostics label of the inbound direction
    pub fn inbound_name(&self) -> &str {
        &self.inbound_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(5);

    #[test]
    fn test_round_trip_both_directions() {
        let (app, comm) = queue_pair("/a2q", "/q2a", 4);

        app.send(vec![1, 2, 3]).unwrap();
        assert_eq!(comm.poll(SHORT).unwrap(), Some(vec![1, 2, 3]));

        comm.send(vec![9]).unwrap();
        assert_eq!(app.poll(SHORT).unwrap(), Some(vec![9]));
    }

    #[test]
    fn test_poll_times_out_when_empty() {
        let (_app, comm) = queue_pair("/a2q", "/q2a", 4);
        assert_eq!(comm.poll(SHORT).unwrap(), None);
    }

    #[test]
    fn test_full_queue_reports_name() {
        let (app, _comm) = queue_pair("/a2q", "/q2a", 1);
        app.send(vec![0]).unwrap();
        assert_eq!(
            app.send(vec![1]),
            Err(BridgeError::QueueFull("/a2q".to_owned()))
        );
    }

    #[test]
    fn test_dropped_peer_is_a_disconnect() {
        let (app, comm) = queue_pair("/a2q", "/q2a", 4);
        drop(app);
        assert_eq!(
            comm.poll(SHORT),
            Err(BridgeError::Disconnected("/a2q".to_owned()))
        );
        assert_eq!(
            comm.send(vec![7]),
            Err(BridgeError::Disconnected("/q2a".to_owned()))
        );
    }

    #[test]
    fn test_messages_keep_fifo_order() {
        let (app, comm) = queue_pair("/a2q", "/q2a", 8);
        for n in 0u8..5 {
            app.send(vec![n]).unwrap();
        }
        for n in 0u8..5 {
            assert_eq!(comm.poll(SHORT).unwrap(), Some(vec![n]));
        }
    }
}
