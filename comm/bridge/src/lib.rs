#![forbid(unsafe_code)]

//! # Communicator Bridge
//!
//! In-process stand-in for the OS message queues connecting an application
//! to the communicator daemon, plus the background worker that will carry
//! traffic onward. Payloads are opaque byte vectors; no framing or protocol
//! interpretation happens at this layer.

pub mod endpoint;
pub mod worker;

pub use endpoint::*;
pub use worker::*;

use thiserror::Error;

/// Default depth of each queue direction
pub const DEFAULT_QUEUE_DEPTH: usize = 16;

/// Errors produced by the bridge layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The bounded queue has no free slot
    #[error("queue '{0}' is full")]
    QueueFull(String),
    /// The opposite endpoint has been dropped
    #[error("queue '{0}' is disconnected")]
    Disconnected(String),
    /// The worker thread terminated abnormally
    #[error("bridge worker panicked")]
    WorkerFailed,
}
