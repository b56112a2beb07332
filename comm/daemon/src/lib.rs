#![forbid(unsafe_code)]

//! # Communicator Daemon
//!
//! Host-side daemon gluing the pieces together: command line handling,
//! configuration loading into the object store, and the bridge lifecycle
//! around the receive loop. The binary entry point lives in `main.rs`;
//! everything testable lives here.

pub mod cli;
pub mod config;
pub mod runtime;

pub use cli::*;
pub use config::*;
