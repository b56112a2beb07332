//! Daemon bring-up, receive loop, and shutdown
//!
//! Startup order matters: the system object exists before the command line
//! is consulted, the config file is applied before the queue names are read
//! back out of the store, and the bridge starts only once those names are
//! settled. Shutdown reverses it: stop the bridge, then close the store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info, warn};

use comm_bridge::{queue_pair, Bridge, BridgeError, CommEndpoint, DEFAULT_QUEUE_DEPTH};
use comm_core::system::{
    CFG_A2Q, CFG_FILE_PATH, CFG_Q2A, SERIAL_EN, SYSTEM_KEYS, SYSTEM_NAME, SYSTEM_OBJECT,
    SYSTEM_PROPERTY_COUNT,
};
use comm_core::PropertyKey;
use comm_store::{ObjectStore, Value};

use crate::cli::Opts;
use crate::config;

/// Default application-to-communicator queue name
pub const DEFAULT_A2Q: &str = "/app_to_queue";

/// Default communicator-to-application queue name
pub const DEFAULT_Q2A: &str = "/queue_to_app";

/// How long one receive-loop pass waits for a message
const POLL_PERIOD: Duration = Duration::from_millis(100);

/// Create the store, install the system object, and seed its defaults.
///
/// The config file path lands in the store as an ordinary property; the
/// queue names start at their defaults so a config file that omits them
/// still yields a working daemon.
pub fn bring_up_store(opts: &Opts) -> anyhow::Result<ObjectStore> {
    let mut store = ObjectStore::new();
    store.create(SYSTEM_OBJECT, SYSTEM_NAME, SYSTEM_PROPERTY_COUNT)?;
    store.init_keys(SYSTEM_OBJECT, &SYSTEM_KEYS)?;
    store.set(
        SYSTEM_OBJECT,
        CFG_FILE_PATH,
        Value::Str(opts.config.display().to_string()),
    )?;
    store.set(SYSTEM_OBJECT, CFG_A2Q, Value::Str(DEFAULT_A2Q.to_owned()))?;
    store.set(SYSTEM_OBJECT, CFG_Q2A, Value::Str(DEFAULT_Q2A.to_owned()))?;
    store.set(SYSTEM_OBJECT, SERIAL_EN, Value::Bool(false))?;
    Ok(store)
}

/// Read a queue name back out of the store
fn queue_name(store: &ObjectStore, key: PropertyKey, fallback: &str) -> anyhow::Result<String> {
    let slot = store.get(SYSTEM_OBJECT, key)?;
    Ok(slot.value().as_str().unwrap_or(fallback).to_owned())
}

/// Run the daemon until interrupted
pub fn run(opts: &Opts) -> anyhow::Result<()> {
    let mut store = bring_up_store(opts)?;
    config::load_into_store(&opts.config, &mut store).context("loading configuration")?;
    for line in store.describe(SYSTEM_OBJECT)? {
        debug!(
            key = line.key,
            kind = line.type_name,
            value = %line.value,
            "system property"
        );
    }

    let a2q = queue_name(&store, CFG_A2Q, DEFAULT_A2Q)?;
    let q2a = queue_name(&store, CFG_Q2A, DEFAULT_Q2A)?;
    info!(a2q = %a2q, q2a = %q2a, "opening queue endpoints");
    let (app, comm) = queue_pair(&a2q, &q2a, DEFAULT_QUEUE_DEPTH);

    let exit = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&exit);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("installing interrupt handler")?;

    let mut bridge = Bridge::start();
    info!("communicator running");

    let outcome = receive_loop(&comm, &exit);

    bridge.stop()?;
    drop(comm);
    drop(app);
    store.close();
    info!("communicator stopped");
    outcome
}

/// Drain the application-to-communicator queue until the exit flag flips.
///
/// Payloads are only counted for now; the consumer side of the bridge is
/// where they will eventually go.
fn receive_loop(comm: &CommEndpoint, exit: &AtomicBool) -> anyhow::Result<()> {
    while !exit.load(Ordering::SeqCst) {
        match comm.poll(POLL_PERIOD) {
            Ok(Some(payload)) => debug!(len = payload.len(), "message received"),
            Ok(None) => {}
            Err(BridgeError::Disconnected(name)) => {
                warn!(queue = %name, "application endpoint closed");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn opts(path: &str) -> Opts {
        Opts::parse_from(["communicator", "-c", path])
    }

    #[test]
    fn test_bring_up_seeds_defaults() {
        let store = bring_up_store(&opts("/etc/communicator.json")).unwrap();

        assert_eq!(
            store
                .get(SYSTEM_OBJECT, CFG_FILE_PATH)
                .unwrap()
                .value()
                .as_str(),
            Some("/etc/communicator.json")
        );
        assert_eq!(
            store.get(SYSTEM_OBJECT, CFG_A2Q).unwrap().value().as_str(),
            Some(DEFAULT_A2Q)
        );
        assert_eq!(
            store.get(SYSTEM_OBJECT, CFG_Q2A).unwrap().value().as_str(),
            Some(DEFAULT_Q2A)
        );
        assert_eq!(
            store.get(SYSTEM_OBJECT, SERIAL_EN).unwrap().value().as_bool(),
            Some(false)
        );
    }

    #[test]
    fn test_queue_name_fallback_for_non_string() {
        let mut store = bring_up_store(&opts("/tmp/c.json")).unwrap();
        store
            .set(SYSTEM_OBJECT, CFG_A2Q, Value::Int32(7))
            .unwrap();
        assert_eq!(
            queue_name(&store, CFG_A2Q, DEFAULT_A2Q).unwrap(),
            DEFAULT_A2Q
        );
    }

    #[test]
    fn test_receive_loop_exits_on_flag() {
        let (_app, comm) = queue_pair(DEFAULT_A2Q, DEFAULT_Q2A, 4);
        let exit = AtomicBool::new(true);
        receive_loop(&comm, &exit).unwrap();
    }

    #[test]
    fn test_receive_loop_stops_when_app_disconnects() {
        let (app, comm) = queue_pair(DEFAULT_A2Q, DEFAULT_Q2A, 4);
        app.send(vec![1, 2]).unwrap();
        drop(app);

        let exit = AtomicBool::new(false);
        // drains the pending message, then sees the disconnect and returns
        receive_loop(&comm, &exit).unwrap();
    }
}
