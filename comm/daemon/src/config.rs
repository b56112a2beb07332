//! Configuration loading
//!
//! The configuration file is a JSON document with two optional sections.
//! Every present field turns into one write against the system object;
//! absent fields leave the store defaults alone.
//!
//! ```json
//! {
//!   "system": { "app_to_queue": "/a2q", "queue_to_app": "/q2a" },
//!   "serial": { "enable": true, "com1": "/dev/ttyS0" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use comm_core::system::{CFG_A2Q, CFG_Q2A, SERIAL_COM1, SERIAL_EN, SYSTEM_OBJECT};
use comm_core::StoreError;
use comm_store::{ObjectStore, Value};

/// Errors produced while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot apply config to store: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDoc {
    #[serde(default)]
    system: SystemSection,
    #[serde(default)]
    serial: SerialSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SystemSection {
    app_to_queue: Option<String>,
    queue_to_app: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SerialSection {
    enable: Option<bool>,
    com1: Option<String>,
}

/// Read a configuration file and apply it to the system object.
///
/// The system object must already exist with its keys installed. A parse
/// failure happens before the first store write, so the store is either
/// fully updated or untouched.
pub fn load_into_store(path: &Path, store: &mut ObjectStore) -> Result<(), ConfigError> {
    let text = fs::read_to_string(path)?;
    let doc: ConfigDoc = serde_json::from_str(&text)?;

    if let Some(name) = doc.system.app_to_queue {
        debug!(queue = %name, "config: app-to-communicator queue");
        store.set(SYSTEM_OBJECT, CFG_A2Q, Value::Str(name))?;
    }
    if let Some(name) = doc.system.queue_to_app {
        debug!(queue = %name, "config: communicator-to-app queue");
        store.set(SYSTEM_OBJECT, CFG_Q2A, Value::Str(name))?;
    }
    if let Some(enable) = doc.serial.enable {
        debug!(enable, "config: serial link");
        store.set(SYSTEM_OBJECT, SERIAL_EN, Value::Bool(enable))?;
    }
    if let Some(device) = doc.serial.com1 {
        debug!(device = %device, "config: serial device");
        store.set(SYSTEM_OBJECT, SERIAL_COM1, Value::Str(device))?;
    }
    Ok(())
}
