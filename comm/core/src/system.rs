//! Predefined system object layout
//!
//! The daemon keeps its own runtime settings (config file path, queue names,
//! serial flags) as ordinary properties of one built-in object. External
//! objects come from configuration files.

use crate::ids::{ObjectId, PropertyKey};

/// Identifier of the built-in system object
pub const SYSTEM_OBJECT: ObjectId = ObjectId::new(1);

/// Name of the built-in system object
pub const SYSTEM_NAME: &str = "communicator";

/// Path of the configuration file
pub const CFG_FILE_PATH: PropertyKey = PropertyKey::new_unchecked(0x0001);
/// Name of the application-to-communicator message queue
pub const CFG_A2Q: PropertyKey = PropertyKey::new_unchecked(0x0002);
/// Name of the communicator-to-application message queue
pub const CFG_Q2A: PropertyKey = PropertyKey::new_unchecked(0x0003);
/// Whether the serial link is enabled
pub const SERIAL_EN: PropertyKey = PropertyKey::new_unchecked(0x0004);
/// Path of the first serial device
pub const SERIAL_COM1: PropertyKey = PropertyKey::new_unchecked(0x0005);

/// Number of properties on the system object
pub const SYSTEM_PROPERTY_COUNT: usize = 5;

/// All system property keys, in declaration order
pub const SYSTEM_KEYS: [PropertyKey; SYSTEM_PROPERTY_COUNT] =
    [CFG_FILE_PATH, CFG_A2Q, CFG_Q2A, SERIAL_EN, SERIAL_COM1];
