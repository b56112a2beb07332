#![forbid(unsafe_code)]

//! # Communicator Core
//!
//! Core types and error taxonomy shared by the communicator daemon.
//! This crate provides the identifier newtypes, the predefined system
//! object layout, and the result codes returned by the in-memory store.

use core::fmt;

pub mod ids;
pub mod system;

pub use ids::*;

/// Communicator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the communicator
pub type StoreResult<T> = Result<T, StoreError>;

/// Error types for store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Malformed caller input
    InvalidParam,
    /// Object identifier already allocated
    IdInUse,
    /// Allocation failed or capacity exhausted
    OutOfMemory,
    /// Object identifier not allocated, or key not present
    UnknownObject,
    /// Property key not present in the table
    UnknownProperty,
    /// Unrecognized data type code
    InvalidType,
}

impl StoreError {
    /// Numeric result code, as exchanged with boundary collaborators
    pub const fn code(self) -> i32 {
        match self {
            StoreError::InvalidParam => -1,
            StoreError::IdInUse => -2,
            StoreError::OutOfMemory => -3,
            StoreError::UnknownObject => -4,
            StoreError::UnknownProperty => -5,
            StoreError::InvalidType => -6,
        }
    }

    /// Map a numeric result code back to an error, if it names one
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(StoreError::InvalidParam),
            -2 => Some(StoreError::IdInUse),
            -3 => Some(StoreError::OutOfMemory),
            -4 => Some(StoreError::UnknownObject),
            -5 => Some(StoreError::UnknownProperty),
            -6 => Some(StoreError::InvalidType),
            _ => None,
        }
    }

    /// Static description string for this error
    pub const fn as_str(self) -> &'static str {
        match self {
            StoreError::InvalidParam => "Invalid caller parameter",
            StoreError::IdInUse => "Object id already in use",
            StoreError::OutOfMemory => "Out of memory",
            StoreError::UnknownObject => "Unknown object id",
            StoreError::UnknownProperty => "Unknown property id",
            StoreError::InvalidType => "Invalid data type",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for StoreError {}

/// Description string for any numeric result code.
///
/// Codes outside the known range map to a generic no-error string; callers
/// must not treat that fallback as success.
pub const fn describe_code(code: i32) -> &'static str {
    match StoreError::from_code(code) {
        Some(err) => err.as_str(),
        None => "No error",
    }
}
