//! Typed property values
//!
//! A property holds exactly one representation at a time, selected by an
//! explicit type tag. Scalars live inline; strings and blobs own their heap
//! buffers exclusively, so a type transition retires the old buffer when the
//! replacement value is moved in.

use core::fmt;

use comm_core::{StoreError, StoreResult};

/// Data type codes, as exchanged with boundary collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TypeTag {
    Null = 0,
    Int8 = 1,
    Uint8 = 2,
    Int16 = 3,
    Uint16 = 4,
    Int32 = 5,
    Uint32 = 6,
    Int64 = 7,
    Uint64 = 8,
    Float32 = 9,
    Float64 = 10,
    Str = 11,
    Blob = 12,
    Bool = 13,
}

impl TypeTag {
    /// Short lowercase type name for diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Int8 => "int8",
            TypeTag::Uint8 => "uint8",
            TypeTag::Int16 => "int16",
            TypeTag::Uint16 => "uint16",
            TypeTag::Int32 => "int32",
            TypeTag::Uint32 => "uint32",
            TypeTag::Int64 => "int64",
            TypeTag::Uint64 => "uint64",
            TypeTag::Float32 => "float32",
            TypeTag::Float64 => "float64",
            TypeTag::Str => "string",
            TypeTag::Blob => "blob",
            TypeTag::Bool => "bool",
        }
    }

    /// Payload width in bytes for fixed-width types
    ///
    /// `None` for `Null` and the variable-length types. Booleans travel as
    /// 32-bit integers on the wire.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            TypeTag::Int8 | TypeTag::Uint8 => Some(1),
            TypeTag::Int16 | TypeTag::Uint16 => Some(2),
            TypeTag::Int32 | TypeTag::Uint32 | TypeTag::Float32 | TypeTag::Bool => Some(4),
            TypeTag::Int64 | TypeTag::Uint64 | TypeTag::Float64 => Some(8),
            TypeTag::Null | TypeTag::Str | TypeTag::Blob => None,
        }
    }
}

impl TryFrom<u8> for TypeTag {
    type Error = StoreError;

    fn try_from(code: u8) -> StoreResult<Self> {
        match code {
            0 => Ok(TypeTag::Null),
            1 => Ok(TypeTag::Int8),
            2 => Ok(TypeTag::Uint8),
            3 => Ok(TypeTag::Int16),
            4 => Ok(TypeTag::Uint16),
            5 => Ok(TypeTag::Int32),
            6 => Ok(TypeTag::Uint32),
            7 => Ok(TypeTag::Int64),
            8 => Ok(TypeTag::Uint64),
            9 => Ok(TypeTag::Float32),
            10 => Ok(TypeTag::Float64),
            11 => Ok(TypeTag::Str),
            12 => Ok(TypeTag::Blob),
            13 => Ok(TypeTag::Bool),
            _ => Err(StoreError::InvalidType),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single typed value with exactly one active representation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Blob(Vec<u8>),
    Bool(bool),
}

impl Value {
    /// The type tag of the active representation
    pub const fn tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Int8(_) => TypeTag::Int8,
            Value::Uint8(_) => TypeTag::Uint8,
            Value::Int16(_) => TypeTag::Int16,
            Value::Uint16(_) => TypeTag::Uint16,
            Value::Int32(_) => TypeTag::Int32,
            Value::Uint32(_) => TypeTag::Uint32,
            Value::Int64(_) => TypeTag::Int64,
            Value::Uint64(_) => TypeTag::Uint64,
            Value::Float32(_) => TypeTag::Float32,
            Value::Float64(_) => TypeTag::Float64,
            Value::Str(_) => TypeTag::Str,
            Value::Blob(_) => TypeTag::Blob,
            Value::Bool(_) => TypeTag::Bool,
        }
    }

    /// Payload length in bytes
    ///
    /// Fixed-width types report their width, strings their byte length
    /// without any terminator, blobs the exact byte count supplied.
    pub fn byte_len(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Str(s) => s.len(),
            Value::Blob(b) => b.len(),
            // fixed_width is Some for every remaining variant
            other => other.tag().fixed_width().unwrap_or(0),
        }
    }

    /// Decode a value from raw little-endian bytes.
    ///
    /// Fixed-width types read exactly their width and reject shorter input.
    /// For strings and blobs the slice length is authoritative; strings must
    /// be valid UTF-8.
    pub fn decode(tag: TypeTag, raw: &[u8]) -> StoreResult<Value> {
        let value = match tag {
            TypeTag::Null => Value::Null,
            TypeTag::Int8 => Value::Int8(i8::from_le_bytes(take::<1>(raw)?)),
            TypeTag::Uint8 => Value::Uint8(u8::from_le_bytes(take::<1>(raw)?)),
            TypeTag::Int16 => Value::Int16(i16::from_le_bytes(take::<2>(raw)?)),
            TypeTag::Uint16 => Value::Uint16(u16::from_le_bytes(take::<2>(raw)?)),
            TypeTag::Int32 => Value::Int32(i32::from_le_bytes(take::<4>(raw)?)),
            TypeTag::Uint32 => Value::Uint32(u32::from_le_bytes(take::<4>(raw)?)),
            TypeTag::Int64 => Value::Int64(i64::from_le_bytes(take::<8>(raw)?)),
            TypeTag::Uint64 => Value::Uint64(u64::from_le_bytes(take::<8>(raw)?)),
            TypeTag::Float32 => Value::Float32(f32::from_le_bytes(take::<4>(raw)?)),
            TypeTag::Float64 => Value::Float64(f64::from_le_bytes(take::<8>(raw)?)),
            TypeTag::Bool => Value::Bool(i32::from_le_bytes(take::<4>(raw)?) != 0),
            TypeTag::Str => {
                let text = core::str::from_utf8(raw).map_err(|_| StoreError::InvalidParam)?;
                Value::Str(text.to_owned())
            }
            TypeTag::Blob => Value::Blob(raw.to_vec()),
        };
        Ok(value)
    }

    /// Borrow the string payload, if the active representation is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Read the boolean payload, if the active representation is a bool
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

fn take<const W: usize>(raw: &[u8]) -> StoreResult<[u8; W]> {
    match raw.get(..W) {
        Some(bytes) => {
            let mut out = [0u8; W];
            out.copy_from_slice(bytes);
            Ok(out)
        }
        None => Err(StoreError::InvalidParam),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Uint8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Uint16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Uint32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Uint64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
            Value::Blob(v) => write!(f, "{} bytes", v.len()),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}
