//! Per-object property table
//!
//! Slots are filled once at key-initialization time, in ascending key order,
//! and never reordered afterward. Lookups run as a binary search over the
//! sorted key column.

use comm_core::PropertyKey;

use crate::{TypeTag, Value, MAX_PROPERTIES};

/// One key/value slot in an object's table
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    key: PropertyKey,
    value: Value,
}

impl Property {
    /// Create a slot holding the null value
    pub const fn null(key: PropertyKey) -> Self {
        Self {
            key,
            value: Value::Null,
        }
    }

    /// The slot's property key
    pub const fn key(&self) -> PropertyKey {
        self.key
    }

    /// The slot's current value
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Type tag of the current value
    pub const fn type_tag(&self) -> TypeTag {
        self.value.tag()
    }

    /// Payload length of the current value in bytes
    pub fn byte_len(&self) -> usize {
        self.value.byte_len()
    }

    /// Replace the slot's value.
    ///
    /// The replacement is fully constructed before it arrives here, so the
    /// previous buffer is only retired once the new value is in hand.
    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}

/// Fixed-capacity table of properties, ordered by key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyTable {
    slots: heapless::Vec<Property, MAX_PROPERTIES>,
}

impl PropertyTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            slots: heapless::Vec::new(),
        }
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the table holds no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over the slots in key order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.slots.iter()
    }

    /// Borrow a slot by position
    pub fn get(&self, idx: usize) -> Option<&Property> {
        self.slots.get(idx)
    }

    /// Mutably borrow a slot by position
    pub(crate) fn slot_mut(&mut self, idx: usize) -> Option<&mut Property> {
        self.slots.get_mut(idx)
    }

    /// Append a slot; returns `false` when the table is full.
    ///
    /// Callers must append in ascending key order, otherwise `find` is
    /// undefined for this table.
    pub(crate) fn push_slot(&mut self, slot: Property) -> bool {
        self.slots.push(slot).is_ok()
    }

    /// Locate a key's slot position by binary search.
    ///
    /// Requires the slots to be in ascending key order. Returns `None` when
    /// the key is absent, including for an empty table.
    pub fn find(&self, key: PropertyKey) -> Option<usize> {
        let mut head = 0usize;
        let mut end = self.slots.len();
        while head < end {
            let mid = (head + end) / 2;
            match self.slots[mid].key.cmp(&key) {
                core::cmp::Ordering::Less => head = mid + 1,
                core::cmp::Ordering::Greater => end = mid,
                core::cmp::Ordering::Equal => return Some(mid),
            }
        }
        None
    }
}
