//! Object registry
//!
//! The registry owns every object in the store: the presence bitmap, the
//! per-object name and table, and the one-shot key initialization state.
//! All state lives behind a single owner; there are no process-wide
//! globals, so two stores never alias each other's slots.

use comm_core::{ObjectId, ObjectName, PropertyKey, StoreError, StoreResult};

use crate::{shell_sort, IdBitmap, Property, PropertyTable, TypeTag, Value, MAX_OBJECTS, MAX_PROPERTIES};

/// One allocated object: its name, capacity, and property table
#[derive(Debug, Clone, PartialEq)]
struct ObjectEntry {
    name: ObjectName,
    property_count: usize,
    keys_initialized: bool,
    table: PropertyTable,
}

/// A rendered property slot, ready for diagnostics output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyLine {
    /// Raw property key
    pub key: u16,
    /// Lowercase type name of the current value
    pub type_name: &'static str,
    /// Display rendering of the current value
    pub value: String,
}

/// Fixed-capacity object store
///
/// Objects are created with a name and a property budget, then have their
/// key set installed exactly once, after which values flow through typed
/// set/get operations. Operations never block and never touch I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectStore {
    bitmap: IdBitmap,
    objects: [Option<ObjectEntry>; MAX_OBJECTS],
}

impl ObjectStore {
    /// Create an empty store
    pub const fn new() -> Self {
        const NONE: Option<ObjectEntry> = None;
        Self {
            bitmap: IdBitmap::new(),
            objects: [NONE; MAX_OBJECTS],
        }
    }

    /// Create a new object with the given name and property budget.
    ///
    /// The name must be non-empty; names longer than the bounded length are
    /// truncated at a character boundary. A budget above the per-object
    /// property capacity fails with `OutOfMemory` and leaves no trace of
    /// the attempted object behind.
    pub fn create(&mut self, id: ObjectId, name: &str, property_count: usize) -> StoreResult<()> {
        if name.is_empty() {
            return Err(StoreError::InvalidParam);
        }
        self.bitmap.allocate(id)?;
        if property_count > MAX_PROPERTIES {
            self.bitmap.release(id);
            return Err(StoreError::OutOfMemory);
        }
        self.objects[id.index()] = Some(ObjectEntry {
            name: bounded_name(name),
            property_count,
            keys_initialized: false,
            table: PropertyTable::new(),
        });
        Ok(())
    }

    /// Destroy an object, releasing its identifier and dropping its table
    pub fn destroy(&mut self, id: ObjectId) -> StoreResult<()> {
        if id.index() >= MAX_OBJECTS {
            return Err(StoreError::InvalidParam);
        }
        if self.objects[id.index()].take().is_none() {
            return Err(StoreError::UnknownObject);
        }
        self.bitmap.release(id);
        Ok(())
    }

    /// Install an object's key set.
    ///
    /// The keys are sorted ascending before the table is filled, so every
    /// later lookup can run as a binary search. Only the first slots up to
    /// the object's property budget are installed; surplus keys are
    /// ignored. Succeeds at most once per object: a second call fails with
    /// `IdInUse` and leaves the installed table untouched.
    pub fn init_keys(&mut self, id: ObjectId, keys: &[PropertyKey]) -> StoreResult<()> {
        if keys.is_empty() || id.index() >= MAX_OBJECTS {
            return Err(StoreError::InvalidParam);
        }
        let entry = self.entry_mut(id)?;
        if entry.keys_initialized {
            return Err(StoreError::IdInUse);
        }

        let take = keys.len().min(entry.property_count);
        let mut sorted: heapless::Vec<PropertyKey, MAX_PROPERTIES> = heapless::Vec::new();
        for key in &keys[..take] {
            // capacity bounded by property_count, checked at create
            sorted.push(*key).map_err(|_| StoreError::OutOfMemory)?;
        }
        shell_sort(&mut sorted);

        for key in &sorted {
            if !entry.table.push_slot(Property::null(*key)) {
                return Err(StoreError::OutOfMemory);
            }
        }
        entry.keys_initialized = true;
        Ok(())
    }

    /// Store a value into an object's property.
    ///
    /// The value is fully constructed before the previous one is retired,
    /// so a failed call never leaves the slot half-written.
    pub fn set(&mut self, id: ObjectId, key: PropertyKey, value: Value) -> StoreResult<()> {
        let entry = self.entry_mut(id)?;
        let idx = entry.table.find(key).ok_or(StoreError::UnknownObject)?;
        match entry.table.slot_mut(idx) {
            Some(slot) => {
                slot.set_value(value);
                Ok(())
            }
            None => Err(StoreError::UnknownObject),
        }
    }

    /// Decode raw little-endian bytes and store the result.
    ///
    /// Decoding happens before the slot is touched, so a malformed payload
    /// leaves the previous value in place.
    pub fn set_raw(
        &mut self,
        id: ObjectId,
        key: PropertyKey,
        tag: TypeTag,
        raw: &[u8],
    ) -> StoreResult<()> {
        let value = Value::decode(tag, raw)?;
        self.set(id, key, value)
    }

    /// Borrow an object's property slot
    pub fn get(&self, id: ObjectId, key: PropertyKey) -> StoreResult<&Property> {
        let entry = self.entry(id)?;
        let idx = entry.table.find(key).ok_or(StoreError::UnknownObject)?;
        entry.table.get(idx).ok_or(StoreError::UnknownObject)
    }

    /// Borrow an object's name
    pub fn object_name(&self, id: ObjectId) -> StoreResult<&str> {
        Ok(self.entry(id)?.name.as_str())
    }

    /// Number of slots installed in an object's table
    pub fn property_len(&self, id: ObjectId) -> StoreResult<usize> {
        Ok(self.entry(id)?.table.len())
    }

    /// Check whether an object identifier is allocated
    pub fn is_allocated(&self, id: ObjectId) -> bool {
        self.bitmap.is_allocated(id)
    }

    /// Check if the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.bitmap.is_empty()
    }

    /// Render an object's table as diagnostics lines, in key order
    pub fn describe(&self, id: ObjectId) -> StoreResult<impl Iterator<Item = PropertyLine> + '_> {
        let entry = self.entry(id)?;
        Ok(entry.table.iter().map(|slot| PropertyLine {
            key: slot.key().raw(),
            type_name: slot.type_tag().name(),
            value: slot.value().to_string(),
        }))
    }

    /// Drop every object and release every identifier.
    ///
    /// Safe to call repeatedly; a second pass over an empty store is a
    /// no-op.
    pub fn close(&mut self) {
        for idx in 0..MAX_OBJECTS {
            self.objects[idx] = None;
            self.bitmap.release(ObjectId::new(idx as u16));
        }
    }

    fn entry(&self, id: ObjectId) -> StoreResult<&ObjectEntry> {
        self.objects
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(StoreError::UnknownObject)
    }

    fn entry_mut(&mut self, id: ObjectId) -> StoreResult<&mut ObjectEntry> {
        self.objects
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(StoreError::UnknownObject)
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate a name to the bounded length, respecting character boundaries
fn bounded_name(name: &str) -> ObjectName {
    let mut end = name.len().min(comm_core::OBJ_NAME_LEN);
    while end > 0 && !name.is_char_boundary(end) {
        end -= 1;
    }
    // a prefix of at most OBJ_NAME_LEN bytes always fits
    ObjectName::try_from(&name[..end]).unwrap_or_default()
}
