//! Object store tests for comm-store

use comm_core::{ObjectId, PropertyKey, StoreError};
use comm_store::{ObjectStore, TypeTag, Value, MAX_OBJECTS, MAX_PROPERTIES};

fn key(raw: u16) -> PropertyKey {
    PropertyKey::new_unchecked(raw)
}

#[test]
fn test_create_marks_id_allocated() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(3);
    assert!(!store.is_allocated(id));

    store.create(id, "sensor", 4).unwrap();
    assert!(store.is_allocated(id));
    assert_eq!(store.object_name(id), Ok("sensor"));
}

#[test]
fn test_destroy_releases_id() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(3);
    store.create(id, "sensor", 4).unwrap();

    store.destroy(id).unwrap();
    assert!(!store.is_allocated(id));
    assert_eq!(store.get(id, key(1)), Err(StoreError::UnknownObject));
}

#[test]
fn test_every_id_in_range_is_usable() {
    let mut store = ObjectStore::new();
    for idx in 0..MAX_OBJECTS as u16 {
        store.create(ObjectId::new(idx), "obj", 1).unwrap();
    }
    for idx in 0..MAX_OBJECTS as u16 {
        assert!(store.is_allocated(ObjectId::new(idx)));
    }
}

#[test]
fn test_out_of_range_id_rejected() {
    let mut store = ObjectStore::new();
    assert_eq!(
        store.create(ObjectId::new(MAX_OBJECTS as u16), "beyond", 1),
        Err(StoreError::InvalidParam)
    );
    assert_eq!(
        store.create(ObjectId::new(u16::MAX), "far-beyond", 1),
        Err(StoreError::InvalidParam)
    );
}

#[test]
fn test_init_keys_orders_unsorted_input() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(0);
    store.create(id, "pair", 2).unwrap();
    store.init_keys(id, &[key(10), key(2)]).unwrap();

    let keys: Vec<u16> = store.describe(id).unwrap().map(|line| line.key).collect();
    assert_eq!(keys, vec![2, 10]);
}

#[test]
fn test_init_keys_on_unallocated_object() {
    let mut store = ObjectStore::new();
    assert_eq!(
        store.init_keys(ObjectId::new(2), &[key(1)]),
        Err(StoreError::UnknownObject)
    );
}

#[test]
fn test_second_init_keys_rejected() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(0);
    store.create(id, "once", 1).unwrap();
    store.init_keys(id, &[key(4)]).unwrap();
    assert_eq!(store.init_keys(id, &[key(4)]), Err(StoreError::IdInUse));
}

#[test]
fn test_get_hit_and_miss() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(0);
    store.create(id, "obj", 3).unwrap();
    store.init_keys(id, &[key(20), key(5), key(12)]).unwrap();

    assert_eq!(store.get(id, key(12)).unwrap().key(), key(12));
    assert_eq!(store.get(id, key(13)), Err(StoreError::UnknownObject));
}

#[test]
fn test_set_on_missing_key_reports_unknown_object() {
    let mut store = ObjectStore::new();
    assert_eq!(
        store.set(ObjectId::new(1), key(99), Value::Int32(7)),
        Err(StoreError::UnknownObject)
    );
}

#[test]
fn test_string_to_int_transition() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(0);
    store.create(id, "obj", 1).unwrap();
    store.init_keys(id, &[key(1)]).unwrap();

    store
        .set(id, key(1), Value::Str("transient".to_owned()))
        .unwrap();
    assert_eq!(store.get(id, key(1)).unwrap().type_tag(), TypeTag::Str);
    assert_eq!(store.get(id, key(1)).unwrap().byte_len(), 9);

    store.set(id, key(1), Value::Int32(1234)).unwrap();
    let slot = store.get(id, key(1)).unwrap();
    assert_eq!(slot.type_tag(), TypeTag::Int32);
    assert_eq!(slot.value(), &Value::Int32(1234));
    assert_eq!(slot.byte_len(), 4);
}

#[test]
fn test_blob_round_trip_through_raw_interface() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(0);
    store.create(id, "obj", 1).unwrap();
    store.init_keys(id, &[key(1)]).unwrap();

    let payload = [0u8, 0xFF, 0x55, 0xAA];
    store.set_raw(id, key(1), TypeTag::Blob, &payload).unwrap();

    let slot = store.get(id, key(1)).unwrap();
    assert_eq!(slot.value(), &Value::Blob(payload.to_vec()));
    assert_eq!(slot.byte_len(), payload.len());
}

#[test]
fn test_close_then_close_again() {
    let mut store = ObjectStore::new();
    store.create(ObjectId::new(0), "a", 1).unwrap();
    store.create(ObjectId::new(7), "b", 2).unwrap();

    store.close();
    assert!(store.is_empty());

    // second pass over an empty store must be harmless
    store.close();
    assert!(store.is_empty());

    // identifiers are reusable afterwards
    store.create(ObjectId::new(0), "fresh", 1).unwrap();
    assert!(store.is_allocated(ObjectId::new(0)));
}

#[test]
fn test_budget_above_capacity_fails_cleanly() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(6);
    assert_eq!(
        store.create(id, "greedy", MAX_PROPERTIES + 1),
        Err(StoreError::OutOfMemory)
    );
    assert!(!store.is_allocated(id));
    assert!(store.is_empty());
}

#[test]
fn test_sys_object_scenario() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(1);
    store.create(id, "sys", 2).unwrap();
    store.init_keys(id, &[key(10), key(2)]).unwrap();

    store
        .set_raw(id, key(2), TypeTag::Uint16, &7u16.to_le_bytes())
        .unwrap();
    assert_eq!(store.get(id, key(2)).unwrap().value(), &Value::Uint16(7));

    assert_eq!(
        store.set(id, key(99), Value::Null),
        Err(StoreError::UnknownObject)
    );
}

#[test]
fn test_describe_renders_types_and_values() {
    let mut store = ObjectStore::new();
    let id = ObjectId::new(0);
    store.create(id, "obj", 3).unwrap();
    store.init_keys(id, &[key(1), key(2), key(3)]).unwrap();
    store.set(id, key(1), Value::Str("on".to_owned())).unwrap();
    store.set(id, key(2), Value::Bool(true)).unwrap();

    let lines: Vec<_> = store.describe(id).unwrap().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].type_name, "string");
    assert_eq!(lines[0].value, "on");
    assert_eq!(lines[1].type_name, "bool");
    assert_eq!(lines[1].value, "true");
    assert_eq!(lines[2].type_name, "null");
    assert_eq!(lines[2].value, "NULL");

    // a fresh call restarts the sequence from the top
    let again: Vec<_> = store.describe(id).unwrap().collect();
    assert_eq!(again, lines);
}
