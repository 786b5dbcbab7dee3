//! Unit tests for entry storage handling.
use core::sync::atomic::{AtomicU32, Ordering};

use super::*;
use crate::object::key::ObjFlags;
use crate::object::notify::NoTpdo;
use crate::object::types::{CO_TREAL32, CO_TUNSIGNED32};

fn key() -> ObjKey {
    ObjKey::new(0x3000, 2, ObjFlags::RW)
}

#[test]
/// Constructors keep the DIRECT flag in line with the storage variant.
fn test_direct_flag_follows_storage() {
    let cell = AtomicU32::new(0);
    let forced = ObjKey::new(0x3000, 2, ObjFlags::RW | ObjFlags::DIRECT);

    let inline = ObjEntry::inline(key(), &CO_TUNSIGNED32, 1);
    assert!(inline.key().is_direct() && inline.is_direct());

    let external = ObjEntry::external(forced, &CO_TUNSIGNED32, &cell);
    assert!(!external.key().is_direct() && !external.is_direct());

    let mut unbound = ObjEntry::unbound(forced, &CO_TUNSIGNED32);
    assert!(!unbound.key().is_direct());
    assert!(!unbound.is_materialized());
    unbound.bind(&cell);
    assert!(unbound.is_materialized());
    assert!(!unbound.key().is_direct());
}

#[test]
/// `store_raw` hands back the previous pattern for both storage kinds.
fn test_store_raw() {
    let cell = AtomicU32::new(0x11);
    let mut external = ObjEntry::external(key(), &CO_TUNSIGNED32, &cell);
    assert_eq!(external.store_raw(0x22), Some(0x11));
    assert_eq!(cell.load(Ordering::Relaxed), 0x22);
    assert_eq!(external.raw(), Some(0x22));

    let mut inline = ObjEntry::inline(key(), &CO_TUNSIGNED32, 5);
    assert_eq!(inline.store_raw(6), Some(5));
    assert_eq!(inline.raw(), Some(6));

    let mut unbound = ObjEntry::unbound(key(), &CO_TUNSIGNED32);
    assert_eq!(unbound.store_raw(1), None);
    assert_eq!(unbound.raw(), None);
}

#[test]
/// The application sees writes through the shared cell.
fn test_external_cell_is_shared() {
    let cell = AtomicU32::new(0);
    let node = NodeContext::new(&NoTpdo);
    let mut entry = ObjEntry::external(key(), &CO_TREAL32, &cell);
    entry.write_f32(&node, 21.0).unwrap();
    assert_eq!(f32::from_bits(cell.load(Ordering::Relaxed)), 21.0);

    cell.store(0.5f32.to_bits(), Ordering::Relaxed);
    assert_eq!(entry.read_f32(&node), Ok(0.5));
}

#[test]
/// Typed access refuses a scalar of another width.
fn test_typed_width_mismatch() {
    let node = NodeContext::new(&NoTpdo);
    let mut entry = ObjEntry::inline(key(), &CO_TUNSIGNED32, 0);
    assert_eq!(entry.set::<u16>(&node, 3), Err(ObjError::BadArg));
    assert_eq!(entry.get::<u8>(&node), Err(ObjError::BadArg));
    assert_eq!(entry.set::<u32>(&node, 3), Ok(()));
    assert_eq!(entry.get::<u32>(&node), Ok(3));
}

#[test]
/// Storage variant and descriptor are exposed as constructed.
fn test_data_and_descriptor_accessors() {
    let cell = AtomicU32::new(0);
    let node = NodeContext::new(&NoTpdo);

    let mut entry = ObjEntry::unbound(key(), &CO_TREAL32);
    assert!(matches!(entry.data(), ObjData::Unbound));
    assert_eq!(entry.ty().size(&entry, &node, 0), 0);

    entry.bind(&cell);
    assert!(matches!(entry.data(), ObjData::External(bound) if core::ptr::eq(*bound, &cell)));
    assert_eq!(entry.ty().size(&entry, &node, 0), 4);

    let inline = ObjEntry::inline(key(), &CO_TUNSIGNED32, 0x55);
    assert!(matches!(inline.data(), ObjData::Inline(0x55)));
}
