//! Unit tests for the REAL32 descriptor.
extern crate std;

use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};
use std::vec::Vec;

use super::*;
use crate::object::key::{ObjFlags, ObjKey};
use crate::object::notify::{NoTpdo, TpdoNotifier};
use crate::object::types::float_to_bits;

#[derive(Default)]
struct Triggers(RefCell<Vec<ObjKey>>);

impl TpdoNotifier for Triggers {
    fn trigger(&self, key: ObjKey) {
        self.0.borrow_mut().push(key);
    }
}

const EVENT: ObjFlags = ObjFlags::RW.union(ObjFlags::PDO_MAP).union(ObjFlags::ASYNC);

fn key(flags: ObjFlags) -> ObjKey {
    ObjKey::new(0x6401, 1, flags)
}

//==================================================================================SIZE_INIT
#[test]
/// Width is 4 when storage exists and 0 otherwise.
fn test_size() {
    let cell = AtomicU32::new(0);
    let node = NodeContext::new(&NoTpdo);
    let bound = ObjEntry::external(key(ObjFlags::RW), &CO_TREAL32, &cell);
    let unbound = ObjEntry::unbound(key(ObjFlags::RW), &CO_TREAL32);
    assert_eq!(bound.size(&node, 0), 4);
    assert_eq!(unbound.size(&node, 0), 0);
}

#[test]
/// Direct storage is refused at init.
fn test_init_rejects_direct() {
    let node = NodeContext::new(&NoTpdo);
    let entry = ObjEntry::inline(key(ObjFlags::RW), &CO_TREAL32, 0);
    assert_eq!(
        entry.init(&node),
        Err(ObjError::TypeInit {
            index: 0x6401,
            sub: 1
        })
    );

    let cell = AtomicU32::new(0);
    let entry = ObjEntry::external(key(ObjFlags::RW), &CO_TREAL32, &cell);
    assert_eq!(entry.init(&node), Ok(()));
}

//==================================================================================READ_WRITE
#[test]
/// Written encodings come back bit for bit, including NaN payloads and -0.0.
fn test_bit_exact_round_trip() {
    let cell = AtomicU32::new(0);
    let node = NodeContext::new(&NoTpdo);
    let mut entry = ObjEntry::external(key(ObjFlags::RW), &CO_TREAL32, &cell);

    for bits in [0x7FC0_1234u32, 0xFF80_0001, 0x8000_0000, 0x3F80_0000, 0x0000_0001] {
        entry.write(&node, &bits.to_le_bytes()).unwrap();
        let mut out = [0u8; 4];
        entry.read(&node, &mut out).unwrap();
        assert_eq!(u32::from_le_bytes(out), bits);
        assert_eq!(cell.load(Ordering::Relaxed), bits);
    }
}

#[test]
/// Typed helpers encode the native value.
fn test_typed_helpers() {
    let cell = AtomicU32::new(0);
    let node = NodeContext::new(&NoTpdo);
    let mut entry = ObjEntry::external(key(ObjFlags::RW), &CO_TREAL32, &cell);

    entry.write_f32(&node, -12.5).unwrap();
    assert_eq!(cell.load(Ordering::Relaxed), float_to_bits(-12.5));
    assert_eq!(entry.read_f32(&node).unwrap(), -12.5);
}

#[test]
/// A wrong buffer length is rejected without touching storage or the notifier.
fn test_wrong_width_rejected() {
    let cell = AtomicU32::new(float_to_bits(1.5));
    let triggers = Triggers::default();
    let node = NodeContext::new(&triggers);
    let mut entry = ObjEntry::external(key(EVENT), &CO_TREAL32, &cell);

    assert_eq!(entry.write(&node, &[0x00, 0x40]), Err(ObjError::BadArg));
    assert_eq!(entry.write(&node, &[0u8; 8]), Err(ObjError::BadArg));
    assert_eq!(cell.load(Ordering::Relaxed), float_to_bits(1.5));
    assert!(triggers.0.borrow().is_empty());

    let mut short = [0xAAu8; 2];
    assert_eq!(entry.read(&node, &mut short), Err(ObjError::BadArg));
    assert_eq!(short, [0xAA; 2]);
}

#[test]
/// Unbound entries cannot be read or written.
fn test_unbound_is_bad_arg() {
    let node = NodeContext::new(&NoTpdo);
    let mut entry = ObjEntry::unbound(key(ObjFlags::RW), &CO_TREAL32);
    let mut out = [0u8; 4];
    assert_eq!(entry.read(&node, &mut out), Err(ObjError::BadArg));
    assert_eq!(entry.write(&node, &[0u8; 4]), Err(ObjError::BadArg));

    let cell = AtomicU32::new(float_to_bits(2.0));
    entry.bind(&cell);
    assert_eq!(entry.read_f32(&node), Ok(2.0));
}

//==================================================================================TPDO_TRIGGER
#[test]
/// Event-driven, mapped entries notify once per actual change.
fn test_trigger_on_change_only() {
    let cell = AtomicU32::new(0);
    let triggers = Triggers::default();
    let node = NodeContext::new(&triggers);
    let mut entry = ObjEntry::external(key(EVENT), &CO_TREAL32, &cell);

    entry.write_f32(&node, 3.25).unwrap();
    entry.write_f32(&node, 3.25).unwrap();
    assert_eq!(triggers.0.borrow().as_slice(), &[entry.key()]);

    entry.write_f32(&node, 4.0).unwrap();
    assert_eq!(triggers.0.borrow().len(), 2);
}

#[test]
/// Signed zeros differ in encoding, so flipping the sign is a change.
fn test_signed_zero_is_a_change() {
    let cell = AtomicU32::new(float_to_bits(0.0));
    let triggers = Triggers::default();
    let node = NodeContext::new(&triggers);
    let mut entry = ObjEntry::external(key(EVENT), &CO_TREAL32, &cell);

    entry.write_f32(&node, -0.0).unwrap();
    assert_eq!(triggers.0.borrow().len(), 1);
}

#[test]
/// Without both ASYNC and PDO_MAP no notification is sent.
fn test_no_trigger_without_event_flags() {
    let cell = AtomicU32::new(0);
    let triggers = Triggers::default();
    let node = NodeContext::new(&triggers);

    let mut mapped_only =
        ObjEntry::external(key(ObjFlags::RW | ObjFlags::PDO_MAP), &CO_TREAL32, &cell);
    mapped_only.write_f32(&node, 1.0).unwrap();

    let mut async_only = ObjEntry::external(key(ObjFlags::RW | ObjFlags::ASYNC), &CO_TREAL32, &cell);
    async_only.write_f32(&node, 2.0).unwrap();

    assert!(triggers.0.borrow().is_empty());
    assert_eq!(cell.load(Ordering::Relaxed), float_to_bits(2.0));
}
