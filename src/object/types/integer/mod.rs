//! Fixed-width integer descriptors (UNSIGNED8/16/32, INTEGER8/16/32).
//! One generic implementation serves every width; inline storage is allowed.
use core::marker::PhantomData;

use crate::error::ObjError;
use crate::object::entry::ObjEntry;
use crate::object::notify::NodeContext;
use crate::object::types::{read_fixed, size_fixed, write_fixed, ObjType, Scalar};

/// Descriptor for integer entries of native type `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integer<T>(PhantomData<T>);

impl<T> Integer<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

pub static CO_TUNSIGNED8: Integer<u8> = Integer::new();
pub static CO_TUNSIGNED16: Integer<u16> = Integer::new();
pub static CO_TUNSIGNED32: Integer<u32> = Integer::new();
pub static CO_TSIGNED8: Integer<i8> = Integer::new();
pub static CO_TSIGNED16: Integer<i16> = Integer::new();
pub static CO_TSIGNED32: Integer<i32> = Integer::new();

impl<T: Scalar> ObjType for Integer<T> {
    fn size(&self, obj: &ObjEntry<'_>, _node: &NodeContext<'_>, _width: u32) -> u32 {
        size_fixed(obj, T::WIDTH)
    }

    fn init(&self, _obj: &ObjEntry<'_>, _node: &NodeContext<'_>) -> Result<(), ObjError> {
        Ok(())
    }

    fn read(
        &self,
        obj: &ObjEntry<'_>,
        _node: &NodeContext<'_>,
        buffer: &mut [u8],
    ) -> Result<(), ObjError> {
        read_fixed(obj, buffer, T::WIDTH)
    }

    fn write(
        &self,
        obj: &mut ObjEntry<'_>,
        node: &NodeContext<'_>,
        buffer: &[u8],
    ) -> Result<(), ObjError> {
        write_fixed(obj, node, buffer, T::WIDTH)
    }
}
