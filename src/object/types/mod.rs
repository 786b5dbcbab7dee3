//! Type descriptors: stateless behavior tables shared by every entry of one
//! representation.
//!
//! A descriptor implements four operations against an entry, the owning node,
//! and a caller buffer. Buffers carry the little-endian encoding of the native
//! value and must be exactly as long as the representation's width.
pub mod integer;
pub mod real32;

use crate::error::ObjError;
use crate::object::entry::ObjEntry;
use crate::object::notify::NodeContext;

pub use integer::{
    Integer, CO_TSIGNED16, CO_TSIGNED32, CO_TSIGNED8, CO_TUNSIGNED16, CO_TUNSIGNED32,
    CO_TUNSIGNED8,
};
pub use real32::{Real32, CO_TREAL32};

//==================================================================================OBJ_TYPE
/// Behavior table of one representation.
pub trait ObjType: Sync {
    /// Byte width of the entry when it is backed by storage, else `0`
    /// (entry not currently materialized).
    fn size(&self, obj: &ObjEntry<'_>, node: &NodeContext<'_>, width: u32) -> u32;

    /// Check configuration invariants before first use.
    ///
    /// # Errors
    ///
    /// [`ObjError::TypeInit`] when the representation cannot use the entry's storage mode.
    fn init(&self, obj: &ObjEntry<'_>, node: &NodeContext<'_>) -> Result<(), ObjError>;

    /// Decode the stored bit pattern into `buffer`.
    ///
    /// # Errors
    ///
    /// [`ObjError::BadArg`] when storage is missing or `buffer` has the wrong
    /// length; `buffer` is left untouched.
    fn read(&self, obj: &ObjEntry<'_>, node: &NodeContext<'_>, buffer: &mut [u8])
        -> Result<(), ObjError>;

    /// Encode `buffer` into the entry's storage and report qualifying changes
    /// to the node's TPDO notifier.
    ///
    /// # Errors
    ///
    /// [`ObjError::BadArg`] when storage is missing or `buffer` has the wrong
    /// length; the stored value is left untouched.
    fn write(&self, obj: &mut ObjEntry<'_>, node: &NodeContext<'_>, buffer: &[u8])
        -> Result<(), ObjError>;
}

//==================================================================================BIT_PATTERNS
/// IEEE-754 encoding of `value`, bit for bit (NaN payloads included).
#[inline]
pub fn float_to_bits(value: f32) -> u32 {
    value.to_bits()
}

/// Value whose IEEE-754 encoding is `bits`.
#[inline]
pub fn float_from_bits(bits: u32) -> f32 {
    f32::from_bits(bits)
}

//==================================================================================SCALAR
mod sealed {
    pub trait Sealed {}
}

/// Native values that fit the 32-bit storage cell of an entry.
pub trait Scalar: Copy + sealed::Sealed + Send + Sync + 'static {
    /// Width of the encoded value in bytes.
    const WIDTH: usize;
    /// Raw bit pattern kept in the storage cell.
    fn to_raw(self) -> u32;
    /// Native value of a raw bit pattern.
    fn from_raw(raw: u32) -> Self;
}

macro_rules! impl_scalar_int {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}
        impl Scalar for $ty {
            const WIDTH: usize = core::mem::size_of::<$ty>();
            #[inline]
            fn to_raw(self) -> u32 {
                self as $unsigned as u32
            }
            #[inline]
            fn from_raw(raw: u32) -> Self {
                raw as $unsigned as $ty
            }
        }
    )*};
}

impl_scalar_int!(u8 => u8, u16 => u16, u32 => u32, i8 => u8, i16 => u16, i32 => u32);

impl sealed::Sealed for f32 {}
impl Scalar for f32 {
    const WIDTH: usize = 4;
    #[inline]
    fn to_raw(self) -> u32 {
        float_to_bits(self)
    }
    #[inline]
    fn from_raw(raw: u32) -> Self {
        float_from_bits(raw)
    }
}

//==================================================================================SHARED_OPS
// Operations common to every fixed-width descriptor.

pub(crate) fn size_fixed(obj: &ObjEntry<'_>, width: usize) -> u32 {
    if obj.is_materialized() {
        width as u32
    } else {
        0
    }
}

pub(crate) fn read_fixed(obj: &ObjEntry<'_>, buffer: &mut [u8], width: usize) -> Result<(), ObjError> {
    if buffer.len() != width {
        return Err(ObjError::BadArg);
    }
    let raw = obj.raw().ok_or(ObjError::BadArg)?;
    buffer.copy_from_slice(&raw.to_le_bytes()[..width]);
    Ok(())
}

pub(crate) fn write_fixed(
    obj: &mut ObjEntry<'_>,
    node: &NodeContext<'_>,
    buffer: &[u8],
    width: usize,
) -> Result<(), ObjError> {
    if buffer.len() != width {
        return Err(ObjError::BadArg);
    }
    let mut bytes = [0u8; 4];
    bytes[..width].copy_from_slice(buffer);
    let encoded = u32::from_le_bytes(bytes);

    let previous = obj.store_raw(encoded).ok_or(ObjError::BadArg)?;

    let mask = u32::MAX >> (8 * (4 - width));
    let key = obj.key();
    if key.is_async() && key.is_pdo_mappable() && (previous & mask) != encoded {
        #[cfg(feature = "defmt")]
        defmt::trace!("{=u16:#x}:{=u8} changed, triggering TPDO", key.index(), key.sub());
        node.tpdo().trigger(key);
    }
    Ok(())
}
