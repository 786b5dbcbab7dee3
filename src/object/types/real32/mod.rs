//! REAL32 descriptor: 32-bit IEEE-754 float entries.
//!
//! Values are kept as their raw bit pattern, so a write followed by a read
//! returns exactly the same encoding (NaN payloads and signed zeros included).
//! Inline storage is refused at init: dictionary builders fill inline cells
//! by numeric cast, which cannot carry a float encoding losslessly.
use crate::error::ObjError;
use crate::object::entry::ObjEntry;
use crate::object::notify::NodeContext;
use crate::object::types::{read_fixed, size_fixed, write_fixed, ObjType};

const REAL32_SIZE: usize = 4;

/// Descriptor shared by every REAL32 entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Real32;

/// The REAL32 descriptor instance.
pub static CO_TREAL32: Real32 = Real32;

impl ObjType for Real32 {
    fn size(&self, obj: &ObjEntry<'_>, _node: &NodeContext<'_>, _width: u32) -> u32 {
        size_fixed(obj, REAL32_SIZE)
    }

    fn init(&self, obj: &ObjEntry<'_>, _node: &NodeContext<'_>) -> Result<(), ObjError> {
        if obj.is_direct() {
            let key = obj.key();
            #[cfg(feature = "defmt")]
            defmt::error!("REAL32 {=u16:#x}:{=u8} cannot use direct storage", key.index(), key.sub());
            return Err(ObjError::TypeInit {
                index: key.index(),
                sub: key.sub(),
            });
        }
        Ok(())
    }

    fn read(
        &self,
        obj: &ObjEntry<'_>,
        _node: &NodeContext<'_>,
        buffer: &mut [u8],
    ) -> Result<(), ObjError> {
        read_fixed(obj, buffer, REAL32_SIZE)
    }

    fn write(
        &self,
        obj: &mut ObjEntry<'_>,
        node: &NodeContext<'_>,
        buffer: &[u8],
    ) -> Result<(), ObjError> {
        write_fixed(obj, node, buffer, REAL32_SIZE)
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
