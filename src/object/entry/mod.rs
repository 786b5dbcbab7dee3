//! Object entry: key, storage cell, and a reference to the shared type descriptor.
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::ObjError;
use crate::object::key::ObjKey;
use crate::object::notify::NodeContext;
use crate::object::types::{ObjType, Scalar};

//==================================================================================OBJ_DATA
/// Storage cell of an entry.
#[derive(Debug)]
pub enum ObjData<'a> {
    /// Raw bit pattern held inside the entry (direct storage).
    Inline(u32),
    /// Raw bit pattern held in caller-owned storage, shared with the application.
    External(&'a AtomicU32),
    /// External storage not attached yet; the entry is not materialized.
    Unbound,
}

//==================================================================================OBJ_ENTRY
/// One addressable, typed value of the object dictionary.
pub struct ObjEntry<'a> {
    key: ObjKey,
    data: ObjData<'a>,
    ty: &'static dyn ObjType,
}

impl<'a> ObjEntry<'a> {
    /// Entry with direct storage; sets the `DIRECT` flag.
    pub const fn inline(key: ObjKey, ty: &'static dyn ObjType, raw: u32) -> Self {
        Self {
            key: key.with_direct(true),
            data: ObjData::Inline(raw),
            ty,
        }
    }

    /// Entry backed by caller-owned storage; clears the `DIRECT` flag.
    pub const fn external(key: ObjKey, ty: &'static dyn ObjType, cell: &'a AtomicU32) -> Self {
        Self {
            key: key.with_direct(false),
            data: ObjData::External(cell),
            ty,
        }
    }

    /// Entry whose external storage will be attached later with [`bind`](Self::bind).
    pub const fn unbound(key: ObjKey, ty: &'static dyn ObjType) -> Self {
        Self {
            key: key.with_direct(false),
            data: ObjData::Unbound,
            ty,
        }
    }

    #[inline]
    pub fn key(&self) -> ObjKey {
        self.key
    }

    #[inline]
    pub fn data(&self) -> &ObjData<'a> {
        &self.data
    }

    /// Shared type descriptor.
    #[inline]
    pub fn ty(&self) -> &'static dyn ObjType {
        self.ty
    }

    /// Direct storage is active (derived from the storage variant, not the flag).
    #[inline]
    pub fn is_direct(&self) -> bool {
        matches!(self.data, ObjData::Inline(_))
    }

    /// Storage is present, inline or external.
    #[inline]
    pub fn is_materialized(&self) -> bool {
        !matches!(self.data, ObjData::Unbound)
    }

    /// Attach external storage.
    pub fn bind(&mut self, cell: &'a AtomicU32) {
        self.key = self.key.with_direct(false);
        self.data = ObjData::External(cell);
    }

    /// Stored raw bit pattern, `None` when unbound.
    pub fn raw(&self) -> Option<u32> {
        match &self.data {
            ObjData::Inline(raw) => Some(*raw),
            ObjData::External(cell) => Some(cell.load(Ordering::Acquire)),
            ObjData::Unbound => None,
        }
    }

    /// Replace the stored raw bit pattern and return the previous one.
    /// Unbound entries are left unchanged and yield `None`.
    pub fn store_raw(&mut self, raw: u32) -> Option<u32> {
        match &mut self.data {
            ObjData::Inline(current) => Some(core::mem::replace(current, raw)),
            ObjData::External(cell) => Some(cell.swap(raw, Ordering::AcqRel)),
            ObjData::Unbound => None,
        }
    }

    //==============================================================================DISPATCH

    /// See [`ObjType::size`].
    pub fn size(&self, node: &NodeContext<'_>, width: u32) -> u32 {
        self.ty.size(self, node, width)
    }

    /// See [`ObjType::init`].
    pub fn init(&self, node: &NodeContext<'_>) -> Result<(), ObjError> {
        self.ty.init(self, node)
    }

    /// See [`ObjType::read`].
    pub fn read(&self, node: &NodeContext<'_>, buffer: &mut [u8]) -> Result<(), ObjError> {
        self.ty.read(self, node, buffer)
    }

    /// See [`ObjType::write`].
    pub fn write(&mut self, node: &NodeContext<'_>, buffer: &[u8]) -> Result<(), ObjError> {
        let ty = self.ty;
        ty.write(self, node, buffer)
    }

    /// Typed read through the descriptor.
    pub fn get<T: Scalar>(&self, node: &NodeContext<'_>) -> Result<T, ObjError> {
        let mut bytes = [0u8; 4];
        self.read(node, &mut bytes[..T::WIDTH])?;
        Ok(T::from_raw(u32::from_le_bytes(bytes)))
    }

    /// Typed write through the descriptor.
    pub fn set<T: Scalar>(&mut self, node: &NodeContext<'_>, value: T) -> Result<(), ObjError> {
        let bytes = value.to_raw().to_le_bytes();
        self.write(node, &bytes[..T::WIDTH])
    }

    pub fn read_f32(&self, node: &NodeContext<'_>) -> Result<f32, ObjError> {
        self.get::<f32>(node)
    }

    pub fn write_f32(&mut self, node: &NodeContext<'_>, value: f32) -> Result<(), ObjError> {
        self.set(node, value)
    }
}

impl fmt::Debug for ObjEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjEntry")
            .field("key", &self.key)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
