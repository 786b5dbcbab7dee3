//! Object key: 16-bit index, 8-bit sub-index, and the access/behavior flags
//! packed the way CANopen node stacks lay them out in their object tables.
use core::ops::BitOr;

//==================================================================================OBJ_FLAGS
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Access and behavior flags of an object entry.
pub struct ObjFlags(u8);

impl ObjFlags {
    pub const NONE: Self = Self(0);
    /// Readable through SDO.
    pub const READ: Self = Self(0x01);
    /// Writable through SDO.
    pub const WRITE: Self = Self(0x02);
    /// May be mapped into a PDO.
    pub const PDO_MAP: Self = Self(0x04);
    /// Node-ID substitution. Reserved: never stored, always reads as off.
    pub const NODE_ID: Self = Self(0x08);
    /// Value changes are evaluated for event-driven TPDO transmission.
    pub const ASYNC: Self = Self(0x10);
    /// Value is held inline in the entry's own storage cell.
    pub const DIRECT: Self = Self(0x20);
    /// Shorthand for `READ | WRITE`.
    pub const RW: Self = Self(0x03);

    const SUPPORTED: u8 = 0x01 | 0x02 | 0x04 | 0x10 | 0x20;

    /// Build from raw bits; unsupported bits (node-ID substitution) are dropped.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::SUPPORTED)
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// `true` when every flag of `other` is set.
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self::from_bits(self.0 | other.0)
    }

    #[inline]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for ObjFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

//==================================================================================OBJ_KEY
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Address and flags of one object entry.
pub struct ObjKey {
    index: u16,
    sub: u8,
    flags: ObjFlags,
}

impl ObjKey {
    pub const fn new(index: u16, sub: u8, flags: ObjFlags) -> Self {
        Self {
            index,
            sub,
            flags: ObjFlags::from_bits(flags.bits()),
        }
    }

    /// Packed form `index << 16 | sub << 8 | flags`.
    #[inline]
    pub const fn packed(&self) -> u32 {
        ((self.index as u32) << 16) | ((self.sub as u32) << 8) | self.flags.bits() as u32
    }

    /// Inverse of [`packed`](Self::packed).
    #[inline]
    pub const fn from_packed(raw: u32) -> Self {
        Self::new(
            (raw >> 16) as u16,
            ((raw >> 8) & 0xFF) as u8,
            ObjFlags::from_bits((raw & 0xFF) as u8),
        )
    }

    #[inline]
    pub const fn index(&self) -> u16 {
        self.index
    }

    #[inline]
    pub const fn sub(&self) -> u8 {
        self.sub
    }

    #[inline]
    pub const fn flags(&self) -> ObjFlags {
        self.flags
    }

    /// Same address (flags ignored).
    #[inline]
    pub const fn addresses(&self, index: u16, sub: u8) -> bool {
        self.index == index && self.sub == sub
    }

    #[inline]
    pub const fn is_direct(&self) -> bool {
        self.flags.contains(ObjFlags::DIRECT)
    }

    #[inline]
    pub const fn is_async(&self) -> bool {
        self.flags.contains(ObjFlags::ASYNC)
    }

    #[inline]
    pub const fn is_pdo_mappable(&self) -> bool {
        self.flags.contains(ObjFlags::PDO_MAP)
    }

    #[inline]
    pub const fn is_readable(&self) -> bool {
        self.flags.contains(ObjFlags::READ)
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.flags.contains(ObjFlags::WRITE)
    }

    /// Always `false`: node-ID substitution is not supported.
    #[inline]
    pub const fn is_node_id(&self) -> bool {
        false
    }

    pub(crate) const fn with_direct(self, direct: bool) -> Self {
        let flags = if direct {
            self.flags.union(ObjFlags::DIRECT)
        } else {
            self.flags.difference(ObjFlags::DIRECT)
        };
        Self { flags, ..self }
    }
}
