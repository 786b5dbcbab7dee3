//! In-memory representation of a classic CAN frame with a standard
//! (11-bit) identifier, as exchanged with the mailbox driver.
use embedded_can::{Id, StandardId};

use crate::driver::MAX_STANDARD_ID;
use crate::error::FrameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Standard data frame. Remote and extended frames are not representable.
pub struct CanFrame {
    id: u16,
    dlc: u8,
    data: [u8; 8],
}

impl CanFrame {
    /// Zeroed frame, used for receive buffers and queue slots.
    pub const EMPTY: CanFrame = CanFrame {
        id: 0,
        dlc: 0,
        data: [0; 8],
    };

    /// Build a frame from a raw identifier and up to eight payload bytes.
    pub fn new(id: u16, payload: &[u8]) -> Result<Self, FrameError> {
        if id > MAX_STANDARD_ID {
            return Err(FrameError::InvalidId { id: id as u32 });
        }
        if payload.len() > 8 {
            return Err(FrameError::TooLong { len: payload.len() });
        }
        let mut data = [0u8; 8];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            dlc: payload.len() as u8,
            data,
        })
    }

    /// Raw 11-bit identifier.
    #[inline]
    pub const fn std_id(&self) -> u16 {
        self.id
    }

    /// Data length code (0-8).
    #[inline]
    pub const fn len(&self) -> u8 {
        self.dlc
    }

    /// `true` when the frame carries no payload.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.dlc == 0
    }

    /// Full eight-byte storage; only the first [`len`](Self::len) bytes are meaningful.
    #[inline]
    pub const fn raw_data(&self) -> &[u8; 8] {
        &self.data
    }

    /// Overwrite this frame with `other` (receive path fills caller buffers in place).
    pub fn copy_from(&mut self, other: &CanFrame) {
        self.id = other.id;
        self.dlc = other.dlc;
        self.data = other.data;
    }
}

impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        match id.into() {
            Id::Standard(id) => CanFrame::new(id.as_raw(), data).ok(),
            Id::Extended(_) => None,
        }
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        false
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        // `id` never exceeds 0x7FF: every constructor validates it.
        Id::Standard(StandardId::new(self.id).unwrap_or(StandardId::ZERO))
    }

    fn dlc(&self) -> usize {
        self.dlc as usize
    }

    fn data(&self) -> &[u8] {
        &self.data[..self.dlc as usize]
    }
}
