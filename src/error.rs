//! Error definitions shared across library modules.
//! Each type models one failure domain: frame construction, driver
//! operations, hardware reports, and object-dictionary access.
use thiserror_no_std::Error;

//==================================================================================FRAME_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur while building a standard CAN frame.
pub enum FrameError {
    /// Identifier does not fit into the 11-bit standard range.
    #[error("Invalid standard identifier: {id:#x}")]
    InvalidId { id: u32 },
    /// Classic CAN carries at most eight payload bytes.
    #[error("Payload too long: {len} bytes")]
    TooLong { len: usize },
}

//==================================================================================HAL_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures reported by the hardware peripheral.
pub enum HalError {
    /// The peripheral rejected the request parameters (frame shape, timing values).
    #[error("Peripheral rejected parameters")]
    Param,
    /// Any other peripheral failure (wrong state, timeout, lost arbitration…).
    #[error("Peripheral failure")]
    Failed,
}

//==================================================================================CAN_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors returned by the transport capability set.
pub enum CanError {
    /// No bit-timing profile exists for the requested rate. Not retryable.
    #[error("Unsupported bit rate: {0} bit/s")]
    UnsupportedBitrate(u32),
    /// The peripheral refused the bit-timing configuration.
    #[error("Bit timing rejected by the peripheral")]
    Config,
    /// Every transmit mailbox is occupied and the frame cannot be deferred.
    #[error("Transport busy: no free transmit mailbox")]
    Busy,
    /// The peripheral rejected the frame shape; retrying will not help.
    #[error("Frame rejected by the peripheral")]
    InvalidFrame,
    /// Generic peripheral failure.
    #[error("Transport failure")]
    Transport,
}

impl From<HalError> for CanError {
    fn from(err: HalError) -> Self {
        match err {
            HalError::Param => CanError::InvalidFrame,
            HalError::Failed => CanError::Transport,
        }
    }
}

//==================================================================================OBJ_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised by object-dictionary entries and their type descriptors.
pub enum ObjError {
    /// Missing storage or a buffer whose size differs from the type width.
    #[error("Bad argument")]
    BadArg,
    /// The type cannot honor the storage mode requested for the entry.
    #[error("Type initialization failed for {index:#06x}:{sub}")]
    TypeInit { index: u16, sub: u8 },
    /// No entry with the requested index and sub-index.
    #[error("Object {index:#06x}:{sub} not found")]
    NotFound { index: u16, sub: u8 },
    /// Dictionary entries are not strictly ordered by (index, sub-index).
    #[error("Dictionary not sorted at {index:#06x}:{sub}")]
    Unsorted { index: u16, sub: u8 },
}
