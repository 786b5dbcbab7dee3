//! `canopen-core` library: the lower transport and data-representation layer
//! of a CANopen node in a `no_std` environment. The crate exposes the mailbox
//! CAN driver (with its TPDO overflow queue and bit-timing table) and the
//! object-dictionary type dispatch that triggers event-driven TPDOs.
#![no_std]
//==================================================================================
/// CAN transport: frame representation, bit-timing profiles, overflow queue,
/// hardware seam, and the mailbox driver implementing the transport capability set.
pub mod driver;
/// Errors of the driver and object-dictionary layers.
pub mod error;
/// Object dictionary: keys, entries, type descriptors, and the TPDO notifier seam.
pub mod object;
//==================================================================================
pub use driver::can_frame::CanFrame;
pub use driver::mailbox::MailboxDriver;
pub use driver::traits::can_driver::CanDriver;
pub use error::{CanError, FrameError, HalError, ObjError};
pub use object::dictionary::ObjDict;
pub use object::entry::{ObjData, ObjEntry};
pub use object::key::{ObjFlags, ObjKey};
