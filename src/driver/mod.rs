//! CAN transport layer: standard frame representation, bit-timing profile
//! table, TPDO overflow queue, hardware/diagnostic abstraction traits, and the
//! mailbox driver tying them together.
//!
//! ## Execution contexts
//!
//! The driver is shared between two contexts without any lock:
//!
//! - **task context** calls the [`CanDriver`](traits::can_driver::CanDriver)
//!   operations (`send` is the only producer of the overflow queue);
//! - **interrupt context** calls
//!   [`MailboxDriver::on_tx_complete`](mailbox::MailboxDriver::on_tx_complete)
//!   whenever a transmit mailbox becomes free (the only consumer).
//!
//! Every operation returns in bounded time; none of them blocks or spins.

pub mod bit_timing;
pub mod can_frame;
pub mod mailbox;
pub mod overflow_queue;
pub mod traits;

/// Number of hardware transmit mailboxes on the reference controller (bxCAN).
///
/// Also the default capacity of the software overflow queue, which holds at
/// most `TX_MAILBOX_COUNT - 1` distinct frames.
pub const TX_MAILBOX_COUNT: usize = 3;

/// Largest standard (11-bit) identifier.
pub const MAX_STANDARD_ID: u16 = 0x7FF;
