//! Hardware seam: the CAN controller as a black box exposing start/stop,
//! a fixed number of transmit mailboxes, one completion event source, and
//! one receive event source. Pin and clock setup live behind `init`.
use core::ops::BitOr;

use crate::driver::bit_timing::BitTiming;
use crate::driver::can_frame::CanFrame;
use crate::error::HalError;

//==================================================================================NOTIFICATIONS
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Set of interrupt sources the peripheral raises.
pub struct Notifications(u8);

impl Notifications {
    pub const NONE: Self = Self(0);
    /// A frame is waiting in receive FIFO 0.
    pub const RX_FIFO0_PENDING: Self = Self(1 << 0);
    /// A transmit mailbox completed and became free.
    pub const TX_MAILBOX_EMPTY: Self = Self(1 << 1);

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// `true` when every source in `other` is also in `self`.
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Notifications {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

//==================================================================================FILTER
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Identifier/mask acceptance filter for standard identifiers.
pub struct Filter {
    /// Filter bank number.
    pub bank: u8,
    /// Receive FIFO the accepted frames go to.
    pub fifo: u8,
    /// Identifier to compare against.
    pub id: u16,
    /// Bits of `id` that must match (0 = don't care).
    pub mask: u16,
}

impl Filter {
    /// Bank 0 routed to FIFO 0 with an empty mask: accepts the full 11-bit space.
    pub const fn accept_all() -> Self {
        Self {
            bank: 0,
            fifo: 0,
            id: 0,
            mask: 0,
        }
    }

    /// Whether a frame with `id` passes the filter.
    pub const fn accepts(&self, id: u16) -> bool {
        (id & self.mask) == (self.id & self.mask)
    }
}

//==================================================================================CAN_PERIPHERAL
/// Contract of the CAN controller. Every call returns in bounded time.
///
/// Methods take `&self` because the same peripheral is reached from task and
/// interrupt context; implementations map them onto register accesses (or,
/// in tests, onto interior-mutable simulated state).
pub trait CanPeripheral {
    /// Enable clocks, route pins, and set interrupt priorities. Idempotent.
    fn init(&self);
    /// Program controller mode and nominal bit timing.
    fn configure(&self, timing: &BitTiming) -> Result<(), HalError>;
    /// Install an acceptance filter.
    fn configure_filter(&self, filter: &Filter);
    /// Leave initialization mode and join the bus.
    fn start(&self);
    /// Leave the bus.
    fn stop(&self);
    /// Enable the given interrupt sources in addition to the active ones.
    fn enable_notifications(&self, notifications: Notifications);
    /// Currently enabled interrupt sources.
    fn notifications(&self) -> Notifications;
    /// Number of transmit mailboxes currently free.
    fn free_tx_mailboxes(&self) -> usize;
    /// Queue a standard data frame into a free mailbox.
    fn add_tx(&self, frame: &CanFrame) -> Result<(), HalError>;
    /// Pop the oldest frame from receive FIFO 0, if any.
    fn take_rx(&self) -> Option<CanFrame>;
    /// Raise the transmit-complete interrupt in software (NVIC set-pending).
    fn pend_tx_complete(&self);
}
