//! Mailbox driver: implements [`CanDriver`] on top of a [`CanPeripheral`]
//! with a fixed number of transmit mailboxes, and absorbs TPDO bursts in an
//! [`OverflowQueue`] drained from the transmit-complete interrupt.
//!
//! # TPDO deferral
//!
//! Before sending a TPDO the upper layer calls [`MailboxDriver::pdo_transmit`]
//! (or uses [`MailboxDriver::send_pdo`]). This marks the frame as *pending
//! periodic*; if the following `send` of that frame finds every mailbox
//! busy, the frame is queued and `send` still succeeds. Any other frame is
//! rejected with [`CanError::Busy`]. The marker is only set while the
//! transmit-complete notification is enabled, since nothing would drain the
//! queue otherwise.
//!
//! Every busy mailbox may complete between the mailbox check in `send` and the
//! push, with each completion interrupt finding the queue still empty. `send`
//! therefore checks the mailboxes again after queuing and, if one is free,
//! pends the transmit-complete interrupt through
//! [`CanPeripheral::pend_tx_complete`] so the frame is drained without waiting
//! for further bus traffic.
//!
//! # Interrupt wiring
//!
//! ```rust,ignore
//! static DRIVER: StaticCell<MailboxDriver<Bxcan1, StatusLeds>> = StaticCell::new();
//! static CAN: OnceCell<&'static MailboxDriver<Bxcan1, StatusLeds>> = OnceCell::new();
//!
//! #[interrupt]
//! fn CAN1_TX() {
//!     if let Some(driver) = CAN.get() {
//!         driver.on_tx_complete();
//!     }
//! }
//! ```
use core::sync::atomic::{AtomicU16, AtomicU32, Ordering};

use crate::driver::bit_timing::BitTiming;
use crate::driver::can_frame::CanFrame;
use crate::driver::overflow_queue::{OverflowQueue, PushOutcome};
use crate::driver::traits::can_driver::CanDriver;
use crate::driver::traits::can_peripheral::{CanPeripheral, Filter, Notifications};
use crate::driver::traits::diagnostics::{Diagnostic, DiagnosticHook, NoDiagnostics};
use crate::driver::TX_MAILBOX_COUNT;
use crate::error::{CanError, HalError};

/// Marker value: no TPDO is pending (outside the 11-bit range).
const NO_PENDING_TPDO: u16 = u16::MAX;
/// Marker value: `enable` has not succeeded yet.
const NOT_ENABLED: u32 = 0;

/// CAN driver owning the peripheral, the diagnostics hook, and the overflow queue.
///
/// All methods take `&self`: one instance is shared by task context and the
/// transmit-complete interrupt without any lock.
pub struct MailboxDriver<P, D = NoDiagnostics, const N: usize = TX_MAILBOX_COUNT> {
    peripheral: P,
    diagnostics: D,
    queue: OverflowQueue<N>,
    bitrate: AtomicU32,
    pending_tpdo: AtomicU16,
}

impl<P: CanPeripheral, D: DiagnosticHook, const N: usize> MailboxDriver<P, D, N> {
    /// Wrap a peripheral. `const` so the driver can be placed in a `static`.
    pub const fn new(peripheral: P, diagnostics: D) -> Self {
        Self {
            peripheral,
            diagnostics,
            queue: OverflowQueue::new(),
            bitrate: AtomicU32::new(NOT_ENABLED),
            pending_tpdo: AtomicU16::new(NO_PENDING_TPDO),
        }
    }

    /// Underlying peripheral.
    pub fn peripheral(&self) -> &P {
        &self.peripheral
    }

    /// Diagnostics hook.
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Bit rate selected by the last successful `enable`.
    pub fn bitrate(&self) -> Option<u32> {
        match self.bitrate.load(Ordering::Acquire) {
            NOT_ENABLED => None,
            rate => Some(rate),
        }
    }

    /// Number of TPDO frames waiting in the overflow queue.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Mark `frame` as the pending TPDO so that its next `send` may be deferred.
    ///
    /// Ignored while the transmit-complete notification is disabled.
    pub fn pdo_transmit(&self, frame: &CanFrame) {
        if self
            .peripheral
            .notifications()
            .contains(Notifications::TX_MAILBOX_EMPTY)
        {
            self.pending_tpdo.store(frame.std_id(), Ordering::Release);
        }
    }

    /// Mark `frame` as pending TPDO, then send it.
    pub fn send_pdo(&self, frame: &CanFrame) -> Result<(), CanError> {
        self.pdo_transmit(frame);
        self.send(frame)
    }

    /// Transmit-complete interrupt handler: re-submit queued frames while
    /// mailboxes are free. Returns how many frames reached the hardware.
    pub fn on_tx_complete(&self) -> usize {
        let mut resubmitted = 0;
        while self.peripheral.free_tx_mailboxes() > 0 {
            let Some(frame) = self.queue.pop() else {
                break;
            };
            // Failures are already reported through the diagnostics hook.
            if self.transmit(&frame).is_ok() {
                resubmitted += 1;
            }
        }
        resubmitted
    }

    /// Consume the pending-TPDO marker when it designates `id`.
    fn take_pending(&self, id: u16) -> bool {
        if self.pending_tpdo.load(Ordering::Acquire) == id {
            self.pending_tpdo.store(NO_PENDING_TPDO, Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Hand a frame to a free mailbox.
    fn transmit(&self, frame: &CanFrame) -> Result<(), CanError> {
        match self.peripheral.add_tx(frame) {
            Ok(()) => {
                self.diagnostics.tx_activity();
                Ok(())
            }
            Err(err) => {
                if err == HalError::Param {
                    self.diagnostics.signal(Diagnostic::TxParam {
                        id: frame.std_id(),
                    });
                }
                #[cfg(feature = "defmt")]
                defmt::error!("CAN tx {:#x} failed: {}", frame.std_id(), err);
                Err(err.into())
            }
        }
    }
}

impl<P: CanPeripheral, D: DiagnosticHook, const N: usize> CanDriver for MailboxDriver<P, D, N> {
    fn init(&self) {
        self.peripheral.init();
    }

    fn enable(&self, bitrate: u32) -> Result<(), CanError> {
        let Some(timing) = BitTiming::lookup(bitrate) else {
            #[cfg(feature = "defmt")]
            defmt::error!("Unsupported CAN bit rate: {}", bitrate);
            return Err(CanError::UnsupportedBitrate(bitrate));
        };

        self.peripheral.configure(timing).map_err(|_err| {
            #[cfg(feature = "defmt")]
            defmt::error!("CAN bit timing rejected: {}", _err);
            CanError::Config
        })?;
        self.peripheral.configure_filter(&Filter::accept_all());
        self.peripheral.start();
        self.peripheral.enable_notifications(
            Notifications::RX_FIFO0_PENDING | Notifications::TX_MAILBOX_EMPTY,
        );
        self.bitrate.store(bitrate, Ordering::Release);

        #[cfg(feature = "defmt")]
        defmt::info!("CAN enabled at {} bit/s (prescaler {})", bitrate, timing.prescaler);
        Ok(())
    }

    fn send(&self, frame: &CanFrame) -> Result<(), CanError> {
        let deferrable = self.take_pending(frame.std_id());

        if self.peripheral.free_tx_mailboxes() == 0 {
            if deferrable {
                if self.queue.push(frame) == PushOutcome::Overflowed {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("TPDO overflow queue wrapped, deferred frames lost");
                    self.diagnostics.signal(Diagnostic::QueueOverflow);
                }
                #[cfg(feature = "defmt")]
                defmt::debug!("TPDO {:#x} deferred ({} queued)", frame.std_id(), self.queue.len());
                if self.peripheral.free_tx_mailboxes() > 0 {
                    self.peripheral.pend_tx_complete();
                }
                return Ok(());
            }
            #[cfg(feature = "defmt")]
            defmt::warn!("CAN tx {:#x} dropped: no free mailbox", frame.std_id());
            self.diagnostics.signal(Diagnostic::TxBusy {
                id: frame.std_id(),
            });
            return Err(CanError::Busy);
        }

        self.transmit(frame)
    }

    fn read(&self, frame: &mut CanFrame) -> Option<usize> {
        let received = self.peripheral.take_rx()?;
        frame.copy_from(&received);
        Some(frame.len() as usize)
    }

    fn reset(&self) {
        if let Some(timing) = self.bitrate().and_then(BitTiming::lookup) {
            if let Err(_err) = self.peripheral.configure(timing) {
                #[cfg(feature = "defmt")]
                defmt::error!("CAN reset: reconfiguration failed: {}", _err);
                self.diagnostics.signal(Diagnostic::ResetFailed);
                return;
            }
        }
        self.peripheral.start();
    }

    fn close(&self) {
        self.peripheral.stop();
    }
}
