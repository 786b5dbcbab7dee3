//! Transport capability set consumed by the upper CANopen layers.
//! This is the seam across which the node stack is hardware-agnostic.
use crate::driver::can_frame::CanFrame;
use crate::error::CanError;

/// Six non-blocking operations every CAN driver provides.
pub trait CanDriver {
    /// Prepare the physical transport. Idempotent.
    fn init(&self);

    /// Select the bit-timing profile for `bitrate`, open the receive filter,
    /// and start the transport.
    ///
    /// # Errors
    ///
    /// - [`CanError::UnsupportedBitrate`] when no profile matches exactly; the
    ///   hardware is left untouched in that case
    /// - [`CanError::Config`] when the peripheral refuses the profile
    fn enable(&self, bitrate: u32) -> Result<(), CanError>;

    /// Transmit a frame, or defer it when it is a pending TPDO.
    ///
    /// # Errors
    ///
    /// - [`CanError::Busy`] when no mailbox is free and the frame cannot be deferred
    /// - [`CanError::InvalidFrame`] when the hardware rejects the frame shape
    /// - [`CanError::Transport`] for any other hardware failure
    fn send(&self, frame: &CanFrame) -> Result<(), CanError>;

    /// Copy the next received frame into `frame` and return its length.
    /// `None` means no message is available; it is not an error.
    fn read(&self, frame: &mut CanFrame) -> Option<usize>;

    /// Re-initialize and restart the transport with the configured profile.
    /// A refused profile is reported through the diagnostics hook and the
    /// transport is left stopped.
    fn reset(&self);

    /// Stop the transport.
    fn close(&self);
}
