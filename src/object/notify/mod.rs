//! Node context handed to type descriptors, and the seam towards the TPDO
//! layer that turns value changes into event-driven transmissions.
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;

use crate::object::key::ObjKey;

/// Receiver of "this entry changed" events (the node's TPDO subsystem).
pub trait TpdoNotifier {
    /// The entry addressed by `key` now holds a different value.
    fn trigger(&self, key: ObjKey);
}

/// Notifier for nodes without event-driven TPDOs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTpdo;

impl TpdoNotifier for NoTpdo {
    fn trigger(&self, _key: ObjKey) {}
}

/// Forwards changed keys into a pre-allocated channel, to be turned into
/// TPDO frames by the task owning the PDO mapping.
///
/// Triggers are dropped (and logged with `defmt`) when the channel is full;
/// the next change of the same entry triggers again.
pub struct ChannelNotifier<'ch, M: RawMutex, const N: usize> {
    channel: &'ch Channel<M, ObjKey, N>,
}

impl<'ch, M: RawMutex, const N: usize> ChannelNotifier<'ch, M, N> {
    pub const fn new(channel: &'ch Channel<M, ObjKey, N>) -> Self {
        Self { channel }
    }
}

impl<M: RawMutex, const N: usize> TpdoNotifier for ChannelNotifier<'_, M, N> {
    fn trigger(&self, key: ObjKey) {
        if self.channel.try_send(key).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "TPDO trigger for {=u16:#x}:{=u8} dropped: channel full",
                key.index(),
                key.sub()
            );
        }
    }
}

/// Owning-node view passed to every descriptor operation.
#[derive(Clone, Copy)]
pub struct NodeContext<'n> {
    tpdo: &'n dyn TpdoNotifier,
}

impl<'n> NodeContext<'n> {
    pub const fn new(tpdo: &'n dyn TpdoNotifier) -> Self {
        Self { tpdo }
    }

    /// TPDO subsystem of the node.
    #[inline]
    pub fn tpdo(&self) -> &'n dyn TpdoNotifier {
        self.tpdo
    }
}
