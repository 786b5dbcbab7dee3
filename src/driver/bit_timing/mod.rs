//! Nominal bit-timing profiles supported by the reference controller.
//!
//! Values are expressed for a 45 MHz peripheral clock. Each profile gives the
//! prescaler and segment lengths in time quanta (TQ); the sample point is a
//! derived value and is not stored.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Timing quadruple for one nominal bit rate.
pub struct BitTiming {
    /// Nominal bit rate in bit/s.
    pub bitrate: u32,
    /// Peripheral clock divider producing one time quantum.
    pub prescaler: u16,
    /// Synchronization jump width (TQ).
    pub sjw: u8,
    /// Phase segment 1, propagation segment included (TQ).
    pub seg1: u8,
    /// Phase segment 2 (TQ).
    pub seg2: u8,
}

/// Closed set of supported profiles, one per nominal rate.
pub static BIT_TIMINGS: [BitTiming; 8] = [
    BitTiming::new(10_000, 250, 1, 15, 2),   // SP: 88.9%, ERR: 0%
    BitTiming::new(20_000, 125, 1, 15, 2),   // SP: 88.9%, ERR: 0%
    // Prescaler 60 in the legacy table yields 41.7 kbit/s; 50 gives the nominal rate.
    BitTiming::new(50_000, 50, 1, 15, 2),    // SP: 88.9%, ERR: 0%
    BitTiming::new(125_000, 20, 1, 15, 2),   // SP: 88.9%, ERR: 0%
    BitTiming::new(250_000, 10, 1, 15, 2),   // SP: 88.9%, ERR: 0%
    BitTiming::new(500_000, 5, 1, 15, 2),    // SP: 88.9%, ERR: 0%
    BitTiming::new(800_000, 3, 1, 15, 3),    // SP: 84.2%, ERR: -1.32%
    BitTiming::new(1_000_000, 3, 1, 12, 2),  // SP: 86.7%, ERR: 0%
];

impl BitTiming {
    const fn new(bitrate: u32, prescaler: u16, sjw: u8, seg1: u8, seg2: u8) -> Self {
        Self {
            bitrate,
            prescaler,
            sjw,
            seg1,
            seg2,
        }
    }

    /// Exact-match lookup in [`BIT_TIMINGS`]. `None` for any unsupported rate.
    pub fn lookup(bitrate: u32) -> Option<&'static BitTiming> {
        BIT_TIMINGS.iter().find(|timing| timing.bitrate == bitrate)
    }

    /// Number of time quanta in one bit (sync segment + seg1 + seg2).
    #[inline]
    pub const fn bit_quanta(&self) -> u32 {
        1 + self.seg1 as u32 + self.seg2 as u32
    }

    /// Sample point position within the bit, in per mille.
    pub const fn sample_point_permille(&self) -> u32 {
        (1 + self.seg1 as u32) * 1000 / self.bit_quanta()
    }
}
