//! External observability hook of the driver (status LEDs, error counters…).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Abnormal transport conditions signalled by the driver.
pub enum Diagnostic {
    /// No mailbox was free and the frame was dropped.
    TxBusy { id: u16 },
    /// The hardware rejected the frame parameters.
    TxParam { id: u16 },
    /// The overflow queue wrapped; deferred TPDOs were lost.
    QueueOverflow,
    /// `reset` could not re-apply the bit timing; the transport stays stopped.
    ResetFailed,
}

/// Receiver of driver diagnostics. May be called from interrupt context.
pub trait DiagnosticHook {
    /// An abnormal condition occurred.
    fn signal(&self, event: Diagnostic);

    /// A frame reached a hardware mailbox.
    fn tx_activity(&self) {}
}

/// Hook that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDiagnostics;

impl DiagnosticHook for NoDiagnostics {
    fn signal(&self, _event: Diagnostic) {}
}
