//! Test doubles for the CAN controller, the diagnostics hook, and the TPDO
//! layer. Every double is `Sync` so a driver can be shared with a thread that
//! plays the transmit-complete interrupt.
use canopen_core::driver::bit_timing::BitTiming;
use canopen_core::driver::traits::can_peripheral::{CanPeripheral, Filter, Notifications};
use canopen_core::driver::traits::diagnostics::{Diagnostic, DiagnosticHook};
use canopen_core::object::notify::TpdoNotifier;
use canopen_core::{CanFrame, HalError, ObjKey};
use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::Mutex;

thread_local! {
    /// Set while the current thread runs [`MockPeripheral::interrupt`].
    static IN_ISR: Cell<bool> = const { Cell::new(false) };
}

#[derive(Default)]
#[allow(dead_code)]
/// Mutable controller state behind the mock's lock.
pub struct BusState {
    pub free: usize,
    pub sent: Vec<CanFrame>,
    pub rx: VecDeque<CanFrame>,
    pub timing: Option<BitTiming>,
    pub filter: Option<Filter>,
    pub running: bool,
    pub notifications: Notifications,
    /// Mailboxes completed by the running interrupt, only visible inside it.
    pub isr_free: usize,
    /// Software-pended transmit-complete interrupts.
    pub pended: usize,
}

#[derive(Default)]
#[allow(dead_code)]
/// In-memory bxCAN-like controller: `free` mailboxes that fill on `add_tx`
/// and empty again through [`MockPeripheral::complete`].
pub struct MockPeripheral {
    state: Mutex<BusState>,
}

#[allow(dead_code)]
impl MockPeripheral {
    /// Controller with `free` idle transmit mailboxes.
    pub fn with_free(free: usize) -> Self {
        let mock = Self::default();
        mock.state().free = free;
        mock
    }

    /// Lock the simulated state.
    pub fn state(&self) -> std::sync::MutexGuard<'_, BusState> {
        self.state.lock().unwrap()
    }

    /// `mailboxes` transmissions finished on the bus.
    pub fn complete(&self, mailboxes: usize) {
        self.state().free += mailboxes;
    }

    /// Run `handler` as the transmit-complete interrupt for `completed`
    /// mailboxes. Task context cannot observe those mailboxes until the
    /// handler returns, as with a preempting interrupt.
    pub fn interrupt<R>(&self, completed: usize, handler: impl FnOnce() -> R) -> R {
        self.state().isr_free += completed;
        IN_ISR.with(|flag| flag.set(true));
        let result = handler();
        IN_ISR.with(|flag| flag.set(false));
        let mut state = self.state();
        state.free += state.isr_free;
        state.isr_free = 0;
        result
    }

    /// Identifiers of every frame handed to a mailbox, in order.
    pub fn sent_ids(&self) -> Vec<u16> {
        self.state().sent.iter().map(CanFrame::std_id).collect()
    }

    /// Queue a frame on the receive FIFO.
    pub fn inject(&self, frame: CanFrame) {
        self.state().rx.push_back(frame);
    }
}

impl CanPeripheral for MockPeripheral {
    fn init(&self) {}

    fn configure(&self, timing: &BitTiming) -> Result<(), HalError> {
        self.state().timing = Some(*timing);
        Ok(())
    }

    fn configure_filter(&self, filter: &Filter) {
        self.state().filter = Some(*filter);
    }

    fn start(&self) {
        self.state().running = true;
    }

    fn stop(&self) {
        self.state().running = false;
    }

    fn enable_notifications(&self, notifications: Notifications) {
        let mut state = self.state();
        state.notifications = state.notifications | notifications;
    }

    fn notifications(&self) -> Notifications {
        self.state().notifications
    }

    fn free_tx_mailboxes(&self) -> usize {
        let state = self.state();
        if IN_ISR.with(Cell::get) {
            state.free + state.isr_free
        } else {
            state.free
        }
    }

    fn add_tx(&self, frame: &CanFrame) -> Result<(), HalError> {
        let mut state = self.state();
        if IN_ISR.with(Cell::get) && state.isr_free > 0 {
            state.isr_free -= 1;
        } else if state.free > 0 {
            state.free -= 1;
        } else {
            return Err(HalError::Failed);
        }
        state.sent.push(*frame);
        Ok(())
    }

    fn take_rx(&self) -> Option<CanFrame> {
        self.state().rx.pop_front()
    }

    fn pend_tx_complete(&self) {
        self.state().pended += 1;
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// Diagnostics hook keeping every signal.
pub struct RecordingDiagnostics {
    pub signals: Mutex<Vec<Diagnostic>>,
}

#[allow(dead_code)]
impl RecordingDiagnostics {
    pub fn signals(&self) -> Vec<Diagnostic> {
        self.signals.lock().unwrap().clone()
    }
}

impl DiagnosticHook for RecordingDiagnostics {
    fn signal(&self, event: Diagnostic) {
        self.signals.lock().unwrap().push(event);
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// TPDO notifier keeping every triggered key.
pub struct RecordingNotifier {
    pub keys: Mutex<Vec<ObjKey>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn keys(&self) -> Vec<ObjKey> {
        self.keys.lock().unwrap().clone()
    }
}

impl TpdoNotifier for RecordingNotifier {
    fn trigger(&self, key: ObjKey) {
        self.keys.lock().unwrap().push(key);
    }
}

#[allow(dead_code)]
/// Four-byte frame used by the scenarios.
pub fn frame(id: u16) -> CanFrame {
    CanFrame::new(id, &[0xDE, 0xAD, 0xBE, 0xEF]).unwrap()
}
