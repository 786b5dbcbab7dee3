//! Abstraction traits used by the transport layer: the hardware peripheral
//! seam, the six-operation driver capability set, and the diagnostics hook.
pub mod can_driver;
pub mod can_peripheral;
pub mod diagnostics;
