//! Register-level capability needed to change a controller's bit timing.
//! Implemented on top of the HAL CAN handle; the core never touches registers.
use crate::protocol::codec::BitTimingValue;

pub trait BitTimingController {
    type Error: core::fmt::Debug;

    /// Leave normal mode. Must be harmless on a controller that never started.
    fn stop(&mut self);
    /// `true` until [`bring_up`](Self::bring_up) has run once.
    fn is_uninitialized(&self) -> bool;
    /// One-time low-level setup (clocks, pins, interrupts).
    fn bring_up(&mut self);
    /// Write `timing` verbatim into the timing register.
    fn configure(&mut self, timing: BitTimingValue);
    /// Clear error code and state back to "ready".
    fn reset_state(&mut self);
    /// Enter normal mode with the current configuration.
    fn start(&mut self) -> Result<(), Self::Error>;
    /// Value currently held by the timing register.
    fn bit_timing(&self) -> BitTimingValue;
}
