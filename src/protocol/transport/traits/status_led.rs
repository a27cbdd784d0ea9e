//! LED outputs driven by the dispatcher.

pub trait StatusLed {
    /// Bus activity pulse.
    fn set_pulse(&mut self, on: bool);
    /// "Device running" indicator, asserted at the start of every cycle.
    fn set_running(&mut self, _on: bool) {}
}
