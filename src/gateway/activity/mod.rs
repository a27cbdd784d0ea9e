//! Bus activity indicator.
//!
//! A sticky [`ActivityFlag`] is raised whenever CAN traffic is routed; the
//! [`ActivityIndicator`] turns it into a bounded LED pulse, advanced once per
//! dispatcher tick rather than by wall-clock time:
//!
//! ```text
//! Idle ──flag taken──▶ PulseOn ──pulse_ticks──▶ PulseOff ──cooldown_ticks──▶ Idle
//!      set_pulse(true)         set_pulse(false)
//! ```
//!
//! Activity seen while pulsing or cooling down stays in the flag and yields
//! a single pulse once the indicator is idle again.
use core::sync::atomic::{AtomicBool, Ordering};

use crate::protocol::transport::traits::status_led::StatusLed;

//==================================================================================ACTIVITY_FLAG
/// Single-word "activity occurred" flag.
///
/// Set and cleared with plain stores: a set racing with the clear only delays
/// the next pulse, it never corrupts the indicator.
#[derive(Debug, Default)]
pub struct ActivityFlag(AtomicBool);

impl ActivityFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Record activity. Callable from any context.
    #[inline]
    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        if self.0.load(Ordering::Acquire) {
            self.0.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }
}

//==================================================================================ACTIVITY_INDICATOR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivityState {
    /// Waiting for the flag.
    Idle,
    /// LED lit.
    PulseOn,
    /// LED off, cooldown running.
    PulseOff,
}

#[derive(Debug, Clone)]
pub struct ActivityIndicator {
    state: ActivityState,
    ticks: u32,
    pulse_ticks: u32,
    cooldown_ticks: u32,
}

impl ActivityIndicator {
    /// The LED turns off `pulse_ticks` ticks after it turned on, and the
    /// indicator is idle again `cooldown_ticks` ticks after that.
    pub const fn new(pulse_ticks: u32, cooldown_ticks: u32) -> Self {
        Self {
            state: ActivityState::Idle,
            ticks: 0,
            pulse_ticks,
            cooldown_ticks,
        }
    }

    #[inline]
    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Ticks spent in the current state.
    #[inline]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Advance the state machine by one tick.
    pub fn tick<L: StatusLed>(&mut self, flag: &ActivityFlag, led: &mut L) {
        match self.state {
            ActivityState::Idle => {
                if flag.take() {
                    led.set_pulse(true);
                    self.enter(ActivityState::PulseOn);
                }
            }
            ActivityState::PulseOn => {
                self.ticks = self.ticks.saturating_add(1);
                if self.ticks >= self.pulse_ticks {
                    led.set_pulse(false);
                    self.enter(ActivityState::PulseOff);
                }
            }
            ActivityState::PulseOff => {
                self.ticks = self.ticks.saturating_add(1);
                if self.ticks >= self.cooldown_ticks {
                    self.enter(ActivityState::Idle);
                }
            }
        }
    }

    fn enter(&mut self, state: ActivityState) {
        #[cfg(feature = "defmt")]
        defmt::trace!("activity indicator: {:?} -> {:?}", self.state, state);
        self.state = state;
        self.ticks = 0;
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
