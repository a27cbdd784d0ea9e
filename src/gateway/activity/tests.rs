//! Activity indicator tests: pulse width, cooldown, burst coalescing.
use super::*;

/// Records each `set_pulse` call together with the tick it happened on.
struct PulseLog {
    now: u32,
    calls: [(u32, bool); 16],
    len: usize,
}

impl PulseLog {
    fn new() -> Self {
        Self {
            now: 0,
            calls: [(0, false); 16],
            len: 0,
        }
    }

    fn calls(&self) -> &[(u32, bool)] {
        &self.calls[..self.len]
    }
}

impl StatusLed for PulseLog {
    fn set_pulse(&mut self, on: bool) {
        self.calls[self.len] = (self.now, on);
        self.len += 1;
    }
}

fn run(indicator: &mut ActivityIndicator, flag: &ActivityFlag, led: &mut PulseLog, ticks: u32) {
    for _ in 0..ticks {
        indicator.tick(flag, led);
        led.now += 1;
    }
}

#[test]
/// The flag is sticky and `take` clears it exactly once.
fn test_flag_take() {
    let flag = ActivityFlag::new();
    assert!(!flag.take());
    flag.set();
    flag.set();
    assert!(flag.is_set());
    assert!(flag.take());
    assert!(!flag.is_set());
    assert!(!flag.take());
}

#[test]
/// Without activity the LED is never touched.
fn test_idle_without_activity() {
    let flag = ActivityFlag::new();
    let mut led = PulseLog::new();
    let mut indicator = ActivityIndicator::new(3, 5);

    run(&mut indicator, &flag, &mut led, 100);
    assert!(led.calls().is_empty());
    assert_eq!(indicator.state(), ActivityState::Idle);
}

#[test]
/// One event: on at once, off exactly `pulse_ticks` later, then idle after the cooldown.
fn test_single_pulse_timing() {
    let flag = ActivityFlag::new();
    let mut led = PulseLog::new();
    let mut indicator = ActivityIndicator::new(2000, 50_000);

    flag.set();
    run(&mut indicator, &flag, &mut led, 1);
    assert_eq!(led.calls(), &[(0, true)]);
    assert_eq!(indicator.state(), ActivityState::PulseOn);
    assert!(!flag.is_set(), "indicator must consume the flag");

    run(&mut indicator, &flag, &mut led, 1999);
    assert_eq!(led.calls().len(), 1, "LED must stay on for the full pulse");

    run(&mut indicator, &flag, &mut led, 1);
    assert_eq!(led.calls(), &[(0, true), (2000, false)]);
    assert_eq!(indicator.state(), ActivityState::PulseOff);

    run(&mut indicator, &flag, &mut led, 50_000);
    assert_eq!(indicator.state(), ActivityState::Idle);
    assert_eq!(led.calls().len(), 2);
}

#[test]
/// Continuous activity never pulses more often than once per pulse + cooldown window.
fn test_continuous_activity_respects_cooldown() {
    let flag = ActivityFlag::new();
    let mut led = PulseLog::new();
    let mut indicator = ActivityIndicator::new(3, 5);

    for _ in 0..20 {
        flag.set();
        indicator.tick(&flag, &mut led);
        led.now += 1;
    }

    // on at 0, off at 3, idle at 8, on again at 9, off at 12, idle at 17, on at 18
    assert_eq!(
        led.calls(),
        &[(0, true), (3, false), (9, true), (12, false), (18, true)]
    );
}

#[test]
/// A burst during the pulse collapses into one follow-up pulse after the cooldown.
fn test_burst_coalesced() {
    let flag = ActivityFlag::new();
    let mut led = PulseLog::new();
    let mut indicator = ActivityIndicator::new(2, 4);

    flag.set();
    run(&mut indicator, &flag, &mut led, 1);
    for _ in 0..5 {
        flag.set();
        run(&mut indicator, &flag, &mut led, 1);
    }
    run(&mut indicator, &flag, &mut led, 30);

    // on 0, off 2, idle 6, flag still set -> on 7, off 9, idle 13, nothing after
    assert_eq!(led.calls(), &[(0, true), (2, false), (7, true), (9, false)]);
    assert_eq!(indicator.state(), ActivityState::Idle);
}
