/// Test doubles for the controller, LEDs and timer used by integration tests.
use crux_can_bridge::protocol::{
    codec::BitTimingValue,
    transport::traits::{
        bit_timing_controller::BitTimingController, poll_timer::PollTimer, status_led::StatusLed,
    },
};
use std::future::Future;
use tokio::time::{sleep, Duration};

#[derive(Debug)]
#[allow(dead_code)]
/// Controller model holding a timing register and a start outcome.
pub struct MockController {
    pub btr: BitTimingValue,
    pub running: bool,
    pub initialized: bool,
    pub fail_start: bool,
    pub starts: u32,
}

#[allow(dead_code)]
impl MockController {
    /// Running controller loaded with `btr`.
    pub fn running(btr: u32) -> Self {
        Self {
            btr: BitTimingValue(btr),
            running: true,
            initialized: true,
            fail_start: false,
            starts: 0,
        }
    }

    /// Controller that refuses to leave initialization mode.
    pub fn failing(btr: u32) -> Self {
        Self {
            fail_start: true,
            ..Self::running(btr)
        }
    }
}

impl BitTimingController for MockController {
    type Error = &'static str;

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_uninitialized(&self) -> bool {
        !self.initialized
    }

    fn bring_up(&mut self) {
        self.initialized = true;
    }

    fn configure(&mut self, timing: BitTimingValue) {
        self.btr = timing;
    }

    fn reset_state(&mut self) {}

    fn start(&mut self) -> Result<(), Self::Error> {
        self.starts += 1;
        if self.fail_start {
            return Err("initialization mode timeout");
        }
        self.running = true;
        Ok(())
    }

    fn bit_timing(&self) -> BitTimingValue {
        self.btr
    }
}

#[derive(Debug, Default)]
#[allow(dead_code)]
/// LED pair recording every change.
pub struct RecordingLed {
    pub pulses: Vec<bool>,
    pub running: bool,
}

impl StatusLed for RecordingLed {
    fn set_pulse(&mut self, on: bool) {
        self.pulses.push(on);
    }

    fn set_running(&mut self, on: bool) {
        self.running = on;
    }
}

#[derive(Debug, Default)]
#[allow(dead_code)]
/// Timer based on `tokio::time::sleep` to drive the runner in tests.
pub struct MockTimer {
    pub delays: u32,
}

impl PollTimer for MockTimer {
    fn delay<'a>(
        &'a mut self,
        period: embassy_time::Duration,
    ) -> impl Future<Output = ()> + 'a {
        self.delays += 1;
        sleep(Duration::from_micros(period.as_micros()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(dead_code)]
/// Frame type of [`MockBus`], standing in for a HAL driver frame.
pub struct BusFrame {
    pub id: embedded_can::Id,
    pub remote: bool,
    pub dlc: usize,
    pub data: [u8; 8],
}

impl embedded_can::Frame for BusFrame {
    fn new(id: impl Into<embedded_can::Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        let mut buf = [0u8; 8];
        buf[..data.len()].copy_from_slice(data);
        Some(Self {
            id: id.into(),
            remote: false,
            dlc: data.len(),
            data: buf,
        })
    }

    fn new_remote(id: impl Into<embedded_can::Id>, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }
        Some(Self {
            id: id.into(),
            remote: true,
            dlc,
            data: [0; 8],
        })
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, embedded_can::Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> embedded_can::Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    fn data(&self) -> &[u8] {
        &self.data[..self.dlc]
    }
}

#[derive(Debug, Default)]
#[allow(dead_code)]
/// `embedded-can` driver with `mailboxes` free transmit slots and a receive FIFO.
pub struct MockBus {
    pub mailboxes: usize,
    pub wire: Vec<BusFrame>,
    pub rx: std::collections::VecDeque<BusFrame>,
}

impl embedded_can::nb::Can for MockBus {
    type Frame = BusFrame;
    type Error = embedded_can::ErrorKind;

    fn transmit(&mut self, frame: &BusFrame) -> nb::Result<Option<BusFrame>, Self::Error> {
        if self.mailboxes == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.mailboxes -= 1;
        self.wire.push(*frame);
        Ok(None)
    }

    fn receive(&mut self) -> nb::Result<BusFrame, Self::Error> {
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }
}
