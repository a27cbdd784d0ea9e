//! # Loopback Example
//!
//! Host-side walkthrough of the bridge core with CAN1 wired to CAN2:
//! - Query the device identity (INFO)
//! - Change CAN2's bit timing (BAUD)
//! - Send a frame on CAN1 and watch it come back from CAN2 (MESSAGE)
//!
//! The test harness plays every interrupt handler; this example uses `std`
//! for a quick trial run.
//!
//! ```bash
//! cargo run --example loopback
//! ```

use crux_can_bridge::gateway::activity::ActivityFlag;
use crux_can_bridge::gateway::dispatcher::{Dispatcher, GatewayContext};
use crux_can_bridge::infra::ring_buffer::{Consumer, Producer, RingBuffer};
use crux_can_bridge::protocol::codec::{
    decode_reply, encode_baud, encode_info, encode_message, BitTimingValue, Reply, Report,
};
use crux_can_bridge::protocol::command::Node;
use crux_can_bridge::protocol::transport::can_frame::{CanFrame, CanId};
use crux_can_bridge::protocol::transport::pump::drain_to_host;
use crux_can_bridge::protocol::transport::queued::{QueuedCanPort, QueuedUsb};
use crux_can_bridge::protocol::transport::traits::{
    bit_timing_controller::BitTimingController, status_led::StatusLed,
};
use static_cell::StaticCell;

/// Controller that always starts; bxCAN reset value in the timing register.
struct DemoController {
    btr: BitTimingValue,
}

impl BitTimingController for DemoController {
    type Error = ();

    fn stop(&mut self) {}
    fn is_uninitialized(&self) -> bool {
        false
    }
    fn bring_up(&mut self) {}
    fn configure(&mut self, timing: BitTimingValue) {
        self.btr = timing;
    }
    fn reset_state(&mut self) {}
    fn start(&mut self) -> Result<(), ()> {
        Ok(())
    }
    fn bit_timing(&self) -> BitTimingValue {
        self.btr
    }
}

struct ConsoleLed;

impl StatusLed for ConsoleLed {
    fn set_pulse(&mut self, on: bool) {
        println!("   [led] activity {}", if on { "on" } else { "off" });
    }
}

static USB_IN: StaticCell<RingBuffer<Report, 8>> = StaticCell::new();
static USB_OUT: StaticCell<RingBuffer<Report, 16>> = StaticCell::new();
static CAN1_IN: StaticCell<RingBuffer<CanFrame, 8>> = StaticCell::new();
static CAN1_OUT: StaticCell<RingBuffer<CanFrame, 8>> = StaticCell::new();
static CAN2_IN: StaticCell<RingBuffer<CanFrame, 8>> = StaticCell::new();
static CAN2_OUT: StaticCell<RingBuffer<CanFrame, 8>> = StaticCell::new();

/// Print every report the device queued for the host.
fn drain_host(usb_tx: &mut Consumer<'_, Report, 16>) {
    drain_to_host(usb_tx, |report| {
        match decode_reply(report) {
            Ok(Reply::Message { node, frame }) => println!(
                "   <- MESSAGE {:?} id={:#x} ext={} data={:02x?}",
                node,
                frame.id.raw(),
                frame.id.is_extended(),
                frame.payload()
            ),
            Ok(reply) => println!("   <- {:?}", reply),
            Err(err) => println!("   <- undecodable report: {}", err),
        }
        true
    });
}

/// Move frames transmitted on one bus to the receiver of the other.
fn wire<const A: usize, const B: usize>(
    tx: &mut Consumer<'_, CanFrame, A>,
    rx: &mut Producer<'_, CanFrame, B>,
) {
    while let Some(frame) = tx.try_pop() {
        if !rx.try_push(frame) {
            println!("   [wire] receiver full, frame lost");
        }
    }
}

fn main() {
    println!("=== crux-can-bridge Loopback ===\n");

    let (mut usb_rx_isr, usb_in) = USB_IN.init(RingBuffer::new()).split();
    let (usb_out, mut usb_tx_isr) = USB_OUT.init(RingBuffer::new()).split();
    let (mut can1_rx_isr, can1_in) = CAN1_IN.init(RingBuffer::new()).split();
    let (can1_out, mut can1_tx_isr) = CAN1_OUT.init(RingBuffer::new()).split();
    let (mut can2_rx_isr, can2_in) = CAN2_IN.init(RingBuffer::new()).split();
    let (can2_out, mut can2_tx_isr) = CAN2_OUT.init(RingBuffer::new()).split();

    let reset_btr = BitTimingValue(0x0123_0000);
    let mut usb = QueuedUsb::new(usb_in, usb_out);
    let mut can1 = QueuedCanPort::new(can1_in, can1_out, DemoController { btr: reset_btr });
    let mut can2 = QueuedCanPort::new(can2_in, can2_out, DemoController { btr: reset_btr });
    let mut led = ConsoleLed;
    let activity = ActivityFlag::new();
    let mut dispatcher = Dispatcher::default();
    let mut ctx = GatewayContext {
        usb: &mut usb,
        can1: &mut can1,
        can2: &mut can2,
        led: &mut led,
        activity: &activity,
    };

    // ======================================================================
    // 1. Identity query
    // ======================================================================
    println!("1. INFO for CAN1");
    if !usb_rx_isr.try_push(encode_info(Node::Can1)) {
        println!("   USB-in queue full");
    }
    dispatcher.tick(&mut ctx);
    drain_host(&mut usb_tx_isr);

    // ======================================================================
    // 2. Bit timing change (500 kbit/s at 36 MHz)
    // ======================================================================
    println!("\n2. BAUD for CAN2");
    if !usb_rx_isr.try_push(encode_baud(Node::Can2, BitTimingValue(0x001C_0003))) {
        println!("   USB-in queue full");
    }
    dispatcher.tick(&mut ctx);
    drain_host(&mut usb_tx_isr);

    // ======================================================================
    // 3. Frame through the loopback wire
    // ======================================================================
    println!("\n3. MESSAGE on CAN1, looped back into CAN2");
    let Some(id) = CanId::standard(0x321) else {
        return;
    };
    let Some(frame) = CanFrame::new(id, &[0xDE, 0xAD, 0xBE, 0xEF]) else {
        return;
    };
    if !usb_rx_isr.try_push(encode_message(Node::Can1, &frame)) {
        println!("   USB-in queue full");
    }
    for _ in 0..3 {
        dispatcher.tick(&mut ctx);
        wire(&mut can1_tx_isr, &mut can2_rx_isr);
        wire(&mut can2_tx_isr, &mut can1_rx_isr);
        drain_host(&mut usb_tx_isr);
    }

    println!("\n{:#?}", dispatcher.stats());
}
