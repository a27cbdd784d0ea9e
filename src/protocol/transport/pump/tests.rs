//! Pump tests against an `embedded-can` driver double with a bounded mailbox.
extern crate std;

use std::collections::VecDeque;
use std::vec::Vec;

use super::*;
use crate::infra::ring_buffer::RingBuffer;
use crate::protocol::codec::{encode_ack, encode_nak};
use crate::protocol::transport::can_frame::CanId;
use embedded_can::{ErrorKind, Id};

//==================================================================================DOUBLES
#[derive(Debug, Clone, Copy, PartialEq)]
struct TestFrame {
    id: Id,
    remote: bool,
    dlc: usize,
    data: [u8; 8],
}

impl embedded_can::Frame for TestFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
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

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
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
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    fn data(&self) -> &[u8] {
        &self.data[..self.dlc]
    }
}

/// Driver with `free` transmit mailboxes and a scripted receive FIFO.
struct MockCan {
    free: usize,
    fail_transmit: bool,
    sent: Vec<TestFrame>,
    rx: VecDeque<TestFrame>,
    transmit_calls: usize,
}

impl MockCan {
    fn with_mailboxes(free: usize) -> Self {
        Self {
            free,
            fail_transmit: false,
            sent: Vec::new(),
            rx: VecDeque::new(),
            transmit_calls: 0,
        }
    }

    /// Transmission completed, mailboxes free again.
    fn complete_all(&mut self, free: usize) {
        self.free = free;
    }
}

impl Can for MockCan {
    type Frame = TestFrame;
    type Error = ErrorKind;

    fn transmit(&mut self, frame: &TestFrame) -> nb::Result<Option<TestFrame>, ErrorKind> {
        self.transmit_calls += 1;
        if self.fail_transmit {
            return Err(nb::Error::Other(ErrorKind::Bit));
        }
        if self.free == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.free -= 1;
        self.sent.push(*frame);
        Ok(None)
    }

    fn receive(&mut self) -> nb::Result<TestFrame, ErrorKind> {
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

fn frame(raw: u16) -> CanFrame {
    CanFrame::new(CanId::standard(raw).unwrap(), &[raw as u8]).unwrap()
}

fn sent_ids(can: &MockCan) -> Vec<u32> {
    can.sent
        .iter()
        .map(|f| CanFrame::from_frame(f).id.raw())
        .collect()
}

//==================================================================================CAN_TX
#[test]
/// With every mailbox busy the frame stays at the head of the queue.
fn test_full_mailbox_keeps_frame_queued() {
    let mut ring: RingBuffer<CanFrame, 4> = RingBuffer::new();
    let (mut tx, mut rx) = ring.split();
    assert!(tx.try_push(frame(0x10)));

    let mut can = MockCan::with_mailboxes(0);
    assert_eq!(drain_to_bus(&mut rx, &mut can), 0);
    assert_eq!(rx.len(), 1);
    assert_eq!(rx.peek(), Some(&frame(0x10)));

    can.complete_all(1);
    assert_eq!(drain_to_bus(&mut rx, &mut can), 1);
    assert!(rx.is_empty());
    assert_eq!(sent_ids(&can), [0x10]);
}

#[test]
/// Order on the bus matches queue order, however the pumping is split up.
fn test_fifo_order_across_pumps() {
    let mut ring: RingBuffer<CanFrame, 8> = RingBuffer::new();
    let (mut tx, mut rx) = ring.split();
    for raw in 1..=5 {
        assert!(tx.try_push(frame(raw)));
    }

    let mut can = MockCan::with_mailboxes(2);
    assert_eq!(drain_to_bus(&mut rx, &mut can), 2);
    can.complete_all(1);
    assert_eq!(drain_to_bus(&mut rx, &mut can), 1);
    can.complete_all(3);
    assert_eq!(drain_to_bus(&mut rx, &mut can), 2);

    assert_eq!(sent_ids(&can), [1, 2, 3, 4, 5]);
}

#[test]
/// One call covers only what was queued when it started.
fn test_single_pass_per_call() {
    let mut ring: RingBuffer<CanFrame, 8> = RingBuffer::new();
    let (mut tx, mut rx) = ring.split();
    for raw in 1..=3 {
        assert!(tx.try_push(frame(raw)));
    }

    let mut can = MockCan::with_mailboxes(10);
    assert_eq!(drain_to_bus(&mut rx, &mut can), 3);
    assert_eq!(can.transmit_calls, 3);
    assert_eq!(drain_to_bus(&mut rx, &mut can), 0);
    assert_eq!(can.transmit_calls, 3, "an empty queue must not reach the driver");
}

#[test]
/// A driver error stops the pass and keeps the frame for a retry.
fn test_transmit_error_keeps_frame() {
    let mut ring: RingBuffer<CanFrame, 4> = RingBuffer::new();
    let (mut tx, mut rx) = ring.split();
    assert!(tx.try_push(frame(1)));
    assert!(tx.try_push(frame(2)));

    let mut can = MockCan::with_mailboxes(3);
    can.fail_transmit = true;
    assert_eq!(drain_to_bus(&mut rx, &mut can), 0);
    assert_eq!(can.transmit_calls, 1);
    assert_eq!(rx.len(), 2);

    can.fail_transmit = false;
    assert_eq!(drain_to_bus(&mut rx, &mut can), 2);
    assert_eq!(sent_ids(&can), [1, 2]);
}

#[test]
/// Remote frames and extended ids reach the driver unchanged.
fn test_frame_kinds_transmitted() {
    let mut ring: RingBuffer<CanFrame, 2> = RingBuffer::new();
    let (mut tx, mut rx) = ring.split();
    let remote = CanFrame::new_remote(CanId::extended(0x18EA_FF00).unwrap(), 3).unwrap();
    assert!(tx.try_push(remote));

    let mut can = MockCan::with_mailboxes(1);
    assert_eq!(drain_to_bus(&mut rx, &mut can), 1);
    assert_eq!(CanFrame::from_frame(&can.sent[0]), remote);
}

//==================================================================================CAN_RX
#[test]
/// Received frames are queued in order until the queue is full.
fn test_fill_from_bus_stops_when_full() {
    let mut ring: RingBuffer<CanFrame, 2> = RingBuffer::new();
    let (mut tx, mut rx) = ring.split();

    let mut can = MockCan::with_mailboxes(0);
    for raw in 1..=3 {
        can.rx.push_back(frame(raw).to_frame().unwrap());
    }

    assert_eq!(fill_from_bus(&mut can, &mut tx), 2);
    assert_eq!(can.rx.len(), 1, "third frame stays in the driver FIFO");
    assert_eq!(rx.try_pop(), Some(frame(1)));
    assert_eq!(rx.try_pop(), Some(frame(2)));

    assert_eq!(fill_from_bus(&mut can, &mut tx), 1);
    assert_eq!(fill_from_bus(&mut can, &mut tx), 0);
    assert_eq!(rx.try_pop(), Some(frame(3)));
}

//==================================================================================USB_TX
#[test]
/// A refused report stays queued; the next call resumes with it.
fn test_drain_to_host_resumes_after_refusal() {
    let mut ring: RingBuffer<Report, 4> = RingBuffer::new();
    let (mut tx, mut rx) = ring.split();
    assert!(tx.try_push(encode_ack()));
    assert!(tx.try_push(encode_nak()));

    let mut endpoint: Vec<Report> = Vec::new();
    let sent = drain_to_host(&mut rx, |report| {
        if endpoint.is_empty() {
            endpoint.push(*report);
            true
        } else {
            false
        }
    });
    assert_eq!(sent, 1);
    assert_eq!(rx.len(), 1);

    let sent = drain_to_host(&mut rx, |report| {
        endpoint.push(*report);
        true
    });
    assert_eq!(sent, 1);
    assert_eq!(endpoint, [encode_ack(), encode_nak()]);
    assert_eq!(drain_to_host(&mut rx, |_| true), 0);
}
