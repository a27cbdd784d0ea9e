//! [`UsbLink`] and [`CanPort`] implementations backed by ring buffers.
//!
//! Firmware keeps the opposite endpoints: the receive interrupts own the
//! producers of the inbound queues, the transmit paths own the consumers of
//! the outbound ones. Nothing here blocks.
//!
//! ```rust,ignore
//! static USB_IN: StaticCell<RingBuffer<Report, 8>> = StaticCell::new();
//! static USB_OUT: StaticCell<RingBuffer<Report, 16>> = StaticCell::new();
//!
//! let (usb_rx_isr, usb_in) = USB_IN.init(RingBuffer::new()).split();
//! let (usb_out, usb_tx_isr) = USB_OUT.init(RingBuffer::new()).split();
//! let mut usb = QueuedUsb::new(usb_in, usb_out);
//! ```
use crate::infra::ring_buffer::{Consumer, Producer};
use crate::protocol::codec::Report;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{
    bit_timing_controller::BitTimingController, can_port::CanPort, usb_link::UsbLink,
};

//==================================================================================USB
/// USB link made of the poll-loop ends of the two report queues.
pub struct QueuedUsb<'a, const IN: usize, const OUT: usize> {
    incoming: Consumer<'a, Report, IN>,
    outgoing: Producer<'a, Report, OUT>,
}

impl<'a, const IN: usize, const OUT: usize> QueuedUsb<'a, IN, OUT> {
    pub fn new(incoming: Consumer<'a, Report, IN>, outgoing: Producer<'a, Report, OUT>) -> Self {
        Self { incoming, outgoing }
    }
}

impl<const IN: usize, const OUT: usize> UsbLink for QueuedUsb<'_, IN, OUT> {
    fn poll_incoming(&mut self) -> Option<Report> {
        self.incoming.try_pop()
    }

    fn enqueue_outgoing(&mut self, report: Report) -> bool {
        self.outgoing.try_push(report)
    }
}

//==================================================================================CAN
/// CAN port made of the poll-loop ends of its frame queues plus its controller.
pub struct QueuedCanPort<'a, C, const IN: usize, const OUT: usize> {
    incoming: Consumer<'a, CanFrame, IN>,
    outgoing: Producer<'a, CanFrame, OUT>,
    controller: C,
}

impl<'a, C, const IN: usize, const OUT: usize> QueuedCanPort<'a, C, IN, OUT>
where
    C: BitTimingController,
{
    pub fn new(
        incoming: Consumer<'a, CanFrame, IN>,
        outgoing: Producer<'a, CanFrame, OUT>,
        controller: C,
    ) -> Self {
        Self {
            incoming,
            outgoing,
            controller,
        }
    }
}

impl<C, const IN: usize, const OUT: usize> CanPort for QueuedCanPort<'_, C, IN, OUT>
where
    C: BitTimingController,
{
    type Controller = C;

    fn poll_incoming(&mut self) -> Option<CanFrame> {
        self.incoming.try_pop()
    }

    fn enqueue_outgoing(&mut self, frame: CanFrame) -> bool {
        self.outgoing.try_push(frame)
    }

    fn controller(&mut self) -> &mut C {
        &mut self.controller
    }
}
