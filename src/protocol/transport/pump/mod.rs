//! Hardware-side ends of the queues: move frames between the ring buffers
//! and an `embedded-can` driver, and reports from the USB-out queue to the
//! endpoint.
//!
//! Called once per cycle by the firmware (or from the TX-empty interrupt).
//! Each call makes at most one pass over what was queued when it started
//! and never blocks: a busy mailbox or endpoint leaves the item queued for
//! the next call.
use embedded_can::nb::Can;

use crate::infra::ring_buffer::{Consumer, Producer};
use crate::protocol::codec::Report;
use crate::protocol::transport::can_frame::CanFrame;

//==================================================================================CAN_TX
/// Hand queued frames to the controller's mailboxes until they are full.
///
/// A frame is only popped once the driver accepted it. A frame the driver
/// frame type cannot represent is discarded. Returns the number of frames
/// accepted.
pub fn drain_to_bus<C: Can, const N: usize>(
    out: &mut Consumer<'_, CanFrame, N>,
    can: &mut C,
) -> usize {
    let mut sent = 0;
    for _ in 0..out.len() {
        let Some(frame) = out.peek().copied() else {
            break;
        };
        let Some(hal_frame) = frame.to_frame::<C::Frame>() else {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Frame {=u32:#x} rejected by the driver frame type",
                frame.id.raw()
            );
            out.try_pop();
            continue;
        };

        match can.transmit(&hal_frame) {
            Ok(_displaced) => {
                // A driver that swaps out a lower-priority pending frame hands
                // it back; it is not re-queued.
                #[cfg(feature = "defmt")]
                if _displaced.is_some() {
                    defmt::warn!("Pending frame displaced from its mailbox");
                }
                out.try_pop();
                sent += 1;
            }
            Err(nb::Error::WouldBlock) => break,
            Err(nb::Error::Other(_err)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "CAN transmit failed: {:?}",
                    defmt::Debug2Format(&embedded_can::Error::kind(&_err))
                );
                break;
            }
        }
    }
    sent
}

//==================================================================================CAN_RX
/// Move received frames from the driver into the CAN-in queue.
///
/// Stops when the driver has nothing more or the queue is full, so at most
/// `N` frames move per call. Returns the number of frames queued.
pub fn fill_from_bus<C: Can, const N: usize>(
    can: &mut C,
    into: &mut Producer<'_, CanFrame, N>,
) -> usize {
    let mut received = 0;
    while !into.is_full() {
        match can.receive() {
            Ok(hal_frame) => {
                if into.try_push(CanFrame::from_frame(&hal_frame)) {
                    received += 1;
                }
            }
            Err(nb::Error::WouldBlock) => break,
            Err(nb::Error::Other(_err)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "CAN receive failed: {:?}",
                    defmt::Debug2Format(&embedded_can::Error::kind(&_err))
                );
                break;
            }
        }
    }
    received
}

//==================================================================================USB_TX
/// Hand queued reports to `send` until it refuses one.
///
/// `send` returns `true` when the endpoint took the report; a refused report
/// stays at the head of the queue. Returns the number of reports sent.
pub fn drain_to_host<F, const N: usize>(out: &mut Consumer<'_, Report, N>, mut send: F) -> usize
where
    F: FnMut(&Report) -> bool,
{
    let mut sent = 0;
    for _ in 0..out.len() {
        let Some(report) = out.peek() else {
            break;
        };
        if !send(report) {
            break;
        }
        out.try_pop();
        sent += 1;
    }
    sent
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
