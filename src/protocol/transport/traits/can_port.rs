//! One CAN node as seen by the dispatcher: its receive and transmit paths
//! plus the controller used for reconfiguration.
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::bit_timing_controller::BitTimingController;

/// Non-blocking frame exchange with one CAN controller.
pub trait CanPort {
    type Controller: BitTimingController;

    /// Next frame received on the bus, if any.
    fn poll_incoming(&mut self) -> Option<CanFrame>;
    /// Queue a frame for transmission. Returns `false` when it was dropped.
    fn enqueue_outgoing(&mut self, frame: CanFrame) -> bool;
    /// Controller driving this port.
    fn controller(&mut self) -> &mut Self::Controller;
}
