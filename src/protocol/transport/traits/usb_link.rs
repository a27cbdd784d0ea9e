//! Host-facing report channel.
use crate::protocol::codec::Report;

/// Non-blocking access to the USB HID endpoints.
pub trait UsbLink {
    /// Next report received from the host, if any.
    fn poll_incoming(&mut self) -> Option<Report>;
    /// Queue a report for the host. Returns `false` when it was dropped.
    fn enqueue_outgoing(&mut self, report: Report) -> bool;
}
