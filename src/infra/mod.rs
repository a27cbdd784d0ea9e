//! Lock-free plumbing shared between interrupt handlers and the dispatcher.
pub mod ring_buffer;
