//! Transport side of the bridge: the CAN frame representation, the
//! collaborator traits, their ring-buffer backed implementations, and the
//! pumps between the queues and the hardware.

pub mod can_frame;
pub mod pump;
pub mod queued;
pub mod traits;
