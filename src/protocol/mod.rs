//! Host protocol: command codes, the report codec, and the CAN transport.
pub mod codec;
pub mod command;
pub mod transport;
