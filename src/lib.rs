//! `crux-can-bridge`: firmware core of a dual-channel USB-to-CAN bridge in a
//! `no_std` environment. A host talks to the device through fixed 64-byte
//! reports; the device relays CAN frames between the host and two CAN
//! controllers, changes their bit timing on request, and answers identity
//! queries.
//!
//! Hardware access stays behind the traits in
//! [`protocol::transport::traits`]; interrupt handlers and the dispatcher
//! share the lock-free queues from [`infra::ring_buffer`].
#![no_std]
//==================================================================================
/// Wire constants shared by the build script and the report codec.
pub mod core;
/// Decode, encode and reconfiguration errors.
pub mod error;
/// Dispatcher, activity indicator, bit timing changes and the async runner.
pub mod gateway;
/// Single-producer/single-consumer queues.
pub mod infra;
/// Report codec, command model, CAN frame and transport contracts.
pub mod protocol;
//==================================================================================
