//! Wire contract between `build.rs` (identity validation) and the frame codec.
//!
//! Every value in this module is host-visible: changing one breaks
//! compatibility with the desktop tooling talking to the bridge.
//!
//! # MESSAGE report layout
//!
//! ```text
//! Byte  0     : COMMAND_MESSAGE
//! Byte  1     : node (CAN1_NODE / CAN2_NODE)
//! Byte  2     : flags (bit 0 = IDE, bit 1 = RTR)
//! Bytes 3-6   : identifier, big-endian
//! Byte  7     : DLC (0..=8)
//! Bytes 8-15  : payload, zero beyond DLC
//! ```

// Shared with the build script, which only reads a subset.
#![allow(dead_code)]

/// Size of every HID report exchanged with the host (full-speed endpoint).
pub const REPORT_SIZE: usize = 64;

/// Longest string reply that fits after the command byte.
pub const MAX_STRING_LEN: usize = REPORT_SIZE - 1;

//==================================================================================COMMAND_BYTES
pub const COMMAND_MESSAGE: u8 = 0x01;
pub const COMMAND_ACK: u8 = 0x02;
pub const COMMAND_NAK: u8 = 0x03;
pub const COMMAND_BAUD: u8 = 0x04;
pub const COMMAND_INFO: u8 = 0x05;
pub const COMMAND_HARDWARE: u8 = 0x06;
pub const COMMAND_VERSION: u8 = 0x07;
pub const COMMAND_FREQUENCY: u8 = 0x08;
pub const COMMAND_CAN_BTR: u8 = 0x09;

//==================================================================================NODE_BYTES
pub const CAN1_NODE: u8 = 0x01;
pub const CAN2_NODE: u8 = 0x02;

//==================================================================================OFFSETS
/// Node byte for MESSAGE and INFO reports.
pub const NODE_OFFSET: usize = 1;
/// Node byte for BAUD and CAN_BTR reports (follows the 32-bit timing value).
pub const TIMING_NODE_OFFSET: usize = 5;
/// First byte of the big-endian bit timing value.
pub const TIMING_OFFSET: usize = 1;

pub const FLAGS_OFFSET: usize = 2;
pub const ID_OFFSET: usize = 3;
pub const DLC_OFFSET: usize = 7;
pub const DATA_OFFSET: usize = 8;

pub const FLAG_EXTENDED: u8 = 0b0000_0001;
pub const FLAG_REMOTE: u8 = 0b0000_0010;

/// Largest 11-bit standard identifier.
pub const MAX_STANDARD_ID: u32 = 0x7FF;
/// Largest 29-bit extended identifier.
pub const MAX_EXTENDED_ID: u32 = 0x1FFF_FFFF;
