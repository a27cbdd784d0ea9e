//! Routing tags and command codes of the host protocol, plus the decoded
//! form of a host request.
use crate::core::*;
use crate::protocol::codec::BitTimingValue;
use crate::protocol::transport::can_frame::CanFrame;

//==================================================================================NODE
/// One of the two physical CAN controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Node {
    Can1,
    Can2,
}

impl Node {
    /// Wire byte identifying the node.
    #[inline]
    pub const fn to_byte(self) -> u8 {
        match self {
            Node::Can1 => CAN1_NODE,
            Node::Can2 => CAN2_NODE,
        }
    }

    #[inline]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CAN1_NODE => Some(Node::Can1),
            CAN2_NODE => Some(Node::Can2),
            _ => None,
        }
    }
}

//==================================================================================COMMAND_CODE
/// Byte 0 of every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CommandCode {
    /// CAN payload to relay, in either direction.
    Message = COMMAND_MESSAGE,
    Ack = COMMAND_ACK,
    Nak = COMMAND_NAK,
    /// Bit timing reconfiguration request.
    Baud = COMMAND_BAUD,
    /// Request for the identity replies.
    Info = COMMAND_INFO,
    Hardware = COMMAND_HARDWARE,
    Version = COMMAND_VERSION,
    Frequency = COMMAND_FREQUENCY,
    CanBtr = COMMAND_CAN_BTR,
}

impl CommandCode {
    #[inline]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            COMMAND_MESSAGE => CommandCode::Message,
            COMMAND_ACK => CommandCode::Ack,
            COMMAND_NAK => CommandCode::Nak,
            COMMAND_BAUD => CommandCode::Baud,
            COMMAND_INFO => CommandCode::Info,
            COMMAND_HARDWARE => CommandCode::Hardware,
            COMMAND_VERSION => CommandCode::Version,
            COMMAND_FREQUENCY => CommandCode::Frequency,
            COMMAND_CAN_BTR => CommandCode::CanBtr,
            _ => return None,
        })
    }
}

//==================================================================================COMMAND
/// Host request after decoding.
///
/// Anything that is not a host-to-device command ends up in `Unknown`, so the
/// dispatcher handles it explicitly instead of falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Relay `frame` on `node`.
    Message { node: Node, frame: CanFrame },
    /// Stop `node`, load `timing` and restart it.
    Baud { node: Node, timing: BitTimingValue },
    /// Send the identity strings, then the timing of `node` when it is known.
    Info { node: Option<Node> },
    /// Command byte with no host-to-device meaning.
    Unknown(u8),
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
