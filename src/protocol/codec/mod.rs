//! Frame codec: fixed-size HID reports to typed commands and back.
//!
//! Every function works on stack buffers of [`REPORT_SIZE`] bytes; nothing
//! allocates. Device-to-host encoders are used by the dispatcher, the
//! host-to-device encoders and [`decode_reply`] serve host tooling and tests,
//! and keep both directions of the MESSAGE layout symmetric.
use crate::core::*;
use crate::error::{DecodeError, EncodeError};
use crate::protocol::command::{Command, CommandCode, Node};
use crate::protocol::transport::can_frame::{CanFrame, CanId};

//==================================================================================REPORT
/// One HID report. Byte 0 is always the command code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report([u8; REPORT_SIZE]);

impl Default for Report {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Report {
    /// All-zero report.
    pub const fn zeroed() -> Self {
        Self([0; REPORT_SIZE])
    }

    pub const fn from_bytes(bytes: [u8; REPORT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy what the USB stack received, zero padding short transfers.
    /// Transfers longer than [`REPORT_SIZE`] are refused.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::EmptyReport);
        }
        if bytes.len() > REPORT_SIZE {
            return Err(DecodeError::ReportTooLong { len: bytes.len() });
        }
        let mut report = Self::zeroed();
        report.0[..bytes.len()].copy_from_slice(bytes);
        Ok(report)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; REPORT_SIZE] {
        &self.0
    }

    #[inline]
    pub const fn command_byte(&self) -> u8 {
        self.0[0]
    }

    /// Decoded command code, `None` for unassigned bytes.
    #[inline]
    pub const fn command(&self) -> Option<CommandCode> {
        CommandCode::from_byte(self.0[0])
    }

    const fn with_command(code: CommandCode) -> Self {
        let mut bytes = [0; REPORT_SIZE];
        bytes[0] = code.to_byte();
        Self(bytes)
    }
}

//==================================================================================BIT_TIMING
/// Raw value for the controller's bit timing register. Never decoded here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTimingValue(pub u32);

impl BitTimingValue {
    #[inline]
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    #[inline]
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}

//==================================================================================HOST_TO_DEVICE
/// Decode a host request.
///
/// MESSAGE and BAUD with an unknown node or a malformed frame are errors.
/// INFO tolerates an unknown node: the identity strings are still owed.
pub fn decode_command(report: &Report) -> Result<Command, DecodeError> {
    let bytes = report.as_bytes();
    match report.command() {
        Some(CommandCode::Message) => {
            let node = node_at(bytes, NODE_OFFSET)?;
            let frame = read_frame(bytes)?;
            Ok(Command::Message { node, frame })
        }
        Some(CommandCode::Baud) => {
            let node = node_at(bytes, TIMING_NODE_OFFSET)?;
            Ok(Command::Baud {
                node,
                timing: read_timing(bytes),
            })
        }
        Some(CommandCode::Info) => Ok(Command::Info {
            node: Node::from_byte(bytes[NODE_OFFSET]),
        }),
        _ => Ok(Command::Unknown(report.command_byte())),
    }
}

/// MESSAGE report, used for host-to-device requests and device-to-host relays alike.
pub fn encode_message(node: Node, frame: &CanFrame) -> Report {
    let mut report = Report::with_command(CommandCode::Message);
    let bytes = &mut report.0;
    bytes[NODE_OFFSET] = node.to_byte();

    let mut flags = 0;
    if frame.id.is_extended() {
        flags |= FLAG_EXTENDED;
    }
    if frame.remote {
        flags |= FLAG_REMOTE;
    }
    bytes[FLAGS_OFFSET] = flags;
    bytes[ID_OFFSET..ID_OFFSET + 4].copy_from_slice(&frame.id.raw().to_be_bytes());

    bytes[DLC_OFFSET] = frame.len.min(8) as u8;
    let payload = frame.payload();
    bytes[DATA_OFFSET..DATA_OFFSET + payload.len()].copy_from_slice(payload);
    report
}

/// BAUD request: timing in bytes 1-4, node in byte 5.
pub fn encode_baud(node: Node, timing: BitTimingValue) -> Report {
    let mut report = Report::with_command(CommandCode::Baud);
    write_timing(&mut report.0, timing, node);
    report
}

/// INFO request for `node`.
pub fn encode_info(node: Node) -> Report {
    let mut report = Report::with_command(CommandCode::Info);
    report.0[NODE_OFFSET] = node.to_byte();
    report
}

//==================================================================================DEVICE_TO_HOST
pub const fn encode_ack() -> Report {
    Report::with_command(CommandCode::Ack)
}

pub const fn encode_nak() -> Report {
    Report::with_command(CommandCode::Nak)
}

/// CAN_BTR reply: timing in bytes 1-4, originating node in byte 5.
pub fn encode_bit_timing(timing: BitTimingValue, node: Node) -> Report {
    let mut report = Report::with_command(CommandCode::CanBtr);
    write_timing(&mut report.0, timing, node);
    report
}

/// String reply (HARDWARE, VERSION, FREQUENCY): the text follows the command
/// byte and the rest of the report stays zero.
///
/// Text that would not fit is refused rather than truncated.
pub fn encode_string(code: CommandCode, text: &str) -> Result<Report, EncodeError> {
    validate_string(text)?;
    let mut report = Report::with_command(code);
    report.0[1..1 + text.len()].copy_from_slice(text.as_bytes());
    Ok(report)
}

/// Check that `text` fits a string reply: ASCII, NUL-free, at most
/// [`MAX_STRING_LEN`] bytes.
pub fn validate_string(text: &str) -> Result<(), EncodeError> {
    if text.len() > MAX_STRING_LEN {
        return Err(EncodeError::StringTooLong {
            len: text.len(),
            max: MAX_STRING_LEN,
        });
    }
    match text.bytes().find(|b| *b == 0 || !b.is_ascii()) {
        Some(byte) => Err(EncodeError::InvalidCharacter { byte }),
        None => Ok(()),
    }
}

//==================================================================================REPLIES
/// Device-to-host report after decoding. String replies borrow from the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply<'a> {
    Message { node: Node, frame: CanFrame },
    Ack,
    Nak,
    Hardware(&'a str),
    Version(&'a str),
    Frequency(&'a str),
    CanBtr { node: Node, timing: BitTimingValue },
}

/// Decode a device-to-host report (host side of the protocol).
pub fn decode_reply(report: &Report) -> Result<Reply<'_>, DecodeError> {
    let bytes = report.as_bytes();
    match report.command() {
        Some(CommandCode::Message) => Ok(Reply::Message {
            node: node_at(bytes, NODE_OFFSET)?,
            frame: read_frame(bytes)?,
        }),
        Some(CommandCode::Ack) => Ok(Reply::Ack),
        Some(CommandCode::Nak) => Ok(Reply::Nak),
        Some(CommandCode::Hardware) => read_string(bytes).map(Reply::Hardware),
        Some(CommandCode::Version) => read_string(bytes).map(Reply::Version),
        Some(CommandCode::Frequency) => read_string(bytes).map(Reply::Frequency),
        Some(CommandCode::CanBtr) => Ok(Reply::CanBtr {
            node: node_at(bytes, TIMING_NODE_OFFSET)?,
            timing: read_timing(bytes),
        }),
        Some(CommandCode::Baud) | Some(CommandCode::Info) | None => {
            Err(DecodeError::UnexpectedCommand {
                code: report.command_byte(),
            })
        }
    }
}

//==================================================================================HELPERS
fn node_at(bytes: &[u8; REPORT_SIZE], offset: usize) -> Result<Node, DecodeError> {
    let node = bytes[offset];
    Node::from_byte(node).ok_or(DecodeError::UnknownNode { node })
}

fn read_frame(bytes: &[u8; REPORT_SIZE]) -> Result<CanFrame, DecodeError> {
    let flags = bytes[FLAGS_OFFSET];
    let extended = flags & FLAG_EXTENDED != 0;
    let raw = u32::from_be_bytes([
        bytes[ID_OFFSET],
        bytes[ID_OFFSET + 1],
        bytes[ID_OFFSET + 2],
        bytes[ID_OFFSET + 3],
    ]);
    let id = CanId::new(raw, extended).ok_or(DecodeError::InvalidIdentifier { raw, extended })?;

    let dlc = bytes[DLC_OFFSET];
    if dlc > 8 {
        return Err(DecodeError::InvalidLength { dlc });
    }
    let len = dlc as usize;
    let frame = if flags & FLAG_REMOTE != 0 {
        CanFrame::new_remote(id, len)
    } else {
        CanFrame::new(id, &bytes[DATA_OFFSET..DATA_OFFSET + len])
    };
    frame.ok_or(DecodeError::InvalidLength { dlc })
}

fn read_timing(bytes: &[u8; REPORT_SIZE]) -> BitTimingValue {
    BitTimingValue::from_be_bytes([
        bytes[TIMING_OFFSET],
        bytes[TIMING_OFFSET + 1],
        bytes[TIMING_OFFSET + 2],
        bytes[TIMING_OFFSET + 3],
    ])
}

fn write_timing(bytes: &mut [u8; REPORT_SIZE], timing: BitTimingValue, node: Node) {
    bytes[TIMING_OFFSET..TIMING_OFFSET + 4].copy_from_slice(&timing.to_be_bytes());
    bytes[TIMING_NODE_OFFSET] = node.to_byte();
}

fn read_string(bytes: &[u8; REPORT_SIZE]) -> Result<&str, DecodeError> {
    let text = &bytes[1..];
    let end = text.iter().position(|b| *b == 0).unwrap_or(text.len());
    core::str::from_utf8(&text[..end]).map_err(|_| DecodeError::InvalidString)
}
