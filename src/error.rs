//! Error definitions shared across library modules.
//! None of these ever reach the host as such: the dispatcher turns them into
//! a `NAK`, a dropped report, or a counter in `DispatchStats`.
use thiserror_no_std::Error;

//==================================================================================DECODE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures while turning a raw report into a typed command or reply.
pub enum DecodeError {
    /// The USB stack handed over a zero-length report.
    #[error("Empty report")]
    EmptyReport,
    /// The USB stack handed over more than one report's worth of bytes.
    #[error("Report too long: {len} bytes")]
    ReportTooLong { len: usize },
    /// The node byte names neither CAN1 nor CAN2.
    #[error("Unknown node: {node}")]
    UnknownNode { node: u8 },
    /// DLC field above the classic CAN maximum of eight bytes.
    #[error("Invalid data length: {dlc}")]
    InvalidLength { dlc: u8 },
    /// Identifier does not fit its declared kind (11 or 29 bits).
    #[error("Invalid identifier {raw:#x} (extended: {extended})")]
    InvalidIdentifier { raw: u32, extended: bool },
    /// String reply is not valid UTF-8.
    #[error("Invalid string reply")]
    InvalidString,
    /// Command byte is unassigned or not valid in this direction.
    #[error("Unexpected command: {code:#x}")]
    UnexpectedCommand { code: u8 },
}

//==================================================================================ENCODE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures while building a string reply.
pub enum EncodeError {
    /// String does not fit after the command byte.
    #[error("String too long: {len} bytes, max {max}")]
    StringTooLong { len: usize, max: usize },
    /// Non-ASCII or NUL byte; the host reads replies as NUL-terminated ASCII.
    #[error("Invalid character in string reply: {byte:#x}")]
    InvalidCharacter { byte: u8 },
}

//==================================================================================RECONFIGURE_ERROR
#[derive(Error, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures of a bit timing reconfiguration attempt.
pub enum ReconfigureError<E: core::fmt::Debug> {
    /// The controller refused to leave initialization mode with the new timing.
    #[error("CAN controller start failed: {0:?}")]
    StartFailed(E),
}
