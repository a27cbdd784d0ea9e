//! In-memory representation of a classic CAN frame as it travels between
//! the receive interrupt, the dispatcher, and the transmit path.
//!
//! Frames carry no node tag: the node is known from the queue they sit in.
use crate::core::{MAX_EXTENDED_ID, MAX_STANDARD_ID};
use embedded_can::{ExtendedId, Id, StandardId};

//==================================================================================CAN_ID
/// Standard (11-bit) or extended (29-bit) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CanId {
    raw: u32,
    is_extended: bool,
}

impl CanId {
    /// Standard identifier, `None` above `0x7FF`.
    pub const fn standard(raw: u16) -> Option<Self> {
        if raw as u32 > MAX_STANDARD_ID {
            return None;
        }
        Some(Self {
            raw: raw as u32,
            is_extended: false,
        })
    }

    /// Extended identifier, `None` above `0x1FFF_FFFF`.
    pub const fn extended(raw: u32) -> Option<Self> {
        if raw > MAX_EXTENDED_ID {
            return None;
        }
        Some(Self {
            raw,
            is_extended: true,
        })
    }

    /// Build from the raw value and the IDE flag.
    pub const fn new(raw: u32, is_extended: bool) -> Option<Self> {
        let max = if is_extended {
            MAX_EXTENDED_ID
        } else {
            MAX_STANDARD_ID
        };
        if raw > max {
            return None;
        }
        Some(Self { raw, is_extended })
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// IDE flag.
    #[inline]
    pub const fn is_extended(&self) -> bool {
        self.is_extended
    }
}

impl From<Id> for CanId {
    fn from(id: Id) -> Self {
        match id {
            Id::Standard(id) => Self {
                raw: id.as_raw() as u32,
                is_extended: false,
            },
            Id::Extended(id) => Self {
                raw: id.as_raw(),
                is_extended: true,
            },
        }
    }
}

impl From<CanId> for Id {
    fn from(id: CanId) -> Self {
        // Range was checked at construction, the fallbacks are unreachable.
        if id.is_extended {
            Id::Extended(ExtendedId::new(id.raw).unwrap_or(ExtendedId::ZERO))
        } else {
            Id::Standard(StandardId::new(id.raw as u16).unwrap_or(StandardId::ZERO))
        }
    }
}

//==================================================================================CAN_FRAME
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Classic CAN data or remote frame.
pub struct CanFrame {
    pub id: CanId,
    /// Remote transmission request; `data` is unused but `len` still carries the DLC.
    pub remote: bool,
    /// Payload buffer, zero beyond `len`.
    pub data: [u8; 8],
    /// Data Length Code, 0 to 8.
    pub len: usize,
}

impl CanFrame {
    /// Data frame; `None` when `payload` exceeds eight bytes.
    pub fn new(id: CanId, payload: &[u8]) -> Option<Self> {
        if payload.len() > 8 {
            return None;
        }
        let mut data = [0u8; 8];
        data[..payload.len()].copy_from_slice(payload);
        Some(Self {
            id,
            remote: false,
            data,
            len: payload.len(),
        })
    }

    /// Remote frame requesting `dlc` bytes; `None` above eight.
    pub fn new_remote(id: CanId, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }
        Some(Self {
            id,
            remote: true,
            data: [0; 8],
            len: dlc,
        })
    }

    /// Valid payload bytes (empty for remote frames).
    #[inline]
    pub fn payload(&self) -> &[u8] {
        if self.remote {
            &[]
        } else {
            &self.data[..self.len.min(8)]
        }
    }

    /// Copy any `embedded_can` frame handed over by a HAL driver.
    pub fn from_frame<F: embedded_can::Frame>(frame: &F) -> Self {
        let id = CanId::from(frame.id());
        let len = frame.dlc().min(8);
        if frame.is_remote_frame() {
            Self {
                id,
                remote: true,
                data: [0; 8],
                len,
            }
        } else {
            let mut data = [0u8; 8];
            let payload = frame.data();
            let copy_len = payload.len().min(8);
            data[..copy_len].copy_from_slice(&payload[..copy_len]);
            Self {
                id,
                remote: false,
                data,
                len: copy_len,
            }
        }
    }

    /// Build the driver's frame type for transmission.
    pub fn to_frame<F: embedded_can::Frame>(&self) -> Option<F> {
        let id = Id::from(self.id);
        if self.remote {
            F::new_remote(id, self.len)
        } else {
            F::new(id, self.payload())
        }
    }
}
