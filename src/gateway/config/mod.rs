//! Runtime configuration of the bridge and the identity strings it reports.
//!
//! The built-in identity is produced by `build.rs` from
//! `build_core/var/device_identity.json` (or the file named by the
//! `CRUX_IDENTITY_PATH` environment variable) and validated at build time
//! with the same rules [`DeviceIdentity::new`] applies at runtime.
use crate::error::EncodeError;
use crate::protocol::codec::validate_string;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/generated_identity.rs"));
}

pub use generated::{BUILTIN_FREQUENCY, BUILTIN_HARDWARE, BUILTIN_VERSION};

/// Ticks the activity LED stays lit.
pub const DEFAULT_PULSE_TICKS: u32 = 2_000;
/// Ticks after a pulse before the next one may start.
pub const DEFAULT_COOLDOWN_TICKS: u32 = 50_000;

//==================================================================================DEVICE_IDENTITY
/// Strings sent in reply to INFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity {
    hardware: &'static str,
    version: &'static str,
    frequency: &'static str,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DeviceIdentity {
    /// Identity baked in at build time.
    pub const fn builtin() -> Self {
        Self {
            hardware: BUILTIN_HARDWARE,
            version: BUILTIN_VERSION,
            frequency: BUILTIN_FREQUENCY,
        }
    }

    /// Custom identity; every string must fit a report (ASCII, NUL-free).
    pub fn new(
        hardware: &'static str,
        version: &'static str,
        frequency: &'static str,
    ) -> Result<Self, EncodeError> {
        validate_string(hardware)?;
        validate_string(version)?;
        validate_string(frequency)?;
        Ok(Self {
            hardware,
            version,
            frequency,
        })
    }

    #[inline]
    pub const fn hardware(&self) -> &'static str {
        self.hardware
    }

    #[inline]
    pub const fn version(&self) -> &'static str {
        self.version
    }

    /// Peripheral clock the bit timing values are computed against.
    #[inline]
    pub const fn frequency(&self) -> &'static str {
        self.frequency
    }
}

//==================================================================================GATEWAY_CONFIG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GatewayConfig {
    pub identity: DeviceIdentity,
    /// Activity pulse width, in dispatcher ticks.
    pub pulse_ticks: u32,
    /// Minimum gap between two pulses, in dispatcher ticks.
    pub cooldown_ticks: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayConfig {
    pub const fn new() -> Self {
        Self {
            identity: DeviceIdentity::builtin(),
            pulse_ticks: DEFAULT_PULSE_TICKS,
            cooldown_ticks: DEFAULT_COOLDOWN_TICKS,
        }
    }

    pub const fn with_identity(mut self, identity: DeviceIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub const fn with_pulse_ticks(mut self, ticks: u32) -> Self {
        self.pulse_ticks = ticks;
        self
    }

    pub const fn with_cooldown_ticks(mut self, ticks: u32) -> Self {
        self.cooldown_ticks = ticks;
        self
    }
}
