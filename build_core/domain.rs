use serde::Deserialize;

//==================================================================================IDENTITY
// Structure deserialized from `device_identity.json`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
/// Strings the device reports in answer to INFO.
pub(crate) struct Identity {
    pub(crate) hardware: String,
    pub(crate) version: String,
    /// Peripheral clock the host computes bit timing against.
    pub(crate) frequency: String,
}

impl Identity {
    /// Field name paired with its value, in reply order.
    pub(crate) fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("hardware", &self.hardware),
            ("version", &self.version),
            ("frequency", &self.frequency),
        ]
    }
}
