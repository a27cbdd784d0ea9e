//! Paths and constants used during build-time code generation.
//==================================================================================CONF
/// Identity document shipped with the crate.
pub(crate) const IDENTITY_PATH: &str = "build_core/var/device_identity.json";
/// Environment variable overriding [`IDENTITY_PATH`].
pub(crate) const IDENTITY_ENV_VAR: &str = "CRUX_IDENTITY_PATH";
/// Generated identity file name (written to `OUT_DIR`).
pub(crate) const OUT_DIR_IDENTITY_FILE_NAME: &str = "generated_identity.rs";
