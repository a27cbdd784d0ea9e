//! Generator for the built-in device identity constants.
use std::fmt::Write;

use crate::build_core::{domain::Identity, errors::BuildError};
use crate::core::MAX_STRING_LEN;

/// Validate every identity string and render the constants file.
pub(crate) fn run_identity_gen(identity: &Identity) -> Result<String, BuildError> {
    let mut buffer = String::new();
    writeln!(buffer, "// @generated by build.rs from the device identity document.")?;

    for (field, value) in identity.fields() {
        validate(field, value)?;
        writeln!(
            buffer,
            "pub const BUILTIN_{}: &str = {:?};",
            field.to_ascii_uppercase(),
            value
        )?;
    }

    Ok(buffer)
}

/// Same rules the runtime string encoder applies.
fn validate(field: &'static str, value: &str) -> Result<(), BuildError> {
    if value.len() > MAX_STRING_LEN {
        return Err(BuildError::StringTooLong {
            field,
            len: value.len(),
            max: MAX_STRING_LEN,
        });
    }
    match value.bytes().find(|b| *b == 0 || !b.is_ascii()) {
        Some(byte) => Err(BuildError::InvalidCharacter { field, byte }),
        None => Ok(()),
    }
}
