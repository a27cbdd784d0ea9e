//! Error set that can occur while generating code during the build step.
use std::env::VarError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the build script (JSON parsing, validation, writing).
pub(crate) enum BuildError {
    /// Failed to read the `OUT_DIR` environment variable.
    #[error("[MESSAGE]:OUT_DIR error. [ERROR]:{source}")]
    OutDirErr {
        #[source]
        source: VarError,
    },

    /// Identity document is not valid JSON or misses a field.
    #[error("[MESSAGE]:Invalid identity JSON [ERROR]:{0:?}")]
    ParseJson(#[from] serde_json::Error),

    /// Unable to read a file from disk.
    #[error("[MESSAGE]:Failed to read file [PATH]:{path} [ERROR]:{source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the generated code to disk.
    #[error("[MESSAGE]:Failed to write file [PATH]:{path} [ERROR]:{source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Formatting error while writing generated code.
    #[error("[MESSAGE]:Failed to display writeln! macro [ERROR]:{source}")]
    WritelnErr {
        #[from]
        source: std::fmt::Error,
    },

    /// Identity string longer than one report can carry.
    #[error("[MESSAGE]:Identity string too long [FIELD]:{field} [LEN]:{len} [MAX]:{max}")]
    StringTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Identity string with a NUL or non-ASCII byte.
    #[error("[MESSAGE]:Identity string has an invalid byte [FIELD]:{field} [BYTE]:{byte:#04x}")]
    InvalidCharacter { field: &'static str, byte: u8 },
}
