//! Cargo build script: generates the built-in device identity constants.

// Re-export the core module from src/core.rs so build_core can reuse it
#[path = "src/core.rs"]
mod core;

mod build_core;
use crate::build_core::{
    conf::*, domain::Identity, errors::BuildError, gen_identity::run_identity_gen,
};

use std::fs;
use std::path::PathBuf;

// The identity strings answered to INFO come from a JSON document and are
// checked against the report size before being emitted as constants.

//==================================================================================MAIN
fn main() -> Result<(), BuildError> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", IDENTITY_PATH);
    println!("cargo:rerun-if-env-changed={}", IDENTITY_ENV_VAR);

    // 1. Pick the identity document.
    // Priority order:
    //   1. CRUX_IDENTITY_PATH environment variable (absolute or relative path)
    //   2. Default document shipped with the crate
    let default_identity_path = PathBuf::from(IDENTITY_PATH);

    let user_identity_path = std::env::var(IDENTITY_ENV_VAR).ok().map(PathBuf::from);

    let identity_path = if let Some(path) = user_identity_path {
        if path.exists() {
            println!("cargo:warning=Using custom device identity from {:?}", path);
            println!("cargo:rerun-if-changed={}", path.display());
            path
        } else {
            println!(
                "cargo:warning=Custom identity path specified but file not found: {:?}",
                path
            );
            println!("cargo:warning=Falling back to the default device identity");
            default_identity_path
        }
    } else {
        default_identity_path
    };

    let identity_string =
        fs::read_to_string(&identity_path).map_err(|e| BuildError::ReadFile {
            path: identity_path.clone(),
            source: e,
        })?;
    let identity: Identity = serde_json::from_str(&identity_string)?;

    // 2. Validate and render.
    let buffer_identity_code = run_identity_gen(&identity)?;

    // 3. Write the generated code into `OUT_DIR`.
    // The `include!` in `src/gateway/config` pulls it in at compile time.
    let out_dir_str = std::env::var("OUT_DIR").map_err(|e| BuildError::OutDirErr { source: e })?;
    let identity_file_path = PathBuf::from(out_dir_str).join(OUT_DIR_IDENTITY_FILE_NAME);

    fs::write(&identity_file_path, &buffer_identity_code).map_err(|e| BuildError::WriteFile {
        path: identity_file_path,
        source: e,
    })?;

    Ok(())
}
