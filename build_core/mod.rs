//! Workspace for the build script: identity document and its generator.
pub mod conf;
pub mod domain;
pub mod errors;
pub mod gen_identity;
