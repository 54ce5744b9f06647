//! content-pipeline-cli - Command implementations behind the `content-pipeline` binary
//!
//! This crate provides:
//! - [`manifest`]: the `content-pipeline.toml` manifest
//! - [`input`]: merging flags with the manifest into an [`Invocation`]
//! - [`generate`], [`check`] and [`resolve`]: the subcommands
//! - [`lockfile`]: checksums of generated files for drift detection
//! - [`logging`]: the stderr `tracing` subscriber

pub mod check;
pub mod generate;
pub mod input;
pub mod lockfile;
pub mod logging;
pub mod manifest;
pub mod resolve;

pub use input::{Flags, Invocation};
pub use lockfile::{LOCK_FILE_NAME, LockFile};
pub use manifest::{MANIFEST_FILE_NAME, Manifest};
