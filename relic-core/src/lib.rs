//! # relic-core
//!
//! Core export model for relic, a toolkit that re-emits assets extracted
//! from game engine archives as standalone files plus the project metadata
//! needed to reopen the result without broken references.
//!
//! This crate provides:
//! - The object model handed over by the archive parser layer
//!   ([`ObjectRef`], [`ObjectKind`])
//! - The read-only archive collaborator interface ([`source::AssetSource`])
//! - The export-collection contract every exporter participates in
//!   ([`export::ExportCollection`], [`export::AssetExporter`])
//! - Portable reference pointers and container identities
//!   ([`export::ExportPointer`], [`export::FileIdentity`])
//! - The run driver that groups objects into collections and writes them
//!   out ([`export::ProjectExporter`])
//!
//! Engine-specific behavior, including the built-in asset catalog, lives in
//! companion crates such as `relic-unity`.

pub mod export;
pub mod object;
pub mod source;

pub use export::{
    AssetExporter, ExportCollection, ExportContext, ExportError, ExportOptions, ExportPointer,
    ExportSummary, FileIdentity, PointerError, PointerKind, ProjectExporter,
};
pub use object::{ObjectKind, ObjectRef};
pub use source::{AssetSource, AudioClipInfo, AudioEncoding, MemoryAssetSource, SourceError};

use anyhow::Result;

/// Version information for the core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize structured logging for library consumers that have no
/// subscriber of their own.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("relic_core=info,relic_unity=info")
        .with_target(false)
        .try_init();
    Ok(())
}
