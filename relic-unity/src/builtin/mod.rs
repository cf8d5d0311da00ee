//! Built-in engine asset resolution and reference assignment.
//!
//! Exported assets routinely reference objects that are never physically
//! present in the archives being processed: default materials, bundled
//! shaders, primitive meshes, UI sprites. The engine ships those inside its
//! own runtime and expects references to them to carry well-known numeric
//! identifiers and one of two reserved container identities. This module
//! recognizes such objects, including transitively through a material's
//! shader, and produces the stable pointers other exporters embed, without
//! ever writing built-in payload to disk.

pub mod catalog;
pub mod classifier;
pub mod collection;
pub mod identity;

pub use catalog::BuiltinCatalog;
pub use classifier::EngineAssetClassifier;
pub use collection::{EngineAssetExporter, EngineExportCollection};
pub use identity::{
    ContainerIdentities, BUILTIN_EXTRA_IDENTITY, DEFAULT_RESOURCES_IDENTITY,
};
