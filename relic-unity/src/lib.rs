//! # relic-unity
//!
//! Unity engine support for relic: turns objects extracted from Unity
//! serialized archives back into standalone files plus the reference
//! metadata a reopened project needs.
//!
//! The centerpiece is the built-in asset subsystem in [`builtin`]: Unity
//! content constantly references resources that ship inside the engine
//! runtime rather than inside any user archive (default materials, bundled
//! shaders, primitive meshes, UI sprites). Those objects are recognized,
//! assigned the numeric identifiers the engine uses internally, and
//! attributed to the engine's two reserved resource containers, so every
//! other exported asset can embed a valid pointer to them while the
//! built-ins themselves are never written out.
//!
//! Around it sit the per-class exporters the pipeline dispatches to: audio
//! clips ([`AudioAssetExporter`]), shaders ([`ShaderAssetExporter`]) and a
//! raw passthrough fallback ([`BinaryAssetExporter`]).

pub mod asset;
pub mod audio;
pub mod builtin;
pub mod shader;


pub use asset::{AssetContentWriter, AssetExportCollection, BinaryAssetExporter};
pub use audio::AudioAssetExporter;
pub use builtin::{
    BuiltinCatalog, ContainerIdentities, EngineAssetClassifier, EngineAssetExporter,
    EngineExportCollection, BUILTIN_EXTRA_IDENTITY, DEFAULT_RESOURCES_IDENTITY,
};
pub use shader::ShaderAssetExporter;

use std::sync::Arc;

use relic_core::{ExportOptions, ProjectExporter};

/// A [`ProjectExporter`] wired with the standard Unity exporter set.
///
/// The engine exporter is consulted first so built-in objects are exempted
/// before any per-class exporter can claim them; everything unhandled falls
/// through to the raw passthrough.
pub fn standard_project_exporter(options: ExportOptions) -> ProjectExporter {
    let mut exporter = ProjectExporter::new(options);
    exporter.register(Arc::new(EngineAssetExporter::new()));
    exporter.register(Arc::new(AudioAssetExporter));
    exporter.register(Arc::new(ShaderAssetExporter));
    exporter.register(Arc::new(BinaryAssetExporter));
    exporter
}
