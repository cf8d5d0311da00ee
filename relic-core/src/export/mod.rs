pub mod collection;
pub mod pipeline;
pub mod pointer;

pub use collection::{AssetExporter, ExportCollection, ExportError, PointerError};
pub use pipeline::{ExportContext, ExportOptions, ExportSummary, ProjectExporter};
pub use pointer::{ExportPointer, FileIdentity, PointerKind};
