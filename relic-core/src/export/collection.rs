use std::path::Path;

use thiserror::Error;

use crate::export::pipeline::ExportContext;
use crate::export::pointer::ExportPointer;
use crate::object::{ObjectKind, ObjectRef};
use crate::source::SourceError;

/// Errors raised while assigning reference pointers.
#[derive(Debug, Error)]
pub enum PointerError {
    /// A classified built-in has no identifier in the catalog. Fatal for the
    /// one reference being written; a silently defaulted id would corrupt
    /// the exported project.
    #[error("no catalog identifier for built-in {kind} '{name}' from archive '{archive}'")]
    UnknownBuiltin {
        kind: ObjectKind,
        name: String,
        archive: String,
    },

    #[error("object '{name}' does not belong to collection '{collection}'")]
    NotInCollection { collection: String, name: String },
}

/// Errors raised while a collection writes its assets out.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Pointer(#[from] PointerError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("export failed: {0}")]
    Other(#[from] anyhow::Error),
}

/// A group of objects destined for (or exempted from) one export operation.
///
/// Collections own reference assignment for their members: any exporter that
/// serializes a pointer toward a member asks the owning collection for the
/// file id and container identity to embed. Membership is fixed at
/// construction and never changes afterwards.
pub trait ExportCollection: Send + Sync {
    /// Human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// The objects this collection claims.
    fn assets(&self) -> &[ObjectRef];

    fn contains(&self, obj: &ObjectRef) -> bool {
        self.assets().iter().any(|asset| asset == obj)
    }

    /// Numeric file id `obj` gets inside this collection's container.
    fn export_id(&self, obj: &ObjectRef) -> Result<u64, PointerError>;

    /// Build the serialized reference for `obj`. `is_local` marks a
    /// reference from within the same container, which drops the container
    /// identity from the persisted form.
    fn create_pointer(
        &self,
        obj: &ObjectRef,
        is_local: bool,
    ) -> Result<ExportPointer, PointerError>;

    /// Write the collection's assets under `dir`. Returns `false` when the
    /// collection intentionally writes nothing, which is a defined outcome
    /// rather than a failure.
    fn export(&self, ctx: &ExportContext<'_>, dir: &Path) -> Result<bool, ExportError>;
}

/// Creates collections for the objects it recognizes.
///
/// Exporters are consulted in registration order; the first one whose
/// `handles` accepts an object claims it, together with every other object
/// the created collection pulls in.
pub trait AssetExporter: Send + Sync {
    fn handles(&self, source: &dyn crate::source::AssetSource, obj: &ObjectRef) -> bool;

    fn create_collection(
        &self,
        source: &dyn crate::source::AssetSource,
        obj: &ObjectRef,
        options: &crate::export::pipeline::ExportOptions,
    ) -> Box<dyn ExportCollection>;
}
