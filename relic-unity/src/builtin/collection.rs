use std::path::Path;
use std::sync::Arc;

use relic_core::{
    AssetExporter, AssetSource, ExportCollection, ExportContext, ExportError, ExportOptions,
    ExportPointer, ObjectRef, PointerError, PointerKind,
};
use tracing::debug;

use crate::builtin::catalog::BuiltinCatalog;
use crate::builtin::classifier::EngineAssetClassifier;
use crate::builtin::identity::ContainerIdentities;

/// Export collection for the engine's built-in resources.
///
/// Other exporters rely on it for membership tests and reference pointers,
/// but it writes no payload itself: built-ins ship inside the engine
/// runtime, so "exporting" them is a defined no-op.
pub struct EngineExportCollection {
    name: String,
    assets: Vec<ObjectRef>,
    catalog: Arc<BuiltinCatalog>,
    identities: ContainerIdentities,
}

impl EngineExportCollection {
    /// Membership is fixed here and never changes afterwards: every object
    /// of a recognized engine archive, or just the one discovered object
    /// when it came from user content.
    pub fn new(
        source: &dyn AssetSource,
        asset: &ObjectRef,
        catalog: Arc<BuiltinCatalog>,
        identities: ContainerIdentities,
    ) -> Self {
        let assets = if identities.is_builtin_archive(&asset.archive) {
            source.objects_in(&asset.archive)
        } else {
            vec![asset.clone()]
        };
        Self {
            name: format!("Engine {}", catalog.engine_version()),
            assets,
            catalog,
            identities,
        }
    }
}

impl ExportCollection for EngineExportCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn assets(&self) -> &[ObjectRef] {
        &self.assets
    }

    fn export_id(&self, obj: &ObjectRef) -> Result<u64, PointerError> {
        self.catalog
            .id_for(obj.kind, &obj.name)
            .ok_or_else(|| PointerError::UnknownBuiltin {
                kind: obj.kind,
                name: obj.name.clone(),
                archive: obj.archive.clone(),
            })
    }

    fn create_pointer(
        &self,
        obj: &ObjectRef,
        is_local: bool,
    ) -> Result<ExportPointer, PointerError> {
        // Built-ins are never local to an exported project; a local request
        // is a caller bug.
        debug_assert!(!is_local, "requested local pointer into {}", self.name);

        let file_id = self.export_id(obj)?;
        // Objects recognized purely by name or shader chain were not read
        // out of either engine archive; they are all attributed to the
        // extra-resources container so unrelated export runs agree.
        let identity = self
            .identities
            .identity_for(&obj.archive)
            .unwrap_or_else(|| self.identities.builtin_extra());
        Ok(ExportPointer::new(file_id, identity, PointerKind::Internal))
    }

    fn export(&self, _ctx: &ExportContext<'_>, _dir: &Path) -> Result<bool, ExportError> {
        debug!("'{}' holds {} engine assets, nothing to write", self.name, self.assets.len());
        Ok(false)
    }
}

/// Exporter that claims built-in engine assets and exempts them from
/// payload export.
pub struct EngineAssetExporter {
    catalog: Arc<BuiltinCatalog>,
    identities: ContainerIdentities,
}

impl EngineAssetExporter {
    pub fn new() -> Self {
        Self::with_catalog(BuiltinCatalog::unity_2017_3(), ContainerIdentities::unity())
    }

    pub fn with_catalog(catalog: BuiltinCatalog, identities: ContainerIdentities) -> Self {
        Self {
            catalog: Arc::new(catalog),
            identities,
        }
    }
}

impl Default for EngineAssetExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetExporter for EngineAssetExporter {
    fn handles(&self, source: &dyn AssetSource, obj: &ObjectRef) -> bool {
        EngineAssetClassifier::new(&self.catalog, &self.identities, source).is_builtin(obj)
    }

    fn create_collection(
        &self,
        source: &dyn AssetSource,
        obj: &ObjectRef,
        _options: &ExportOptions,
    ) -> Box<dyn ExportCollection> {
        Box::new(EngineExportCollection::new(
            source,
            obj,
            Arc::clone(&self.catalog),
            self.identities,
        ))
    }
}
