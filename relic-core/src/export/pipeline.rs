use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::export::collection::{AssetExporter, ExportCollection, PointerError};
use crate::export::pointer::ExportPointer;
use crate::object::{ObjectKind, ObjectRef};
use crate::source::AssetSource;

/// Knobs for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Derive file identities from content hashes instead of generating
    /// random ones, so repeated runs over the same archives agree.
    pub guid_by_content: bool,
    /// Convert audio payload to playable containers where possible; raw
    /// sample banks are passed through unchanged when disabled.
    pub convert_audio: bool,
    /// Write a JSON manifest describing the run next to the exported files.
    pub write_manifest: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            guid_by_content: false,
            convert_audio: true,
            write_manifest: true,
        }
    }
}

/// Counters and warnings accumulated over one export run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSummary {
    /// Collections that wrote payload.
    pub exported: usize,
    /// Collections that declined to write anything (a defined outcome).
    pub withheld: usize,
    /// Objects no registered exporter claimed.
    pub skipped: usize,
    /// Collections whose export failed.
    pub failed: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry {
    collection: String,
    assets: usize,
    wrote_payload: bool,
}

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    tool: &'static str,
    version: &'static str,
    generated_at: chrono::DateTime<chrono::Utc>,
    summary: &'a ExportSummary,
    collections: Vec<ManifestEntry>,
}

/// Read-only view over every collection of a run.
///
/// Exporters serializing an asset use it to turn references toward other
/// objects into portable pointers, without knowing which collection owns
/// the target.
pub struct ExportContext<'a> {
    collections: &'a [Box<dyn ExportCollection>],
    source: &'a dyn AssetSource,
    options: &'a ExportOptions,
}

impl<'a> ExportContext<'a> {
    pub fn new(
        collections: &'a [Box<dyn ExportCollection>],
        source: &'a dyn AssetSource,
        options: &'a ExportOptions,
    ) -> Self {
        Self {
            collections,
            source,
            options,
        }
    }

    pub fn source(&self) -> &dyn AssetSource {
        self.source
    }

    pub fn options(&self) -> &ExportOptions {
        self.options
    }

    /// The collection that claimed `obj`, if any did.
    pub fn collection_of(&self, obj: &ObjectRef) -> Option<&dyn ExportCollection> {
        self.collections
            .iter()
            .find(|collection| collection.contains(obj))
            .map(|collection| collection.as_ref())
    }

    /// Build the reference `from` should embed toward `to`.
    ///
    /// Identifier lookup failures propagate to the caller; they must end up
    /// in the run log rather than silently producing a wrong id. A target no
    /// collection claimed degrades to the null reference with a warning.
    pub fn pointer_for(
        &self,
        from: &ObjectRef,
        to: &ObjectRef,
    ) -> Result<ExportPointer, PointerError> {
        match self.collection_of(to) {
            Some(collection) => collection.create_pointer(to, collection.contains(from)),
            None => {
                warn!("no collection claims {to}, writing null reference");
                Ok(ExportPointer::null())
            }
        }
    }
}

/// Drives one export run: groups objects into collections, asks each
/// collection to write itself out, and records the outcome.
pub struct ProjectExporter {
    options: ExportOptions,
    exporters: Vec<Arc<dyn AssetExporter>>,
}

impl ProjectExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            exporters: Vec::new(),
        }
    }

    /// Append an exporter. Earlier registrations win when several exporters
    /// accept the same object.
    pub fn register(&mut self, exporter: Arc<dyn AssetExporter>) {
        self.exporters.push(exporter);
    }

    /// Put an exporter in front of every previous registration, restricted
    /// to one object kind.
    pub fn override_exporter(&mut self, kind: ObjectKind, exporter: Arc<dyn AssetExporter>) {
        self.exporters.insert(0, Arc::new(KindOverride { kind, inner: exporter }));
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export `objects` under `dir`.
    ///
    /// A failing collection is logged and skipped; one bad asset must not
    /// abort the rest of the run.
    pub fn export(
        &self,
        source: &dyn AssetSource,
        objects: &[ObjectRef],
        dir: &Path,
    ) -> std::io::Result<ExportSummary> {
        fs::create_dir_all(dir)?;
        let mut summary = ExportSummary::default();

        let collections = self.build_collections(source, objects, &mut summary);
        info!(
            "exporting {} collections to {}",
            collections.len(),
            dir.display()
        );

        let ctx = ExportContext::new(&collections, source, &self.options);
        let mut entries = Vec::with_capacity(collections.len());
        for collection in &collections {
            let wrote = match collection.export(&ctx, dir) {
                Ok(true) => {
                    debug!("collection '{}' exported", collection.name());
                    summary.exported += 1;
                    true
                }
                Ok(false) => {
                    debug!("collection '{}' wrote no payload", collection.name());
                    summary.withheld += 1;
                    false
                }
                Err(err) => {
                    error!("collection '{}' failed: {err}", collection.name());
                    summary.failed += 1;
                    summary
                        .warnings
                        .push(format!("{}: {err}", collection.name()));
                    false
                }
            };
            entries.push(ManifestEntry {
                collection: collection.name().to_string(),
                assets: collection.assets().len(),
                wrote_payload: wrote,
            });
        }

        if self.options.write_manifest {
            self.write_manifest(dir, &summary, entries)?;
        }

        info!(
            "export finished: {} exported, {} withheld, {} skipped, {} failed",
            summary.exported, summary.withheld, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    fn build_collections(
        &self,
        source: &dyn AssetSource,
        objects: &[ObjectRef],
        summary: &mut ExportSummary,
    ) -> Vec<Box<dyn ExportCollection>> {
        let mut claimed: HashSet<ObjectRef> = HashSet::new();
        let mut collections: Vec<Box<dyn ExportCollection>> = Vec::new();

        for obj in objects {
            if claimed.contains(obj) {
                continue;
            }
            let Some(exporter) = self
                .exporters
                .iter()
                .find(|exporter| exporter.handles(source, obj))
            else {
                warn!("no exporter claims {obj}, skipping");
                summary.skipped += 1;
                continue;
            };
            let collection = exporter.create_collection(source, obj, &self.options);
            for asset in collection.assets() {
                claimed.insert(asset.clone());
            }
            collections.push(collection);
        }

        collections
    }

    fn write_manifest(
        &self,
        dir: &Path,
        summary: &ExportSummary,
        entries: Vec<ManifestEntry>,
    ) -> std::io::Result<()> {
        let manifest = Manifest {
            tool: "relic",
            version: crate::VERSION,
            generated_at: chrono::Utc::now(),
            summary,
            collections: entries,
        };
        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
        fs::write(dir.join("relic-export.json"), json)
    }
}

struct KindOverride {
    kind: ObjectKind,
    inner: Arc<dyn AssetExporter>,
}

impl AssetExporter for KindOverride {
    fn handles(&self, source: &dyn AssetSource, obj: &ObjectRef) -> bool {
        obj.kind == self.kind && self.inner.handles(source, obj)
    }

    fn create_collection(
        &self,
        source: &dyn AssetSource,
        obj: &ObjectRef,
        options: &ExportOptions,
    ) -> Box<dyn ExportCollection> {
        self.inner.create_collection(source, obj, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::collection::ExportError;
    use crate::export::pointer::{FileIdentity, PointerKind};
    use crate::source::MemoryAssetSource;

    /// Writes one file per asset; fails on demand.
    struct StubCollection {
        name: String,
        assets: Vec<ObjectRef>,
        identity: FileIdentity,
        fail: bool,
    }

    impl ExportCollection for StubCollection {
        fn name(&self) -> &str {
            &self.name
        }

        fn assets(&self) -> &[ObjectRef] {
            &self.assets
        }

        fn export_id(&self, obj: &ObjectRef) -> Result<u64, PointerError> {
            Ok(obj.kind.class_id() as u64 * 100_000)
        }

        fn create_pointer(
            &self,
            obj: &ObjectRef,
            is_local: bool,
        ) -> Result<ExportPointer, PointerError> {
            let file_id = self.export_id(obj)?;
            if is_local {
                Ok(ExportPointer::local(file_id))
            } else {
                Ok(ExportPointer::new(file_id, self.identity, PointerKind::Meta))
            }
        }

        fn export(&self, _ctx: &ExportContext<'_>, dir: &Path) -> Result<bool, ExportError> {
            if self.fail {
                return Err(ExportError::Other(anyhow::anyhow!("synthetic failure")));
            }
            for asset in &self.assets {
                fs::write(dir.join(format!("{}.bin", asset.name)), b"payload")?;
            }
            Ok(true)
        }
    }

    struct StubExporter {
        kind: ObjectKind,
        fail: bool,
    }

    impl AssetExporter for StubExporter {
        fn handles(&self, _source: &dyn AssetSource, obj: &ObjectRef) -> bool {
            obj.kind == self.kind
        }

        fn create_collection(
            &self,
            _source: &dyn AssetSource,
            obj: &ObjectRef,
            _options: &ExportOptions,
        ) -> Box<dyn ExportCollection> {
            Box::new(StubCollection {
                name: obj.name.clone(),
                assets: vec![obj.clone()],
                identity: FileIdentity::from_content(obj.name.as_bytes()),
                fail: self.fail,
            })
        }
    }

    fn mesh(name: &str, path_id: i64) -> ObjectRef {
        ObjectRef::new("level0", path_id, ObjectKind::Mesh, name)
    }

    #[test]
    fn unclaimed_objects_are_skipped_not_fatal() {
        let source = MemoryAssetSource::new();
        let mut exporter = ProjectExporter::new(ExportOptions::default());
        exporter.register(Arc::new(StubExporter {
            kind: ObjectKind::Mesh,
            fail: false,
        }));

        let dir = tempfile::tempdir().unwrap();
        let objects = vec![
            mesh("Rock", 1),
            ObjectRef::new("level0", 2, ObjectKind::Font, "Arial"),
        ];
        let summary = exporter.export(&source, &objects, dir.path()).unwrap();

        assert_eq!(summary.exported, 1);
        assert_eq!(summary.skipped, 1);
        assert!(dir.path().join("Rock.bin").exists());
    }

    #[test]
    fn failing_collection_does_not_abort_run() {
        let source = MemoryAssetSource::new();
        let mut exporter = ProjectExporter::new(ExportOptions::default());
        exporter.override_exporter(
            ObjectKind::Mesh,
            Arc::new(StubExporter {
                kind: ObjectKind::Mesh,
                fail: true,
            }),
        );
        exporter.register(Arc::new(StubExporter {
            kind: ObjectKind::Texture,
            fail: false,
        }));

        let dir = tempfile::tempdir().unwrap();
        let objects = vec![
            mesh("Rock", 1),
            ObjectRef::new("level0", 2, ObjectKind::Texture, "Grass"),
        ];
        let summary = exporter.export(&source, &objects, dir.path()).unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exported, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert!(dir.path().join("Grass.bin").exists());
    }

    #[test]
    fn registration_order_decides_claims() {
        let source = MemoryAssetSource::new();
        let mut exporter = ProjectExporter::new(ExportOptions::default());
        exporter.register(Arc::new(StubExporter {
            kind: ObjectKind::Mesh,
            fail: false,
        }));
        // Same kind registered later never sees the object.
        exporter.register(Arc::new(StubExporter {
            kind: ObjectKind::Mesh,
            fail: true,
        }));

        let dir = tempfile::tempdir().unwrap();
        let summary = exporter
            .export(&source, &[mesh("Rock", 1)], dir.path())
            .unwrap();
        assert_eq!(summary.exported, 1);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn pointer_for_distinguishes_local_and_external() {
        let rock = mesh("Rock", 1);
        let grass = ObjectRef::new("level0", 2, ObjectKind::Texture, "Grass");
        let identity = FileIdentity::from_content(b"stub");
        let collections: Vec<Box<dyn ExportCollection>> = vec![Box::new(StubCollection {
            name: "stub".into(),
            assets: vec![rock.clone(), grass.clone()],
            identity,
            fail: false,
        })];
        let source = MemoryAssetSource::new();
        let options = ExportOptions::default();
        let ctx = ExportContext::new(&collections, &source, &options);

        // Same collection: local reference without identity.
        let local = ctx.pointer_for(&rock, &grass).unwrap();
        assert!(local.identity.is_nil());

        // Referencing from outside the collection carries the identity.
        let outsider = ObjectRef::new("level1", 9, ObjectKind::Material, "Mat");
        let external = ctx.pointer_for(&outsider, &grass).unwrap();
        assert_eq!(external.identity, identity);
        assert_eq!(external.kind, PointerKind::Meta);

        // Unclaimed target degrades to the null reference.
        let missing = ObjectRef::new("level1", 10, ObjectKind::Mesh, "Gone");
        assert_eq!(
            ctx.pointer_for(&rock, &missing).unwrap(),
            ExportPointer::null()
        );
    }

    #[test]
    fn manifest_written_when_enabled() {
        let source = MemoryAssetSource::new();
        let mut exporter = ProjectExporter::new(ExportOptions::default());
        exporter.register(Arc::new(StubExporter {
            kind: ObjectKind::Mesh,
            fail: false,
        }));

        let dir = tempfile::tempdir().unwrap();
        exporter
            .export(&source, &[mesh("Rock", 1)], dir.path())
            .unwrap();

        let manifest = fs::read_to_string(dir.path().join("relic-export.json")).unwrap();
        assert!(manifest.contains("\"tool\": \"relic\""));
        assert!(manifest.contains("Rock"));
    }
}
