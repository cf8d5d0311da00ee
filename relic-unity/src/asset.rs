use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use relic_core::{
    AssetExporter, AssetSource, ExportCollection, ExportContext, ExportError, ExportOptions,
    ExportPointer, FileIdentity, ObjectRef, PointerError, PointerKind,
};

/// Writes one asset's content under the export directory and reports the
/// path it chose. Implemented per asset class; the surrounding collection
/// handles identity and the meta sidecar.
pub trait AssetContentWriter: Send + Sync {
    fn write(
        &self,
        ctx: &ExportContext<'_>,
        obj: &ObjectRef,
        dir: &Path,
    ) -> Result<PathBuf, ExportError>;
}

/// Export collection holding exactly one ordinary asset.
///
/// The asset gets its own container identity, generated at construction:
/// hashed from payload when the run asks for reproducible identities,
/// random otherwise.
pub struct AssetExportCollection {
    name: String,
    assets: Vec<ObjectRef>,
    identity: FileIdentity,
    writer: Arc<dyn AssetContentWriter>,
}

impl AssetExportCollection {
    pub fn new(
        source: &dyn AssetSource,
        obj: &ObjectRef,
        options: &ExportOptions,
        writer: Arc<dyn AssetContentWriter>,
    ) -> Self {
        let identity = if options.guid_by_content {
            match source.payload(obj) {
                Ok(bytes) => FileIdentity::from_content(&bytes),
                Err(_) => FileIdentity::random(),
            }
        } else {
            FileIdentity::random()
        };
        Self {
            name: if obj.name.is_empty() {
                obj.to_string()
            } else {
                obj.name.clone()
            },
            assets: vec![obj.clone()],
            identity,
            writer,
        }
    }

    pub fn identity(&self) -> FileIdentity {
        self.identity
    }
}

impl ExportCollection for AssetExportCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn assets(&self) -> &[ObjectRef] {
        &self.assets
    }

    fn export_id(&self, obj: &ObjectRef) -> Result<u64, PointerError> {
        if !self.contains(obj) {
            return Err(PointerError::NotInCollection {
                collection: self.name.clone(),
                name: obj.name.clone(),
            });
        }
        // Main asset numbering: class id shifted into the per-file id space.
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

    fn export(&self, ctx: &ExportContext<'_>, dir: &Path) -> Result<bool, ExportError> {
        let obj = &self.assets[0];
        let path = self.writer.write(ctx, obj, dir)?;
        write_meta(&path, self.identity)?;
        Ok(true)
    }
}

/// Sidecar that ties the exported file to its container identity, so
/// references serialized elsewhere resolve when the project is reopened.
fn write_meta(asset_path: &Path, identity: FileIdentity) -> std::io::Result<()> {
    let meta = format!("fileFormatVersion: 2\nguid: {identity}\n");
    let meta_path = PathBuf::from(format!("{}.meta", asset_path.display()));
    fs::write(meta_path, meta)
}

/// File stem for an exported asset, safe for the local filesystem.
pub(crate) fn file_stem(obj: &ObjectRef) -> String {
    if obj.name.is_empty() {
        return format!("{}_{}", obj.kind.type_name(), obj.path_id);
    }
    obj.name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            other => other,
        })
        .collect()
}

/// First free path for `stem.extension` under `dir`; display names are not
/// unique, files must be.
pub(crate) fn unique_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut path = dir.join(format!("{stem}.{extension}"));
    let mut counter = 1;
    while path.exists() {
        path = dir.join(format!("{stem}_{counter}.{extension}"));
        counter += 1;
    }
    path
}

/// Fallback exporter: passes serialized payload through unchanged.
pub struct BinaryAssetExporter;

impl AssetExporter for BinaryAssetExporter {
    fn handles(&self, _source: &dyn AssetSource, _obj: &ObjectRef) -> bool {
        true
    }

    fn create_collection(
        &self,
        source: &dyn AssetSource,
        obj: &ObjectRef,
        options: &ExportOptions,
    ) -> Box<dyn ExportCollection> {
        Box::new(AssetExportCollection::new(
            source,
            obj,
            options,
            Arc::new(BinaryContentWriter),
        ))
    }
}

struct BinaryContentWriter;

impl AssetContentWriter for BinaryContentWriter {
    fn write(
        &self,
        ctx: &ExportContext<'_>,
        obj: &ObjectRef,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let data = ctx.source().payload(obj)?;
        let subdir = dir.join(obj.kind.type_name());
        fs::create_dir_all(&subdir)?;
        let path = unique_path(&subdir, &file_stem(obj), "bin");
        fs::write(&path, data)?;
        Ok(path)
    }
}
