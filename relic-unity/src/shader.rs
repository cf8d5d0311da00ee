use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use relic_core::{
    AssetExporter, AssetSource, ExportCollection, ExportContext, ExportError, ExportOptions,
    ObjectKind, ObjectRef,
};
use tracing::warn;

use crate::asset::{file_stem, unique_path, AssetContentWriter, AssetExportCollection};

/// 'DXBC' ascii.
const DXBC_FOURCC: u32 = 0x43425844;

/// Exporter for shader objects: source text goes out as-is, compiled
/// bytecode containers are re-emitted as a readable listing.
pub struct ShaderAssetExporter;

impl AssetExporter for ShaderAssetExporter {
    fn handles(&self, _source: &dyn AssetSource, obj: &ObjectRef) -> bool {
        obj.kind == ObjectKind::Shader
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
            Arc::new(ShaderContentWriter),
        ))
    }
}

struct ShaderContentWriter;

impl AssetContentWriter for ShaderContentWriter {
    fn write(
        &self,
        ctx: &ExportContext<'_>,
        obj: &ObjectRef,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let data = ctx.source().payload(obj)?;
        let subdir = dir.join(obj.kind.type_name());
        fs::create_dir_all(&subdir)?;
        let path = unique_path(&subdir, &file_stem(obj), "shader");

        let text = match dxbc_offset(&data) {
            Some(offset) => match render_dxbc_listing(&data[offset..]) {
                Ok(listing) => listing,
                Err(err) => {
                    warn!("malformed bytecode container in {obj}: {err:#}");
                    String::from_utf8_lossy(&data).into_owned()
                }
            },
            None => String::from_utf8_lossy(&data).into_owned(),
        };

        fs::write(&path, text)?;
        Ok(path)
    }
}

/// Locate a DXBC container in the payload.
///
/// The archive stores compiled programs with a 6-byte header in front of
/// the container, so the magic is probed at the start and at offset 6.
fn dxbc_offset(data: &[u8]) -> Option<usize> {
    for offset in [0usize, 6] {
        if data.len() < offset + 4 {
            continue;
        }
        let fourcc = u32::from_le_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        if fourcc == DXBC_FOURCC {
            return Some(offset);
        }
    }
    None
}

/// Readable chunk listing for a DXBC container. No disassembler is linked,
/// so the listing records the container layout instead of instruction text.
fn render_dxbc_listing(data: &[u8]) -> Result<String> {
    let mut cursor = Cursor::new(data);
    let magic = cursor.read_u32::<LittleEndian>()?;
    if magic != DXBC_FOURCC {
        bail!("not a DXBC container");
    }

    // Checksum and the fixed one-word field before the sizes.
    let mut checksum = [0u8; 16];
    std::io::Read::read_exact(&mut cursor, &mut checksum)?;
    let _one = cursor.read_u32::<LittleEndian>()?;
    let total_size = cursor.read_u32::<LittleEndian>()?;
    let chunk_count = cursor.read_u32::<LittleEndian>()?;
    if chunk_count > 64 {
        bail!("implausible chunk count {chunk_count}");
    }

    let mut offsets = Vec::with_capacity(chunk_count as usize);
    for _ in 0..chunk_count {
        offsets.push(cursor.read_u32::<LittleEndian>()?);
    }

    let mut listing = format!(
        "// Compiled shader program, {} bytes, {} chunks\n",
        total_size, chunk_count
    );
    for offset in offsets {
        let offset = offset as usize;
        if offset + 8 > data.len() {
            bail!("chunk offset {offset:#x} is outside the container");
        }
        let fourcc: String = data[offset..offset + 4]
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() {
                    b as char
                } else {
                    '?'
                }
            })
            .collect();
        let size = u32::from_le_bytes([
            data[offset + 4],
            data[offset + 5],
            data[offset + 6],
            data[offset + 7],
        ]);
        listing.push_str(&format!("// chunk {fourcc} at {offset:#x}, {size} bytes\n"));
    }
    Ok(listing)
}
