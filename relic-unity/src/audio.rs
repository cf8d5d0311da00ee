use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use fsbex::AudioFormat as FsbAudioFormat;
use fsbex::Bank as FsbBank;
use hound::{SampleFormat, WavSpec, WavWriter};
use relic_core::{
    AssetExporter, AssetSource, AudioClipInfo, AudioEncoding, ExportCollection, ExportContext,
    ExportError, ExportOptions, ObjectKind, ObjectRef,
};
use tracing::warn;

use crate::asset::{file_stem, unique_path, AssetContentWriter, AssetExportCollection};

const FSB5_MAGIC: &[u8] = b"FSB5";

/// Exporter for audio clips: decodes sample banks into playable containers
/// where possible and passes everything else through unchanged.
pub struct AudioAssetExporter;

impl AssetExporter for AudioAssetExporter {
    fn handles(&self, _source: &dyn AssetSource, obj: &ObjectRef) -> bool {
        obj.kind == ObjectKind::AudioClip
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
            Arc::new(AudioContentWriter),
        ))
    }
}

struct AudioContentWriter;

impl AssetContentWriter for AudioContentWriter {
    fn write(
        &self,
        ctx: &ExportContext<'_>,
        obj: &ObjectRef,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let data = ctx.source().payload(obj)?;
        let subdir = dir.join(obj.kind.type_name());
        fs::create_dir_all(&subdir)?;
        let stem = file_stem(obj);

        if ctx.options().convert_audio {
            if let Some(info) = ctx.source().audio_clip(obj) {
                if info.encoding == AudioEncoding::Pcm {
                    match encode_pcm_wav(&data, &info) {
                        Ok(bytes) => {
                            let path = unique_path(&subdir, &stem, "wav");
                            fs::write(&path, bytes)?;
                            return Ok(path);
                        }
                        Err(err) => {
                            warn!("could not encode PCM samples of {obj}: {err:#}");
                        }
                    }
                }
            }
            if data.starts_with(FSB5_MAGIC) {
                match decode_fsb_clip(&data) {
                    Ok(decoded) => {
                        let path = unique_path(&subdir, &stem, decoded.extension);
                        fs::write(&path, decoded.bytes)?;
                        return Ok(path);
                    }
                    Err(err) => {
                        warn!("could not decode FSB bank of {obj}: {err:#}");
                    }
                }
            }
        }

        // Raw passthrough keeps whatever container the archive held.
        let extension = if data.starts_with(b"FSB") { "fsb" } else { "bin" };
        let path = unique_path(&subdir, &stem, extension);
        fs::write(&path, data)?;
        Ok(path)
    }
}

struct DecodedClip {
    extension: &'static str,
    bytes: Vec<u8>,
}

/// Re-emit the first stream of an FSB5 bank in a standalone container.
fn decode_fsb_clip(data: &[u8]) -> Result<DecodedClip> {
    use fsbex::encode::EncodeError;

    let bank = FsbBank::new(data).context("failed to parse FSB bank")?;
    let extension = match bank.format() {
        FsbAudioFormat::Vorbis => "ogg",
        FsbAudioFormat::Mpeg => "mp3",
        _ => "wav",
    };
    let stream = bank
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("FSB bank contains no streams"))?;

    let mut bytes = Vec::new();
    stream.write(&mut bytes).map_err(|err| match err {
        EncodeError::UnsupportedFormat { format } => {
            anyhow!("unsupported FSB stream format: {format}")
        }
        other => anyhow!(other.to_string()),
    })?;

    Ok(DecodedClip { extension, bytes })
}

/// Wrap raw little-endian PCM samples in a WAV container.
fn encode_pcm_wav(data: &[u8], info: &AudioClipInfo) -> Result<Vec<u8>> {
    use std::io::Cursor;

    let spec = WavSpec {
        channels: info.channels,
        sample_rate: info.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec)?;
    match info.bits_per_sample {
        16 => {
            if data.len() % 2 != 0 {
                return Err(anyhow!(
                    "PCM payload length {} is not a whole number of 16-bit samples",
                    data.len()
                ));
            }
            for chunk in data.chunks_exact(2) {
                writer.write_sample(i16::from_le_bytes([chunk[0], chunk[1]]))?;
            }
        }
        8 => {
            for &sample in data {
                writer.write_sample(((sample as i16) - 128) << 8)?;
            }
        }
        other => return Err(anyhow!("unsupported PCM sample width: {other} bits")),
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relic_core::MemoryAssetSource;

    fn export_clip(source: &MemoryAssetSource, clip: &ObjectRef, dir: &Path) {
        let options = ExportOptions::default();
        let collection = AudioAssetExporter.create_collection(source, clip, &options);
        let collections: Vec<Box<dyn ExportCollection>> = Vec::new();
        let ctx = ExportContext::new(&collections, source, &options);
        assert!(collection.export(&ctx, dir).unwrap());
    }

    #[test]
    fn claims_only_audio_clips() {
        let source = MemoryAssetSource::new();
        let clip = ObjectRef::new("level0", 1, ObjectKind::AudioClip, "Step");
        let mesh = ObjectRef::new("level0", 2, ObjectKind::Mesh, "Rock");
        assert!(AudioAssetExporter.handles(&source, &clip));
        assert!(!AudioAssetExporter.handles(&source, &mesh));
    }

    #[test]
    fn pcm_clips_become_wav() {
        let mut source = MemoryAssetSource::new();
        let clip = source.add_object(ObjectRef::new("level0", 1, ObjectKind::AudioClip, "Tone"));
        let samples: Vec<u8> = (0i16..64)
            .flat_map(|s| (s * 256).to_le_bytes())
            .collect();
        source.set_payload(&clip, samples);
        source.set_audio_clip(
            &clip,
            AudioClipInfo {
                channels: 1,
                sample_rate: 22050,
                bits_per_sample: 16,
                encoding: AudioEncoding::Pcm,
            },
        );

        let dir = tempfile::tempdir().unwrap();
        export_clip(&source, &clip, dir.path());

        let wav = fs::read(dir.path().join("AudioClip/Tone.wav")).unwrap();
        assert_eq!(&wav[..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
    }

    #[test]
    fn undecodable_banks_fall_back_to_raw_passthrough() {
        let mut source = MemoryAssetSource::new();
        let clip = source.add_object(ObjectRef::new("level0", 1, ObjectKind::AudioClip, "Music"));
        // FSB5 magic followed by garbage cannot be decoded.
        let mut payload = FSB5_MAGIC.to_vec();
        payload.extend_from_slice(&[0u8; 32]);
        source.set_payload(&clip, payload.clone());

        let dir = tempfile::tempdir().unwrap();
        export_clip(&source, &clip, dir.path());

        let written = fs::read(dir.path().join("AudioClip/Music.fsb")).unwrap();
        assert_eq!(written, payload);
    }

    #[test]
    fn unknown_payload_is_written_verbatim() {
        let mut source = MemoryAssetSource::new();
        let clip = source.add_object(ObjectRef::new("level0", 1, ObjectKind::AudioClip, "Blob"));
        source.set_payload(&clip, vec![9, 9, 9]);

        let dir = tempfile::tempdir().unwrap();
        export_clip(&source, &clip, dir.path());

        assert_eq!(
            fs::read(dir.path().join("AudioClip/Blob.bin")).unwrap(),
            vec![9, 9, 9]
        );
        assert!(dir.path().join("AudioClip/Blob.bin.meta").exists());
    }
}
