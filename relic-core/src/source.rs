use std::collections::HashMap;

use thiserror::Error;

use crate::object::{ObjectKind, ObjectRef};

/// Errors produced by an [`AssetSource`] when asked for object data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no payload available for {kind} '{name}' in archive '{archive}'")]
    MissingPayload {
        archive: String,
        name: String,
        kind: ObjectKind,
    },
}

/// Sample layout of an audio clip as recorded in its serialized object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    /// Uncompressed little-endian PCM samples.
    Pcm,
    Vorbis,
    Adpcm,
    Unknown,
}

/// Playback parameters the parser layer read off an audio clip object.
#[derive(Debug, Clone, Copy)]
pub struct AudioClipInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub encoding: AudioEncoding,
}

/// Read-only view over the archive set loaded by the parser layer.
///
/// The export side never owns or mutates archive contents; everything it
/// needs is answered through this interface. Implementations must be safe
/// for concurrent reads, since collections are classified and exported from
/// multiple worker threads over an archive set that is frozen after load.
pub trait AssetSource: Send + Sync {
    /// Every object held by the named archive, in archive order.
    fn objects_in(&self, archive: &str) -> Vec<ObjectRef>;

    /// Follow a material's shader field within the loaded archive set.
    ///
    /// Returns `None` when the referenced archive is not part of the set,
    /// which is an expected condition for partially loaded games.
    fn resolve_shader(&self, material: &ObjectRef) -> Option<ObjectRef>;

    /// Raw serialized payload for an object, decoded as far as the parser
    /// layer goes (sample data for clips, bytecode blobs for shaders).
    fn payload(&self, obj: &ObjectRef) -> Result<Vec<u8>, SourceError>;

    /// Playback parameters for an audio clip object, when the parser layer
    /// was able to read them.
    fn audio_clip(&self, _obj: &ObjectRef) -> Option<AudioClipInfo> {
        None
    }
}

/// In-memory [`AssetSource`] for tests and embedders that already hold
/// parsed objects.
#[derive(Default)]
pub struct MemoryAssetSource {
    objects: HashMap<String, Vec<ObjectRef>>,
    shader_links: HashMap<(String, i64), ObjectRef>,
    payloads: HashMap<(String, i64), Vec<u8>>,
    audio_clips: HashMap<(String, i64), AudioClipInfo>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object under its archive and hand the handle back.
    pub fn add_object(&mut self, obj: ObjectRef) -> ObjectRef {
        self.objects
            .entry(obj.archive.clone())
            .or_default()
            .push(obj.clone());
        obj
    }

    /// Record that `material`'s shader field points at `shader`.
    pub fn link_shader(&mut self, material: &ObjectRef, shader: &ObjectRef) {
        self.shader_links.insert(
            (material.archive.clone(), material.path_id),
            shader.clone(),
        );
    }

    pub fn set_payload(&mut self, obj: &ObjectRef, bytes: Vec<u8>) {
        self.payloads
            .insert((obj.archive.clone(), obj.path_id), bytes);
    }

    pub fn set_audio_clip(&mut self, obj: &ObjectRef, info: AudioClipInfo) {
        self.audio_clips
            .insert((obj.archive.clone(), obj.path_id), info);
    }
}

impl AssetSource for MemoryAssetSource {
    fn objects_in(&self, archive: &str) -> Vec<ObjectRef> {
        self.objects.get(archive).cloned().unwrap_or_default()
    }

    fn resolve_shader(&self, material: &ObjectRef) -> Option<ObjectRef> {
        self.shader_links
            .get(&(material.archive.clone(), material.path_id))
            .cloned()
    }

    fn payload(&self, obj: &ObjectRef) -> Result<Vec<u8>, SourceError> {
        self.payloads
            .get(&(obj.archive.clone(), obj.path_id))
            .cloned()
            .ok_or_else(|| SourceError::MissingPayload {
                archive: obj.archive.clone(),
                name: obj.name.clone(),
                kind: obj.kind,
            })
    }

    fn audio_clip(&self, obj: &ObjectRef) -> Option<AudioClipInfo> {
        self.audio_clips
            .get(&(obj.archive.clone(), obj.path_id))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_round_trip() {
        let mut source = MemoryAssetSource::new();
        let material =
            source.add_object(ObjectRef::new("level0", 1, ObjectKind::Material, "Grass"));
        let shader =
            source.add_object(ObjectRef::new("shared0", 2, ObjectKind::Shader, "Standard"));
        source.link_shader(&material, &shader);
        source.set_payload(&shader, b"Shader \"Standard\" {}".to_vec());

        assert_eq!(source.objects_in("level0"), vec![material.clone()]);
        assert_eq!(source.objects_in("missing"), vec![]);
        assert_eq!(source.resolve_shader(&material), Some(shader.clone()));
        assert_eq!(
            source.payload(&shader).unwrap(),
            b"Shader \"Standard\" {}".to_vec()
        );
    }

    #[test]
    fn missing_payload_reports_origin() {
        let source = MemoryAssetSource::new();
        let obj = ObjectRef::new("level0", 9, ObjectKind::Mesh, "Rock");
        let err = source.payload(&obj).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Rock"));
        assert!(message.contains("level0"));
    }
}
