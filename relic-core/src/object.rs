use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind of object extracted from a serialized archive.
///
/// The set is closed on purpose: every dispatch over kinds is an exhaustive
/// match, so adding a variant forces every lookup table and classifier to
/// take a position on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Material,
    Shader,
    Texture,
    Mesh,
    Font,
    Sprite,
    LightmapParams,
    AudioClip,
    Other,
}

impl ObjectKind {
    /// Numeric class id the engine assigns to this kind in serialized data.
    pub fn class_id(self) -> u32 {
        match self {
            ObjectKind::Material => 21,
            ObjectKind::Texture => 28,
            ObjectKind::Mesh => 43,
            ObjectKind::Shader => 48,
            ObjectKind::AudioClip => 83,
            ObjectKind::Font => 128,
            ObjectKind::LightmapParams => 151,
            ObjectKind::Sprite => 213,
            ObjectKind::Other => 0,
        }
    }

    /// Stable name used for output subfolders and diagnostics.
    pub fn type_name(self) -> &'static str {
        match self {
            ObjectKind::Material => "Material",
            ObjectKind::Shader => "Shader",
            ObjectKind::Texture => "Texture2D",
            ObjectKind::Mesh => "Mesh",
            ObjectKind::Font => "Font",
            ObjectKind::Sprite => "Sprite",
            ObjectKind::LightmapParams => "LightmapParameters",
            ObjectKind::AudioClip => "AudioClip",
            ObjectKind::Other => "Object",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Handle to one object inside a loaded archive set.
///
/// Produced by the archive parser layer; the export side only ever reads it.
/// Two handles refer to the same object when they agree on archive name and
/// path id, regardless of the display name they carry.
#[derive(Debug, Clone)]
pub struct ObjectRef {
    /// Logical name of the archive the object came from.
    pub archive: String,
    /// Object path id within its archive.
    pub path_id: i64,
    pub kind: ObjectKind,
    /// Display name. Not unique across kinds, and may be empty.
    pub name: String,
}

impl ObjectRef {
    pub fn new(
        archive: impl Into<String>,
        path_id: i64,
        kind: ObjectKind,
        name: impl Into<String>,
    ) -> Self {
        Self {
            archive: archive.into(),
            path_id,
            kind,
            name: name.into(),
        }
    }
}

// Identity is (archive, path_id); name and kind are payload.
impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.path_id == other.path_id && self.archive == other.archive
    }
}

impl Eq for ObjectRef {}

impl Hash for ObjectRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.archive.hash(state);
        self.path_id.hash(state);
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{} #{} ({})", self.kind, self.path_id, self.archive)
        } else {
            write!(f, "{} '{}' ({})", self.kind, self.name, self.archive)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn class_ids_match_engine_numbering() {
        assert_eq!(ObjectKind::Material.class_id(), 21);
        assert_eq!(ObjectKind::Texture.class_id(), 28);
        assert_eq!(ObjectKind::Mesh.class_id(), 43);
        assert_eq!(ObjectKind::Shader.class_id(), 48);
        assert_eq!(ObjectKind::AudioClip.class_id(), 83);
        assert_eq!(ObjectKind::Font.class_id(), 128);
        assert_eq!(ObjectKind::LightmapParams.class_id(), 151);
        assert_eq!(ObjectKind::Sprite.class_id(), 213);
    }

    #[test]
    fn identity_ignores_display_name() {
        let a = ObjectRef::new("level0", 42, ObjectKind::Material, "Grass");
        let b = ObjectRef::new("level0", 42, ObjectKind::Material, "Renamed");
        let c = ObjectRef::new("level1", 42, ObjectKind::Material, "Grass");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }
}
