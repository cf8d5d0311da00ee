use std::fmt;

/// 128-bit identity of an exported or synthetic container file.
///
/// The persisted text form is 32 lowercase hex characters, as written into
/// meta sidecars and serialized references. Identities are either generated
/// for exported files (random, or hashed from content so repeated runs agree)
/// or fixed constants for the engine's own resource containers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileIdentity([u8; 16]);

impl FileIdentity {
    /// All-zero identity used by local references and missing targets.
    pub const NIL: FileIdentity = FileIdentity([0; 16]);

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Derive an identity from file content, so unrelated export runs assign
    /// the same identity to identical payload.
    pub fn from_content(content: &[u8]) -> Self {
        let hash = blake3::hash(content);
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash.as_bytes()[..16]);
        Self(bytes)
    }

    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().into_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0 == [0; 16]
    }
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileIdentity({})", self)
    }
}

/// Flavor of a serialized reference, with the numeric tag the engine
/// persists alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Reference into the engine's built-in resource set.
    Internal,
    Cached,
    Serialized,
    /// Reference to an exported file that carries a meta sidecar.
    Meta,
}

impl PointerKind {
    pub fn persisted_tag(self) -> u8 {
        match self {
            PointerKind::Internal => 0,
            PointerKind::Cached => 1,
            PointerKind::Serialized => 2,
            PointerKind::Meta => 3,
        }
    }
}

/// Serialized reference unit embedded in exported files.
///
/// Constructed on demand, written out immediately by the caller, and never
/// retained. Identical inputs always produce bit-identical pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportPointer {
    pub file_id: u64,
    pub identity: FileIdentity,
    pub kind: PointerKind,
}

impl ExportPointer {
    pub fn new(file_id: u64, identity: FileIdentity, kind: PointerKind) -> Self {
        Self {
            file_id,
            identity,
            kind,
        }
    }

    /// Reference within the same exported file: no container identity.
    pub fn local(file_id: u64) -> Self {
        Self {
            file_id,
            identity: FileIdentity::NIL,
            kind: PointerKind::Serialized,
        }
    }

    /// The null reference written when a target cannot be located.
    pub fn null() -> Self {
        Self {
            file_id: 0,
            identity: FileIdentity::NIL,
            kind: PointerKind::Serialized,
        }
    }

    /// Persisted text form of the reference.
    pub fn to_reference_string(&self) -> String {
        if self.file_id == 0 || self.identity.is_nil() {
            format!("{{fileID: {}}}", self.file_id)
        } else {
            format!(
                "{{fileID: {}, guid: {}, type: {}}}",
                self.file_id,
                self.identity,
                self.kind.persisted_tag()
            )
        }
    }
}
