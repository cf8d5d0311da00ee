use relic_core::FileIdentity;

/// Identity of the "unity default resources" container.
pub const DEFAULT_RESOURCES_IDENTITY: FileIdentity = FileIdentity::from_bytes([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xe0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
]);

/// Identity of the "unity_builtin_extra" container.
pub const BUILTIN_EXTRA_IDENTITY: FileIdentity = FileIdentity::from_bytes([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
]);

/// The two synthetic container identities the engine reserves for its own
/// resource archives. Exactly these two values exist; they are fixed
/// constants the reopening engine validates against, never derived at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerIdentities {
    default_resources: FileIdentity,
    builtin_extra: FileIdentity,
}

impl ContainerIdentities {
    pub const fn unity() -> Self {
        Self {
            default_resources: DEFAULT_RESOURCES_IDENTITY,
            builtin_extra: BUILTIN_EXTRA_IDENTITY,
        }
    }

    pub fn default_resources(&self) -> FileIdentity {
        self.default_resources
    }

    pub fn builtin_extra(&self) -> FileIdentity {
        self.builtin_extra
    }

    /// Container identity for an engine resource archive.
    ///
    /// Matches exactly the archive names the engine itself uses, with and
    /// without the library path prefix, case sensitively. Every other name,
    /// however similar, is not an engine container.
    pub fn identity_for(&self, archive_name: &str) -> Option<FileIdentity> {
        match archive_name {
            "unity default resources" | "library/unity default resources" => {
                Some(self.default_resources)
            }
            "unity_builtin_extra" | "resources/unity_builtin_extra" => Some(self.builtin_extra),
            _ => None,
        }
    }

    pub fn is_builtin_archive(&self, archive_name: &str) -> bool {
        self.identity_for(archive_name).is_some()
    }
}

impl Default for ContainerIdentities {
    fn default() -> Self {
        Self::unity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_exactly_four_archive_names() {
        let identities = ContainerIdentities::unity();

        assert_eq!(
            identities.identity_for("unity default resources"),
            Some(DEFAULT_RESOURCES_IDENTITY)
        );
        assert_eq!(
            identities.identity_for("library/unity default resources"),
            Some(DEFAULT_RESOURCES_IDENTITY)
        );
        assert_eq!(
            identities.identity_for("unity_builtin_extra"),
            Some(BUILTIN_EXTRA_IDENTITY)
        );
        assert_eq!(
            identities.identity_for("resources/unity_builtin_extra"),
            Some(BUILTIN_EXTRA_IDENTITY)
        );
    }

    #[test]
    fn similar_names_are_not_recognized() {
        let identities = ContainerIdentities::unity();

        for name in [
            "",
            "level0",
            "Unity default resources",
            "unity default resources ",
            "UNITY_BUILTIN_EXTRA",
            "Library/unity default resources",
            "resources/unity default resources",
            "library/unity_builtin_extra",
            "unity_builtin_extra2",
        ] {
            assert_eq!(identities.identity_for(name), None, "name: {name:?}");
        }
    }

    #[test]
    fn identities_render_the_engine_guids() {
        assert_eq!(
            DEFAULT_RESOURCES_IDENTITY.to_string(),
            "0000000000000000e000000000000000"
        );
        assert_eq!(
            BUILTIN_EXTRA_IDENTITY.to_string(),
            "0000000000000000f000000000000000"
        );
    }
}
