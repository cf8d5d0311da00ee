use relic_core::{AssetSource, ObjectKind, ObjectRef};
use tracing::{debug, warn};

use crate::builtin::catalog::BuiltinCatalog;
use crate::builtin::identity::ContainerIdentities;

/// Decides whether an object belongs to the engine's built-in resource set.
///
/// Everything the classifier consults is injected, so instances are cheap,
/// deterministic and safe to use from any thread the archive set is shared
/// with.
pub struct EngineAssetClassifier<'a> {
    catalog: &'a BuiltinCatalog,
    identities: &'a ContainerIdentities,
    source: &'a dyn AssetSource,
}

impl<'a> EngineAssetClassifier<'a> {
    pub fn new(
        catalog: &'a BuiltinCatalog,
        identities: &'a ContainerIdentities,
        source: &'a dyn AssetSource,
    ) -> Self {
        Self {
            catalog,
            identities,
            source,
        }
    }

    /// Membership test for the built-in set.
    ///
    /// Objects read out of one of the engine's own resource archives are
    /// built-in unconditionally. Outside those archives only materials and
    /// shaders can be recognized: a shader by catalog name, a material
    /// through the shader it references. A material whose shader cannot be
    /// located in the loaded set is treated as built-in, because built-in
    /// materials routinely reference shaders from the sibling engine
    /// archive that was never loaded. That rule can misclassify a user
    /// material whose shader simply failed to load, so the outcome is
    /// logged for traceability.
    pub fn is_builtin(&self, obj: &ObjectRef) -> bool {
        if self.identities.is_builtin_archive(&obj.archive) {
            return true;
        }

        match obj.kind {
            ObjectKind::Shader => self.catalog.id_for(ObjectKind::Shader, &obj.name).is_some(),
            ObjectKind::Material => match self.source.resolve_shader(obj) {
                None => {
                    debug!("{obj} has no resolvable shader, treating as engine-supplied");
                    true
                }
                Some(shader) if shader.kind == ObjectKind::Shader && shader != *obj => {
                    if self.identities.is_builtin_archive(&shader.archive) {
                        true
                    } else {
                        self.catalog
                            .id_for(ObjectKind::Shader, &shader.name)
                            .is_some()
                    }
                }
                Some(other) => {
                    warn!("{obj} shader field resolves to {other}, refusing to classify");
                    false
                }
            },
            ObjectKind::Texture
            | ObjectKind::Mesh
            | ObjectKind::Font
            | ObjectKind::Sprite
            | ObjectKind::LightmapParams
            | ObjectKind::AudioClip
            | ObjectKind::Other => false,
        }
    }
}
