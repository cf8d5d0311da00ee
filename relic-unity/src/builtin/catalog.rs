use std::collections::HashMap;

use relic_core::ObjectKind;

/// Fixed mapping from (kind, name) to the numeric identifier the engine
/// assigns its bundled resources internally.
///
/// The table is partitioned by kind because display names are only unique
/// within a kind. It is a checked-in data set for one engine build: nothing
/// is ever added at runtime, and a miss is a defined answer, not a gap to
/// fill. The shader partition is many-to-one, since the engine kept the
/// historical short names alive next to the newer slash-delimited paths.
pub struct BuiltinCatalog {
    engine_version: &'static str,
    materials: HashMap<&'static str, u64>,
    textures: HashMap<&'static str, u64>,
    meshes: HashMap<&'static str, u64>,
    shaders: HashMap<&'static str, u64>,
    fonts: HashMap<&'static str, u64>,
    sprites: HashMap<&'static str, u64>,
    lightmap_params: HashMap<&'static str, u64>,
}

impl BuiltinCatalog {
    /// The resource identifiers of engine build 2017.3.0f3.
    pub fn unity_2017_3() -> Self {
        let mut catalog = Self {
            engine_version: "2017.3.0f3",
            materials: HashMap::new(),
            textures: HashMap::new(),
            meshes: HashMap::new(),
            shaders: HashMap::new(),
            fonts: HashMap::new(),
            sprites: HashMap::new(),
            lightmap_params: HashMap::new(),
        };

        ///////////////////////////////////////////////////////
        // Materials
        ///////////////////////////////////////////////////////
        catalog.add_material("Font Material", 10100);
        catalog.add_material("Default-Particle", 10301);
        catalog.add_material("Default-Diffuse", 10302);
        catalog.add_material("Default-Material", 10303);
        catalog.add_material("Default-Skybox", 10304);
        catalog.add_material("Default-Line", 10306);
        catalog.add_material("Default-Terrain-Diffuse", 10650);
        catalog.add_material("Default-Terrain-Specular", 10651);
        catalog.add_material("Default-Terrain-Standard", 10652);
        catalog.add_material("Default UI Material", 10750);
        catalog.add_material("Sprites-Default", 10754);
        catalog.add_material("Sprites-Mask", 10758);
        catalog.add_material("SpatialMappingOcclusion", 15302);
        catalog.add_material("SpatialMappingWireframe", 15303);

        ///////////////////////////////////////////////////////
        // Textures
        ///////////////////////////////////////////////////////
        catalog.add_texture("Font Texture", 10103);
        catalog.add_texture("Default-Particle", 10300);
        catalog.add_texture("Checkmark", 10900);
        catalog.add_texture("DropdownArrow", 10902);
        catalog.add_texture("UISprite", 10904);
        catalog.add_texture("Background", 10906);
        catalog.add_texture("InputFieldBackground", 10910);
        catalog.add_texture("Knob", 10912);
        catalog.add_texture("UIMask", 10914);

        ///////////////////////////////////////////////////////
        // Meshes
        ///////////////////////////////////////////////////////
        catalog.add_mesh("Cube", 10202);
        catalog.add_mesh("Cylinder", 10206);
        catalog.add_mesh("Sphere", 10207);
        catalog.add_mesh("Capsule", 10208);
        catalog.add_mesh("Plane", 10209);
        catalog.add_mesh("Quad", 10210);

        ///////////////////////////////////////////////////////
        // Shaders
        //
        // Each legacy surface shader answers to its pre-5.0 short name as
        // well as the current path name.
        ///////////////////////////////////////////////////////
        catalog.add_shader(1, &["Legacy Shaders/Diffuse Fast", "Diffuse Fast"]);
        catalog.add_shader(2, &["Legacy Shaders/Bumped Diffuse", "Bumped Diffuse"]);
        catalog.add_shader(3, &["Legacy Shaders/Specular", "Specular"]);
        catalog.add_shader(4, &["Legacy Shaders/Bumped Specular", "Bumped Specular"]);
        catalog.add_shader(5, &["Legacy Shaders/Diffuse Detail", "Diffuse Detail"]);
        catalog.add_shader(6, &["Legacy Shaders/VertexLit", "VertexLit"]);
        catalog.add_shader(7, &["Legacy Shaders/Diffuse", "Diffuse"]);
        catalog.add_shader(8, &["Legacy Shaders/Parallax Diffuse", "Parallax Diffuse"]);
        catalog.add_shader(9, &["Legacy Shaders/Parallax Specular", "Parallax Specular"]);
        catalog.add_shader(
            10,
            &["Legacy Shaders/Self-Illumin/Diffuse", "Self-Illumin/Diffuse"],
        );
        catalog.add_shader(
            11,
            &[
                "Legacy Shaders/Self-Illumin/Bumped Diffuse",
                "Self-Illumin/Bumped Diffuse",
            ],
        );
        catalog.add_shader(
            12,
            &[
                "Legacy Shaders/Self-Illumin/Specular",
                "Self-Illumin/Specular",
            ],
        );
        catalog.add_shader(
            13,
            &[
                "Legacy Shaders/Self-Illumin/Bumped Specular",
                "Self-Illumin/Bumped Specular",
            ],
        );
        catalog.add_shader(
            14,
            &[
                "Legacy Shaders/Self-Illumin/VertexLit",
                "Self-Illumin/VertexLit",
            ],
        );
        catalog.add_shader(
            15,
            &["Legacy Shaders/Reflective/Diffuse", "Reflective/Diffuse"],
        );
        catalog.add_shader(
            16,
            &[
                "Legacy Shaders/Reflective/Bumped Diffuse",
                "Reflective/Bumped Diffuse",
            ],
        );
        catalog.add_shader(
            17,
            &["Legacy Shaders/Reflective/Specular", "Reflective/Specular"],
        );
        catalog.add_shader(
            18,
            &[
                "Legacy Shaders/Reflective/Bumped Specular",
                "Reflective/Bumped Specular",
            ],
        );
        catalog.add_shader(
            19,
            &[
                "Legacy Shaders/Reflective/VertexLit",
                "Reflective/VertexLit",
            ],
        );
        catalog.add_shader(
            20,
            &[
                "Legacy Shaders/Reflective/Bumped Unlit",
                "Reflective/Bumped Unlit",
            ],
        );
        catalog.add_shader(
            21,
            &[
                "Legacy Shaders/Reflective/Bumped VertexLit",
                "Reflective/Bumped VertexLit",
            ],
        );
        catalog.add_shader(
            22,
            &[
                "Legacy Shaders/Reflective/Parallax Diffuse",
                "Reflective/Parallax Diffuse",
            ],
        );
        catalog.add_shader(
            23,
            &[
                "Legacy Shaders/Reflective/Parallax Specular",
                "Reflective/Parallax Specular",
            ],
        );
        catalog.add_shader(
            30,
            &["Legacy Shaders/Transparent/Diffuse", "Transparent/Diffuse"],
        );
        catalog.add_shader(
            31,
            &[
                "Legacy Shaders/Transparent/Specular",
                "Transparent/Specular",
            ],
        );
        catalog.add_shader(
            32,
            &[
                "Legacy Shaders/Transparent/Bumped Diffuse",
                "Transparent/Bumped Diffuse",
            ],
        );
        catalog.add_shader(
            33,
            &[
                "Legacy Shaders/Transparent/Bumped Specular",
                "Transparent/Bumped Specular",
            ],
        );
        catalog.add_shader(
            34,
            &[
                "Legacy Shaders/Transparent/Parallax Diffuse",
                "Transparent/Parallax Diffuse",
            ],
        );
        catalog.add_shader(
            35,
            &[
                "Legacy Shaders/Transparent/Parallax Specular",
                "Transparent/Parallax Specular",
            ],
        );
        catalog.add_shader(
            36,
            &[
                "Legacy Shaders/Transparent/VertexLit",
                "Transparent/VertexLit",
            ],
        );
        catalog.add_shader(
            40,
            &[
                "Legacy Shaders/Transparent/Cutout/VertexLit",
                "Transparent/Cutout/VertexLit",
            ],
        );
        catalog.add_shader(
            41,
            &[
                "Legacy Shaders/Transparent/Cutout/Diffuse",
                "Transparent/Cutout/Diffuse",
            ],
        );
        catalog.add_shader(
            42,
            &[
                "Legacy Shaders/Transparent/Cutout/Specular",
                "Transparent/Cutout/Specular",
            ],
        );
        catalog.add_shader(
            43,
            &[
                "Legacy Shaders/Transparent/Cutout/Bumped Diffuse",
                "Transparent/Cutout/Bumped Diffuse",
            ],
        );
        catalog.add_shader(
            44,
            &[
                "Legacy Shaders/Transparent/Cutout/Bumped Specular",
                "Transparent/Cutout/Bumped Specular",
            ],
        );
        catalog.add_shader(45, &["Standard (Specular setup)", "StandardSpecular"]);
        catalog.add_shader(46, &["Standard"]);
        catalog.add_shader(47, &["Standard (Roughness setup)", "StandardRoughness"]);
        catalog.add_shader(103, &["Skybox/Cubemap"]);
        catalog.add_shader(104, &["Skybox/6 Sided"]);
        catalog.add_shader(106, &["Skybox/Procedural"]);
        catalog.add_shader(108, &["Skybox/Panoramic"]);
        catalog.add_shader(200, &["Particles/Additive"]);
        catalog.add_shader(201, &["Particles/~Additive-Multiply"]);
        catalog.add_shader(202, &["Particles/Additive (Soft)"]);
        catalog.add_shader(203, &["Particles/Alpha Blended"]);
        catalog.add_shader(205, &["Particles/Multiply"]);
        catalog.add_shader(206, &["Particles/Multiply (Double)"]);
        catalog.add_shader(207, &["Particles/Alpha Blended Premultiply"]);
        catalog.add_shader(208, &["Particles/VertexLit Blended"]);
        catalog.add_shader(210, &["Particles/Anim Alpha Blended"]);
        catalog.add_shader(10101, &["GUI/Text Shader"]);
        catalog.add_shader(10753, &["Sprites/Default"]);
        catalog.add_shader(10755, &["Sprites/Diffuse"]);
        catalog.add_shader(10757, &["Sprites/Mask"]);
        catalog.add_shader(10760, &["UI/Default"]);
        catalog.add_shader(10761, &["UI/Default Font"]);

        ///////////////////////////////////////////////////////
        // Fonts
        ///////////////////////////////////////////////////////
        catalog.add_font("Arial", 10102);

        ///////////////////////////////////////////////////////
        // Sprites
        ///////////////////////////////////////////////////////
        catalog.add_sprite("Checkmark", 10901);
        catalog.add_sprite("DropdownArrow", 10903);
        catalog.add_sprite("UISprite", 10905);
        catalog.add_sprite("Background", 10907);
        catalog.add_sprite("InputFieldBackground", 10911);
        catalog.add_sprite("Knob", 10913);
        catalog.add_sprite("UIMask", 10915);

        ///////////////////////////////////////////////////////
        // Lightmap parameter presets
        ///////////////////////////////////////////////////////
        catalog.add_lightmap_params("Default-HighResolution", 15200);
        catalog.add_lightmap_params("Default-LowResolution", 15201);
        catalog.add_lightmap_params("Default-VeryLowResolution", 15203);
        catalog.add_lightmap_params("Default-Medium", 15204);

        catalog
    }

    /// Engine build whose identifiers this catalog reproduces.
    pub fn engine_version(&self) -> &'static str {
        self.engine_version
    }

    /// Identifier for a built-in resource, by kind and exact display name.
    ///
    /// Lookup is case sensitive with no normalization. Kinds without a
    /// built-in partition never match. The caller decides what a miss
    /// means: for classification it reads as "not a built-in", for id
    /// assignment inside a built-in archive it reads as "unrecognized
    /// entry" and must be surfaced as an error.
    pub fn id_for(&self, kind: ObjectKind, name: &str) -> Option<u64> {
        let partition = match kind {
            ObjectKind::Material => &self.materials,
            ObjectKind::Texture => &self.textures,
            ObjectKind::Mesh => &self.meshes,
            ObjectKind::Shader => &self.shaders,
            ObjectKind::Font => &self.fonts,
            ObjectKind::Sprite => &self.sprites,
            ObjectKind::LightmapParams => &self.lightmap_params,
            ObjectKind::AudioClip | ObjectKind::Other => return None,
        };
        partition.get(name).copied()
    }

    /// Number of distinct names across all partitions.
    pub fn len(&self) -> usize {
        self.materials.len()
            + self.textures.len()
            + self.meshes.len()
            + self.shaders.len()
            + self.fonts.len()
            + self.sprites.len()
            + self.lightmap_params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn add_material(&mut self, name: &'static str, id: u64) {
        self.materials.insert(name, id);
    }

    fn add_texture(&mut self, name: &'static str, id: u64) {
        self.textures.insert(name, id);
    }

    fn add_mesh(&mut self, name: &'static str, id: u64) {
        self.meshes.insert(name, id);
    }

    fn add_shader(&mut self, id: u64, names: &[&'static str]) {
        for name in names {
            self.shaders.insert(name, id);
        }
    }

    fn add_font(&mut self, name: &'static str, id: u64) {
        self.fonts.insert(name, id);
    }

    fn add_sprite(&mut self, name: &'static str, id: u64) {
        self.sprites.insert(name, id);
    }

    fn add_lightmap_params(&mut self, name: &'static str, id: u64) {
        self.lightmap_params.insert(name, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_identifiers_are_exact() {
        let catalog = BuiltinCatalog::unity_2017_3();

        assert_eq!(
            catalog.id_for(ObjectKind::Material, "Default-Material"),
            Some(10303)
        );
        assert_eq!(catalog.id_for(ObjectKind::Mesh, "Cube"), Some(10202));
        assert_eq!(catalog.id_for(ObjectKind::Font, "Arial"), Some(10102));
        assert_eq!(catalog.id_for(ObjectKind::Shader, "Standard"), Some(46));
        assert_eq!(
            catalog.id_for(ObjectKind::Sprite, "UISprite"),
            Some(10905)
        );
        assert_eq!(
            catalog.id_for(ObjectKind::LightmapParams, "Default-HighResolution"),
            Some(15200)
        );
    }

    #[test]
    fn shader_aliases_share_one_identifier() {
        let catalog = BuiltinCatalog::unity_2017_3();

        assert_eq!(
            catalog.id_for(ObjectKind::Shader, "Standard (Specular setup)"),
            Some(45)
        );
        assert_eq!(
            catalog.id_for(ObjectKind::Shader, "StandardSpecular"),
            Some(45)
        );
        assert_eq!(
            catalog.id_for(ObjectKind::Shader, "Legacy Shaders/Diffuse"),
            Some(7)
        );
        assert_eq!(catalog.id_for(ObjectKind::Shader, "Diffuse"), Some(7));
    }

    #[test]
    fn unknown_names_miss() {
        let catalog = BuiltinCatalog::unity_2017_3();

        assert_eq!(catalog.id_for(ObjectKind::Mesh, "Teapot"), None);
        assert_eq!(catalog.id_for(ObjectKind::Shader, "My/Custom"), None);
        // Case and whitespace matter.
        assert_eq!(catalog.id_for(ObjectKind::Material, "default-material"), None);
        assert_eq!(catalog.id_for(ObjectKind::Material, "Default-Material "), None);
    }

    #[test]
    fn partitions_do_not_bleed_into_each_other() {
        let catalog = BuiltinCatalog::unity_2017_3();

        // "Default-Particle" names both a material and a texture, with
        // different identifiers.
        assert_eq!(
            catalog.id_for(ObjectKind::Material, "Default-Particle"),
            Some(10301)
        );
        assert_eq!(
            catalog.id_for(ObjectKind::Texture, "Default-Particle"),
            Some(10300)
        );

        // A mesh name does not answer for other kinds.
        assert_eq!(catalog.id_for(ObjectKind::Material, "Cube"), None);
        assert_eq!(catalog.id_for(ObjectKind::Mesh, "Default-Material"), None);
    }

    #[test]
    fn kinds_without_partitions_never_match() {
        let catalog = BuiltinCatalog::unity_2017_3();
        assert_eq!(catalog.id_for(ObjectKind::AudioClip, "Default-Material"), None);
        assert_eq!(catalog.id_for(ObjectKind::Other, "Standard"), None);
    }

    #[test]
    fn ui_sprite_and_texture_ids_are_paired() {
        let catalog = BuiltinCatalog::unity_2017_3();
        for name in [
            "Checkmark",
            "DropdownArrow",
            "UISprite",
            "Background",
            "InputFieldBackground",
            "Knob",
            "UIMask",
        ] {
            let sprite = catalog.id_for(ObjectKind::Sprite, name).unwrap();
            let texture = catalog.id_for(ObjectKind::Texture, name).unwrap();
            assert_eq!(sprite, texture + 1, "sprite/texture pair for {name}");
        }
    }
}
