//! Test model loading against the OBJ/MTL fixtures in `resources/models`

#[cfg(test)]
mod tests {
    use crate::assets::materials::WHITE_TEXEL;
    use crate::assets::{Diagnostic, ModelLoader, TextureRef};
    use crate::foundation::math::Vec3;
    use crate::render::AssemblyConfig;
    use crate::render::primitives::AttributeMask;
    use std::path::PathBuf;

    fn get_test_model_path(filename: &str) -> PathBuf {
        // Get workspace root (2 levels up from crates/mesh_ingest)
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.pop(); // Remove mesh_ingest
        path.pop(); // Remove crates
        path.push("resources");
        path.push("models");
        path.push(filename);
        path
    }

    fn read_fixture(filename: &str) -> Option<String> {
        std::fs::read_to_string(get_test_model_path(filename)).ok()
    }

    #[test]
    fn test_load_crate_model() {
        crate::foundation::logging::try_init();
        let obj = read_fixture("crate.obj").expect("crate.obj fixture");
        let mut requested = Vec::new();
        let model = ModelLoader::new(AssemblyConfig::default())
            .load(&obj, |name| {
                requested.push(name.to_string());
                read_fixture(name)
            })
            .unwrap();

        assert_eq!(requested, vec!["crate.mtl".to_string()]);
        assert!(model.diagnostics.is_empty(), "{:?}", model.diagnostics);
        assert_eq!(model.parts.len(), 2);
        assert_eq!(model.vertex_count(), 36);

        let sides = &model.parts[0];
        assert_eq!(sides.object, "Crate");
        assert_eq!(sides.groups, vec!["sides".to_string()]);
        assert_eq!(sides.material_name, "Wood");
        assert_eq!(sides.geometry.vertex_count(), 30);
        assert_eq!(sides.material.diffuse, Some(Vec3::new(0.64, 0.42, 0.24)));
        // Not in the library, so it comes from the default material
        assert_eq!(sides.material.specular_map, Some(TextureRef::Solid(WHITE_TEXEL)));
        assert_eq!(sides.material.normal_map, Some(TextureRef::File("crate_normal.png".to_string())));

        let lid = &model.parts[1];
        assert_eq!(lid.groups, vec!["lid".to_string()]);
        assert_eq!(lid.material_name, "Metal");
        assert_eq!(lid.geometry.vertex_count(), 6);
        assert_eq!(lid.material.illumination, Some(3));
    }

    #[test]
    fn test_crate_tangents_lie_in_face_plane() {
        let obj = read_fixture("crate.obj").expect("crate.obj fixture");
        let model = ModelLoader::new(AssemblyConfig::default())
            .load(&obj, read_fixture)
            .unwrap();

        for part in &model.parts {
            let geometry = &part.geometry;
            assert!(geometry.buffer_mask().contains(AttributeMask::TANGENT));

            for vertex in 0..geometry.vertex_count() {
                let t = geometry.tangent.value_at(vertex).unwrap();
                let n = geometry.normal.value_at(vertex).unwrap();
                let tangent = Vec3::new(t[0], t[1], t[2]);
                let normal = Vec3::new(n[0], n[1], n[2]);
                assert!((tangent.norm() - 1.0).abs() < 1e-5);
                assert!(tangent.dot(&normal).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_lid_uses_negative_indices() {
        let obj = read_fixture("crate.obj").expect("crate.obj fixture");
        let model = ModelLoader::default().load(&obj, |_| None).unwrap();

        // Top face: every vertex has y = 1 and the +Y normal
        let lid = &model.parts[1].geometry;
        for vertex in 0..lid.vertex_count() {
            assert_eq!(lid.position.value_at(vertex).unwrap()[1], 1.0);
            assert_eq!(lid.normal.value_at(vertex), Some(&[0.0, 1.0, 0.0][..]));
        }
    }

    #[test]
    fn test_texture_files_listed_once() {
        let obj = read_fixture("crate.obj").expect("crate.obj fixture");
        let model = ModelLoader::default().load(&obj, read_fixture).unwrap();

        assert_eq!(
            model.texture_files(),
            vec![
                "crate_diffuse.png".to_string(),
                "crate_normal.png".to_string(),
                "metal_diffuse.png".to_string(),
                "metal_specular.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_library_keeps_default_material() {
        let obj = read_fixture("crate.obj").expect("crate.obj fixture");
        let model = ModelLoader::default().load(&obj, |_| None).unwrap();

        assert!(model.materials.is_empty());
        for part in &model.parts {
            assert_eq!(part.material, AssemblyConfig::default().default_material);
        }
    }

    #[test]
    fn test_companion_library_used_when_obj_names_none() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Red\nf 1 2 3";
        let model = ModelLoader::default()
            .with_companion_library("triangle.mtl")
            .load(obj, |name| (name == "triangle.mtl").then(|| "newmtl Red\nKd 1 0 0".to_string()))
            .unwrap();

        assert_eq!(model.material_libraries, vec!["triangle.mtl".to_string()]);
        assert_eq!(model.parts[0].material.diffuse, Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_later_library_wins() {
        let obj = "mtllib a.mtl\nmtllib b.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Shared\nf 1 2 3";
        let model = ModelLoader::default()
            .load(obj, |name| match name {
                "a.mtl" => Some("newmtl Shared\nNs 10\nd 0.5".to_string()),
                "b.mtl" => Some("newmtl Shared\nNs 20".to_string()),
                _ => None,
            })
            .unwrap();

        let material = &model.parts[0].material;
        assert_eq!(material.shininess, Some(20.0));
        // Whole records are replaced, not merged across libraries
        assert_eq!(material.opacity, Some(1.0));
    }

    #[test]
    fn test_broken_library_is_an_error() {
        let obj = "mtllib bad.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3";
        let result = ModelLoader::default().load(obj, |_| Some("Kd 1 1 1".to_string()));
        let error = result.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Material library 'bad.mtl' failed to parse: line 1: 'Kd' appears before any newmtl"
        );
    }

    #[test]
    fn test_diagnostics_gathered_from_both_formats() {
        let obj = "mtllib m.mtl\ncstype bspline\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3";
        let model = ModelLoader::default()
            .load(obj, |_| Some("newmtl M\nmap_Ka ao.png".to_string()))
            .unwrap();

        assert_eq!(
            model.diagnostics,
            vec![
                Diagnostic::UnknownDirective { line: 2, keyword: "cstype".to_string() },
                Diagnostic::UnknownDirective { line: 2, keyword: "map_Ka".to_string() },
            ]
        );
    }
}
