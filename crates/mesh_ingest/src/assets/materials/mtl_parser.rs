//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl text into a map of material name -> [`Material`].
//! Only fields present in the file are set; defaults are applied later,
//! during assembly.

use std::collections::HashMap;

use thiserror::Error;

use super::material::{Material, TextureRef};
use crate::assets::diagnostics::{Diagnostic, Diagnostics};
use crate::assets::obj_parser::split_directive;
use crate::foundation::math::Vec3;

/// Fatal MTL parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MtlError {
    /// An attribute keyword appeared before any `newmtl`
    #[error("line {line}: '{keyword}' appears before any newmtl")]
    MissingCurrentMaterial {
        /// Source line
        line: usize,
        /// The attribute keyword
        keyword: String,
    },
}

/// Keywords the MTL parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MtlDirective<'a> {
    NewMaterial,
    Shininess,
    Ambient,
    Diffuse,
    Specular,
    Emissive,
    DiffuseMap,
    SpecularMap,
    NormalMap,
    OpacityMap,
    OpticalDensity,
    Opacity,
    Transparency,
    Illumination,
    Unknown(&'a str),
}

impl<'a> MtlDirective<'a> {
    fn from_keyword(keyword: &'a str) -> Self {
        match keyword {
            "newmtl" => MtlDirective::NewMaterial,
            "Ns" => MtlDirective::Shininess,
            "Ka" => MtlDirective::Ambient,
            "Kd" => MtlDirective::Diffuse,
            "Ks" => MtlDirective::Specular,
            "Ke" => MtlDirective::Emissive,
            "map_Kd" => MtlDirective::DiffuseMap,
            "map_Ns" => MtlDirective::SpecularMap,
            "map_Bump" | "bump" => MtlDirective::NormalMap,
            "map_d" => MtlDirective::OpacityMap,
            "Ni" => MtlDirective::OpticalDensity,
            "d" => MtlDirective::Opacity,
            "Tr" => MtlDirective::Transparency,
            "illum" => MtlDirective::Illumination,
            other => MtlDirective::Unknown(other),
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into a map of material name -> Material
    ///
    /// Diagnostics are logged; use [`MtlParser::parse_with_diagnostics`] to
    /// inspect them.
    ///
    /// # Example
    /// ```
    /// use mesh_ingest::assets::MtlParser;
    ///
    /// let materials = MtlParser::parse("newmtl X\nKd 0.2 0.3 0.4\nNs 10").unwrap();
    /// assert_eq!(materials["X"].shininess, Some(10.0));
    /// ```
    pub fn parse(contents: &str) -> Result<HashMap<String, Material>, MtlError> {
        Self::parse_with_diagnostics(contents).map(|(materials, _)| materials)
    }

    /// Parse MTL file contents, also returning the non-fatal diagnostics
    pub fn parse_with_diagnostics(
        contents: &str,
    ) -> Result<(HashMap<String, Material>, Vec<Diagnostic>), MtlError> {
        let mut materials = HashMap::new();
        let mut current: Option<(String, Material)> = None;
        let mut diagnostics = Diagnostics::new();

        for (line_index, line) in contents.lines().enumerate() {
            let line_num = line_index + 1;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (keyword, rest) = split_directive(line);
            let directive = MtlDirective::from_keyword(keyword);

            match directive {
                MtlDirective::NewMaterial => {
                    if let Some((name, mat)) = current.take() {
                        materials.insert(name, mat);
                    }
                    current = Some((rest.to_string(), Material::default()));
                    continue;
                }
                MtlDirective::Unknown(keyword) => {
                    diagnostics.report(Diagnostic::UnknownDirective {
                        line: line_num,
                        keyword: keyword.to_string(),
                    });
                    continue;
                }
                _ => {}
            }

            let Some((_, mat)) = current.as_mut() else {
                return Err(MtlError::MissingCurrentMaterial {
                    line: line_num,
                    keyword: keyword.to_string(),
                });
            };

            let mut tokens = rest.split_whitespace();
            match directive {
                MtlDirective::Shininess => {
                    mat.shininess = Some(diagnostics.parse_f32(tokens.next(), line_num, keyword));
                }
                MtlDirective::Ambient => {
                    mat.ambient = Some(Self::parse_vec3(&mut tokens, &mut diagnostics, line_num, keyword));
                }
                MtlDirective::Diffuse => {
                    mat.diffuse = Some(Self::parse_vec3(&mut tokens, &mut diagnostics, line_num, keyword));
                }
                MtlDirective::Specular => {
                    mat.specular = Some(Self::parse_vec3(&mut tokens, &mut diagnostics, line_num, keyword));
                }
                MtlDirective::Emissive => {
                    mat.emissive = Some(Self::parse_vec3(&mut tokens, &mut diagnostics, line_num, keyword));
                }
                MtlDirective::DiffuseMap => mat.diffuse_map = Self::parse_texture(rest),
                MtlDirective::SpecularMap => mat.specular_map = Self::parse_texture(rest),
                MtlDirective::NormalMap => mat.normal_map = Self::parse_texture(rest),
                MtlDirective::OpacityMap => mat.opacity_map = Self::parse_texture(rest),
                MtlDirective::OpticalDensity => {
                    mat.optical_density = Some(diagnostics.parse_f32(tokens.next(), line_num, keyword));
                }
                MtlDirective::Opacity => {
                    mat.opacity = Some(diagnostics.parse_f32(tokens.next(), line_num, keyword));
                }
                MtlDirective::Transparency => {
                    // Tr is inverted dissolve
                    let transparency = diagnostics.parse_f32(tokens.next(), line_num, keyword);
                    mat.opacity = Some(1.0 - transparency);
                }
                MtlDirective::Illumination => {
                    mat.illumination = Self::parse_u32(tokens.next(), &mut diagnostics, line_num, keyword);
                }
                MtlDirective::NewMaterial | MtlDirective::Unknown(_) => {}
            }
        }

        // Save final material
        if let Some((name, mat)) = current {
            materials.insert(name, mat);
        }

        log::debug!("Parsed MTL: {} material(s)", materials.len());
        Ok((materials, diagnostics.into_vec()))
    }

    /// Parse an RGB triple; missing or bad components become NaN
    fn parse_vec3<'a>(
        tokens: &mut impl Iterator<Item = &'a str>,
        diagnostics: &mut Diagnostics,
        line_num: usize,
        command: &str,
    ) -> Vec3 {
        let r = diagnostics.parse_f32(tokens.next(), line_num, command);
        let g = diagnostics.parse_f32(tokens.next(), line_num, command);
        let b = diagnostics.parse_f32(tokens.next(), line_num, command);
        Vec3::new(r, g, b)
    }

    /// Integers have no NaN, so a bad value leaves the field unset
    fn parse_u32(
        token: Option<&str>,
        diagnostics: &mut Diagnostics,
        line_num: usize,
        command: &str,
    ) -> Option<u32> {
        let parsed = token.and_then(|token| token.parse::<u32>().ok());
        if parsed.is_none() {
            diagnostics.report(Diagnostic::MalformedNumber {
                line: line_num,
                keyword: command.to_string(),
                token: token.unwrap_or_default().to_string(),
            });
        }
        parsed
    }

    /// Texture map arguments: leading `-option value...` pairs are dropped,
    /// the rest of the line (which may contain spaces) is the file name
    fn parse_texture(args: &str) -> Option<TextureRef> {
        let file_name = strip_map_options(args);
        (!file_name.is_empty()).then(|| TextureRef::File(file_name.to_string()))
    }
}

/// Arguments taken by a texture map option
#[derive(Debug, Clone, Copy)]
enum MapOptionArgs {
    Fixed(usize),
    /// One to three numbers (`-o`, `-s`, `-t`)
    UpToThreeNumbers,
}

fn map_option_args(option: &str) -> Option<MapOptionArgs> {
    match option {
        "-blendu" | "-blendv" | "-cc" | "-clamp" | "-imfchan" | "-texres" | "-bm" | "-boost"
        | "-type" => Some(MapOptionArgs::Fixed(1)),
        "-mm" => Some(MapOptionArgs::Fixed(2)),
        "-o" | "-s" | "-t" => Some(MapOptionArgs::UpToThreeNumbers),
        _ => None,
    }
}

fn strip_map_options(args: &str) -> &str {
    let mut rest = args.trim_start();
    loop {
        let (token, after) = match rest.split_once(char::is_whitespace) {
            Some((token, after)) => (token, after.trim_start()),
            None => return rest,
        };
        let Some(args) = map_option_args(token) else {
            return rest;
        };

        rest = after;
        match args {
            MapOptionArgs::Fixed(count) => {
                for _ in 0..count {
                    rest = match rest.split_once(char::is_whitespace) {
                        Some((_, after)) => after.trim_start(),
                        None => return "",
                    };
                }
            }
            MapOptionArgs::UpToThreeNumbers => {
                for _ in 0..3 {
                    let (value, after) = match rest.split_once(char::is_whitespace) {
                        Some((value, after)) => (value, after.trim_start()),
                        None => (rest, ""),
                    };
                    if value.is_empty() || value.parse::<f32>().is_err() {
                        break;
                    }
                    rest = after;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_only_set_fields() {
        let materials = MtlParser::parse("newmtl X\nKd 0.2 0.3 0.4\nNs 10").unwrap();
        assert_eq!(materials.len(), 1);

        let expected = Material {
            diffuse: Some(Vec3::new(0.2, 0.3, 0.4)),
            shininess: Some(10.0),
            ..Default::default()
        };
        assert_eq!(materials["X"], expected);
    }

    #[test]
    fn test_parse_simple_material() {
        let mtl_content = r#"
# Simple material
newmtl TestMaterial
Ka 1.0 1.0 1.0
Kd 0.8 0.2 0.2
Ks 0.5 0.5 0.5
Ke 0.0 0.1 0.0
Ns 250.0
Ni 1.45
d 1.0
illum 2
"#;

        let materials = MtlParser::parse(mtl_content).unwrap();
        let mat = materials.get("TestMaterial").unwrap();
        assert_eq!(mat.ambient, Some(Vec3::new(1.0, 1.0, 1.0)));
        assert_eq!(mat.diffuse, Some(Vec3::new(0.8, 0.2, 0.2)));
        assert_eq!(mat.specular, Some(Vec3::new(0.5, 0.5, 0.5)));
        assert_eq!(mat.emissive, Some(Vec3::new(0.0, 0.1, 0.0)));
        assert_eq!(mat.shininess, Some(250.0));
        assert_eq!(mat.optical_density, Some(1.45));
        assert_eq!(mat.opacity, Some(1.0));
        assert_eq!(mat.illumination, Some(2));
    }

    #[test]
    fn test_parse_material_with_textures() {
        let mtl_content = r#"
newmtl TexturedMaterial
map_Kd textures/diffuse map.png
map_Ns textures/specular.png
map_Bump -bm 0.5 textures/normal.png
map_d -o 0.1 0.2 -clamp on alpha.png
"#;

        let materials = MtlParser::parse(mtl_content).unwrap();
        let mat = materials.get("TexturedMaterial").unwrap();

        assert_eq!(mat.diffuse_map, Some(TextureRef::File("textures/diffuse map.png".to_string())));
        assert_eq!(mat.specular_map, Some(TextureRef::File("textures/specular.png".to_string())));
        assert_eq!(mat.normal_map, Some(TextureRef::File("textures/normal.png".to_string())));
        assert_eq!(mat.opacity_map, Some(TextureRef::File("alpha.png".to_string())));
    }

    #[test]
    fn test_parse_multiple_materials() {
        let mtl_content = r#"
newmtl Material1
Kd 1.0 0.0 0.0

newmtl Material2
Kd 0.0 1.0 0.0
"#;

        let materials = MtlParser::parse(mtl_content).unwrap();
        assert_eq!(materials.len(), 2);

        assert_eq!(materials["Material1"].diffuse, Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(materials["Material2"].diffuse, Some(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_redefined_material_starts_fresh() {
        let materials = MtlParser::parse("newmtl A\nNs 5\nnewmtl A\nd 0.5").unwrap();
        let expected = Material { opacity: Some(0.5), ..Default::default() };
        assert_eq!(materials["A"], expected);
    }

    #[test]
    fn test_parse_transparency() {
        let materials = MtlParser::parse("newmtl TransparentMat\nTr 0.3").unwrap();
        let opacity = materials["TransparentMat"].opacity.unwrap();
        assert!((opacity - 0.7).abs() < 0.001);
    }

    #[test]
    fn test_attribute_before_newmtl_fails() {
        let error = MtlParser::parse("# lead comment\nKd 1 1 1\nnewmtl X").unwrap_err();
        assert_eq!(
            error,
            MtlError::MissingCurrentMaterial { line: 2, keyword: "Kd".to_string() }
        );
    }

    #[test]
    fn test_newmtl_without_name_uses_empty_key() {
        let materials = MtlParser::parse("newmtl\nKd 1 1 1\nnewmtl Next").unwrap();
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[""].diffuse, Some(Vec3::new(1.0, 1.0, 1.0)));
        assert!(materials["Next"].is_empty());
    }

    #[test]
    fn test_unknown_keyword_is_diagnostic() {
        let (materials, diagnostics) =
            MtlParser::parse_with_diagnostics("Pr 0.5\nnewmtl X\nmap_Ka ao.png").unwrap();
        assert!(materials["X"].is_empty());
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnknownDirective { line: 1, keyword: "Pr".to_string() },
                Diagnostic::UnknownDirective { line: 3, keyword: "map_Ka".to_string() },
            ]
        );
    }

    #[test]
    fn test_malformed_values() {
        let (materials, diagnostics) =
            MtlParser::parse_with_diagnostics("newmtl X\nKd 1 oops 1\nillum two").unwrap();
        let diffuse = materials["X"].diffuse.unwrap();
        assert!(diffuse.y.is_nan());
        assert_eq!(materials["X"].illumination, None);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_strip_map_options() {
        assert_eq!(strip_map_options("file.png"), "file.png");
        assert_eq!(strip_map_options("-s 2 2 -blendu off file name.png"), "file name.png");
        assert_eq!(strip_map_options("-mm 0 1 file.png"), "file.png");
        assert_eq!(strip_map_options("-bm"), "-bm");
        assert_eq!(strip_map_options("-bm 1"), "");
        assert_eq!(strip_map_options("-o 0.1 0.2 0.3"), "");
        assert_eq!(strip_map_options("-s 2"), "");
        assert_eq!(strip_map_options("-o 0.1 0.2 0.3 tiles.png"), "tiles.png");
    }

    #[test]
    fn test_map_with_only_options_leaves_map_unset() {
        let materials = MtlParser::parse("newmtl X\nmap_Kd -o 0.1 0.2 0.3").unwrap();
        assert_eq!(materials["X"].diffuse_map, None);
    }
}
