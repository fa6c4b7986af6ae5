//! Material records as parsed from MTL files
//!
//! Every field is optional: the MTL parser only fills what the file sets.
//! Filling the gaps from a default material happens at assembly time via
//! [`Material::merged_over`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Solid white texel, used for the default diffuse and specular maps
pub const WHITE_TEXEL: [u8; 4] = [255, 255, 255, 255];

/// Flat tangent-space normal texel, used for the default normal map
pub const FLAT_NORMAL_TEXEL: [u8; 4] = [127, 127, 255, 0];

/// Reference to a texture. Loading it is the texture loader's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureRef {
    /// Image file name exactly as written in the MTL file
    File(String),
    /// 1x1 texture of a single RGBA texel
    Solid([u8; 4]),
}

impl TextureRef {
    /// File name, if this references a file
    pub fn file_name(&self) -> Option<&str> {
        match self {
            TextureRef::File(name) => Some(name),
            TextureRef::Solid(_) => None,
        }
    }
}

/// Phong-style material from a Wavefront MTL file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Specular exponent (Ns)
    pub shininess: Option<f32>,
    /// Ambient color (Ka)
    pub ambient: Option<Vec3>,
    /// Diffuse color (Kd)
    pub diffuse: Option<Vec3>,
    /// Specular color (Ks)
    pub specular: Option<Vec3>,
    /// Emissive color (Ke)
    pub emissive: Option<Vec3>,
    /// Diffuse texture (map_Kd)
    pub diffuse_map: Option<TextureRef>,
    /// Specular texture (map_Ns)
    pub specular_map: Option<TextureRef>,
    /// Normal map (map_Bump)
    pub normal_map: Option<TextureRef>,
    /// Opacity texture (map_d)
    pub opacity_map: Option<TextureRef>,
    /// Index of refraction (Ni)
    pub optical_density: Option<f32>,
    /// Dissolve (d): 0.0 transparent, 1.0 opaque
    pub opacity: Option<f32>,
    /// Illumination model (illum)
    pub illumination: Option<u32>,
}

impl Material {
    /// The material applied under every parsed material: white diffuse,
    /// black ambient, white specular, shininess 400, fully opaque, with
    /// solid default maps.
    pub fn fallback() -> Self {
        Self {
            shininess: Some(400.0),
            ambient: Some(Vec3::new(0.0, 0.0, 0.0)),
            diffuse: Some(Vec3::new(1.0, 1.0, 1.0)),
            specular: Some(Vec3::new(1.0, 1.0, 1.0)),
            emissive: None,
            diffuse_map: Some(TextureRef::Solid(WHITE_TEXEL)),
            specular_map: Some(TextureRef::Solid(WHITE_TEXEL)),
            normal_map: Some(TextureRef::Solid(FLAT_NORMAL_TEXEL)),
            opacity_map: None,
            optical_density: None,
            opacity: Some(1.0),
            illumination: None,
        }
    }

    /// Field-wise merge: fields set on `self` win, unset ones come from `base`
    pub fn merged_over(&self, base: &Material) -> Material {
        Material {
            shininess: self.shininess.or(base.shininess),
            ambient: self.ambient.or(base.ambient),
            diffuse: self.diffuse.or(base.diffuse),
            specular: self.specular.or(base.specular),
            emissive: self.emissive.or(base.emissive),
            diffuse_map: self.diffuse_map.clone().or_else(|| base.diffuse_map.clone()),
            specular_map: self.specular_map.clone().or_else(|| base.specular_map.clone()),
            normal_map: self.normal_map.clone().or_else(|| base.normal_map.clone()),
            opacity_map: self.opacity_map.clone().or_else(|| base.opacity_map.clone()),
            optical_density: self.optical_density.or(base.optical_density),
            opacity: self.opacity.or(base.opacity),
            illumination: self.illumination.or(base.illumination),
        }
    }

    /// Set texture maps as `(field name, texture)` pairs
    pub fn texture_maps(&self) -> impl Iterator<Item = (&'static str, &TextureRef)> + '_ {
        [
            ("diffuse_map", &self.diffuse_map),
            ("specular_map", &self.specular_map),
            ("normal_map", &self.normal_map),
            ("opacity_map", &self.opacity_map),
        ]
        .into_iter()
        .filter_map(|(name, texture)| texture.as_ref().map(|texture| (name, texture)))
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Material::default()
    }
}

/// Unique texture file names referenced by `materials`, sorted.
///
/// Lets a texture loader fetch each image once even when several materials
/// share it.
pub fn collect_texture_files<'a>(materials: impl IntoIterator<Item = &'a Material>) -> Vec<String> {
    materials
        .into_iter()
        .flat_map(Material::texture_maps)
        .filter_map(|(_, texture)| texture.file_name())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
