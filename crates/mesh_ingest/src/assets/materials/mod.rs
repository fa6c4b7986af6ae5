//! Material records and the MTL parser that produces them

pub mod material;
pub mod mtl_parser;

pub use material::{collect_texture_files, Material, TextureRef, FLAT_NORMAL_TEXEL, WHITE_TEXEL};
pub use mtl_parser::{MtlError, MtlParser};
