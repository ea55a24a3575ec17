//! TEXPACK: resource-pack texture indexing and resolution
//!
//! Builds an addressable index of the texture resources inside a resource
//! pack and resolves `namespace:path` locations against it:
//! - Recursive pack walking with per-file error tolerance
//! - `.mcmeta` metadata parsing (animation sequences, sampling properties)
//! - Deterministic fallback to a shared "missing texture" placeholder
//! - Grass/foliage colormap tint tables recomputed on reload

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod pack;
pub mod registry;
pub mod texture;
pub mod tint;

pub use pack::{read_text, DiskPackFile, PackFile};
pub use texture::{
    LoadReport, TextureAnimation, TextureAnimationFrame, TextureError, TextureManager,
    TextureProperties, TextureResource, MISSING_TEXTURE,
};
