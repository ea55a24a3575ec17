//! Texture resource system for resource packs
//!
//! Provides indexing, metadata parsing, and resolution of the texture
//! resources inside an asset pack.
//!
//! ## Overview
//!
//! - **TextureResource**: one indexed entry - a static image, a parsed
//!   `.mcmeta` metadata document, or an opaque blob
//! - **TextureManager**: walks a namespace's texture tree, merges entries
//!   into a shared key -> resource index, and resolves `namespace:path`
//!   locations with fallback to the shared missing-texture placeholder
//!
//! ## Keys
//!
//! Entries are addressed as `namespace:path` with the image extension
//! stripped: `blocks/stone.png` indexes as `ns:blocks/stone`. Metadata and
//! opaque entries keep their extension appended to the stripped base, so
//! `blocks/stone.png.mcmeta` indexes as `ns:blocks/stone.mcmeta` - an image
//! and its metadata occupy two distinct keys.

mod manager;
mod meta;
mod resource;

pub use manager::{LoadReport, TextureManager};
pub use meta::{parse_mcmeta, TextureAnimation, TextureAnimationFrame, TextureProperties};
pub use resource::{missing_image, TextureResource, MISSING_TEXTURE};

use std::fmt;

/// Error type for texture indexing and decoding operations
#[derive(Debug, Clone, PartialEq)]
pub enum TextureError {
    /// Load root is missing or not a directory; aborts the whole load call
    InvalidRoot(String),
    /// File I/O error
    Io(String),
    /// Malformed metadata document
    Json(String),
    /// Image decoding failure
    Decode(String),
    /// Resource exists but cannot satisfy the request
    Validation(String),
}

impl TextureError {
    /// Check if this error aborts an entire load call
    ///
    /// Everything except an invalid root is recoverable: the offending file
    /// is skipped and the rest of the batch proceeds.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TextureError::InvalidRoot(_))
    }
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::InvalidRoot(path) => write!(f, "{} is not a directory", path),
            TextureError::Io(msg) => write!(f, "I/O error: {}", msg),
            TextureError::Json(msg) => write!(f, "metadata error: {}", msg),
            TextureError::Decode(msg) => write!(f, "image error: {}", msg),
            TextureError::Validation(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TextureError {}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for TextureError {
    fn from(e: serde_json::Error) -> Self {
        TextureError::Json(e.to_string())
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Decode(e.to_string())
    }
}
