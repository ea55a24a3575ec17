//! Texture resource variants and the shared missing-texture placeholder
//!
//! Every indexed pack entry becomes one `TextureResource`. Only image
//! entries (and the generated placeholder) can be decoded for pixel
//! sampling; metadata and opaque entries stay addressable but reject
//! decoding.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::pack::PackFile;

use super::{TextureAnimation, TextureError, TextureProperties};

/// Key reported for the generated placeholder, which no pack entry backs
const MISSING_KEY: &str = "missingno";

lazy_static::lazy_static! {
    /// Shared placeholder returned when a location resolves to nothing
    ///
    /// One immutable instance per process; never inserted into an index.
    pub static ref MISSING_TEXTURE: TextureResource = TextureResource::Generated {
        image: Arc::new(missing_image(16, 16)),
    };
}

/// Generate the magenta/black checkerboard placeholder image
pub fn missing_image(width: u32, height: u32) -> RgbaImage {
    let magenta = Rgba([0xF8, 0x00, 0xF8, 0xFF]);
    let black = Rgba([0x00, 0x00, 0x00, 0xFF]);
    RgbaImage::from_fn(width, height, |x, y| {
        if (x < width / 2) == (y < height / 2) {
            magenta
        } else {
            black
        }
    })
}

/// One entry of the texture index
#[derive(Debug, Clone)]
pub enum TextureResource {
    /// A static image backed by a `.png` pack entry
    Image {
        key: String,
        file: Arc<dyn PackFile>,
    },
    /// A parsed `.mcmeta` metadata document
    Meta {
        key: String,
        file: Arc<dyn PackFile>,
        animation: Option<TextureAnimation>,
        properties: Option<TextureProperties>,
    },
    /// Any other pack entry, kept addressable but never decoded
    Blob {
        key: String,
        file: Arc<dyn PackFile>,
    },
    /// Generated placeholder, not backed by a pack entry
    Generated { image: Arc<RgbaImage> },
}

impl TextureResource {
    /// Get the resource key this entry is indexed under
    pub fn key(&self) -> &str {
        match self {
            TextureResource::Image { key, .. }
            | TextureResource::Meta { key, .. }
            | TextureResource::Blob { key, .. } => key,
            TextureResource::Generated { .. } => MISSING_KEY,
        }
    }

    /// Check if this resource is image-bearing and usable for sampling
    pub fn is_texture(&self) -> bool {
        matches!(
            self,
            TextureResource::Image { .. } | TextureResource::Generated { .. }
        )
    }

    /// Check if this resource is the shared missing-texture placeholder
    pub fn is_missing(&self) -> bool {
        matches!(self, TextureResource::Generated { .. })
    }

    /// Decode the backing image
    ///
    /// Reads and decodes the pack entry for image resources, or returns the
    /// generated pixels for the placeholder. Metadata and opaque entries
    /// cannot be decoded.
    pub fn image(&self) -> Result<RgbaImage, TextureError> {
        match self {
            TextureResource::Image { file, .. } => {
                let bytes = file.read()?;
                Ok(image::load_from_memory(&bytes)?.to_rgba8())
            }
            TextureResource::Generated { image } => Ok((**image).clone()),
            TextureResource::Meta { key, .. } | TextureResource::Blob { key, .. } => {
                Err(TextureError::Validation(format!(
                    "{} is not an image-bearing resource",
                    key
                )))
            }
        }
    }

    /// Get the animation descriptor, if this is a metadata entry carrying one
    pub fn animation(&self) -> Option<&TextureAnimation> {
        match self {
            TextureResource::Meta { animation, .. } => animation.as_ref(),
            _ => None,
        }
    }

    /// Get the sampling properties, if this is a metadata entry carrying them
    pub fn properties(&self) -> Option<&TextureProperties> {
        match self {
            TextureResource::Meta { properties, .. } => properties.as_ref(),
            _ => None,
        }
    }
}
