//! Metadata document parsing
//!
//! Decodes one `.mcmeta` JSON document into the animation and sampling
//! descriptors it may carry. Both top-level sections are optional; a
//! present section yields a populated descriptor even when every sub-field
//! falls back to its default.
//!
//! ## Document schema
//!
//! ```json
//! {
//!   "animation": {
//!     "interpolate": false,
//!     "width": -1,
//!     "height": -1,
//!     "frametime": -1,
//!     "frames": [ 0, {"index": 1, "time": 5} ]
//!   },
//!   "texture": {
//!     "blur": false,
//!     "clamp": false,
//!     "mipmaps": []
//!   }
//! }
//! ```
//!
//! Field defaults are pack-format contracts and must not drift.

use serde::Deserialize;

use super::TextureError;

/// One frame of an animated texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureAnimationFrame {
    /// Sprite index within the frame strip
    pub index: i32,
    /// Hold time in ticks
    pub time: i32,
}

/// Animation metadata from the `animation` section
///
/// `width`, `height` and `frametime` use -1 for "unset": dimensions are
/// derived from the backing image, and a bare-integer frame inherits the
/// document frametime (including the unset value).
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAnimation {
    pub interpolate: bool,
    pub width: i32,
    pub height: i32,
    pub frametime: i32,
    pub frames: Vec<TextureAnimationFrame>,
}

/// Sampling properties from the `texture` section
#[derive(Debug, Clone, PartialEq)]
pub struct TextureProperties {
    pub blur: bool,
    pub clamp: bool,
    pub mipmaps: Vec<i32>,
}

/// A frame entry is either a bare sprite index or an object with an
/// explicit hold time. The object form requires both fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FrameEntry {
    Index(i32),
    Full { index: i32, time: i32 },
}

#[derive(Debug, Deserialize)]
struct AnimationSection {
    #[serde(default)]
    interpolate: bool,
    #[serde(default = "unset_dimension")]
    width: i32,
    #[serde(default = "unset_dimension")]
    height: i32,
    #[serde(default = "unset_dimension")]
    frametime: i32,
    #[serde(default)]
    frames: Vec<FrameEntry>,
}

#[derive(Debug, Deserialize)]
struct PropertiesSection {
    #[serde(default)]
    blur: bool,
    #[serde(default)]
    clamp: bool,
    #[serde(default)]
    mipmaps: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct McmetaDocument {
    animation: Option<AnimationSection>,
    texture: Option<PropertiesSection>,
}

fn unset_dimension() -> i32 {
    -1
}

/// Parse one metadata document
///
/// Tolerates a leading byte-order mark. Returns the animation descriptor if
/// the `animation` section is present and the sampling descriptor if the
/// `texture` section is present. Any malformed document (wrong field types,
/// an object-form frame missing `index` or `time`) is an error for this
/// document only; callers skip the file and continue their batch.
pub fn parse_mcmeta(
    text: &str,
) -> Result<(Option<TextureAnimation>, Option<TextureProperties>), TextureError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let document: McmetaDocument = serde_json::from_str(text)?;

    let animation = document.animation.map(|section| {
        let frames = section
            .frames
            .into_iter()
            .map(|frame| match frame {
                FrameEntry::Index(index) => TextureAnimationFrame {
                    index,
                    time: section.frametime,
                },
                FrameEntry::Full { index, time } => TextureAnimationFrame { index, time },
            })
            .collect();
        TextureAnimation {
            interpolate: section.interpolate,
            width: section.width,
            height: section.height,
            frametime: section.frametime,
            frames,
        }
    });

    let properties = document.texture.map(|section| TextureProperties {
        blur: section.blur,
        clamp: section.clamp,
        mipmaps: section.mipmaps,
    });

    Ok((animation, properties))
}
