//! Biome tint colormap store
//!
//! Process-wide sink for the grass and foliage colormaps. The texture
//! manager pushes freshly sampled tables here on every pack reload; tint
//! consumers sample them by colormap coordinate. Until the first reload
//! both tables are uniform white, which leaves tinting a no-op.

use std::sync::Mutex;

use lazy_static::lazy_static;

/// Width and height of a tint colormap
pub const COLORMAP_SIZE: usize = 256;

/// Pixel count of one colormap table
pub const COLORMAP_PIXELS: usize = COLORMAP_SIZE * COLORMAP_SIZE;

/// Neutral color filling both tables before the first reload
const NEUTRAL: u32 = 0xFFFFFF;

#[derive(Debug)]
struct ColormapStore {
    grass: Vec<u32>,
    foliage: Vec<u32>,
}

lazy_static! {
    static ref COLORMAPS: Mutex<ColormapStore> = Mutex::new(ColormapStore {
        grass: vec![NEUTRAL; COLORMAP_PIXELS],
        foliage: vec![NEUTRAL; COLORMAP_PIXELS],
    });
}

/// Replace both tint colormaps
///
/// Called by the texture manager on reload. Both tables must hold exactly
/// one pixel per colormap coordinate.
pub fn set_grass_and_foliage_colormaps(grass: Vec<u32>, foliage: Vec<u32>) {
    debug_assert_eq!(grass.len(), COLORMAP_PIXELS);
    debug_assert_eq!(foliage.len(), COLORMAP_PIXELS);
    let mut store = COLORMAPS.lock().unwrap();
    store.grass = grass;
    store.foliage = foliage;
}

/// Sample the grass colormap at a colormap coordinate
pub fn grass_color(x: usize, y: usize) -> Option<u32> {
    if x >= COLORMAP_SIZE || y >= COLORMAP_SIZE {
        return None;
    }
    let store = COLORMAPS.lock().unwrap();
    Some(store.grass[y * COLORMAP_SIZE + x])
}

/// Sample the foliage colormap at a colormap coordinate
pub fn foliage_color(x: usize, y: usize) -> Option<u32> {
    if x >= COLORMAP_SIZE || y >= COLORMAP_SIZE {
        return None;
    }
    let store = COLORMAPS.lock().unwrap();
    Some(store.foliage[y * COLORMAP_SIZE + x])
}

/// Snapshot the full grass colormap table
pub fn grass_colormap() -> Vec<u32> {
    COLORMAPS.lock().unwrap().grass.clone()
}

/// Snapshot the full foliage colormap table
pub fn foliage_colormap() -> Vec<u32> {
    COLORMAPS.lock().unwrap().foliage.clone()
}

/// Serialize tests that touch the process-wide store
#[cfg(test)]
pub(crate) fn test_guard() -> std::sync::MutexGuard<'static, ()> {
    static GUARD: Mutex<()> = Mutex::new(());
    GUARD.lock().unwrap_or_else(|e| e.into_inner())
}
