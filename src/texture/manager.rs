//! Texture manager - index construction, resolution, and tint reload
//!
//! Owns the shared key -> resource index. Directory loads classify every
//! file under a namespace root and publish the batch atomically; resolution
//! normalizes caller-supplied locations and falls back to the shared
//! missing-texture placeholder; reload recomputes the grass/foliage tint
//! colormaps and pushes them to the process-wide tint store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{imageops::FilterType, RgbaImage};

use crate::pack::{self, DiskPackFile, PackFile};
use crate::{registry, tint};

use super::{meta, TextureError, TextureResource, MISSING_TEXTURE};

/// Fill color used when a colormap is absent or not decodable
const COLORMAP_FILL: u32 = 0xFFFFFF;

/// Outcome of one load call
///
/// Successes are already merged into the index; failures carry the path of
/// each skipped file with the error that excluded it, so callers can report
/// beyond the warnings the load path already logs.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of entries merged into the index
    pub loaded: usize,
    /// Files skipped, with the error that excluded each
    pub failures: Vec<(PathBuf, TextureError)>,
}

impl LoadReport {
    /// Check if every enumerated file was indexed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: LoadReport) {
        self.loaded += other.loaded;
        self.failures.extend(other.failures);
    }
}

/// Texture index owner and resolver
///
/// The index starts empty; each `load_directory` call merges one
/// namespace's batch into it. Loads take `&mut self` while resolution takes
/// `&self`, so a load can never race a lookup on the same manager.
#[derive(Debug)]
pub struct TextureManager {
    /// Indexed resources keyed by `namespace:path`
    textures: HashMap<String, TextureResource>,
    /// Namespace prepended to locations that carry none
    default_namespace: String,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureManager {
    /// Create an empty manager with the standard default namespace
    pub fn new() -> Self {
        Self::with_default_namespace(registry::DEFAULT_NAMESPACE)
    }

    /// Create an empty manager with a custom default namespace
    pub fn with_default_namespace(namespace: impl Into<String>) -> Self {
        Self {
            textures: HashMap::new(),
            default_namespace: namespace.into(),
        }
    }

    /// Index every file under `root` into the `namespace` key space
    ///
    /// Fails with `TextureError::InvalidRoot` (and touches nothing) when
    /// `root` is missing or not a directory. Every other failure is
    /// per-file: the entry is logged, reported, and skipped while the rest
    /// of the batch proceeds. The batch is merged into the shared index
    /// only after the whole tree has been walked; existing keys outside the
    /// batch are untouched, colliding keys are overwritten.
    ///
    /// Files are classified in relative-path order, so if two files map to
    /// the same key the lexicographically last path wins.
    pub fn load_directory(
        &mut self,
        namespace: &str,
        root: &dyn PackFile,
    ) -> Result<LoadReport, TextureError> {
        if !root.exists() || !root.is_directory() {
            return Err(TextureError::InvalidRoot(root.abs_path()));
        }

        let mut files: Vec<(String, Arc<dyn PackFile>)> = root
            .list_files_recursively()
            .into_iter()
            .map(|file| (file.relative_path_from(root), Arc::from(file)))
            .collect();
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut batch: HashMap<String, TextureResource> = HashMap::new();
        let mut failures = Vec::new();
        for (relative_path, file) in files {
            match classify(namespace, &relative_path, &file) {
                Ok((key, resource)) => {
                    batch.insert(key, resource);
                }
                Err(e) => {
                    log::warn!("skipping {}: {}", file.abs_path(), e);
                    failures.push((PathBuf::from(file.abs_path()), e));
                }
            }
        }

        let loaded = batch.len();
        self.textures.extend(batch);
        Ok(LoadReport { loaded, failures })
    }

    /// Index every namespace of an on-disk resource pack
    ///
    /// Namespaces are the subdirectories of `<pack_root>/assets`; each
    /// namespace's `textures` directory is loaded under that namespace.
    /// Namespaces without a `textures` directory are skipped.
    pub fn load_pack(&mut self, pack_root: &Path) -> Result<LoadReport, TextureError> {
        let assets = pack_root.join("assets");
        if !assets.is_dir() {
            return Err(TextureError::InvalidRoot(assets.display().to_string()));
        }

        let mut namespaces: Vec<PathBuf> = std::fs::read_dir(&assets)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        namespaces.sort();

        let mut report = LoadReport::default();
        for dir in namespaces {
            let namespace = match dir.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let textures = dir.join("textures");
            if !textures.is_dir() {
                continue;
            }
            report.merge(self.load_directory(&namespace, &DiskPackFile::new(textures))?);
        }
        Ok(report)
    }

    /// Resolve a location, falling back to the missing-texture placeholder
    ///
    /// Never reports absence: an unknown location yields the shared
    /// placeholder, so callers always receive something renderable.
    pub fn texture(&self, location: &str) -> &TextureResource {
        self.texture_strict(location).unwrap_or(&MISSING_TEXTURE)
    }

    /// Resolve a location, or `None` when nothing is stored under it
    ///
    /// For callers that must distinguish "not present" from "present but
    /// the placeholder".
    pub fn texture_strict(&self, location: &str) -> Option<&TextureResource> {
        self.textures.get(&self.normalize(location))
    }

    /// Normalize a caller-supplied location into index key form
    fn normalize(&self, location: &str) -> String {
        let mut key = if location.contains(':') {
            location.to_string()
        } else {
            format!("{}:{}", self.default_namespace, location)
        };
        if key.ends_with(".png") {
            key.truncate(key.len() - 4);
        }
        key
    }

    /// Get the number of indexed resources
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Check if a location resolves to a stored resource
    pub fn contains(&self, location: &str) -> bool {
        self.textures.contains_key(&self.normalize(location))
    }

    /// Recompute the grass and foliage tint colormaps
    ///
    /// Resolves both well-known colormap locations strictly, reads a
    /// 256x256 pixel window from each hit (resampling when the image has
    /// different dimensions), and substitutes a uniform white table for a
    /// miss. Pushing both tables to the process-wide tint store is the only
    /// side effect; the index itself is not rebuilt.
    pub fn reload(&self) {
        let grass = self.colormap_pixels(registry::GRASS_COLORMAP_LOCATION);
        let foliage = self.colormap_pixels(registry::FOLIAGE_COLORMAP_LOCATION);
        tint::set_grass_and_foliage_colormaps(grass, foliage);
    }

    /// Derive one 65536-element colormap table from an indexed resource
    fn colormap_pixels(&self, location: &str) -> Vec<u32> {
        let resource = match self.texture_strict(location) {
            Some(resource) if resource.is_texture() => resource,
            _ => return vec![COLORMAP_FILL; tint::COLORMAP_PIXELS],
        };
        match resource.image() {
            Ok(image) => colormap_window(&image),
            Err(e) => {
                log::warn!("failed to decode colormap {}: {}", location, e);
                vec![COLORMAP_FILL; tint::COLORMAP_PIXELS]
            }
        }
    }
}

/// Classify one file into its index key and resource entry
///
/// The extension after the final `.` of the file name is stripped from the
/// key. Images are keyed by the stripped base; metadata entries are keyed
/// beside their image key with the `.mcmeta` suffix; everything else keeps
/// its extension appended.
fn classify(
    namespace: &str,
    relative_path: &str,
    file: &Arc<dyn PackFile>,
) -> Result<(String, TextureResource), TextureError> {
    let (base, extension) = split_extension(relative_path);
    let key = format!("{}:{}", namespace, base);

    match extension.to_ascii_lowercase().as_str() {
        "png" => Ok((
            key.clone(),
            TextureResource::Image {
                key,
                file: Arc::clone(file),
            },
        )),
        "mcmeta" => {
            let text = pack::read_text(file.as_ref())?;
            let (animation, properties) = meta::parse_mcmeta(&text)?;
            // Metadata sits beside its image: `stone.png.mcmeta` keys as
            // `stone.mcmeta`, one suffix away from the image key `stone`
            let base = key.strip_suffix(".png").unwrap_or(&key);
            let key = format!("{}.{}", base, extension);
            Ok((
                key.clone(),
                TextureResource::Meta {
                    key,
                    file: Arc::clone(file),
                    animation,
                    properties,
                },
            ))
        }
        _ => {
            let key = format!("{}.{}", key, extension);
            Ok((
                key.clone(),
                TextureResource::Blob {
                    key,
                    file: Arc::clone(file),
                },
            ))
        }
    }
}

/// Split a relative path into (base, extension) on the file name's final dot
fn split_extension(relative_path: &str) -> (&str, &str) {
    let name_start = relative_path.rfind('/').map_or(0, |i| i + 1);
    match relative_path[name_start..].rfind('.') {
        Some(dot) => {
            let dot = name_start + dot;
            (&relative_path[..dot], &relative_path[dot + 1..])
        }
        None => (relative_path, ""),
    }
}

/// Read the fixed 256x256 tint window as packed 0xAARRGGBB pixels, row-major
fn colormap_window(image: &RgbaImage) -> Vec<u32> {
    let size = tint::COLORMAP_SIZE as u32;
    let resized;
    let source = if image.dimensions() == (size, size) {
        image
    } else {
        resized = image::imageops::resize(image, size, size, FilterType::Nearest);
        &resized
    };
    source.pixels().map(|pixel| pack_argb(pixel.0)).collect()
}

fn pack_argb([r, g, b, a]: [u8; 4]) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path, color: [u8; 4]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(1, 1, Rgba(color)).save(path).unwrap();
    }

    fn load(manager: &mut TextureManager, namespace: &str, dir: &Path) -> LoadReport {
        manager
            .load_directory(namespace, &DiskPackFile::new(dir))
            .unwrap()
    }

    #[test]
    fn test_image_and_metadata_have_distinct_keys() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("blocks/stone.png"), [1, 2, 3, 255]);
        fs::write(
            dir.path().join("blocks/stone.png.mcmeta"),
            r#"{"animation":{"frametime":2}}"#,
        )
        .unwrap();

        let mut manager = TextureManager::with_default_namespace("ns");
        let report = load(&mut manager, "ns", dir.path());
        assert_eq!(report.loaded, 2);
        assert!(report.is_clean());

        let image = manager.texture_strict("ns:blocks/stone").unwrap();
        assert!(image.is_texture());

        let meta = manager.texture_strict("ns:blocks/stone.mcmeta").unwrap();
        assert!(!meta.is_texture());
        assert_eq!(meta.animation().unwrap().frametime, 2);
    }

    #[test]
    fn test_batch_tolerates_malformed_metadata() {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = TempDir::new().unwrap();
        for i in 0..10 {
            write_png(&dir.path().join(format!("stone_{}.png", i)), [i, 0, 0, 255]);
        }
        fs::write(dir.path().join("broken.png.mcmeta"), "{not json").unwrap();

        let mut manager = TextureManager::new();
        let report = load(&mut manager, "ns", dir.path());

        assert_eq!(report.loaded, 10);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.failures[0].1.is_fatal());
        assert_eq!(manager.len(), 10);
    }

    #[test]
    fn test_invalid_root_is_fatal_and_preserves_index() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("stone.png"), [1, 2, 3, 255]);

        let mut manager = TextureManager::new();
        load(&mut manager, "ns", dir.path());
        assert_eq!(manager.len(), 1);

        let missing_root = dir.path().join("nope");
        let err = manager
            .load_directory("ns", &DiskPackFile::new(&missing_root))
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, TextureError::InvalidRoot(_)));

        // A file is not a directory either
        let file_root = dir.path().join("stone.png");
        let err = manager
            .load_directory("ns", &DiskPackFile::new(&file_root))
            .unwrap_err();
        assert!(err.is_fatal());

        assert_eq!(manager.len(), 1);
        assert!(manager.contains("ns:stone"));
    }

    #[test]
    fn test_resolution_normalization() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("stone.png"), [9, 9, 9, 255]);

        let mut manager = TextureManager::with_default_namespace("ns");
        load(&mut manager, "ns", dir.path());

        for location in ["stone.png", "stone", "ns:stone", "ns:stone.png"] {
            let resource = manager.texture(location);
            assert!(!resource.is_missing(), "{} should resolve", location);
            assert_eq!(resource.key(), "ns:stone");
        }
    }

    #[test]
    fn test_permissive_fallback_never_absent() {
        let manager = TextureManager::new();
        assert!(manager.texture_strict("minecraft:unknown").is_none());

        let first = manager.texture("minecraft:unknown");
        assert!(first.is_missing());
        assert!(first.is_texture());

        let second = manager.texture("also:unknown");
        assert_eq!(
            first.image().unwrap().as_raw(),
            second.image().unwrap().as_raw()
        );
    }

    #[test]
    fn test_collision_last_path_wins() {
        let dir = TempDir::new().unwrap();
        // Both map to key "ns:a"; "a.png" sorts after "a.PNG" and wins
        write_png(&dir.path().join("a.PNG"), [0, 0, 255, 255]);
        write_png(&dir.path().join("a.png"), [255, 0, 0, 255]);

        let mut manager = TextureManager::new();
        let report = load(&mut manager, "ns", dir.path());
        assert_eq!(report.loaded, 1);

        let image = manager.texture("ns:a").image().unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_blob_and_extensionless_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sounds.json"), "{}").unwrap();
        fs::write(dir.path().join("README"), "hi").unwrap();

        let mut manager = TextureManager::new();
        load(&mut manager, "ns", dir.path());

        let blob = manager.texture_strict("ns:sounds.json").unwrap();
        assert!(!blob.is_texture());
        assert!(blob.image().is_err());

        // Extensionless files keep the empty-extension separator
        assert!(manager.contains("ns:README."));
    }

    #[test]
    fn test_load_pack_discovers_namespaces() {
        let dir = TempDir::new().unwrap();
        write_png(
            &dir.path().join("assets/minecraft/textures/block/dirt.png"),
            [1, 1, 1, 255],
        );
        write_png(
            &dir.path().join("assets/custom/textures/icon.png"),
            [2, 2, 2, 255],
        );
        // Namespace without a textures directory is skipped, not fatal
        fs::create_dir_all(dir.path().join("assets/empty/models")).unwrap();

        let mut manager = TextureManager::new();
        let report = manager.load_pack(dir.path()).unwrap();
        assert_eq!(report.loaded, 2);
        assert!(manager.contains("minecraft:block/dirt"));
        assert!(manager.contains("custom:icon"));
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("blocks/stone.png"), ("blocks/stone", "png"));
        assert_eq!(
            split_extension("blocks/stone.png.mcmeta"),
            ("blocks/stone.png", "mcmeta")
        );
        assert_eq!(split_extension("README"), ("README", ""));
        // A dot in a directory name is not an extension
        assert_eq!(split_extension("v1.2/stone"), ("v1.2/stone", ""));
    }

    #[test]
    fn test_reload_colormaps() {
        let _guard = tint::test_guard();

        // Without any colormap both tables are uniform white
        let manager = TextureManager::new();
        manager.reload();
        assert_eq!(tint::grass_colormap(), vec![0xFFFFFF; tint::COLORMAP_PIXELS]);
        assert_eq!(
            tint::foliage_colormap(),
            vec![0xFFFFFF; tint::COLORMAP_PIXELS]
        );

        // With a real 256x256 grass colormap the window is sampled row-major
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("colormap/grass.png");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_fn(256, 256, |x, y| Rgba([x as u8, y as u8, 7, 255]))
            .save(&path)
            .unwrap();

        let mut manager = TextureManager::new();
        load(&mut manager, "minecraft", dir.path());
        manager.reload();

        let grass = tint::grass_colormap();
        assert_eq!(grass.len(), tint::COLORMAP_PIXELS);
        assert_eq!(grass[0], 0xFF000007);
        // Pixel (x=5, y=2) lives at row-major index 2 * 256 + 5
        assert_eq!(grass[2 * 256 + 5], 0xFF050207);
        assert_eq!(tint::grass_color(5, 2), Some(0xFF050207));
        // Foliage is still absent and stays white
        assert_eq!(tint::foliage_color(0, 0), Some(0xFFFFFF));
    }

    #[test]
    fn test_reload_resamples_undersized_colormap() {
        let _guard = tint::test_guard();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("colormap/grass.png");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut small = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        small.put_pixel(1, 1, Rgba([40, 50, 60, 255]));
        small.save(&path).unwrap();

        let mut manager = TextureManager::new();
        load(&mut manager, "minecraft", dir.path());
        manager.reload();

        let grass = tint::grass_colormap();
        assert_eq!(grass.len(), tint::COLORMAP_PIXELS);
        assert_eq!(grass[0], 0xFF0A141E);
        assert_eq!(grass[tint::COLORMAP_PIXELS - 1], 0xFF28323C);
    }

    #[test]
    fn test_reload_undecodable_colormap_falls_back_to_white() {
        let _guard = tint::test_guard();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("colormap/grass.png");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"not a png").unwrap();

        let mut manager = TextureManager::new();
        load(&mut manager, "minecraft", dir.path());
        manager.reload();

        assert_eq!(tint::grass_colormap(), vec![0xFFFFFF; tint::COLORMAP_PIXELS]);
    }
}
