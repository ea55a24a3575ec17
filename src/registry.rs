//! Well-known resource locations
//!
//! Constants for the namespace and resource locations every pack is
//! expected to provide. Kept in one place so the manager and its callers
//! agree on spelling.

/// Namespace assumed when a resource location carries none
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Location of the grass tint colormap
pub const GRASS_COLORMAP_LOCATION: &str = "colormap/grass";

/// Location of the foliage tint colormap
pub const FOLIAGE_COLORMAP_LOCATION: &str = "colormap/foliage";
