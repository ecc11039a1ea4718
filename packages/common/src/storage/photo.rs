use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Extension used when the suggested name carries none.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Which of the two stored variants of a captured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoRole {
    /// Downscaled variant shown in the gallery.
    Compressed,
    /// Full-quality variant for viewing and download.
    Original,
}

impl PhotoRole {
    /// File name suffix for this variant.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Compressed => "compressed",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for PhotoRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Shared `<timestamp>_<random>` prefix for the two files of one save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoStem {
    stem: String,
    extension: String,
}

impl PhotoStem {
    /// Build a fresh stem for `now`, keeping the extension of `suggested_name`.
    pub fn new(now: DateTime<Utc>, suggested_name: &str) -> Self {
        Self {
            stem: format!("{}_{}", now.format("%Y%m%d%H%M%S"), Uuid::new_v4().simple()),
            extension: photo_extension(suggested_name),
        }
    }

    /// File name for one variant, e.g. `20240101120000_<hex>_original.jpg`.
    pub fn file_name(&self, role: PhotoRole) -> String {
        format!("{}_{}{}", self.stem, role.suffix(), self.extension)
    }
}

/// Normalized extension (with leading dot) taken from a suggested file name.
///
/// Falls back to [`DEFAULT_EXTENSION`] for missing, overlong or
/// non-alphanumeric extensions.
pub fn photo_extension(suggested_name: &str) -> String {
    Path::new(suggested_name.trim())
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}
