use crate::MediaInspectorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::{DirEntry, WalkDir};

/// Significant digits used when printing a decimal value.
const SIGNIFICANT_DIGITS: i32 = 6;

/// Config files checked by [`default_config_file`], highest priority first.
pub const CONFIG_CANDIDATES: [&str; 2] = [
    "/usr/lib/droidian/device/droidian-camera.conf",
    "/etc/droidian-camera.conf",
];

/// Age after which the gstreamer plugin registry cache is rebuilt.
pub const GSTREAMER_CACHE_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Strips a URI scheme from a file locator: everything up to and including the first
/// colon is removed. Locators without a colon are returned unchanged.
///
/// ```rust
/// use media_inspector::utils::strip_scheme;
///
/// assert_eq!(strip_scheme("file:///home/me/IMG_0001.jpg"), "///home/me/IMG_0001.jpg");
/// assert_eq!(strip_scheme("/home/me/IMG_0001.jpg"), "/home/me/IMG_0001.jpg");
/// ```
pub fn strip_scheme(locator: &str) -> &str {
    locator
        .split_once(':')
        .map_or(locator, |(_, path)| path)
}

/// Whether a file goes through the EXIF parser or the container report parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Routes by file extension (case-insensitive). Unknown extensions are `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" | "jpe" | "jfif" | "tif" | "tiff" => Some(Self::Image),
            "mkv" | "mka" | "mk3d" | "webm" => Some(Self::Video),
            _ => None,
        }
    }
}

/// Prints a number with up to six significant digits and no trailing zeros,
/// e.g. `2.8`, `-0.333333`, `4.44`, `200`.
///
/// Like C's `%g`, numbers whose decimal exponent after rounding falls outside
/// `-4..6` are written in exponent notation: `1e-05`, `1.23457e+06`.
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let precision = (SIGNIFICANT_DIGITS - 1) as usize;
    let scientific = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..SIGNIFICANT_DIGITS).contains(&exponent) {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        trim_fraction(format!("{value:.decimals$}"))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa.to_string()),
            exponent.abs()
        )
    }
}

/// Drops trailing fractional zeros, and the point if nothing is left after it.
fn trim_fraction(mut text: String) -> String {
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    text
}

/// Checks if a directory entry is hidden (starts with '.').
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

/// Recursively lists all files below `dir`, optionally skipping hidden entries.
///
/// A hidden directory is not descended into. I/O errors met while walking are returned.
pub fn list_files_walkdir_filtered(
    dir: &Path,
    include_hidden: bool,
) -> Result<Vec<PathBuf>, walkdir::Error> {
    WalkDir::new(dir)
        .into_iter()
        // the root itself is never filtered, even if it's a dot-directory
        .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e))
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect()
}

/// Returns the first of `candidates` that exists.
pub fn find_config_file<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|candidate| AsRef::<Path>::as_ref(candidate))
        .find(|path| path.exists())
        .map(Path::to_path_buf)
}

/// The device camera config file, if one is installed.
pub fn default_config_file() -> Option<PathBuf> {
    find_config_file(&CONFIG_CANDIDATES)
}

/// Creates `relative` (and any missing parents) below `base`. A leading `/` on
/// `relative` is ignored, so the result always stays under `base`. Existing
/// directories are fine.
pub fn create_directory_under(
    base: &Path,
    relative: &Path,
) -> Result<PathBuf, MediaInspectorError> {
    let relative = relative.strip_prefix("/").unwrap_or(relative);
    let path = base.join(relative);
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// Creates `relative` (and any missing parents) below the user's home directory.
pub fn create_home_directory(relative: &Path) -> Result<PathBuf, MediaInspectorError> {
    let home = dirs::home_dir().ok_or(MediaInspectorError::NoHomeDirectory)?;
    create_directory_under(&home, relative)
}

/// Removes `dir` recursively when `marker` exists and was last modified more than
/// `max_age` ago. Returns whether the directory was removed.
pub fn evict_stale_cache(
    marker: &Path,
    dir: &Path,
    max_age: Duration,
) -> Result<bool, MediaInspectorError> {
    if !marker.exists() {
        return Ok(false);
    }
    let modified = std::fs::metadata(marker)?.modified()?;
    let is_stale = modified
        .checked_add(max_age)
        .is_some_and(|expiry| expiry < SystemTime::now());
    if !is_stale {
        return Ok(false);
    }

    tracing::debug!("removing stale cache directory {}", dir.display());
    std::fs::remove_dir_all(dir)?;
    Ok(true)
}

/// Drops the gstreamer plugin registry cache once it's a week old, so the camera
/// pipeline rebuilds it on next start.
pub fn evict_gstreamer_cache() -> Result<bool, MediaInspectorError> {
    let home = dirs::home_dir().ok_or(MediaInspectorError::NoHomeDirectory)?;
    let dir = home.join(".cache/gstreamer-1.0");
    let marker = dir.join(format!("registry.{}.bin", std::env::consts::ARCH));
    evict_stale_cache(&marker, &dir, GSTREAMER_CACHE_MAX_AGE)
}
