// pixfit/src/utils/mod.rs
use crate::core::{ImageToolError, Result};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Extensions worth handing to the transformer when walking directories.
/// Detection is content-based, so this is only a cheap pre-filter.
const CANDIDATE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];

/// Sibling path with `_{width}x{height}` inserted before the last extension.
///
/// `photo.jpg` becomes `photo_600x450.jpg`. Only the file name is touched;
/// a name without an extension gets the suffix appended.
pub fn sized_output_path(source: &Path, width: u32, height: u32) -> PathBuf {
    let suffix = format!("_{}x{}", width, height);
    let stem = source.file_stem().unwrap_or_default();

    let mut name = OsString::from(stem);
    name.push(&suffix);
    if let Some(extension) = source.extension() {
        name.push(".");
        name.push(extension);
    }

    source.with_file_name(name)
}

/// Base name of `path` as a display string.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Inverse of [`sized_output_path`]: the path `path` would have been
/// generated from, if its stem ends in a `_{W}x{H}` suffix.
pub fn sized_source_path(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let (base, suffix) = stem.rsplit_once('_')?;
    let (w, h) = suffix.split_once('x')?;

    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if base.is_empty() || !is_number(w) || !is_number(h) {
        return None;
    }

    let mut name = OsString::from(base);
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    Some(path.with_file_name(name))
}

/// True when `path` is named like an output and its source sits next to it.
///
/// A file such as `wallpaper_1920x1080.jpg` with no `wallpaper.jpg` beside
/// it is an ordinary image.
pub fn is_generated_output(path: &Path) -> bool {
    sized_source_path(path).is_some_and(|source| source.is_file())
}

pub fn is_candidate_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| CANDIDATE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn validate_path(path: &Path) -> Result<()> {
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ImageToolError::SecurityError(format!(
            "Path traversal detected in {}",
            path.display()
        )));
    }

    Ok(())
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

pub fn calculate_aspect_ratio(width: u32, height: u32) -> f64 {
    if height == 0 {
        0.0
    } else {
        width as f64 / height as f64
    }
}
