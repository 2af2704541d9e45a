// pixfit/src/core/mod.rs
pub mod planner;
pub mod processor;

use image::ImageFormat;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MIN_SIZE: u32 = 200;
pub const DEFAULT_MAX_SIZE: u32 = 1200;
pub const DEFAULT_ASPECT: f64 = 3.0 / 4.0;

const MAX_DIMENSION: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeAlgorithm {
    Bilinear,
    Bicubic,
    #[default]
    Lanczos3,
}

#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Images at or below this size on both axes are passed through.
    pub min_size: u32,
    /// Longest side of the output after cropping.
    pub max_size: u32,
    /// Width / height ratio the crop aims for.
    pub dest_aspect: f64,
    pub algorithm: ResizeAlgorithm,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            dest_aspect: DEFAULT_ASPECT,
            algorithm: ResizeAlgorithm::default(),
        }
    }
}

impl FitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_size == 0 || self.max_size == 0 {
            return Err(ImageToolError::InvalidParameter(
                "Sizes must be greater than zero".to_string(),
            ));
        }

        if self.min_size >= self.max_size {
            return Err(ImageToolError::InvalidParameter(format!(
                "Minimum size {} must be below maximum size {}",
                self.min_size, self.max_size
            )));
        }

        if self.max_size > MAX_DIMENSION {
            return Err(ImageToolError::InvalidParameter(
                "Dimensions too large (max 100,000 pixels)".to_string(),
            ));
        }

        if !self.dest_aspect.is_finite() || self.dest_aspect <= 0.0 {
            return Err(ImageToolError::InvalidParameter(format!(
                "Aspect ratio must be a positive number, got {}",
                self.dest_aspect
            )));
        }

        Ok(())
    }
}

/// The encodings a source image may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Gif,
    Jpeg,
    Png,
    Bmp,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::Gif,
        SourceFormat::Jpeg,
        SourceFormat::Png,
        SourceFormat::Bmp,
    ];

    /// Maps a detected `image` format onto the supported set.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Gif => Some(SourceFormat::Gif),
            ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
            ImageFormat::Png => Some(SourceFormat::Png),
            ImageFormat::Bmp => Some(SourceFormat::Bmp),
            _ => None,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            SourceFormat::Gif => ImageFormat::Gif,
            SourceFormat::Jpeg => ImageFormat::Jpeg,
            SourceFormat::Png => ImageFormat::Png,
            SourceFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Gif => "GIF",
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::Png => "PNG",
            SourceFormat::Bmp => "BMP",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: SourceFormat,
}

/// A region of the source pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPlan {
    pub crop: Rect,
    pub output_width: u32,
    pub output_height: u32,
    /// Aspect that drove the scale step; the source's own aspect when the
    /// source is already wider than the requested one.
    pub effective_aspect: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformPlan {
    /// Source is small enough on both axes and is returned untouched.
    Skip,
    Apply(CropPlan),
}

impl TransformPlan {
    pub fn is_skip(&self) -> bool {
        matches!(self, TransformPlan::Skip)
    }

    pub fn crop_plan(&self) -> Option<&CropPlan> {
        match self {
            TransformPlan::Skip => None,
            TransformPlan::Apply(plan) => Some(plan),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub file_name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub transformed_count: usize,
    pub skipped_count: usize,
    pub unsupported_count: usize,
    /// Earlier outputs found beside their source and not reprocessed.
    pub excluded_count: usize,
    pub errors: Vec<(String, String)>,
}

#[derive(Error, Debug)]
pub enum ImageToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Security error: {0}")]
    SecurityError(String),
}

pub type Result<T> = std::result::Result<T, ImageToolError>;

pub fn validate_config(config: &FitConfig) -> Result<()> {
    config.validate()
}
