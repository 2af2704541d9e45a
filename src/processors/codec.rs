// pixfit/src/processors/codec.rs
//! The pixel-level capabilities the transformer needs.
//!
//! [`ImageProcessor`](crate::ImageProcessor) only talks to an [`ImageCodec`],
//! so tests can swap in a recording double and check exactly which
//! operations ran.

use crate::core::{ImageMetadata, Rect, ResizeAlgorithm, Result, SourceFormat};
use crate::processors::{Encoder, Loader, Resizer};
use image::DynamicImage;
use std::path::Path;

pub trait ImageCodec: Sync {
    /// Detect the source format; `None` when unsupported.
    fn detect(&self, path: &Path) -> Result<Option<SourceFormat>>;

    /// Dimensions and format from the header, without decoding pixels.
    fn read_metadata(&self, path: &Path) -> Result<Option<ImageMetadata>>;

    fn decode(&self, path: &Path, format: SourceFormat) -> Result<DynamicImage>;

    fn crop_copy(&self, image: &DynamicImage, rect: Rect) -> Result<DynamicImage>;

    /// Interpolating resample to exactly `width` x `height`.
    fn resample(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage;

    fn encode(&self, image: &DynamicImage, format: SourceFormat, path: &Path) -> Result<()>;
}

/// Production codec backed by the `image` crate.
pub struct StandardCodec {
    loader: Loader,
    resizer: Resizer,
    encoder: Encoder,
}

impl StandardCodec {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self {
            loader: Loader::new(),
            resizer: Resizer::new(algorithm),
            encoder: Encoder::new(),
        }
    }

    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.loader = loader;
        self
    }
}

impl Default for StandardCodec {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::default())
    }
}

impl ImageCodec for StandardCodec {
    fn detect(&self, path: &Path) -> Result<Option<SourceFormat>> {
        self.loader.detect(path)
    }

    fn read_metadata(&self, path: &Path) -> Result<Option<ImageMetadata>> {
        self.loader.read_metadata(path)
    }

    fn decode(&self, path: &Path, format: SourceFormat) -> Result<DynamicImage> {
        self.loader.decode(path, format)
    }

    fn crop_copy(&self, image: &DynamicImage, rect: Rect) -> Result<DynamicImage> {
        self.resizer.crop_copy(image, rect)
    }

    fn resample(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        self.resizer.resample(image, width, height)
    }

    fn encode(&self, image: &DynamicImage, format: SourceFormat, path: &Path) -> Result<()> {
        self.encoder.encode(image, format, path)
    }
}
