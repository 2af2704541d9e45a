// pixfit/src/processors/resizer.rs
use crate::core::{ImageToolError, Rect, ResizeAlgorithm, Result};
use image::{imageops::FilterType, DynamicImage};

pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Copies `rect` out of `image` into a new buffer with its origin at (0, 0).
    pub fn crop_copy(&self, image: &DynamicImage, rect: Rect) -> Result<DynamicImage> {
        let fits_x = rect.x.checked_add(rect.width).is_some_and(|r| r <= image.width());
        let fits_y = rect.y.checked_add(rect.height).is_some_and(|b| b <= image.height());

        if rect.width == 0 || rect.height == 0 || !fits_x || !fits_y {
            return Err(ImageToolError::ProcessingError(format!(
                "Crop {}x{} at ({}, {}) does not fit a {}x{} image",
                rect.width,
                rect.height,
                rect.x,
                rect.y,
                image.width(),
                image.height()
            )));
        }

        log::debug!(
            "Cropping {}x{} at ({}, {}) from {}x{}",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            image.width(),
            image.height()
        );

        Ok(image.crop_imm(rect.x, rect.y, rect.width, rect.height))
    }

    /// Resamples to exactly `width` x `height`.
    pub fn resample(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resample");
            return image.clone();
        }

        log::debug!(
            "Resampling image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );

        image.resize_exact(width, height, self.filter_type())
    }

    fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::default())
    }
}
