// pixfit/src/processors/loader.rs
use crate::core::{ImageMetadata, ImageToolError, Result, SourceFormat};
use crate::processors::formats;
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    /// Sniffs the file contents, falling back to the extension.
    ///
    /// Returns `None` for anything outside the supported formats.
    pub fn detect(&self, path: &Path) -> Result<Option<SourceFormat>> {
        let (_, format) = self.open_sniffed(path)?;
        Ok(format)
    }

    /// Reads dimensions from the header only; no pixel data is decoded.
    pub fn read_metadata(&self, path: &Path) -> Result<Option<ImageMetadata>> {
        let (reader, format) = self.open_sniffed(path)?;
        let Some(format) = format else {
            return Ok(None);
        };

        let (width, height) = reader.into_dimensions()?;

        if width == 0 || height == 0 {
            return Err(ImageToolError::Codec(format!(
                "Image {} reports empty dimensions {}x{}",
                path.display(),
                width,
                height
            )));
        }

        log::debug!(
            "Read {} header: {}x{} pixels from {}",
            format,
            width,
            height,
            path.display()
        );

        Ok(Some(ImageMetadata {
            width,
            height,
            format,
        }))
    }

    pub fn decode(&self, path: &Path, format: SourceFormat) -> Result<DynamicImage> {
        log::debug!("Decoding {} image from: {}", format, path.display());

        let image = (formats::handler(format).decode)(path)?;

        if let Some((max_w, max_h)) = self.max_dimensions {
            if image.width() > max_w || image.height() > max_h {
                return Err(ImageToolError::Codec(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    image.width(),
                    image.height(),
                    max_w,
                    max_h
                )));
            }
        }

        log::info!(
            "Loaded image: {}x{} pixels, color: {:?}",
            image.width(),
            image.height(),
            image.color()
        );

        Ok(image)
    }

    /// Opens `path` once and guesses its format; the reader is positioned
    /// at the start so it can still be used for the header.
    fn open_sniffed(
        &self,
        path: &Path,
    ) -> Result<(ImageReader<BufReader<File>>, Option<SourceFormat>)> {
        self.validate_path(path)?;

        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let format = reader.format().and_then(SourceFormat::from_image_format);

        if format.is_none() {
            log::debug!(
                "Unsupported format {:?} for {}",
                reader.format(),
                path.display()
            );
        }

        Ok((reader, format))
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ImageToolError::InvalidParameter(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(ImageToolError::InvalidParameter(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn metadata_comes_from_content_not_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("really_a_png.jpg");
        RgbImage::new(40, 30)
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let metadata = Loader::new().read_metadata(&path).unwrap().unwrap();
        assert_eq!(
            metadata,
            ImageMetadata {
                width: 40,
                height: 30,
                format: SourceFormat::Png,
            }
        );
    }

    #[test]
    fn unsupported_container_has_no_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.tif");
        RgbImage::new(8, 8).save(&path).unwrap();

        let loader = Loader::new();
        assert_eq!(loader.detect(&path).unwrap(), None);
        assert_eq!(loader.read_metadata(&path).unwrap(), None);
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        assert!(matches!(
            Loader::new().read_metadata(&path),
            Err(ImageToolError::InvalidParameter(_))
        ));
    }
}
