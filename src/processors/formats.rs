// pixfit/src/processors/formats.rs
//! Per-format decode/encode handlers.
//!
//! Each supported [`SourceFormat`] maps to one [`FormatHandler`]. Adding a
//! format means adding a variant, a handler static and a [`handler`] arm;
//! nothing else branches on the format.

use crate::core::{ImageToolError, Result, SourceFormat};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

pub type DecodeFn = fn(&Path) -> Result<DynamicImage>;
pub type EncodeFn = fn(&DynamicImage) -> Result<Vec<u8>>;

pub struct FormatHandler {
    pub format: SourceFormat,
    pub decode: DecodeFn,
    pub encode: EncodeFn,
}

static GIF: FormatHandler = FormatHandler {
    format: SourceFormat::Gif,
    decode: decode_gif,
    encode: encode_gif,
};

static JPEG: FormatHandler = FormatHandler {
    format: SourceFormat::Jpeg,
    decode: decode_jpeg,
    encode: encode_jpeg,
};

static PNG: FormatHandler = FormatHandler {
    format: SourceFormat::Png,
    decode: decode_png,
    encode: encode_png,
};

static BMP: FormatHandler = FormatHandler {
    format: SourceFormat::Bmp,
    decode: decode_bmp,
    encode: encode_bmp,
};

pub fn handler(format: SourceFormat) -> &'static FormatHandler {
    match format {
        SourceFormat::Gif => &GIF,
        SourceFormat::Jpeg => &JPEG,
        SourceFormat::Png => &PNG,
        SourceFormat::Bmp => &BMP,
    }
}

fn decode_with(path: &Path, format: ImageFormat) -> Result<DynamicImage> {
    let file = File::open(path)?;
    ImageReader::with_format(BufReader::new(file), format)
        .decode()
        .map_err(|e| {
            ImageToolError::Codec(format!("Failed to decode {}: {}", path.display(), e))
        })
}

fn encode_with(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).map_err(|e| {
        ImageToolError::Codec(format!("Failed to encode {:?}: {}", format, e))
    })?;
    Ok(buffer.into_inner())
}

fn decode_gif(path: &Path) -> Result<DynamicImage> {
    decode_with(path, ImageFormat::Gif)
}

fn decode_jpeg(path: &Path) -> Result<DynamicImage> {
    decode_with(path, ImageFormat::Jpeg)
}

fn decode_png(path: &Path) -> Result<DynamicImage> {
    decode_with(path, ImageFormat::Png)
}

fn decode_bmp(path: &Path) -> Result<DynamicImage> {
    decode_with(path, ImageFormat::Bmp)
}

// GIF frames are always written from RGBA.
fn encode_gif(image: &DynamicImage) -> Result<Vec<u8>> {
    encode_with(&DynamicImage::ImageRgba8(image.to_rgba8()), ImageFormat::Gif)
}

// JPEG has no alpha channel.
fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    encode_with(&DynamicImage::ImageRgb8(image.to_rgb8()), ImageFormat::Jpeg)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    encode_with(image, ImageFormat::Png)
}

fn encode_bmp(image: &DynamicImage) -> Result<Vec<u8>> {
    let image = if image.color().has_alpha() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    };
    encode_with(&image, ImageFormat::Bmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_format_has_its_own_handler() {
        for format in SourceFormat::ALL {
            assert_eq!(handler(format).format, format);
        }
    }

    #[test]
    fn encoders_emit_the_right_container() {
        let image = DynamicImage::new_rgba8(8, 6);
        for format in SourceFormat::ALL {
            let bytes = (handler(format).encode)(&image).unwrap();
            let guessed = image::guess_format(&bytes).unwrap();
            assert_eq!(guessed, format.image_format(), "{format}");
        }
    }

    #[test]
    fn jpeg_encoder_drops_alpha() {
        let image = DynamicImage::new_rgba8(4, 4);
        let bytes = encode_jpeg(&image).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(!decoded.color().has_alpha());
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }
}
