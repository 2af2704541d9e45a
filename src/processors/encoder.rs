// pixfit/src/processors/encoder.rs
use crate::core::{Result, SourceFormat};
use crate::processors::formats;
use image::DynamicImage;
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

/// Writes images in a given format, replacing the destination atomically.
#[derive(Default)]
pub struct Encoder;

impl Encoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, image: &DynamicImage, format: SourceFormat, path: &Path) -> Result<()> {
        log::debug!(
            "Saving {}x{} image to {} as {}",
            image.width(),
            image.height(),
            path.display(),
            format
        );

        let bytes = self.encode_to_bytes(image, format)?;
        self.write_atomic(path, &bytes)?;
        self.log_save_result(path)
    }

    pub fn encode_to_bytes(&self, image: &DynamicImage, format: SourceFormat) -> Result<Vec<u8>> {
        (formats::handler(format).encode)(image)
    }

    // The temp file lives next to the destination so the rename stays on
    // one filesystem.
    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = Builder::new();
        builder.prefix(".pixfit-");
        // Temp files default to 0600; open with 0666 so the umask decides,
        // as it does for any other newly created file.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }

        let mut temp = builder.tempfile_in(dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn log_save_result(&self, path: &Path) -> Result<()> {
        let file_size = std::fs::metadata(path)?.len();
        log::info!("Saved image: {} ({} bytes)", path.display(), file_size);
        Ok(())
    }
}
