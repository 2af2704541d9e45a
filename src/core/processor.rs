// pixfit/src/core/processor.rs
use super::planner;
use super::{FitConfig, ImageMetadata, ImageToolError, Result, TransformPlan, TransformResult};
use crate::processors::{ImageCodec, StandardCodec};
use crate::utils::{file_name_of, sized_output_path, validate_path};
use std::path::Path;

/// Crops one source image to the configured aspect and bounds its size.
pub struct ImageProcessor<C: ImageCodec = StandardCodec> {
    config: FitConfig,
    codec: C,
}

impl ImageProcessor {
    /// Builds a processor without validating `config`; callers taking
    /// untrusted settings should use [`ImageProcessor::new_checked`].
    pub fn new(config: FitConfig) -> Self {
        let codec = StandardCodec::new(config.algorithm);
        Self { config, codec }
    }

    /// Like [`ImageProcessor::new`], rejecting an invalid configuration.
    pub fn new_checked(config: FitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }
}

impl<C: ImageCodec> ImageProcessor<C> {
    pub fn with_codec(config: FitConfig, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    pub fn plan_for(&self, metadata: &ImageMetadata) -> TransformPlan {
        planner::plan(
            metadata.width,
            metadata.height,
            self.config.min_size,
            self.config.max_size,
            self.config.dest_aspect,
        )
    }

    /// Header metadata plus the plan `transform` would follow.
    ///
    /// `Ok(None)` when the format is not supported.
    pub fn inspect<P: AsRef<Path>>(&self, source: P) -> Result<Option<(ImageMetadata, TransformPlan)>> {
        let source = source.as_ref();
        validate_path(source)?;

        Ok(self
            .codec
            .read_metadata(source)?
            .map(|metadata| (metadata, self.plan_for(&metadata))))
    }

    /// Writes `name_{W}x{H}.ext` next to `source` and describes it.
    ///
    /// Small images come back as-is without their pixels being decoded.
    /// `Ok(None)` means the format is not supported, which callers should
    /// treat as nothing to do. Decode and encode failures are errors.
    pub fn transform<P: AsRef<Path>>(&self, source: P) -> Result<Option<TransformResult>> {
        let source = source.as_ref();
        validate_path(source)?;

        let Some(metadata) = self.codec.read_metadata(source)? else {
            log::info!("Skipping unsupported image: {}", source.display());
            return Ok(None);
        };

        if planner::should_skip(metadata.width, metadata.height, self.config.min_size) {
            log::info!(
                "Image {} is {}x{}, at or below {}px, leaving it untouched",
                source.display(),
                metadata.width,
                metadata.height,
                self.config.min_size
            );
            return Ok(Some(TransformResult {
                file_name: file_name_of(source),
                path: source.to_path_buf(),
                width: metadata.width,
                height: metadata.height,
            }));
        }

        let image = self.codec.decode(source, metadata.format)?;

        // Plan on the decoded size; headers can disagree with the pixels.
        let plan = planner::plan(
            image.width(),
            image.height(),
            self.config.min_size,
            self.config.max_size,
            self.config.dest_aspect,
        );
        let Some(plan) = plan.crop_plan() else {
            return Err(ImageToolError::Codec(format!(
                "Decoded {} as {}x{}, smaller than its header claimed",
                source.display(),
                image.width(),
                image.height()
            )));
        };

        let cropped = self.codec.crop_copy(&image, plan.crop)?;
        drop(image);
        let scaled = self
            .codec
            .resample(&cropped, plan.output_width, plan.output_height);
        drop(cropped);

        let output_path = sized_output_path(source, plan.output_width, plan.output_height);
        self.codec.encode(&scaled, metadata.format, &output_path)?;

        log::info!(
            "Transformed {} ({}x{}) into {} ({}x{})",
            source.display(),
            metadata.width,
            metadata.height,
            output_path.display(),
            plan.output_width,
            plan.output_height
        );

        Ok(Some(TransformResult {
            file_name: file_name_of(&output_path),
            path: output_path,
            width: plan.output_width,
            height: plan.output_height,
        }))
    }
}
