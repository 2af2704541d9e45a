pub mod cli;
mod core;
mod processors;
mod utils;

pub use cli::{Algorithm, Cli, Commands, FitArgs};
pub use crate::core::planner::{bounded_scale, plan, should_skip};
pub use crate::core::processor::ImageProcessor;
pub use crate::core::{
    validate_config, CropPlan, FitConfig, ImageMetadata, ImageToolError, ProcessingStats, Rect,
    ResizeAlgorithm, Result, SourceFormat, TransformPlan, TransformResult,
};
pub use processors::{BatchProcessor, Encoder, ImageCodec, Loader, Resizer, StandardCodec};
pub use utils::{
    calculate_aspect_ratio, file_name_of, format_file_size, is_candidate_image,
    is_generated_output, sized_output_path, sized_source_path,
};

pub mod prelude {
    pub use crate::{
        BatchProcessor, FitConfig, ImageCodec, ImageProcessor, ResizeAlgorithm, StandardCodec,
        TransformPlan, TransformResult,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
