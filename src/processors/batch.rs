// pixfit/src/processors/batch.rs
use crate::core::processor::ImageProcessor;
use crate::core::{FitConfig, ImageToolError, ProcessingStats, Result, TransformResult};
use crate::utils::{is_candidate_image, is_generated_output};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of one file inside a batch run.
enum Outcome {
    Transformed(TransformResult),
    Skipped,
    Unsupported,
}

pub struct BatchProcessor {
    processor: ImageProcessor,
    thread_pool: Option<rayon::ThreadPool>,
    show_progress: bool,
}

impl BatchProcessor {
    pub fn new(config: FitConfig, max_threads: usize) -> Result<Self> {
        let processor = ImageProcessor::new_checked(config)?;

        // Zero threads means rayon's global pool.
        let thread_pool = if max_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build()
                .map_err(|e| {
                    ImageToolError::ProcessingError(format!("Failed to create thread pool: {}", e))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            processor,
            thread_pool,
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Transforms every candidate image under `input_dir` in parallel.
    ///
    /// Per-file failures are collected in the returned stats rather than
    /// aborting the run. Outputs of an earlier run (a `_{W}x{H}` name whose
    /// source sits beside it) are counted as excluded so reruns don't stack
    /// suffixes.
    pub fn process_directory(&self, input_dir: &Path, recursive: bool) -> Result<ProcessingStats> {
        self.validate_paths(input_dir)?;

        let (image_paths, excluded_count) = self.collect_image_paths(input_dir, recursive);

        if image_paths.is_empty() {
            log::warn!("No image files found in {}", input_dir.display());
            return Ok(ProcessingStats {
                excluded_count,
                ..Default::default()
            });
        }

        log::info!(
            "Processing {} images from {}",
            image_paths.len(),
            input_dir.display()
        );

        let pb = self.create_progress_bar(image_paths.len());

        let run = || -> Vec<(PathBuf, Result<Outcome>)> {
            image_paths
                .par_iter()
                .progress_with(pb.clone())
                .map(|path| (path.clone(), self.process_one(path)))
                .collect()
        };

        let results = match &self.thread_pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let mut stats = ProcessingStats {
            excluded_count,
            ..Default::default()
        };
        for (path, result) in results {
            match result {
                Ok(Outcome::Transformed(output)) => {
                    log::debug!("{} -> {}", path.display(), output.path.display());
                    stats.transformed_count += 1;
                }
                Ok(Outcome::Skipped) => stats.skipped_count += 1,
                Ok(Outcome::Unsupported) => stats.unsupported_count += 1,
                Err(e) => {
                    log::warn!("Failed to process {}: {}", path.display(), e);
                    stats
                        .errors
                        .push((path.display().to_string(), e.to_string()));
                }
            }
        }

        pb.finish_with_message(format!(
            "Transformed {}, skipped {}, unsupported {}, excluded {}, failed {}",
            stats.transformed_count,
            stats.skipped_count,
            stats.unsupported_count,
            stats.excluded_count,
            stats.errors.len()
        ));

        Ok(stats)
    }

    fn process_one(&self, path: &Path) -> Result<Outcome> {
        Ok(match self.processor.transform(path)? {
            Some(result) if result.path == path => Outcome::Skipped,
            Some(result) => Outcome::Transformed(result),
            None => Outcome::Unsupported,
        })
    }

    /// Candidate images under `input_dir`, plus how many earlier outputs
    /// were left out.
    fn collect_image_paths(&self, input_dir: &Path, recursive: bool) -> (Vec<PathBuf>, usize) {
        let walker = if recursive {
            WalkDir::new(input_dir)
        } else {
            WalkDir::new(input_dir).max_depth(1)
        };

        let (excluded, mut paths): (Vec<PathBuf>, Vec<PathBuf>) = walker
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_candidate_image(path))
            .partition(|path| is_generated_output(path));

        for path in &excluded {
            log::info!("Not reprocessing earlier output: {}", path.display());
        }

        paths.sort();
        (paths, excluded.len())
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }

    pub fn validate_paths(&self, input_dir: &Path) -> Result<()> {
        crate::utils::validate_path(input_dir)?;

        if !input_dir.exists() {
            return Err(ImageToolError::InvalidParameter(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }

        if !input_dir.is_dir() {
            return Err(ImageToolError::InvalidParameter(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        Ok(())
    }
}
