use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;
use pixfit::{
    calculate_aspect_ratio, format_file_size, plan, BatchProcessor, Cli, Commands, FitConfig,
    ImageProcessor, TransformPlan,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let config = cli.fit.to_config();
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Fit { input } => process_fit(input, config),
        Commands::Batch {
            input,
            recursive,
            threads,
            no_progress,
        } => process_batch(input, config, recursive, threads, no_progress),
        Commands::Plan { width, height } => process_plan(width, height, &config),
        Commands::Info { input } => process_info(input, config),
    }
}

fn process_fit(input: PathBuf, config: FitConfig) -> Result<()> {
    let processor = ImageProcessor::new(config);

    match processor
        .transform(&input)
        .with_context(|| format!("Failed to transform {}", input.display()))?
    {
        Some(result) if result.path == input => {
            println!(
                "Left unchanged: {} ({}x{})",
                result.path.display(),
                result.width,
                result.height
            );
        }
        Some(result) => {
            println!(
                "Saved {} ({}x{}) to: {}",
                result.file_name,
                result.width,
                result.height,
                result.path.display()
            );
        }
        None => {
            println!("Unsupported image format, nothing to do: {}", input.display());
        }
    }

    Ok(())
}

fn process_batch(
    input: PathBuf,
    config: FitConfig,
    recursive: bool,
    threads: usize,
    no_progress: bool,
) -> Result<()> {
    let processor = BatchProcessor::new(config, threads)?.with_progress(!no_progress);

    let stats = processor
        .process_directory(&input, recursive)
        .with_context(|| format!("Failed to process directory {}", input.display()))?;

    println!(
        "Batch processing complete: {} transformed, {} left unchanged, {} unsupported, {} earlier outputs excluded",
        stats.transformed_count,
        stats.skipped_count,
        stats.unsupported_count,
        stats.excluded_count
    );

    if !stats.errors.is_empty() {
        for (path, error) in &stats.errors {
            eprintln!("  {}: {}", path, error);
        }
        bail!("{} images failed", stats.errors.len());
    }

    Ok(())
}

fn process_plan(width: u32, height: u32, config: &FitConfig) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("Dimensions must be greater than zero");
    }

    let geometry = plan(
        width,
        height,
        config.min_size,
        config.max_size,
        config.dest_aspect,
    );
    print_plan(&geometry);
    Ok(())
}

fn process_info(input: PathBuf, config: FitConfig) -> Result<()> {
    let processor = ImageProcessor::new(config);

    let file_size = std::fs::metadata(&input)
        .with_context(|| format!("Cannot read {}", input.display()))?
        .len();

    let Some((metadata, plan)) = processor
        .inspect(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?
    else {
        println!("Unsupported image format: {}", input.display());
        return Ok(());
    };

    let aspect_ratio = calculate_aspect_ratio(metadata.width, metadata.height);

    println!("=== Image Information ===");
    println!("File: {}", input.display());
    println!("Size: {}", format_file_size(file_size));
    println!("Dimensions: {} x {} pixels", metadata.width, metadata.height);
    println!("Aspect Ratio: {:.2}:1 ({:.4})", aspect_ratio, aspect_ratio);
    println!("Format: {}", metadata.format);
    println!();
    print_plan(&plan);

    Ok(())
}

fn print_plan(plan: &TransformPlan) {
    println!("=== Plan ===");
    match plan {
        TransformPlan::Skip => println!("Small enough on both sides, left unchanged"),
        TransformPlan::Apply(p) => {
            println!(
                "Crop: {} x {} at ({}, {})",
                p.crop.width, p.crop.height, p.crop.x, p.crop.y
            );
            println!("Effective aspect: {:.4}", p.effective_aspect);
            println!("Output: {} x {}", p.output_width, p.output_height);
        }
    }
}
