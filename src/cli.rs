// pixfit/src/cli.rs
use crate::core::{FitConfig, ResizeAlgorithm, DEFAULT_ASPECT, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pixfit", version, about = "Crop images to an aspect ratio and bound their size")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub fit: FitArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FitArgs {
    /// Images at or below this size on both sides are left untouched
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_SIZE)]
    pub min_size: u32,

    /// Longest side of the output image
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_SIZE)]
    pub max_size: u32,

    /// Target width / height ratio of the crop
    #[arg(long, global = true, default_value_t = DEFAULT_ASPECT)]
    pub aspect: f64,

    /// Resampling filter
    #[arg(long, global = true, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub algorithm: Algorithm,
}

impl FitArgs {
    pub fn to_config(&self) -> FitConfig {
        FitConfig {
            min_size: self.min_size,
            max_size: self.max_size,
            dest_aspect: self.aspect,
            algorithm: self.algorithm.into(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crop and scale a single image next to the original
    Fit {
        /// Source image (GIF, JPEG, PNG or BMP)
        input: PathBuf,
    },

    /// Crop and scale every image in a directory
    Batch {
        /// Directory to scan
        input: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Worker threads (0 = one per core)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Print the crop and output geometry for given dimensions
    Plan { width: u32, height: u32 },

    /// Show image details and the geometry `fit` would apply
    Info { input: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_config_defaults() {
        let cli = Cli::parse_from(["pixfit", "fit", "photo.jpg"]);
        let config = cli.fit.to_config();
        assert_eq!(config.min_size, FitConfig::default().min_size);
        assert_eq!(config.max_size, FitConfig::default().max_size);
        assert_eq!(config.dest_aspect, FitConfig::default().dest_aspect);
        assert!(matches!(cli.command, Commands::Fit { .. }));
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::parse_from([
            "pixfit",
            "batch",
            "shots",
            "--recursive",
            "--max-size",
            "800",
            "--aspect",
            "1.5",
            "--algorithm",
            "bicubic",
        ]);
        let config = cli.fit.to_config();
        assert_eq!(config.max_size, 800);
        assert_eq!(config.dest_aspect, 1.5);
        assert_eq!(config.algorithm, ResizeAlgorithm::Bicubic);
        assert!(matches!(
            cli.command,
            Commands::Batch {
                recursive: true,
                threads: 0,
                ..
            }
        ));
    }
}
