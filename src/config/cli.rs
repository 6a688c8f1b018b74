use crate::config::toml_config::{MovieFilter, MovieFilterConfig};
use crate::utils::error::{JobError, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "small-mapred")]
#[command(about = "MapReduce-style batch jobs over tab-separated text streams")]
pub struct CliConfig {
    #[command(subcommand)]
    pub job: JobCommand,

    /// Read input lines from a file instead of stdin.
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Write the report to a file instead of stdout.
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// Average transaction amount per user plus anomaly flags.
    TransactionsReduce,
    /// Per-language movie counts plus filtered-movie details.
    MoviesReduce,
    /// Filter movie rows and seed per-language counts for movies-reduce.
    MoviesMap(MovieFilterArgs),
}

#[derive(Debug, Args)]
pub struct MovieFilterArgs {
    /// Director name to match exactly.
    #[arg(required_unless_present = "config")]
    pub director: Option<String>,

    /// Release year to match exactly.
    #[arg(required_unless_present = "config")]
    pub year: Option<String>,

    /// Minimum rating, inclusive.
    #[arg(required_unless_present = "config")]
    pub min_rating: Option<f64>,

    /// Load the filter from a TOML file instead of positional arguments.
    #[arg(long, conflicts_with_all = ["director", "year", "min_rating"])]
    pub config: Option<PathBuf>,
}

impl MovieFilterArgs {
    pub fn resolve(&self) -> Result<MovieFilter> {
        if let Some(path) = &self.config {
            return Ok(MovieFilterConfig::from_file(path)?.filter);
        }
        match (&self.director, &self.year, self.min_rating) {
            (Some(director), Some(year), Some(min_rating)) => Ok(MovieFilter {
                director: director.clone(),
                year: year.clone(),
                min_rating,
            }),
            _ => Err(JobError::ConfigError {
                message: "director, year and min_rating are required unless --config is given"
                    .to_string(),
            }),
        }
    }
}
