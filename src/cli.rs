//! Command-line argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Convert MNIST IDX files to TFRecord and inspect the result
#[derive(Parser, Debug)]
#[command(name = "mnist-records")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert the train and test splits to TFRecord files
    Convert {
        /// Directory holding the gzip-compressed IDX files
        #[arg(long = "data-dir", default_value = "MNIST_data")]
        data_dir: PathBuf,

        /// Directory the .tfrecords files are written to
        #[arg(long = "output-dir", default_value = ".")]
        output_dir: PathBuf,

        /// Leading train examples to write as a separate validation split
        #[arg(long = "validation-size", default_value_t = 0)]
        validation_size: usize,
    },

    /// Read a TFRecord file back and summarize it
    Inspect {
        /// TFRecord file to read
        file: PathBuf,

        /// Batch size used for the batch count
        #[arg(long = "batch-size", default_value_t = 100)]
        batch_size: usize,

        /// Shuffle seed (random if omitted)
        #[arg(long = "seed")]
        seed: Option<u64>,
    },
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
