//! Command-line interface for tflm-rs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run TensorFlow Lite Micro models from Rust.
#[derive(Parser, Debug)]
#[command(name = "tflm-rs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a model, fill its input tensor from a JSON file, invoke, and
    /// print the outputs.
    Infer {
        /// Path to the .tflite model file.
        ///
        /// Falls back to the config file's model path when omitted.
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Path to input data file (JSON with a "data" array of floats).
        #[arg(short, long)]
        input: PathBuf,

        /// Tensor arena size in bytes (overrides the config file).
        #[arg(short, long)]
        arena_size: Option<usize>,

        /// Output format (json, pretty).
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Path to optional YAML config file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Load a model and print its schema version, tensor sizes, and
    /// arena usage.
    Info {
        /// Path to the .tflite model file.
        #[arg(short, long)]
        model: PathBuf,

        /// Tensor arena size in bytes.
        #[arg(short, long)]
        arena_size: Option<usize>,
    },
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
