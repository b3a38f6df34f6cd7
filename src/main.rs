//! CLI entry point for tflm-rs.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tflm_rs::cli::{Cli, Commands};
use tflm_rs::config::Config;
use tflm_rs::inference::{Engine, MicroEngine};
use tflm_rs::{ModelSession, TflmError};

/// Get the runtime revision recorded by the build script.
fn runtime_version() -> &'static str {
    option_env!("TFLM_RUNTIME_VERSION").unwrap_or("unknown")
}

/// Read the model file, checking existence first for a clearer error.
fn read_model(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(TflmError::FileNotFound(path.to_path_buf()).into());
    }
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read model: {}", path.display()))?;
    Ok(bytes)
}

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Infer {
            model,
            input,
            arena_size,
            format,
            config,
        } => {
            // Load optional config
            let config = if let Some(config_path) = config {
                Config::from_yaml_file(&config_path)
                    .with_context(|| format!("Failed to load config: {}", config_path.display()))?
            } else {
                Config::default()
            };

            // CLI flags win over the config file
            let model_path = model
                .or_else(|| config.model.path.as_ref().map(PathBuf::from))
                .ok_or_else(|| {
                    TflmError::config("No model path given (use --model or the config file)")
                })?;
            let arena_size = arena_size.unwrap_or(config.arena.size_bytes);

            // Load model
            info!("Loading model: {}", model_path.display());
            let model_bytes = read_model(&model_path)?;
            let mut arena = vec![0u8; arena_size];
            let engine = MicroEngine::new();
            let mut session = ModelSession::load(&engine, &model_bytes, &mut arena)?;
            info!(
                "Model loaded: {} input elements, {} output elements, {}/{} arena bytes used",
                session.input_len(),
                session.output_len(),
                session.arena_used_bytes(),
                arena_size
            );

            // Load input data
            info!("Loading input: {}", input.display());
            let input_json: Value = serde_json::from_str(
                &fs::read_to_string(&input)
                    .with_context(|| format!("Failed to read input: {}", input.display()))?,
            )?;

            // Parse input elements from JSON
            // Expected format: { "data": [...] }
            let data: Vec<f32> = input_json["data"]
                .as_array()
                .context("Input must have 'data' array")?
                .iter()
                .map(|v| v.as_f64().unwrap_or(0.0) as f32)
                .collect();
            session.set_inputs(&data)?;

            // Run inference
            info!("Running inference...");
            let start = Instant::now();
            session.invoke()?;
            let latency_ms = start.elapsed().as_secs_f64() * 1e3;
            info!("Inference complete in {:.2}ms", latency_ms);

            // Format output
            let output = serde_json::json!({
                "num_outputs": session.output_len(),
                "latency_ms": latency_ms,
                "arena_used_bytes": session.arena_used_bytes(),
                "outputs": session.outputs(),
            });

            if format == "pretty" {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", serde_json::to_string(&output)?);
            }
        }

        Commands::Info { model, arena_size } => {
            let arena_size = arena_size.unwrap_or_else(|| Config::default().arena.size_bytes);

            println!("tflm-rs v{}", env!("CARGO_PKG_VERSION"));
            println!("runtime: {}", runtime_version());
            println!();
            println!("Model: {}", model.display());

            // Load the model to verify it works and report its layout
            let model_bytes = read_model(&model)?;
            let mut arena = vec![0u8; arena_size];
            let engine = MicroEngine::new();
            let session = ModelSession::load(&engine, &model_bytes, &mut arena)?;

            println!("Schema version: {}", engine.expected_schema_version());
            println!("Input elements: {}", session.input_len());
            println!("Output elements: {}", session.output_len());
            println!(
                "Arena used: {}/{} bytes",
                session.arena_used_bytes(),
                arena_size
            );
            println!("Status: OK (model loaded successfully)");
        }
    }

    Ok(())
}
