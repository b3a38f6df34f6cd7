//! tflm-rs: Run TensorFlow Lite Micro models from Rust.
//!
//! This crate provides a small, safe interface over a microcontroller
//! inference runtime: load a `.tflite` model into a caller-owned tensor
//! arena, write scalar inputs, invoke, and read scalar outputs. The
//! runtime itself (model parsing, memory planning, kernels) sits behind
//! the [`inference::Engine`] trait; the production implementation binds
//! it through a C++ bridge.
//!
//! # Features
//!
//! - **runtime**: Build and link the C++ bridge against an installed
//!   tflite-micro runtime. Without it the crate exposes only the traits
//!   and session, which is enough to test callers against fake engines.
//!
//! # Example
//!
//! ```ignore
//! use tflm_rs::inference::MicroEngine;
//! use tflm_rs::ModelSession;
//!
//! let model_bytes = std::fs::read("model.tflite")?;
//! let mut arena = vec![0u8; 8 * 1024];
//!
//! // Load model and allocate tensors in the arena
//! let engine = MicroEngine::new();
//! let mut session = ModelSession::load(&engine, &model_bytes, &mut arena)?;
//!
//! // Write inputs, run, read outputs
//! session.set_input(3.0, 0)?;
//! session.invoke()?;
//! println!("output: {}", session.output(0)?);
//! ```
//!
//! # Building
//!
//! The `runtime` feature requires a tflite-micro checkout with its static
//! library built. The build script locates it via `TFLM_DIR`.
//!
//! ```bash
//! # Traits and session only (no native runtime needed)
//! cargo build
//!
//! # With the real runtime
//! TFLM_DIR=~/src/tflite-micro cargo build --features runtime
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod inference;
pub mod session;

// Re-export commonly used types
pub use error::{Result, TflmError};
pub use inference::{Engine, Interpreter};
#[cfg(feature = "runtime")]
pub use inference::MicroEngine;
pub use session::ModelSession;
