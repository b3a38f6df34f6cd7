//! Error types for tflm-rs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tflm-rs operations.
pub type Result<T> = std::result::Result<T, TflmError>;

/// Errors that can occur while loading or running a model.
#[derive(Debug, Error)]
pub enum TflmError {
    /// The model's embedded schema version does not match the engine's.
    #[error("Model schema version mismatch: model has {found}, engine expects {expected}")]
    SchemaMismatch {
        /// Version embedded in the model buffer.
        found: u32,
        /// Version the engine was compiled against.
        expected: u32,
    },

    /// Model loading failed.
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    /// Inference failed.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// A flat tensor element index was out of range.
    #[error("{tensor} tensor index out of range: {index} (tensor holds {len} elements)")]
    IndexOutOfRange {
        /// Which tensor was indexed ("input" or "output").
        tensor: &'static str,
        /// The offending element index.
        index: usize,
        /// Number of f32 elements the tensor holds.
        len: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

impl TflmError {
    /// Create a model load error.
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create an inference error.
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TflmError::SchemaMismatch {
            found: 7,
            expected: 3,
        };
        assert_eq!(
            format!("{}", err),
            "Model schema version mismatch: model has 7, engine expects 3"
        );

        let err = TflmError::IndexOutOfRange {
            tensor: "input",
            index: 9999,
            len: 1,
        };
        assert_eq!(
            format!("{}", err),
            "input tensor index out of range: 9999 (tensor holds 1 elements)"
        );

        let err = TflmError::model_load("arena too small");
        assert_eq!(format!("{}", err), "Model loading failed: arena too small");

        let err = TflmError::FileNotFound(PathBuf::from("/path/to/model.tflite"));
        assert_eq!(format!("{}", err), "File not found: /path/to/model.tflite");
    }
}
