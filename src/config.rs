//! Configuration types for tflm-rs.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Model configuration.
    #[serde(default)]
    pub model: ModelConfig,

    /// Tensor arena configuration.
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Model configuration.
#[derive(Debug, Default, Deserialize)]
pub struct ModelConfig {
    /// Path to the .tflite model file.
    #[serde(default)]
    pub path: Option<String>,
}

/// Tensor arena configuration.
#[derive(Debug, Deserialize)]
pub struct ArenaConfig {
    /// Arena size in bytes. Must cover the model's tensors and
    /// activations; the planner reports actual usage after load.
    #[serde(default = "default_arena_size")]
    pub size_bytes: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            size_bytes: default_arena_size(),
        }
    }
}

fn default_arena_size() -> usize {
    8 * 1024
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> crate::error::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.model.path.is_none());
        assert_eq!(config.arena.size_bytes, 8 * 1024);
    }

    #[test]
    fn test_partial_yaml() {
        let config = Config::from_yaml_str("arena:\n  size_bytes: 2048\n").unwrap();
        assert_eq!(config.arena.size_bytes, 2048);
        assert!(config.model.path.is_none());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "model:\n  path: models/sine.tflite\narena:\n  size_bytes: 4096\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.model.path.as_deref(), Some("models/sine.tflite"));
        assert_eq!(config.arena.size_bytes, 4096);
    }
}
