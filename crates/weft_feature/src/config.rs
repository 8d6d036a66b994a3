//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Limits shared by the reader and the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of frames on the feature stack.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    4096
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }

    /// Sets the maximum stack depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = EngineConfig::new();
        assert_eq!(config.max_depth, 4096);
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_from_empty_json() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_depth, 4096);
    }

    #[test]
    fn test_config_from_json() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(config.max_depth, 8);
    }

    #[test]
    fn test_config_with_max_depth() {
        assert_eq!(EngineConfig::new().with_max_depth(3).max_depth, 3);
    }
}
