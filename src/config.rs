//! Engine configuration
//!
//! Settings that change engine behavior at runtime. Currently the only
//! knob is memory-saver mode, which disables physical rollback of repairs
//! (history restoration is skipped to avoid keeping restore state hot).

use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// When set, `rollback_all_repairs` becomes a no-op (default: false)
    #[serde(default = "default_memory_saver")]
    pub memory_saver: bool,
}

fn default_memory_saver() -> bool {
    false
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memory_saver: default_memory_saver(),
        }
    }
}

impl EngineConfig {
    /// Config with memory-saver mode enabled
    pub fn memory_saver() -> Self {
        Self { memory_saver: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(!config.memory_saver);
    }

    #[test]
    fn test_memory_saver_preset() {
        let config = EngineConfig::memory_saver();
        assert!(config.memory_saver);
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.memory_saver);
    }

    #[test]
    fn test_roundtrip() {
        let config = EngineConfig::memory_saver();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert!(back.memory_saver);
    }
}
