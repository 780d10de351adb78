//! Run configuration shared by every engine.

use serde::{Deserialize, Serialize};

/// Configuration for one algorithm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Whether to record steps at all. When disabled the engines still
    /// compute their result but return an empty step log.
    pub trace_enabled: bool,
    /// Whether steps carry a state snapshot. Default: true.
    pub snapshots_enabled: bool,
    /// Hard cap on recorded steps. Default: 100_000.
    pub max_steps: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            trace_enabled: true,
            snapshots_enabled: true,
            max_steps: 100_000,
        }
    }
}

impl RunConfig {
    /// A configuration that records nothing; used when only the result matters.
    pub fn untraced() -> Self {
        RunConfig {
            trace_enabled: false,
            ..RunConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_record_everything() {
        let config = RunConfig::default();
        assert!(config.trace_enabled);
        assert!(config.snapshots_enabled);
        assert_eq!(config.max_steps, 100_000);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"max_steps": 10}"#).unwrap();
        assert_eq!(config.max_steps, 10);
        assert!(config.trace_enabled);
    }

    #[test]
    fn untraced_disables_recording_only() {
        let config = RunConfig::untraced();
        assert!(!config.trace_enabled);
        assert!(config.snapshots_enabled);
    }
}
