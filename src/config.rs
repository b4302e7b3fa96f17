use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Tunables for the sync engine and its GStreamer players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Scrub drift below this is left alone while paused.
    pub drift_tolerance_ms: u64,
    /// Host refresh interval used by the preview loop.
    pub tick_interval_ms: u64,
    pub probe_timeout_secs: u64,
    pub probe_cache_size: usize,
    pub probe_sources: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drift_tolerance_ms: 50,
            tick_interval_ms: 16,
            probe_timeout_secs: 5,
            probe_cache_size: 64,
            probe_sources: true,
        }
    }
}

impl EngineConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn drift_tolerance_secs(&self) -> f64 {
        self.drift_tolerance_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.drift_tolerance_secs(), 0.05);
        assert_eq!(config.tick_interval_ms, 16);
        assert!(config.probe_sources);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "driftToleranceMs": 80, "probeSources": false }}"#).unwrap();
        let config = EngineConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.drift_tolerance_ms, 80);
        assert!(!config.probe_sources);
        assert_eq!(config.probe_cache_size, 64);
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = EngineConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, SyncError::Json(_)));
    }
}
