use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub capture: CaptureConfig,
    pub overlay: OverlayConfig,
}

impl AppConfig {
    /// Reads a JSON configuration file. Missing sections and fields fall back
    /// to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// What happens to previously captured chunks when a new recording starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkRetention {
    /// Each recording starts from an empty chunk sequence.
    #[default]
    ResetOnStart,
    /// Chunks keep accumulating across start/stop cycles.
    Accumulate,
}

/// Configuration specific to the capture subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub mime_type: String,
    pub retention: ChunkRetention,
    /// Zero-length chunks are dropped instead of stored.
    pub skip_empty_chunks: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            mime_type: "video/webm".to_string(),
            retention: ChunkRetention::default(),
            skip_empty_chunks: true,
        }
    }
}

/// Layout parameters for the measurement overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub marker_radius: f64,
    pub label_offset: f64,
    pub label_precision: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            marker_radius: 8.0,
            label_offset: 10.0,
            label_precision: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.capture.mime_type, "video/webm");
        assert_eq!(config.capture.retention, ChunkRetention::ResetOnStart);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = AppConfig::from_json(
            r#"{ "capture": { "retention": "accumulate" }, "overlay": { "label_precision": 1 } }"#,
        )
        .unwrap();

        assert_eq!(config.capture.retention, ChunkRetention::Accumulate);
        assert!(config.capture.skip_empty_chunks);
        assert_eq!(config.overlay.label_precision, 1);
        assert_eq!(config.overlay.marker_radius, 8.0);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = AppConfig::from_json("{ capture").unwrap_err();
        assert!(matches!(err, crate::AnnotatorError::Json(_)));
    }
}
